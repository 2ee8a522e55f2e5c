//! A self-balancing Binary Search Tree (specifically, an AVL tree).
//!
//! Every node caches the height of the subtree below it. After every insertion or deletion the
//! nodes on the path back up to the root recompute their height and, if one of their subtrees has
//! grown two levels taller than the other, rotate to fix it. This keeps the height of the tree
//! within `~1.44 lg N`.
//!
//! # Examples
//!
//! ```
//! use bintree::compare::natural;
//! use bintree::node::Node;
//! use bintree::avl::AvlNode;
//!
//! let mut root = AvlNode::default();
//! for x in 1..=7 {
//!     root = root.add(x, &natural).0;
//! }
//!
//! // Sorted inserts would make a list out of an unbalanced tree.
//! assert_eq!(root.height(), 3);
//! ```

use std::cmp::Ordering;
use std::mem;

use crate::compare::Comparator;
use crate::node::{Action, Meta, Node, NodeRef};

/// The root of an AVL subtree.
#[derive(Debug, Clone)]
pub enum AvlNode<T> {
    /// The empty subtree. It has a height of 0.
    Leaf,
    /// A node with a value and two (possibly empty) children.
    Branch(Box<Branch<T>>),
}

/// A non-empty node of an AVL tree.
#[derive(Debug, Clone)]
pub struct Branch<T> {
    value: T,
    left: AvlNode<T>,
    right: AvlNode<T>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<T> Default for AvlNode<T> {
    fn default() -> Self {
        Self::Leaf
    }
}

impl<T> AvlNode<T> {
    fn new(value: T) -> Self {
        Self::Branch(Box::new(Branch {
            value,
            left: Self::Leaf,
            right: Self::Leaf,
            height: 1,
        }))
    }

    fn branch(&self) -> Option<&Branch<T>> {
        match self {
            Self::Leaf => None,
            Self::Branch(b) => Some(b),
        }
    }

    fn take_branch(&mut self) -> Option<Box<Branch<T>>> {
        match mem::take(self) {
            Self::Leaf => None,
            Self::Branch(b) => Some(b),
        }
    }
}

impl<T> Branch<T> {
    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
    }

    /// The difference in height between the left and right subtrees. Positive when the left
    /// subtree is taller.
    fn balance_factor(&self) -> isize {
        self.left.height() as isize - self.right.height() as isize
    }

    /// Rotate self to the left. This moves the right child up vertically and self down
    /// vertically. Used to rebalance the tree when the right child is too tall.
    ///
    /// ```text
    ///   old_root                   new_root
    ///    /    \                     /     \
    ///   x   new_root   rotate ->  old_root  z
    ///         / \                  /  \
    ///        y   z                x    y
    /// ```
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut new_root) = self.right.take_branch() else {
            unreachable!("rotating left requires a right child");
        };
        log::trace!("avl: rotate left at height {}", self.height);

        self.right = mem::take(&mut new_root.left);
        self.fix_height();

        new_root.left = AvlNode::Branch(self);
        new_root.fix_height();
        new_root
    }

    /// Rotate self to the right, the mirror image of [`Branch::rotate_left`].
    ///
    /// ```text
    ///      old_root               new_root
    ///       /     \                /     \
    ///   new_root   z   rotate ->  x    old_root
    ///    / \                              /  \
    ///   x   y                            y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut new_root) = self.left.take_branch() else {
            unreachable!("rotating right requires a left child");
        };
        log::trace!("avl: rotate right at height {}", self.height);

        self.left = mem::take(&mut new_root.right);
        self.fix_height();

        new_root.right = AvlNode::Branch(self);
        new_root.fix_height();
        new_root
    }

    /// Recomputes the height of `self` and rotates if one subtree is two levels taller than the
    /// other. Both children must already be balanced.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
    fn balance(mut self: Box<Self>) -> Box<Self> {
        self.fix_height();
        let node = match self.balance_factor() {
            -2 => {
                let Some(mut right) = self.right.take_branch() else {
                    unreachable!("a right-heavy node has a right child");
                };
                if right.balance_factor() > 0 {
                    right = right.rotate_right();
                }
                self.right = AvlNode::Branch(right);
                self.rotate_left()
            }
            2 => {
                let Some(mut left) = self.left.take_branch() else {
                    unreachable!("a left-heavy node has a left child");
                };
                if left.balance_factor() < 0 {
                    left = left.rotate_left();
                }
                self.left = AvlNode::Branch(left);
                self.rotate_right()
            }
            _ => self,
        };

        if cfg!(debug_assertions) {
            let left_height = node.left.height();
            let right_height = node.right.height();
            assert_eq!(node.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
        node
    }

    /// Removes the smallest node of this subtree, rebalancing on the way back up. Returns what's
    /// left and the removed value.
    fn remove_min(mut self: Box<Self>) -> (AvlNode<T>, T) {
        match self.left.take_branch() {
            None => {
                let Branch { value, right, .. } = *self;
                (right, value)
            }
            Some(left) => {
                let (left, min) = left.remove_min();
                self.left = left;
                (AvlNode::Branch(self.balance()), min)
            }
        }
    }
}

impl<T> Node<T> for AvlNode<T> {
    type Ref<'a> = &'a Branch<T> where Self: 'a;

    fn add<C>(self, value: T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        let mut n = match self {
            Self::Leaf => return (Self::new(value), Action::Added),
            Self::Branch(n) => n,
        };
        let action = match cmp.compare(&value, &n.value) {
            Ordering::Less => {
                let (left, action) = mem::take(&mut n.left).add(value, cmp);
                n.left = left;
                action
            }
            Ordering::Equal => {
                // The shape doesn't change so there's nothing to rebalance.
                n.value = value;
                return (Self::Branch(n), Action::Updated);
            }
            Ordering::Greater => {
                let (right, action) = mem::take(&mut n.right).add(value, cmp);
                n.right = right;
                action
            }
        };
        (Self::Branch(n.balance()), action)
    }

    fn remove<C>(self, value: &T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        let mut n = match self {
            Self::Leaf => return (Self::Leaf, Action::Unchanged),
            Self::Branch(n) => n,
        };
        let action = match cmp.compare(value, &n.value) {
            Ordering::Less => {
                let (left, action) = mem::take(&mut n.left).remove(value, cmp);
                n.left = left;
                action
            }
            Ordering::Greater => {
                let (right, action) = mem::take(&mut n.right).remove(value, cmp);
                n.right = right;
                action
            }
            Ordering::Equal => match (n.left.take_branch(), n.right.take_branch()) {
                // A lone child of an AVL node is a balanced subtree already.
                (None, None) => return (Self::Leaf, Action::Removed),
                (None, Some(child)) | (Some(child), None) => {
                    return (Self::Branch(child), Action::Removed)
                }
                (Some(left), Some(right)) => {
                    let (right, successor) = right.remove_min();
                    n.value = successor;
                    n.left = Self::Branch(left);
                    n.right = right;
                    Action::Removed
                }
            },
        };
        if action == Action::Unchanged {
            return (Self::Branch(n), action);
        }
        (Self::Branch(n.balance()), action)
    }

    fn root(&self) -> Option<Self::Ref<'_>> {
        self.branch()
    }

    fn height(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Branch(n) => n.height,
        }
    }
}

impl<'a, T> NodeRef<'a, T> for &'a Branch<T> {
    fn value(self) -> &'a T {
        &self.value
    }

    fn left(self) -> Option<Self> {
        self.left.branch()
    }

    fn right(self) -> Option<Self> {
        self.right.branch()
    }

    fn meta(self) -> Meta {
        Meta::Height(self.height)
    }
}

/// Checks the cached heights and the AVL balance of every node. Returns the height of `node`.
#[cfg(test)]
pub(crate) fn assert_avl<T>(node: &AvlNode<T>) -> usize {
    match node {
        AvlNode::Leaf => 0,
        AvlNode::Branch(n) => {
            let left = assert_avl(&n.left);
            let right = assert_avl(&n.right);
            assert_eq!(n.height, left.max(right) + 1, "stale cached height");
            assert!(left.abs_diff(right) <= 1, "unbalanced: {left} vs {right}");
            n.height
        }
    }
}
