//! A left-leaning red-black tree.
//!
//! This is a red-black tree with one extra rule: red links only ever lean left. Each node then
//! maps onto exactly one node of a 2-3 tree, which keeps the fix-up logic down to three local
//! steps (rotate left, rotate right, flip colors) applied on the way back up from a recursive
//! insert or delete.
//!
//! # Examples
//!
//! ```
//! use bintree::compare::natural;
//! use bintree::llrb::LlrbNode;
//! use bintree::node::{Color, Meta, Node, NodeRef};
//!
//! let mut root = LlrbNode::default();
//! for x in 1..=3 {
//!     root = root.add(x, &natural).0;
//! }
//!
//! let top = root.root().unwrap();
//! assert_eq!(*top.value(), 2);
//! assert_eq!(top.meta(), Meta::Color(Color::Black));
//! ```

use std::cmp::Ordering;
use std::mem;

use crate::compare::Comparator;
use crate::node::{Action, Color, Meta, Node, NodeRef};

/// The root of a left-leaning red-black subtree.
#[derive(Debug, Clone)]
pub enum LlrbNode<T> {
    /// The empty subtree. It counts as black.
    Leaf,
    /// A node with a value, a color and two (possibly empty) children.
    Branch(Box<Branch<T>>),
}

/// A non-empty node of a left-leaning red-black tree.
#[derive(Debug, Clone)]
pub struct Branch<T> {
    value: T,
    /// The color of the link from the parent to this node.
    color: Color,
    left: LlrbNode<T>,
    right: LlrbNode<T>,
}

impl<T> Default for LlrbNode<T> {
    fn default() -> Self {
        Self::Leaf
    }
}

impl<T> LlrbNode<T> {
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

    fn is_red(&self) -> bool {
        self.branch().is_some_and(|b| b.color.is_red())
    }

    fn left_is_red(&self) -> bool {
        self.branch().is_some_and(|b| b.left.is_red())
    }

    fn insert<C>(self, value: T, cmp: &C) -> (Box<Branch<T>>, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        let mut n = match self {
            Self::Leaf => {
                let leaf = Box::new(Branch {
                    value,
                    color: Color::Red,
                    left: Self::Leaf,
                    right: Self::Leaf,
                });
                return (leaf, Action::Added);
            }
            Self::Branch(n) => n,
        };
        let action = match cmp.compare(&value, &n.value) {
            Ordering::Less => {
                let (left, action) = mem::take(&mut n.left).insert(value, cmp);
                n.left = Self::Branch(left);
                action
            }
            Ordering::Equal => {
                n.value = value;
                return (n, Action::Updated);
            }
            Ordering::Greater => {
                let (right, action) = mem::take(&mut n.right).insert(value, cmp);
                n.right = Self::Branch(right);
                action
            }
        };
        (n.balance(), action)
    }
}

impl<T> Branch<T> {
    /// ```text
    ///     h                  x
    ///    / \                / \
    ///   a   x   rotate ->  h   c
    ///      / \            / \
    ///     b   c          a   b
    /// ```
    ///
    /// `x` takes over the color of `h` and `h` turns red.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut x) = self.right.take_branch() else {
            unreachable!("rotating left requires a right child");
        };
        log::trace!("llrb: rotate left");

        self.right = mem::take(&mut x.left);
        x.color = self.color;
        self.color = Color::Red;
        x.left = LlrbNode::Branch(self);
        x
    }

    /// The mirror image of [`Branch::rotate_left`].
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut x) = self.left.take_branch() else {
            unreachable!("rotating right requires a left child");
        };
        log::trace!("llrb: rotate right");

        self.left = mem::take(&mut x.right);
        x.color = self.color;
        self.color = Color::Red;
        x.right = LlrbNode::Branch(self);
        x
    }

    /// Inverts the color of this node and both of its children. Splits a temporary 4-node on
    /// the way up, or joins one on the way down.
    fn flip_colors(&mut self) {
        self.color = !self.color;
        for child in [&mut self.left, &mut self.right] {
            if let LlrbNode::Branch(c) = child {
                c.color = !c.color;
            }
        }
    }

    /// Restores the left-leaning shape after an insertion below this node.
    fn balance(self: Box<Self>) -> Box<Self> {
        let mut h = self;
        if h.right.is_red() && !h.left.is_red() {
            h = h.rotate_left();
        }
        if h.left.is_red() && h.left.left_is_red() {
            h = h.rotate_right();
        }
        if h.left.is_red() && h.right.is_red() {
            h.flip_colors();
        }
        h
    }

    /// Like [`Branch::balance`] but also straightens a right-leaning red link sitting next to a
    /// red left link, which deletion can leave behind.
    fn fix_up(self: Box<Self>) -> Box<Self> {
        let mut h = self;
        if h.right.is_red() {
            h = h.rotate_left();
        }
        if h.left.is_red() && h.left.left_is_red() {
            h = h.rotate_right();
        }
        if h.left.is_red() && h.right.is_red() {
            h.flip_colors();
        }
        h
    }

    /// Makes the left child or one of its children red, borrowing from the right sibling when
    /// it has a spare red node.
    fn move_red_left(self: Box<Self>) -> Box<Self> {
        let mut h = self;
        h.flip_colors();
        if h.right.left_is_red() {
            log::trace!("llrb: borrow from the right sibling");
            let Some(right) = h.right.take_branch() else {
                unreachable!("a red grandchild has a parent");
            };
            h.right = LlrbNode::Branch(right.rotate_right());
            h = h.rotate_left();
            h.flip_colors();
        }
        h
    }

    /// Makes the right child or one of its children red, borrowing from the left sibling when
    /// it has a spare red node.
    fn move_red_right(self: Box<Self>) -> Box<Self> {
        let mut h = self;
        h.flip_colors();
        if h.left.left_is_red() {
            log::trace!("llrb: borrow from the left sibling");
            h = h.rotate_right();
            h.flip_colors();
        }
        h
    }

    /// Removes the smallest node of this subtree. Returns what's left and the removed value.
    fn delete_min(self: Box<Self>) -> (LlrbNode<T>, T) {
        let mut h = self;
        if matches!(h.left, LlrbNode::Leaf) {
            let Branch { value, right, .. } = *h;
            return (right, value);
        }
        if !h.left.is_red() && !h.left.left_is_red() {
            h = h.move_red_left();
        }
        let Some(left) = h.left.take_branch() else {
            unreachable!("moving red left keeps a left child");
        };
        let (left, min) = left.delete_min();
        h.left = left;
        (LlrbNode::Branch(h.fix_up()), min)
    }

    /// Removes `value`, which must be somewhere in this subtree.
    fn delete<C>(self: Box<Self>, value: &T, cmp: &C) -> LlrbNode<T>
    where
        C: Comparator<T> + ?Sized,
    {
        let mut h = self;
        if cmp.compare(value, &h.value) == Ordering::Less {
            if !h.left.is_red() && !h.left.left_is_red() {
                h = h.move_red_left();
            }
            let Some(left) = h.left.take_branch() else {
                unreachable!("a smaller value lives on the left");
            };
            h.left = left.delete(value, cmp);
        } else {
            if h.left.is_red() {
                h = h.rotate_right();
            }
            if cmp.compare(value, &h.value) == Ordering::Equal && matches!(h.right, LlrbNode::Leaf)
            {
                // A node without a right child has no left child either.
                return LlrbNode::Leaf;
            }
            if !h.right.is_red() && !h.right.left_is_red() {
                h = h.move_red_right();
            }
            let Some(right) = h.right.take_branch() else {
                unreachable!("a value at or above this node keeps a right child");
            };
            if cmp.compare(value, &h.value) == Ordering::Equal {
                let (right, successor) = right.delete_min();
                h.value = successor;
                h.right = right;
            } else {
                h.right = right.delete(value, cmp);
            }
        }
        LlrbNode::Branch(h.fix_up())
    }
}

impl<T> Node<T> for LlrbNode<T> {
    type Ref<'a> = &'a Branch<T> where Self: 'a;

    fn add<C>(self, value: T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        let (mut root, action) = self.insert(value, cmp);
        root.color = Color::Black;
        (Self::Branch(root), action)
    }

    fn remove<C>(mut self, value: &T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        if self.search(value, cmp).is_none() {
            return (self, Action::Unchanged);
        }
        let Some(mut root) = self.take_branch() else {
            unreachable!("a tree holding a value isn't empty");
        };

        if !root.left.is_red() && !root.right.is_red() {
            root.color = Color::Red;
        }
        let mut root = root.delete(value, cmp);
        if let Self::Branch(r) = &mut root {
            r.color = Color::Black;
        }
        (root, Action::Removed)
    }

    fn root(&self) -> Option<Self::Ref<'_>> {
        self.branch()
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
        Meta::Color(self.color)
    }
}

/// Checks the left-leaning red-black invariants: a black root, no red right links, no two reds
/// in a row and the same number of black links on every path.
#[cfg(test)]
pub(crate) fn assert_llrb<T>(root: &LlrbNode<T>) {
    fn black_height<T>(node: &LlrbNode<T>) -> usize {
        let Some(n) = node.branch() else {
            return 1;
        };
        assert!(!n.right.is_red(), "red right link");
        if n.color.is_red() {
            assert!(!n.left.is_red(), "two red links in a row");
        }
        let left = black_height(&n.left);
        let right = black_height(&n.right);
        assert_eq!(left, right, "black height mismatch");
        left + usize::from(!n.color.is_red())
    }

    assert!(!root.is_red(), "red root");
    black_height(root);
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;
    use crate::test::{agrees_with_model, assert_sorted};

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            agrees_with_model(&ops, |root: &LlrbNode<(i8, i8)>| {
                assert_sorted(root);
                assert_llrb(root);
            })
        }
    }
}
