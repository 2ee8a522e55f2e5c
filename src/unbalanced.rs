//! A plain Binary Search Tree. Nothing is done to keep it balanced so inserting values in sorted
//! order produces a linked list. It is the baseline the balanced variants are measured against.
//!
//! # Examples
//!
//! ```
//! use bintree::compare::natural;
//! use bintree::node::{Action, Node};
//! use bintree::unbalanced::BsNode;
//!
//! let root = BsNode::default();
//! let (root, action) = root.add(1, &natural);
//! assert_eq!(action, Action::Added);
//!
//! // Adding an equal value replaces it.
//! let (root, action) = root.add(1, &natural);
//! assert_eq!(action, Action::Updated);
//!
//! let (root, action) = root.remove(&1, &natural);
//! assert_eq!(action, Action::Removed);
//! assert_eq!(root.search(&1, &natural), None);
//! ```

use std::cmp::Ordering;
use std::mem;

use crate::compare::Comparator;
use crate::node::{Action, Node, NodeRef};

/// The root of an unbalanced subtree.
#[derive(Debug, Clone)]
pub enum BsNode<T> {
    /// The empty subtree.
    Leaf,
    /// A node with a value and two (possibly empty) children.
    Branch(Box<Branch<T>>),
}

/// A non-empty node of an unbalanced tree.
#[derive(Debug, Clone)]
pub struct Branch<T> {
    value: T,
    left: BsNode<T>,
    right: BsNode<T>,
}

impl<T> Default for BsNode<T> {
    fn default() -> Self {
        Self::Leaf
    }
}

impl<T> Drop for Branch<T> {
    // A degenerate tree is as deep as it is big. Children go on a heap stack, not the call stack.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        for child in [mem::take(&mut self.left), mem::take(&mut self.right)] {
            if let BsNode::Branch(b) = child {
                stack.push(b);
            }
        }
        while let Some(mut b) = stack.pop() {
            for child in [mem::take(&mut b.left), mem::take(&mut b.right)] {
                if let BsNode::Branch(c) = child {
                    stack.push(c);
                }
            }
        }
    }
}

impl<T> BsNode<T> {
    fn new(value: T) -> Self {
        Self::Branch(Box::new(Branch {
            value,
            left: Self::Leaf,
            right: Self::Leaf,
        }))
    }

    fn branch(&self) -> Option<&Branch<T>> {
        match self {
            Self::Leaf => None,
            Self::Branch(b) => Some(b),
        }
    }

    /// Walks down to the node holding a value equal to `value`, or to the empty subtree where it
    /// would be inserted.
    fn slot<C>(&mut self, value: &T, cmp: &C) -> &mut Self
    where
        C: Comparator<T> + ?Sized,
    {
        let mut cursor = self;
        loop {
            let ordering = match &*cursor {
                Self::Leaf => None,
                Self::Branch(n) => Some(cmp.compare(value, &n.value)),
            };
            cursor = match (ordering, cursor) {
                (Some(Ordering::Less), Self::Branch(n)) => &mut n.left,
                (Some(Ordering::Greater), Self::Branch(n)) => &mut n.right,
                (_, found) => return found,
            };
        }
    }

    /// The subtree holding the smallest value below a non-empty `self`.
    fn leftmost(&mut self) -> &mut Self {
        let mut cursor = self;
        loop {
            let descend = matches!(&*cursor, Self::Branch(n) if matches!(n.left, Self::Branch(_)));
            cursor = match (descend, cursor) {
                (true, Self::Branch(n)) => &mut n.left,
                (_, found) => return found,
            };
        }
    }

    /// Removes the top node of this subtree and splices in its replacement.
    fn unlink(&mut self) {
        let Self::Branch(n) = self else {
            return;
        };
        if matches!(n.left, Self::Leaf) {
            *self = mem::take(&mut n.right);
        } else if matches!(n.right, Self::Leaf) {
            *self = mem::take(&mut n.left);
        } else {
            // Two children: the in-order successor's value moves up and its node, which has no
            // left child, goes instead.
            let successor = n.right.leftmost();
            if let Self::Branch(s) = successor {
                mem::swap(&mut n.value, &mut s.value);
            }
            successor.unlink();
        }
    }
}

impl<T> Node<T> for BsNode<T> {
    type Ref<'a> = &'a Branch<T> where Self: 'a;

    fn add<C>(mut self, value: T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        let slot = self.slot(&value, cmp);
        let action = match slot {
            Self::Leaf => {
                *slot = Self::new(value);
                Action::Added
            }
            Self::Branch(n) => {
                n.value = value;
                Action::Updated
            }
        };
        (self, action)
    }

    fn remove<C>(mut self, value: &T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        let slot = self.slot(value, cmp);
        let action = match slot {
            Self::Leaf => Action::Unchanged,
            Self::Branch(_) => {
                slot.unlink();
                Action::Removed
            }
        };
        (self, action)
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
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;
    use crate::test::{agrees_with_model, assert_sorted};

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            agrees_with_model(&ops, |root: &BsNode<(i8, i8)>| assert_sorted(root))
        }
    }
}
