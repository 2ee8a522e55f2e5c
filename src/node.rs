//! The contract shared by every balancing strategy.
//!
//! A [`Node`] is the root of a subtree. It might be empty (every variant has a `Leaf`-like
//! representation) and it owns everything below it. Mutations consume the old root and hand back
//! the new one together with an [`Action`] so the caller can keep count of its elements without
//! walking the tree.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Not;

use crate::compare::Comparator;

/// What a single `add` or `remove` did to a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing changed. Returned when removing a value that isn't there.
    Unchanged,
    /// A new node was created.
    Added,
    /// An existing node had its value replaced.
    Updated,
    /// A node was removed.
    Removed,
}

impl Action {
    /// Whether a new node was created.
    pub fn added(self) -> bool {
        self == Self::Added
    }

    /// Whether an existing value was replaced.
    pub fn updated(self) -> bool {
        self == Self::Updated
    }

    /// Whether a node was removed.
    pub fn removed(self) -> bool {
        self == Self::Removed
    }
}

/// The color of a node in either red-black variant. Empty subtrees count as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// A red node is glued to its parent (in 2-3-4 tree terms it is part of the parent's node).
    Red,
    /// A black node contributes to the black-height of every path through it.
    Black,
}

impl Color {
    /// Whether this is [`Color::Red`].
    pub fn is_red(self) -> bool {
        self == Self::Red
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("red"),
            Self::Black => f.write_str("black"),
        }
    }
}

/// Balancing metadata a variant keeps on each of its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meta {
    /// The unbalanced variant keeps nothing.
    None,
    /// The height of the subtree rooted here (AVL).
    Height(usize),
    /// The node's color (both red-black variants).
    Color(Color),
}

/// A read-only handle on a non-empty node, used to walk a tree without knowing its variant.
pub trait NodeRef<'a, T>: Copy {
    /// The value stored in this node.
    fn value(self) -> &'a T;

    /// The left child, if any.
    fn left(self) -> Option<Self>;

    /// The right child, if any.
    fn right(self) -> Option<Self>;

    /// Variant specific metadata, e.g. the cached height of an AVL node.
    fn meta(self) -> Meta {
        Meta::None
    }
}

/// The root of a (possibly empty) subtree in one of the balancing strategies.
///
/// `Default` must produce the empty subtree.
pub trait Node<T>: Default + Sized {
    /// A read-only handle on one of this subtree's nodes.
    type Ref<'a>: NodeRef<'a, T>
    where
        Self: 'a;

    /// Inserts `value`, replacing the stored value if `cmp` finds an equal one. Returns the new
    /// root of the subtree along with [`Action::Added`] or [`Action::Updated`].
    fn add<C>(self, value: T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized;

    /// Removes the value equal to `value`. Returns the new root of the subtree along with
    /// [`Action::Removed`], or [`Action::Unchanged`] if nothing matched.
    fn remove<C>(self, value: &T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized;

    /// The root node of this subtree or `None` if it is empty.
    fn root(&self) -> Option<Self::Ref<'_>>;

    /// Finds the stored value equal to `value`.
    fn search<C>(&self, value: &T, cmp: &C) -> Option<&T>
    where
        C: Comparator<T> + ?Sized,
    {
        let mut node = self.root();
        while let Some(n) = node {
            node = match cmp.compare(value, n.value()) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(n.value()),
                Ordering::Greater => n.right(),
            };
        }
        None
    }

    /// The smallest value in the subtree.
    fn min(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(node.value())
    }

    /// The largest value in the subtree.
    fn max(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(node.value())
    }

    /// The number of nodes on the longest path from the root to a leaf. Empty subtrees have a
    /// height of 0.
    fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Self::Ref<'_>, usize)> =
            self.root().into_iter().map(|n| (n, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().into_iter().chain(node.right()).map(|n| (n, depth + 1)));
        }
        height
    }
}
