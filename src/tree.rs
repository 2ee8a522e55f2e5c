//! The ordered container callers actually use.

use std::fmt;
use std::mem;

use crate::avl::AvlNode;
use crate::compare::{natural, CompareFn, Comparator};
use crate::error::TreeError;
use crate::llrb::LlrbNode;
use crate::node::{Action, Node};
use crate::red_black::RbNode;
use crate::render::{self, INTERVAL, TRUNK};
use crate::unbalanced::BsNode;
use crate::variant::Variant;

/// An ordered set of `T`s (or a map, with a comparator that only looks at keys) backed by one of
/// the balancing strategies in this crate.
///
/// The tree keeps count of its elements and remembers the comparator it was built with, so every
/// lookup is ordered the same way.
///
/// # Examples
///
/// ```
/// use bintree::{Action, Tree, Variant};
///
/// let mut tree = Tree::natural(Variant::RedBlack);
/// for x in [8, 5, 10, 7, 6] {
///     assert_eq!(tree.add(x), Action::Added);
/// }
///
/// assert_eq!(tree.size(), 5);
/// assert_eq!(tree.min(), Ok(&5));
/// assert_eq!(tree.max(), Ok(&10));
///
/// assert_eq!(tree.remove(&6), Action::Removed);
/// assert_eq!(tree.search(&6), None);
/// assert_eq!(tree.size(), 4);
/// ```
pub struct Tree<T, C = CompareFn<T>> {
    root: Root<T>,
    size: usize,
    cmp: C,
}

enum Root<T> {
    Unbalanced(BsNode<T>),
    Avl(AvlNode<T>),
    RedBlack(RbNode<T>),
    LeftLeaning(LlrbNode<T>),
}

/// Runs `$body` with `$node` bound to whichever variant `$root` holds.
macro_rules! dispatch {
    ($root:expr, $node:ident => $body:expr) => {
        match $root {
            Root::Unbalanced($node) => $body,
            Root::Avl($node) => $body,
            Root::RedBlack($node) => $body,
            Root::LeftLeaning($node) => $body,
        }
    };
}

impl<T> Root<T> {
    fn empty(variant: Variant) -> Self {
        match variant {
            Variant::Unbalanced => Self::Unbalanced(BsNode::default()),
            Variant::Avl => Self::Avl(AvlNode::default()),
            Variant::RedBlack => Self::RedBlack(RbNode::default()),
            Variant::LeftLeaning => Self::LeftLeaning(LlrbNode::default()),
        }
    }

    fn variant(&self) -> Variant {
        match self {
            Self::Unbalanced(_) => Variant::Unbalanced,
            Self::Avl(_) => Variant::Avl,
            Self::RedBlack(_) => Variant::RedBlack,
            Self::LeftLeaning(_) => Variant::LeftLeaning,
        }
    }

    /// Swaps in an empty root of the same variant and returns the old one.
    fn take(&mut self) -> Self {
        let empty = Self::empty(self.variant());
        mem::replace(self, empty)
    }

    fn add<C>(self, value: T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T>,
    {
        match self {
            Self::Unbalanced(n) => {
                let (n, action) = n.add(value, cmp);
                (Self::Unbalanced(n), action)
            }
            Self::Avl(n) => {
                let (n, action) = n.add(value, cmp);
                (Self::Avl(n), action)
            }
            Self::RedBlack(n) => {
                let (n, action) = n.add(value, cmp);
                (Self::RedBlack(n), action)
            }
            Self::LeftLeaning(n) => {
                let (n, action) = n.add(value, cmp);
                (Self::LeftLeaning(n), action)
            }
        }
    }

    fn remove<C>(self, value: &T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T>,
    {
        match self {
            Self::Unbalanced(n) => {
                let (n, action) = n.remove(value, cmp);
                (Self::Unbalanced(n), action)
            }
            Self::Avl(n) => {
                let (n, action) = n.remove(value, cmp);
                (Self::Avl(n), action)
            }
            Self::RedBlack(n) => {
                let (n, action) = n.remove(value, cmp);
                (Self::RedBlack(n), action)
            }
            Self::LeftLeaning(n) => {
                let (n, action) = n.remove(value, cmp);
                (Self::LeftLeaning(n), action)
            }
        }
    }
}

impl<T: Ord> Tree<T> {
    /// An empty tree ordered by `T`'s [`Ord`] implementation.
    pub fn natural(variant: Variant) -> Self {
        Self::with_variant(variant, natural)
    }
}

impl<T: Ord> Default for Tree<T> {
    fn default() -> Self {
        Self::natural(Variant::default())
    }
}

impl<T, C> Tree<T, C>
where
    C: Comparator<T>,
{
    /// An empty tree using the given balancing strategy.
    pub fn with_variant(variant: Variant, cmp: C) -> Self {
        Self {
            root: Root::empty(variant),
            size: 0,
            cmp,
        }
    }

    /// An empty tree that never rebalances. See [`crate::unbalanced`].
    pub fn unbalanced(cmp: C) -> Self {
        Self::with_variant(Variant::Unbalanced, cmp)
    }

    /// An empty AVL tree. See [`crate::avl`].
    pub fn avl(cmp: C) -> Self {
        Self::with_variant(Variant::Avl, cmp)
    }

    /// An empty red-black tree. See [`crate::red_black`].
    pub fn red_black(cmp: C) -> Self {
        Self::with_variant(Variant::RedBlack, cmp)
    }

    /// An empty left-leaning red-black tree. See [`crate::llrb`].
    pub fn left_leaning(cmp: C) -> Self {
        Self::with_variant(Variant::LeftLeaning, cmp)
    }

    /// The balancing strategy this tree was built with.
    pub fn variant(&self) -> Variant {
        self.root.variant()
    }

    /// Inserts `value`. If an equal value is already stored it's replaced and the size doesn't
    /// change.
    pub fn add(&mut self, value: T) -> Action {
        let (root, action) = self.root.take().add(value, &self.cmp);
        self.root = root;
        if action == Action::Added {
            self.size += 1;
        }
        log::debug!("{} tree: add {:?}, size {}", self.variant(), action, self.size);
        action
    }

    /// Removes the stored value equal to `value`. Does nothing if there isn't one.
    pub fn remove(&mut self, value: &T) -> Action {
        let (root, action) = self.root.take().remove(value, &self.cmp);
        self.root = root;
        if action == Action::Removed {
            self.size -= 1;
        }
        log::debug!("{} tree: remove {:?}, size {}", self.variant(), action, self.size);
        action
    }

    /// The stored value equal to `value`.
    pub fn search(&self, value: &T) -> Option<&T> {
        dispatch!(&self.root, n => n.search(value, &self.cmp))
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Result<&T, TreeError> {
        let min = dispatch!(&self.root, n => n.min());
        min.ok_or(TreeError::Empty)
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Result<&T, TreeError> {
        let max = dispatch!(&self.root, n => n.max());
        max.ok_or(TreeError::Empty)
    }

    /// How many values are stored.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree has no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of nodes on the longest path from the root down. 0 for an empty tree.
    pub fn height(&self) -> usize {
        dispatch!(&self.root, n => n.height())
    }
}

impl<T: fmt::Display, C> Tree<T, C> {
    /// Draws the tree sideways, see [`crate::render`]. The `Display` implementation uses
    /// [`TRUNK`] and [`INTERVAL`].
    pub fn render(&self, trunk: &str, interval: &str) -> String {
        dispatch!(&self.root, n => render::render::<T, _>(n.root(), trunk, interval))
    }
}

impl<T: fmt::Display, C> fmt::Display for Tree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(&self.root, n => {
            render::write_tree::<T, _, fmt::Formatter<'_>>(f, n.root(), TRUNK, INTERVAL)
        })
    }
}

impl<T, C> fmt::Debug for Tree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("variant", &self.root.variant())
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::by_key;
    use crate::test::quick::Op;
    use std::collections::BTreeMap;

    fn size_matches_model(variant: Variant, ops: &[Op<i8, i8>]) -> bool {
        let mut tree = Tree::with_variant(variant, by_key);
        let mut model = BTreeMap::new();

        for op in ops {
            match *op {
                Op::Insert(k, v) => {
                    tree.add((k, v));
                    model.insert(k, v);
                }
                Op::Remove(k) => {
                    tree.remove(&(k, 0));
                    model.remove(&k);
                }
                Op::Search => {
                    let min = model.iter().next().map(|(k, v)| (*k, *v));
                    let max = model.iter().next_back().map(|(k, v)| (*k, *v));
                    assert_eq!(tree.min().ok().copied(), min);
                    assert_eq!(tree.max().ok().copied(), max);
                }
            }
            if tree.size() != model.len() {
                return false;
            }
        }
        true
    }

    quickcheck::quickcheck! {
        fn fuzz_size_unbalanced(ops: Vec<Op<i8, i8>>) -> bool {
            size_matches_model(Variant::Unbalanced, &ops)
        }

        fn fuzz_size_avl(ops: Vec<Op<i8, i8>>) -> bool {
            size_matches_model(Variant::Avl, &ops)
        }

        fn fuzz_size_red_black(ops: Vec<Op<i8, i8>>) -> bool {
            size_matches_model(Variant::RedBlack, &ops)
        }

        fn fuzz_size_left_leaning(ops: Vec<Op<i8, i8>>) -> bool {
            size_matches_model(Variant::LeftLeaning, &ops)
        }
    }
}
