//! This crate exposes several Binary Search Trees (BSTs) behind one ordered container,
//! [`Tree`], mostly for comparing how they keep themselves balanced.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! Here "less" and "greater" are whatever the tree's [`Comparator`](compare::Comparator) says.
//! Two values it considers equal are the same entry, so adding the second one replaces the first.
//!
//! Searching takes `O(height)`, where `height` is the longest path from the root `Node` to a
//! leaf. Inserting sorted values into a naive BST makes that path as long as the tree is big, so
//! the balanced variants restructure themselves after every change to keep it `O(lg N)`:
//!
//! | [`Variant`] | module | kept on each node |
//! |---|---|---|
//! | `Unbalanced` | [`unbalanced`] | nothing |
//! | `Avl` | [`avl`] | subtree height |
//! | `RedBlack` | [`red_black`] | color and parent link |
//! | `LeftLeaning` | [`llrb`] | color |
//!
//! Each variant implements [`Node`](node::Node), which is all [`Tree`] needs. The tree tracks its
//! size from the [`Action`] every `add` and `remove` reports.
//!
//! ```
//! use bintree::{Tree, TreeError, Variant};
//!
//! let mut tree = Tree::natural(Variant::Avl);
//! assert_eq!(tree.min(), Err(TreeError::Empty));
//!
//! for x in 1..=1000 {
//!     tree.add(x);
//! }
//! assert_eq!(tree.size(), 1000);
//! assert!(tree.height() <= 15);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod compare;
pub mod error;
pub mod llrb;
pub mod node;
pub mod red_black;
pub mod render;
pub mod tree;
pub mod unbalanced;
pub mod variant;

#[cfg(test)]
mod test;

pub use error::TreeError;
pub use node::{Action, Color};
pub use tree::Tree;
pub use variant::Variant;
