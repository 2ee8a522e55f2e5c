//! A red-black tree whose nodes know their parent.
//!
//! Nodes live in an arena (a `Vec`) owned by the [`RbNode`] and refer to each other by index, so
//! the parent links are plain data instead of aliasing pointers. Insertion and deletion walk
//! *up* the tree through those links to restore the red-black invariants:
//!
//! 1. The root is black.
//! 2. A red node has no red children.
//! 3. Every path from a node down to an empty subtree passes the same number of black nodes.
//!
//! Together these keep the longest path at most twice as long as the shortest one.
//!
//! # Examples
//!
//! ```
//! use bintree::compare::natural;
//! use bintree::node::{Color, Meta, Node, NodeRef};
//! use bintree::red_black::RbNode;
//!
//! let mut root = RbNode::default();
//! for x in [1, 2, 3] {
//!     root = root.add(x, &natural).0;
//! }
//!
//! let top = root.root().unwrap();
//! assert_eq!(*top.value(), 2);
//! assert_eq!(top.meta(), Meta::Color(Color::Black));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::compare::Comparator;
use crate::node::{Action, Color, Meta, Node, NodeRef};

/// A red-black tree stored in an arena. The empty tree has no root.
#[derive(Debug, Clone)]
pub struct RbNode<T> {
    nodes: Vec<Entry<T>>,
    root: Option<usize>,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    color: Color,
    /// Back-reference used to walk towards the root. It never owns anything.
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

impl<T> Default for RbNode<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T> RbNode<T> {
    fn is_red(&self, node: Option<usize>) -> bool {
        node.is_some_and(|i| self.nodes[i].color.is_red())
    }

    fn set_color(&mut self, node: usize, color: Color) {
        self.nodes[node].color = color;
    }

    fn find<C>(&self, value: &T, cmp: &C) -> Option<usize>
    where
        C: Comparator<T> + ?Sized,
    {
        let mut cursor = self.root;
        while let Some(i) = cursor {
            cursor = match cmp.compare(value, &self.nodes[i].value) {
                Ordering::Less => self.nodes[i].left,
                Ordering::Equal => return Some(i),
                Ordering::Greater => self.nodes[i].right,
            };
        }
        None
    }

    fn leftmost(&self, mut node: usize) -> usize {
        while let Some(left) = self.nodes[node].left {
            node = left;
        }
        node
    }

    /// Puts `new` where `old` hangs off its parent (or at the root) and points `new` back at
    /// that parent. `old` keeps its stale links.
    fn transplant(&mut self, old: usize, new: Option<usize>) {
        let parent = self.nodes[old].parent;
        match parent {
            None => self.root = new,
            Some(p) if self.nodes[p].left == Some(old) => self.nodes[p].left = new,
            Some(p) => self.nodes[p].right = new,
        }
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// ```text
    ///      x                    y
    ///     / \                  / \
    ///    a   y    rotate ->   x   c
    ///       / \              / \
    ///      b   c            a   b
    /// ```
    fn rotate_left(&mut self, x: usize) {
        let y = self.nodes[x]
            .right
            .expect("rotating left requires a right child");
        log::trace!("red-black: rotate left");

        let b = self.nodes[y].left;
        self.nodes[x].right = b;
        if let Some(b) = b {
            self.nodes[b].parent = Some(x);
        }

        self.transplant(x, Some(y));
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    /// The mirror image of [`RbNode::rotate_left`].
    fn rotate_right(&mut self, x: usize) {
        let y = self.nodes[x]
            .left
            .expect("rotating right requires a left child");
        log::trace!("red-black: rotate right");

        let b = self.nodes[y].right;
        self.nodes[x].left = b;
        if let Some(b) = b {
            self.nodes[b].parent = Some(x);
        }

        self.transplant(x, Some(y));
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn insert<C>(&mut self, value: T, cmp: &C) -> Action
    where
        C: Comparator<T> + ?Sized,
    {
        let mut parent = None;
        let mut as_left = false;
        let mut cursor = self.root;
        while let Some(i) = cursor {
            match cmp.compare(&value, &self.nodes[i].value) {
                Ordering::Less => {
                    as_left = true;
                    cursor = self.nodes[i].left;
                }
                Ordering::Equal => {
                    self.nodes[i].value = value;
                    return Action::Updated;
                }
                Ordering::Greater => {
                    as_left = false;
                    cursor = self.nodes[i].right;
                }
            }
            parent = Some(i);
        }

        let node = self.nodes.len();
        self.nodes.push(Entry {
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(node),
            Some(p) if as_left => self.nodes[p].left = Some(node),
            Some(p) => self.nodes[p].right = Some(node),
        }

        self.fix_insert(node);
        Action::Added
    }

    /// Restores the invariants after `node` was inserted as a red leaf.
    fn fix_insert(&mut self, mut node: usize) {
        loop {
            let Some(parent) = self.nodes[node].parent else {
                self.set_color(node, Color::Black);
                return;
            };
            if !self.nodes[parent].color.is_red() {
                return;
            }

            let grandparent = self.nodes[parent]
                .parent
                .expect("a red node is never the root");
            let parent_is_left = self.nodes[grandparent].left == Some(parent);
            let uncle = if parent_is_left {
                self.nodes[grandparent].right
            } else {
                self.nodes[grandparent].left
            };

            if self.is_red(uncle) {
                log::trace!("red-black: insert fix-up, recolor and climb");
                let uncle = uncle.expect("a red uncle exists");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            log::trace!("red-black: insert fix-up, rotate");
            let mut parent = parent;
            if parent_is_left {
                if self.nodes[parent].right == Some(node) {
                    self.rotate_left(parent);
                    parent = node;
                }
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_right(grandparent);
            } else {
                if self.nodes[parent].left == Some(node) {
                    self.rotate_right(parent);
                    parent = node;
                }
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_left(grandparent);
            }
            return;
        }
    }

    fn delete<C>(&mut self, value: &T, cmp: &C) -> Action
    where
        C: Comparator<T> + ?Sized,
    {
        let Some(mut node) = self.find(value, cmp) else {
            return Action::Unchanged;
        };

        // With two children, the successor's value moves up and the successor is unlinked
        // instead. It has no left child so either way `node` ends up with at most one child.
        if let (Some(_), Some(right)) = (self.nodes[node].left, self.nodes[node].right) {
            let successor = self.leftmost(right);
            self.swap_values(node, successor);
            node = successor;
        }

        let child = self.nodes[node].left.or(self.nodes[node].right);
        let parent = self.nodes[node].parent;
        self.transplant(node, child);

        if !self.nodes[node].color.is_red() {
            match child {
                Some(child) if self.nodes[child].color.is_red() => {
                    self.set_color(child, Color::Black)
                }
                _ => self.fix_remove(child, parent),
            }
        }

        drop(self.release(node));
        Action::Removed
    }

    /// Removes the black-height deficit carried by `node` (which may be an empty subtree hanging
    /// off `parent`).
    fn fix_remove(&mut self, mut node: Option<usize>, mut parent: Option<usize>) {
        while node != self.root && !self.is_red(node) {
            let p = parent.expect("a node below the root has a parent");

            if self.nodes[p].left == node {
                let mut sibling = self.nodes[p]
                    .right
                    .expect("a double black node has a sibling");
                if self.nodes[sibling].color.is_red() {
                    log::trace!("red-black: remove fix-up, red sibling");
                    self.set_color(sibling, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    sibling = self.nodes[p].right.expect("rotation keeps a sibling");
                }

                if !self.is_red(self.nodes[sibling].left) && !self.is_red(self.nodes[sibling].right)
                {
                    log::trace!("red-black: remove fix-up, push deficit up");
                    self.set_color(sibling, Color::Red);
                    node = Some(p);
                    parent = self.nodes[p].parent;
                    continue;
                }

                if !self.is_red(self.nodes[sibling].right) {
                    log::trace!("red-black: remove fix-up, near nephew red");
                    let nephew = self.nodes[sibling].left.expect("the near nephew is red");
                    self.set_color(nephew, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate_right(sibling);
                    sibling = self.nodes[p].right.expect("rotation keeps a sibling");
                }

                log::trace!("red-black: remove fix-up, far nephew red");
                self.set_color(sibling, self.nodes[p].color);
                self.set_color(p, Color::Black);
                if let Some(far) = self.nodes[sibling].right {
                    self.set_color(far, Color::Black);
                }
                self.rotate_left(p);
            } else {
                let mut sibling = self.nodes[p]
                    .left
                    .expect("a double black node has a sibling");
                if self.nodes[sibling].color.is_red() {
                    log::trace!("red-black: remove fix-up, red sibling");
                    self.set_color(sibling, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    sibling = self.nodes[p].left.expect("rotation keeps a sibling");
                }

                if !self.is_red(self.nodes[sibling].left) && !self.is_red(self.nodes[sibling].right)
                {
                    log::trace!("red-black: remove fix-up, push deficit up");
                    self.set_color(sibling, Color::Red);
                    node = Some(p);
                    parent = self.nodes[p].parent;
                    continue;
                }

                if !self.is_red(self.nodes[sibling].left) {
                    log::trace!("red-black: remove fix-up, near nephew red");
                    let nephew = self.nodes[sibling].right.expect("the near nephew is red");
                    self.set_color(nephew, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate_left(sibling);
                    sibling = self.nodes[p].left.expect("rotation keeps a sibling");
                }

                log::trace!("red-black: remove fix-up, far nephew red");
                self.set_color(sibling, self.nodes[p].color);
                self.set_color(p, Color::Black);
                if let Some(far) = self.nodes[sibling].left {
                    self.set_color(far, Color::Black);
                }
                self.rotate_right(p);
            }
            // The deficit is gone.
            node = self.root;
            parent = None;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    fn swap_values(&mut self, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.nodes.split_at_mut(hi);
        mem::swap(&mut head[lo].value, &mut tail[0].value);
    }

    /// Frees the slot of an unlinked node. The last slot moves into the hole so everything that
    /// pointed at it is re-pointed first.
    fn release(&mut self, index: usize) -> T {
        let last = self.nodes.len() - 1;
        if index != last {
            let moved = &self.nodes[last];
            let (parent, left, right) = (moved.parent, moved.left, moved.right);
            match parent {
                None => self.root = Some(index),
                Some(p) if self.nodes[p].left == Some(last) => self.nodes[p].left = Some(index),
                Some(p) => self.nodes[p].right = Some(index),
            }
            for child in [left, right].into_iter().flatten() {
                self.nodes[child].parent = Some(index);
            }
        }
        self.nodes.swap_remove(index).value
    }
}

impl<T> Node<T> for RbNode<T> {
    type Ref<'a> = RbRef<'a, T> where Self: 'a;

    fn add<C>(mut self, value: T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        let action = self.insert(value, cmp);
        (self, action)
    }

    fn remove<C>(mut self, value: &T, cmp: &C) -> (Self, Action)
    where
        C: Comparator<T> + ?Sized,
    {
        let action = self.delete(value, cmp);
        (self, action)
    }

    fn root(&self) -> Option<Self::Ref<'_>> {
        self.root.map(|index| RbRef {
            nodes: &self.nodes,
            index,
        })
    }

    fn search<C>(&self, value: &T, cmp: &C) -> Option<&T>
    where
        C: Comparator<T> + ?Sized,
    {
        self.find(value, cmp).map(|i| &self.nodes[i].value)
    }
}

/// A read-only handle on one node of an [`RbNode`] arena.
pub struct RbRef<'a, T> {
    nodes: &'a [Entry<T>],
    index: usize,
}

impl<T> Clone for RbRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RbRef<'_, T> {}

impl<T> fmt::Debug for RbRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RbRef").field("index", &self.index).finish()
    }
}

impl<'a, T> RbRef<'a, T> {
    fn at(self, index: Option<usize>) -> Option<Self> {
        index.map(|index| Self {
            nodes: self.nodes,
            index,
        })
    }

    /// The node's parent, if it isn't the root.
    pub fn parent(self) -> Option<Self> {
        self.at(self.nodes[self.index].parent)
    }
}

impl<'a, T> NodeRef<'a, T> for RbRef<'a, T> {
    fn value(self) -> &'a T {
        &self.nodes[self.index].value
    }

    fn left(self) -> Option<Self> {
        self.at(self.nodes[self.index].left)
    }

    fn right(self) -> Option<Self> {
        self.at(self.nodes[self.index].right)
    }

    fn meta(self) -> Meta {
        Meta::Color(self.nodes[self.index].color)
    }
}

/// Checks every red-black invariant, the parent links and that no arena slot leaked.
#[cfg(test)]
pub(crate) fn assert_red_black<T>(tree: &RbNode<T>) {
    fn black_height<T>(tree: &RbNode<T>, node: Option<usize>, parent: Option<usize>) -> usize {
        let Some(i) = node else {
            return 1;
        };
        let entry = &tree.nodes[i];
        assert_eq!(entry.parent, parent, "broken parent link");
        if entry.color.is_red() {
            assert!(!tree.is_red(entry.left), "red node with red left child");
            assert!(!tree.is_red(entry.right), "red node with red right child");
        }
        let left = black_height(tree, entry.left, Some(i));
        let right = black_height(tree, entry.right, Some(i));
        assert_eq!(left, right, "black height mismatch");
        left + usize::from(!entry.color.is_red())
    }

    assert!(!tree.is_red(tree.root), "red root");
    black_height(tree, tree.root, None);

    fn count<T>(tree: &RbNode<T>, node: Option<usize>) -> usize {
        node.map_or(0, |i| {
            1 + count(tree, tree.nodes[i].left) + count(tree, tree.nodes[i].right)
        })
    }
    assert_eq!(count(tree, tree.root), tree.nodes.len(), "leaked arena slot");
}
