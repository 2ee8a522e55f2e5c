//! Helpers shared by the per-variant quicktests.

pub(crate) mod quick;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::node::{Action, Node, NodeRef};
use quick::Op;

/// Orders `(key, value)` pairs by key so trees of pairs behave like maps.
pub(crate) fn by_key(a: &(i8, i8), b: &(i8, i8)) -> Ordering {
    a.0.cmp(&b.0)
}

/// Collects the values of a subtree in order.
pub(crate) fn in_order<'a, T, N: Node<T>>(node: &'a N) -> Vec<&'a T> {
    fn walk<'a, T, R: NodeRef<'a, T>>(node: Option<R>, out: &mut Vec<&'a T>) {
        if let Some(n) = node {
            walk(n.left(), out);
            out.push(n.value());
            walk(n.right(), out);
        }
    }

    let mut out = Vec::new();
    walk(node.root(), &mut out);
    out
}

/// Asserts that an in-order walk of a map-like subtree yields strictly ascending keys.
pub(crate) fn assert_sorted<N: Node<(i8, i8)>>(node: &N) {
    let keys: Vec<i8> = in_order(node).into_iter().map(|(k, _)| *k).collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]), "{keys:?} not ascending");
}

/// Applies `ops` to both a subtree and a `BTreeMap`, running `check` after every step. Every
/// reported [`Action`] must match what the map saw and the final contents must agree.
pub(crate) fn agrees_with_model<N>(ops: &[Op<i8, i8>], check: impl Fn(&N)) -> bool
where
    N: Node<(i8, i8)>,
{
    let mut node = N::default();
    let mut model = BTreeMap::new();

    for op in ops {
        match *op {
            Op::Insert(k, v) => {
                let (next, action) = node.add((k, v), &by_key);
                node = next;
                let expected = match model.insert(k, v) {
                    Some(_) => Action::Updated,
                    None => Action::Added,
                };
                assert_eq!(action, expected);
            }
            Op::Remove(k) => {
                let (next, action) = node.remove(&(k, 0), &by_key);
                node = next;
                let expected = match model.remove(&k) {
                    Some(_) => Action::Removed,
                    None => Action::Unchanged,
                };
                assert_eq!(action, expected);
            }
            Op::Search => {
                for (k, v) in &model {
                    assert_eq!(node.search(&(*k, 0), &by_key), Some(&(*k, *v)));
                }
            }
        }
        check(&node);
    }

    let contents: Vec<(i8, i8)> = in_order(&node).into_iter().copied().collect();
    contents == model.into_iter().collect::<Vec<_>>()
}
