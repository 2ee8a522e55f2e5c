//! Orderings used to navigate a tree.
//!
//! Every tree is handed a [`Comparator`] when it is built and uses it for all of its lookups.
//! The comparator must be a strict total order and must not change its mind for the lifetime of
//! the tree. Nothing checks this: an inconsistent comparator leaves the tree in an unspecified
//! (but memory safe) state.

use std::cmp::Ordering;
use std::fmt;

/// A three-way comparison between two values of the same type.
///
/// Any `Fn(&T, &T) -> Ordering` is a `Comparator<T>`, so closures and plain functions can be
/// passed directly.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use bintree::compare::Comparator;
///
/// let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
/// assert_eq!(
///     by_len.compare(&String::from("ab"), &String::from("abc")),
///     Ordering::Less
/// );
/// ```
pub trait Comparator<T: ?Sized> {
    /// Orders `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering + ?Sized,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The comparator type used by [`Tree::natural`](crate::Tree::natural) and the default type
/// parameter of [`Tree`](crate::Tree).
pub type CompareFn<T> = fn(&T, &T) -> Ordering;

/// Orders values by their [`Ord`] implementation. Works for integers, strings and anything else
/// with a natural order.
pub fn natural<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// A key-value entry. Entries are ordered by `key` alone (see [`kv_compare`]) so a tree of `KV`s
/// behaves like a map from `String` to `V`.
#[derive(Debug, Clone, PartialEq)]
pub struct KV<V> {
    /// The lookup key.
    pub key: String,
    /// The payload carried alongside the key.
    pub value: V,
}

impl<V> KV<V> {
    /// Builds a new entry.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl<V: Default> KV<V> {
    /// An entry with a default payload, handy as a probe for `search` and `remove`.
    pub fn probe(key: impl Into<String>) -> Self {
        Self::new(key, V::default())
    }
}

impl<V: fmt::Display> fmt::Display for KV<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k: {}, v: {}", self.key, self.value)
    }
}

/// Orders two [`KV`] entries by key, ignoring their values.
pub fn kv_compare<V>(a: &KV<V>, b: &KV<V>) -> Ordering {
    a.key.cmp(&b.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_orders_integers_and_strings() {
        assert_eq!(natural(&1, &2), Ordering::Less);
        assert_eq!(natural(&2, &2), Ordering::Equal);
        assert_eq!(natural(&"b", &"a"), Ordering::Greater);
    }

    #[test]
    fn kv_ignores_value() {
        let a = KV::new("a", 10);
        let also_a = KV::new("a", 20);
        let b = KV::new("b", 0);

        assert_eq!(kv_compare(&a, &also_a), Ordering::Equal);
        assert_eq!(kv_compare(&a, &b), Ordering::Less);
        assert_eq!(kv_compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn kv_display() {
        assert_eq!(KV::new("a", 1).to_string(), "k: a, v: 1");
    }
}
