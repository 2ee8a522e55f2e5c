//! A sideways text dump of a tree, for eyeballing its shape.
//!
//! The right subtree is printed first, so reading the output with your head tilted to the left
//! shows the tree the usual way up:
//!
//! ```text
//!       --[value: 3
//! --[value: 2
//!       --[value: 1
//! ```

use std::fmt::{self, Display, Write};

use crate::node::{Meta, NodeRef};

/// The trunk drawn in front of every node by [`Tree`](crate::Tree)'s `Display` implementation.
pub const TRUNK: &str = "--[";

/// The indentation added per level by [`Tree`](crate::Tree)'s `Display` implementation.
pub const INTERVAL: &str = "      ";

/// Writes the subtree under `root` to `out`, one node per line. A node at depth `d` is prefixed
/// with `interval` repeated `d` times followed by `trunk`.
pub fn write_tree<'a, T, R, W>(
    out: &mut W,
    root: Option<R>,
    trunk: &str,
    interval: &str,
) -> fmt::Result
where
    T: Display + 'a,
    R: NodeRef<'a, T>,
    W: Write + ?Sized,
{
    fn walk<'a, T, R, W>(
        out: &mut W,
        node: Option<R>,
        trunk: &str,
        interval: &str,
        depth: usize,
    ) -> fmt::Result
    where
        T: Display + 'a,
        R: NodeRef<'a, T>,
        W: Write + ?Sized,
    {
        let Some(n) = node else {
            return Ok(());
        };
        walk::<T, R, W>(out, n.right(), trunk, interval, depth + 1)?;
        for _ in 0..depth {
            out.write_str(interval)?;
        }
        write!(out, "{trunk}value: {}", n.value())?;
        match n.meta() {
            Meta::None => {}
            Meta::Height(h) => write!(out, ", height: {h}")?,
            Meta::Color(c) => write!(out, ", color: {c}")?,
        }
        out.write_char('\n')?;
        walk::<T, R, W>(out, n.left(), trunk, interval, depth + 1)
    }

    walk::<T, R, W>(out, root, trunk, interval, 0)
}

/// Renders the subtree under `root` into a new `String`. See [`write_tree`].
pub fn render<'a, T, R>(root: Option<R>, trunk: &str, interval: &str) -> String
where
    T: Display + 'a,
    R: NodeRef<'a, T>,
{
    let mut out = String::new();
    write_tree::<T, R, String>(&mut out, root, trunk, interval)
        .expect("writing to a String can't fail");
    out
}
