//! Picking a balancing strategy by name.

use std::fmt;
use std::str::FromStr;

use crate::error::TreeError;

/// One of the balancing strategies a [`Tree`](crate::Tree) can use.
///
/// # Examples
///
/// ```
/// use bintree::Variant;
///
/// let variant: Variant = "LLRB".parse().unwrap();
/// assert_eq!(variant, Variant::LeftLeaning);
/// assert_eq!(variant.to_string(), "llrb");
/// assert!("splay".parse::<Variant>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// No balancing at all. See [`crate::unbalanced`].
    Unbalanced,
    /// Height balanced. See [`crate::avl`].
    #[default]
    Avl,
    /// Red-black with parent links. See [`crate::red_black`].
    RedBlack,
    /// Left-leaning red-black. See [`crate::llrb`].
    LeftLeaning,
}

impl Variant {
    /// Every variant, in the order they're described above.
    pub const ALL: [Variant; 4] = [
        Variant::Unbalanced,
        Variant::Avl,
        Variant::RedBlack,
        Variant::LeftLeaning,
    ];

    /// The short name used by `Display` and accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unbalanced => "bst",
            Self::Avl => "avl",
            Self::RedBlack => "rb",
            Self::LeftLeaning => "llrb",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bst" | "unbalanced" => Ok(Self::Unbalanced),
            "avl" => Ok(Self::Avl),
            "rb" | "red-black" => Ok(Self::RedBlack),
            "llrb" | "left-leaning" => Ok(Self::LeftLeaning),
            _ => Err(TreeError::UnknownVariant(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_names() {
        assert_eq!("bst".parse(), Ok(Variant::Unbalanced));
        assert_eq!("Unbalanced".parse(), Ok(Variant::Unbalanced));
        assert_eq!("AVL".parse(), Ok(Variant::Avl));
        assert_eq!("rb".parse(), Ok(Variant::RedBlack));
        assert_eq!("red-black".parse(), Ok(Variant::RedBlack));
        assert_eq!(" llrb ".parse(), Ok(Variant::LeftLeaning));
        assert_eq!("left-leaning".parse(), Ok(Variant::LeftLeaning));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "splay".parse::<Variant>().unwrap_err();

        assert_eq!(err, TreeError::UnknownVariant("splay".to_owned()));
        assert_eq!(
            err.to_string(),
            "unknown tree variant `splay`, expected one of: bst, avl, rb, llrb"
        );
    }

    #[test]
    fn display_round_trips() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string().parse(), Ok(variant));
        }
    }
}
