use std::collections::BTreeSet;
use std::sync::Once;

use bintree::compare::{kv_compare, KV};
use bintree::{Action, Tree, TreeError, Variant};

static LOGGER: Once = Once::new();

/// Routes the trees' `log` output to the test harness so failures show the rotations that led
/// up to them.
fn init_logger() {
    LOGGER.call_once(|| {
        let _ = simplelog::TestLogger::init(
            simplelog::LevelFilter::Trace,
            simplelog::Config::default(),
        );
    });
}

#[test]
fn integers() {
    init_logger();
    for variant in Variant::ALL {
        let mut tree = Tree::natural(variant);
        for x in [8, 5, 10, 7, 6] {
            tree.add(x);
        }

        assert_eq!(tree.size(), 5, "{variant}");
        assert_eq!(tree.min(), Ok(&5), "{variant}");
        assert_eq!(tree.max(), Ok(&10), "{variant}");
        assert_eq!(tree.search(&7), Some(&7), "{variant}");

        assert_eq!(tree.remove(&6), Action::Removed, "{variant}");
        assert_eq!(tree.size(), 4, "{variant}");
        assert_eq!(tree.search(&6), None, "{variant}");
        assert_eq!(tree.min(), Ok(&5), "{variant}");
        assert_eq!(tree.max(), Ok(&10), "{variant}");
    }
}

#[test]
fn key_value_pairs() {
    init_logger();
    for variant in Variant::ALL {
        let mut tree = Tree::with_variant(variant, kv_compare);
        for (i, key) in ["c", "a", "e", "b", "d"].into_iter().enumerate() {
            tree.add(KV::new(key, i));
        }

        assert_eq!(tree.min().map(|kv| kv.key.as_str()), Ok("a"), "{variant}");
        assert_eq!(tree.max().map(|kv| kv.key.as_str()), Ok("e"), "{variant}");
        assert_eq!(tree.search(&KV::probe("b")).map(|kv| kv.value), Some(3));

        tree.remove(&KV::probe("e"));
        assert_eq!(tree.max().map(|kv| kv.key.as_str()), Ok("d"), "{variant}");
        assert_eq!(tree.size(), 4, "{variant}");
    }
}

#[test]
fn strings() {
    for variant in Variant::ALL {
        let mut tree = Tree::natural(variant);
        for word in "the quick brown fox jumps over the lazy dog".split(' ') {
            tree.add(word.to_owned());
        }

        // "the" was added twice.
        assert_eq!(tree.size(), 8, "{variant}");
        assert_eq!(tree.min().map(String::as_str), Ok("brown"));
        assert_eq!(tree.max().map(String::as_str), Ok("the"));
    }
}

#[test]
fn round_trip() {
    for variant in Variant::ALL {
        let mut tree = Tree::natural(variant);

        assert_eq!(tree.add(42), Action::Added);
        assert_eq!(tree.search(&42), Some(&42));
        assert_eq!(tree.remove(&42), Action::Removed);
        assert_eq!(tree.search(&42), None);
        assert_eq!(tree.remove(&42), Action::Unchanged);
        assert_eq!(tree.max(), Err(TreeError::Empty));
    }
}

#[test]
fn ascending_inserts() {
    init_logger();
    const N: usize = 1 << 10;
    let bound = 2.0 * ((N + 1) as f64).log2();

    for variant in Variant::ALL {
        let mut tree = Tree::natural(variant);
        for x in 1..=N {
            tree.add(x);
        }
        assert_eq!(tree.size(), N);

        match variant {
            Variant::Unbalanced => assert_eq!(tree.height(), N),
            _ => assert!(
                (tree.height() as f64) <= bound,
                "{variant} has height {}",
                tree.height()
            ),
        }
    }
}

#[test]
fn long_sorted_run_into_unbalanced_tree() {
    const N: u32 = 20_000;
    let mut tree = Tree::natural(Variant::Unbalanced);
    for x in 0..N {
        tree.add(x);
    }

    assert_eq!(tree.size(), N as usize);
    assert_eq!(tree.height(), N as usize);
    assert_eq!(tree.max(), Ok(&(N - 1)));

    for x in (0..N).step_by(2) {
        assert_eq!(tree.remove(&x), Action::Removed);
    }
    assert_eq!(tree.size(), N as usize / 2);
    assert_eq!(tree.min(), Ok(&1));
    assert_eq!(tree.search(&(N - 2)), None);
}

#[test]
fn interleaved_adds_and_removes() {
    init_logger();
    for variant in Variant::ALL {
        let mut tree = Tree::natural(variant);
        let mut model = BTreeSet::new();

        // A cheap deterministic scramble of 0..200.
        for i in 0..2000u32 {
            let x = (i * 7919) % 200;
            if i % 3 == 0 {
                tree.remove(&x);
                model.remove(&x);
            } else {
                tree.add(x);
                model.insert(x);
            }
            assert_eq!(tree.size(), model.len(), "{variant}");
        }

        for x in 0..200 {
            assert_eq!(tree.search(&x).is_some(), model.contains(&x), "{variant}");
        }
        assert_eq!(tree.min().ok(), model.first(), "{variant}");
        assert_eq!(tree.max().ok(), model.last(), "{variant}");
    }
}

#[test]
fn variant_from_config_string() {
    let variant: Variant = "red-black".parse().unwrap();
    let mut tree = Tree::natural(variant);
    tree.add(1);

    assert_eq!(tree.variant(), Variant::RedBlack);
    assert_eq!(tree.to_string(), "--[value: 1, color: black\n");
}

quickcheck::quickcheck! {
    fn in_order_and_size_agree(xs: Vec<i16>, removes: Vec<i16>) -> bool {
        let model: BTreeSet<i16> = xs.iter().copied().filter(|x| !removes.contains(x)).collect();
        Variant::ALL.into_iter().all(|variant| {
            let mut tree = Tree::natural(variant);
            for x in &xs {
                tree.add(*x);
            }
            for x in &removes {
                tree.remove(x);
            }
            tree.size() == model.len()
                && model.iter().all(|x| tree.search(x) == Some(x))
                && tree.min().ok() == model.first()
                && tree.max().ok() == model.last()
        })
    }
}
