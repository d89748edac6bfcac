use arbor::{Tree, TreeError};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeMap, HashSet};

use crate::{init_logging, Op};

/// Applies a set of operations to a tree and to a key -> count map.
/// This way we can ensure that after a random smattering of inserts
/// and removes we hold the same keys, the same number of times.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, counts: &mut BTreeMap<K, usize>)
where
    K: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                let before = bst.len();
                bst.insert(k.clone());
                assert_eq!(bst.len(), before + 1);
                *counts.entry(k.clone()).or_insert(0) += 1;
            }
            Op::Remove(k) => {
                let before = bst.len();
                match counts.get_mut(k) {
                    Some(count) => {
                        assert_eq!(bst.remove(k).as_ref(), Some(k));
                        assert_eq!(bst.len(), before - 1);
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(k);
                        }
                    }
                    None => {
                        assert_eq!(bst.remove(k), None);
                        assert_eq!(bst.len(), before);
                    }
                }
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_logging();
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);

    let expected = counts
        .iter()
        .flat_map(|(key, count)| std::iter::repeat_n(key, *count));
    tree.iter().eq(expected) && counts.keys().all(|key| tree.contains(key))
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i32>) -> bool {
    let tree = Tree::from_keys(xs.clone());

    let mut sorted = xs;
    sorted.sort_unstable();
    tree.inorder().eq(sorted.iter())
}

#[quickcheck]
fn preorder_visits_every_key(xs: Vec<i32>) -> bool {
    let tree = Tree::from_keys(xs.clone());

    let mut visited: Vec<_> = tree.preorder().copied().collect();
    let mut xs = xs;
    visited.sort_unstable();
    xs.sort_unstable();
    visited == xs
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter()
        .all(|x| tree.contains(x) && tree.search(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::from_keys(xs.clone());
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x) && tree.search(x).is_none())
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    init_logging();
    let mut tree = Tree::from_keys(xs.clone());
    for remove in &removes {
        // Remove every copy we may have inserted.
        while tree.remove(remove).is_some() {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !removes.contains(x));
    still_present.sort_unstable();

    removes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.iter().eq(still_present.iter())
}

// Unique keys only: with duplicates, the copies of the maximum are successors of one another.
#[quickcheck]
fn extremes_have_no_outer_neighbor(xs: HashSet<i32>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    match (tree.minimum(), tree.maximum()) {
        (Some(min), Some(max)) => {
            tree.predecessor(min) == Ok(None)
                && tree.successor(max) == Ok(None)
                && Some(min) == xs.iter().min()
                && Some(max) == xs.iter().max()
        }
        (None, None) => xs.is_empty(),
        _ => false,
    }
}

#[quickcheck]
fn neighbor_of_missing_key_is_an_error(xs: Vec<i8>, key: i8) -> bool {
    let tree = Tree::from_keys(xs.clone());
    if xs.contains(&key) {
        tree.successor(&key).is_ok() && tree.predecessor(&key).is_ok()
    } else {
        tree.successor(&key) == Err(TreeError::KeyNotFound)
            && tree.predecessor(&key) == Err(TreeError::KeyNotFound)
    }
}

#[quickcheck]
fn successor_of_unique_keys_is_next_sorted(xs: HashSet<i16>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut sorted: Vec<_> = xs.into_iter().collect();
    sorted.sort_unstable();

    sorted.windows(2).all(|pair| {
        tree.successor(&pair[0]) == Ok(Some(&pair[1]))
            && tree.predecessor(&pair[1]) == Ok(Some(&pair[0]))
    })
}

#[quickcheck]
fn remove_keeps_relative_order(xs: HashSet<i16>, victim_index: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let keys: Vec<_> = xs.into_iter().collect();
    let victim = keys[victim_index % keys.len()];
    let mut tree = Tree::from_keys(keys.clone());
    let before: Vec<_> = tree.iter().copied().filter(|k| *k != victim).collect();

    let removed = tree.remove(&victim);

    removed == Some(victim)
        && !tree.contains(&victim)
        && tree.len() == keys.len() - 1
        && tree.iter().copied().eq(before)
}
