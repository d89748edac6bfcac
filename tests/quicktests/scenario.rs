use arbor::{Tree, TreeError};

use crate::init_logging;

fn scenario() -> Tree<i32> {
    Tree::from_keys(vec![42, 6, 34, 18, 41, 8])
}

#[test]
fn builds_and_walks() {
    init_logging();
    let tree = scenario();

    let preorder: Vec<_> = tree.preorder().copied().collect();
    assert_eq!(preorder, [42, 6, 34, 18, 8, 41]);
    assert_eq!(tree.len(), 6);
}

#[test]
fn extremes() {
    let tree = scenario();

    assert_eq!(tree.minimum(), Some(&6));
    assert_eq!(tree.maximum(), Some(&42));
}

#[test]
fn neighbors() {
    let tree = scenario();

    assert_eq!(tree.successor(&6), Ok(Some(&8)));
    assert_eq!(tree.predecessor(&8), Ok(Some(&6)));
    assert_eq!(tree.predecessor(&41), Ok(Some(&34)));
    assert_eq!(tree.predecessor(&6), Ok(None));
    assert_eq!(tree.successor(&42), Ok(None));
    assert_eq!(tree.successor(&481), Err(TreeError::KeyNotFound));
}

#[test]
fn membership() {
    let tree = scenario();

    assert!(tree.contains(&41));
    assert!(!tree.contains(&481));
}

#[test]
fn remove_then_walk() {
    init_logging();
    let mut tree = scenario();

    assert_eq!(tree.remove(&18), Some(18));
    assert!(!tree.contains(&18));
    assert!(tree.preorder().all(|key| *key != 18));
    assert_eq!(tree.len(), 5);

    // Removing it again is a reported no-op.
    assert_eq!(tree.remove(&18), None);
    assert_eq!(tree.len(), 5);
}

#[test]
fn error_is_displayable() {
    let tree = scenario();

    let err = tree.predecessor(&7).unwrap_err();
    assert_eq!(err.to_string(), "key not found in tree");
}

#[test]
fn degenerate_insertion_order() {
    init_logging();
    let n = 5_000;
    let mut tree: Tree<u32> = (0..n).collect();

    assert_eq!(tree.minimum(), Some(&0));
    assert_eq!(tree.maximum(), Some(&(n - 1)));
    assert_eq!(tree.successor(&(n - 2)), Ok(Some(&(n - 1))));
    assert_eq!(tree.predecessor(&1), Ok(Some(&0)));
    assert!(tree.preorder().copied().eq(0..n));

    for key in (0..n).step_by(2) {
        assert_eq!(tree.remove(&key), Some(key));
    }
    assert!(tree.iter().copied().eq((1..n).step_by(2)));
}
