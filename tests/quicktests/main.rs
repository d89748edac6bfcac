use quickcheck::{Arbitrary, Gen};

mod properties;
mod scenario;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Remove the K from the tree
    Remove(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g))
        } else {
            Op::Remove(K::arbitrary(g))
        }
    }
}

/// Routes the tree's `log` output through the test harness. Run with `RUST_LOG=arbor=trace` to
/// see it.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
