//! Errors returned by [`Tree`][crate::Tree] queries.

/// Failures of queries anchored on a specific key.
///
/// Only a missing anchor is an error. An anchor that exists but has no neighbor in the requested
/// direction (the maximum for [`successor`][crate::Tree::successor], the minimum for
/// [`predecessor`][crate::Tree::predecessor]) is reported as `Ok(None)` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TreeError {
    /// The anchor key isn't stored in the tree.
    #[error("key not found in tree")]
    KeyNotFound,
}
