//! The `Node` record every [`Tree`][crate::Tree] is built from and the [`Link`] handle used for
//! both the owning child edges and the non-owning parent edge.

use std::fmt;
use std::ptr::{self, NonNull};

/// A possibly-empty pointer to a heap allocated `Node`.
///
/// A `Link` carries no ownership by itself. Ownership is a convention of the tree: a node owns
/// the nodes its `left` and `right` links point to, the tree owns the node its root link points
/// to, and nothing owns through a `parent` link. Every node is allocated with
/// [`Node::new_leaked`] and released exactly once with `Box::from_raw` by whoever detaches it.
pub(crate) struct Link<K>(pub(crate) Option<NonNull<Node<K>>>);

impl<K> Clone for Link<K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for Link<K> {}

impl<K> PartialEq for Link<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<K> Eq for Link<K> {}

impl<K> fmt::Debug for Link<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Link").field(&self.0).finish()
    }
}

impl<K> Link<K> {
    pub(crate) const NONE: Self = Link(None);

    pub(crate) fn to(node: NonNull<Node<K>>) -> Self {
        Link(Some(node))
    }

    pub(crate) fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    /// Whether this link points at exactly `node`.
    pub(crate) fn points_to(&self, node: &Node<K>) -> bool {
        matches!(self.0, Some(ptr) if ptr::eq(ptr.as_ptr(), node))
    }

    /// Borrows the node behind this link for an arbitrary lifetime.
    ///
    /// # Safety
    ///
    /// The caller must ensure the node stays allocated and is not written to for all of `'a`.
    /// Inside this crate that means `'a` must not outlive a shared borrow of the owning tree.
    pub(crate) unsafe fn as_ref<'a>(self) -> Option<&'a Node<K>> {
        self.0.map(|ptr| ptr.as_ref())
    }
}

pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    pub(crate) parent: Link<K>,
}

impl<K> Node<K> {
    /// Allocates a childless node hanging off `parent` and gives up ownership of the allocation.
    /// The returned pointer must be linked into a tree (or freed) by the caller.
    pub(crate) fn new_leaked(key: K, parent: Link<K>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Node {
            key,
            left: Link::NONE,
            right: Link::NONE,
            parent,
        })))
    }

    /// Which of `self`'s child slots holds `child`, if any.
    pub(crate) fn side_of(&self, child: NonNull<Self>) -> Option<Side> {
        if self.left.0 == Some(child) {
            Some(Side::Left)
        } else if self.right.0 == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub(crate) fn child(&self, side: Side) -> Link<K> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Link<K> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// One of a node's two child slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
