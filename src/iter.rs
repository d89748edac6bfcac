//! Borrowing iterators over the keys of a [`Tree`][crate::Tree].
//!
//! Both iterators keep their own stack of pending nodes instead of recursing, so walking a
//! degenerate tree (one long chain, e.g. after inserting sorted keys) needs heap space
//! proportional to its height but no call-stack space.

use std::fmt;
use std::iter::FusedIterator;

use crate::node::{Link, Node};

/// Visits keys root first, then the left subtree, then the right subtree.
///
/// Created by [`Tree::preorder`][crate::Tree::preorder].
pub struct Preorder<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Preorder<'a, K> {
    /// # Safety
    ///
    /// `root` must be the root of a tree with `len` nodes that stays shared-borrowed for `'a`.
    pub(crate) unsafe fn new(root: Link<K>, len: usize) -> Self {
        Self {
            stack: root.as_ref().into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K> Iterator for Preorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // SAFETY: `node` belongs to a tree that is borrowed for `'a` (see `Preorder::new`) so its
        // children are alive and unchanged for `'a` too. The right child is pushed first so the
        // left subtree is finished before it is popped.
        unsafe {
            self.stack.extend(node.right.as_ref());
            self.stack.extend(node.left.as_ref());
        }
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// SAFETY: A `Preorder` only hands out shared references into a tree that stays shared-borrowed
// for `'a`, exactly like a `Vec<&'a K>` would.
unsafe impl<K: Sync> Send for Preorder<'_, K> {}
unsafe impl<K: Sync> Sync for Preorder<'_, K> {}

impl<K> ExactSizeIterator for Preorder<'_, K> {}
impl<K> FusedIterator for Preorder<'_, K> {}

impl<K> Clone for Preorder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Preorder<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Visits keys in sorted order: left subtree, then the node, then the right subtree.
///
/// Created by [`Tree::inorder`][crate::Tree::inorder] and [`Tree::iter`][crate::Tree::iter].
pub struct Inorder<'a, K> {
    /// Nodes whose left subtree has been (or is being) visited but which haven't been yielded.
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Inorder<'a, K> {
    /// # Safety
    ///
    /// `root` must be the root of a tree with `len` nodes that stays shared-borrowed for `'a`.
    pub(crate) unsafe fn new(root: Link<K>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    /// # Safety
    ///
    /// Same contract as [`Inorder::new`] for every node reachable from `link`.
    unsafe fn push_left_spine(&mut self, mut link: Link<K>) {
        while let Some(node) = link.as_ref() {
            self.stack.push(node);
            link = node.left;
        }
    }
}

impl<'a, K> Iterator for Inorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // SAFETY: See `Preorder::next`.
        unsafe { self.push_left_spine(node.right) };
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// SAFETY: See the impls for `Preorder`.
unsafe impl<K: Sync> Send for Inorder<'_, K> {}
unsafe impl<K: Sync> Sync for Inorder<'_, K> {}

impl<K> ExactSizeIterator for Inorder<'_, K> {}
impl<K> FusedIterator for Inorder<'_, K> {}

impl<K> Clone for Inorder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Inorder<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
