//! An unbalanced BST whose nodes know their parents. Parent links make in-order neighbor queries
//! ([`Tree::successor`], [`Tree::predecessor`]) a walk up the tree instead of a second search
//! from the root, and let deletion splice nodes in place.
//!
//! # Examples
//!
//! ```
//! use arbor::{Tree, TreeError};
//!
//! let mut tree = Tree::from_keys(vec![42, 6, 34, 18, 41, 8]);
//!
//! assert_eq!(tree.minimum(), Some(&6));
//! assert_eq!(tree.maximum(), Some(&42));
//!
//! // Neighbors of a stored key.
//! assert_eq!(tree.successor(&6), Ok(Some(&8)));
//! assert_eq!(tree.predecessor(&41), Ok(Some(&34)));
//!
//! // The minimum has no predecessor, which is different from asking about a missing key.
//! assert_eq!(tree.predecessor(&6), Ok(None));
//! assert_eq!(tree.predecessor(&7), Err(TreeError::KeyNotFound));
//!
//! // Removing a key returns it.
//! assert_eq!(tree.remove(&18), Some(18));
//! assert!(!tree.contains(&18));
//! assert_eq!(tree.remove(&18), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::TreeError;
use crate::iter::{Inorder, Preorder};
use crate::node::{Link, Node, Side};

/// A Binary Search Tree of keys. There is no balancing, so the shape of the tree (and the cost of
/// every operation) depends on insertion order: inserting sorted keys builds a chain.
///
/// Keys that compare equal to a stored key are placed in its right subtree. The tree keeps every
/// copy but lookups and removals only ever see the shallowest one.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
    // The tree owns its nodes (and through them, their keys).
    _owns: PhantomData<Box<Node<K>>>,
}

// SAFETY: A `Tree` owns its nodes the same way a `Box` owns its contents. Nothing outside the tree
// can reach a node, so sending or sharing the tree is exactly as safe as sending or sharing `K`.
unsafe impl<K: Send> Send for Tree<K> {}
unsafe impl<K: Sync> Sync for Tree<K> {}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    /// Copies the shape node for node, without comparing keys.
    fn clone(&self) -> Self {
        let mut cloned = Self::new();
        // (source node, copy of its parent, side of that parent it hangs from)
        let mut pending: Vec<(&Node<K>, Link<K>, Side)> = self
            .node(self.root)
            .map(|root| (root, Link::NONE, Side::Left))
            .into_iter()
            .collect();
        while let Some((source, parent, side)) = pending.pop() {
            let copy = Link::to(Node::new_leaked(source.key.clone(), parent));
            match parent.0 {
                None => cloned.root = copy,
                // SAFETY: `parent` was allocated by this loop and is owned by `cloned`, which
                // nothing else references yet.
                Some(parent) => unsafe { *(*parent.as_ptr()).child_mut(side) = copy },
            }
            // `len` only counts linked nodes, so `cloned` drops cleanly if a `K::clone` panics.
            cloned.len += 1;

            if let Some(right) = self.node(source.right) {
                pending.push((right, copy, Side::Right));
            }
            if let Some(left) = self.node(source.left) {
                pending.push((left, copy, Side::Left));
            }
        }
        cloned
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link::NONE,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// The number of keys in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key from the tree.
    ///
    /// Nodes are released from a work list rather than recursively, so clearing (or dropping) a
    /// tree that degenerated into a long chain can't overflow the stack.
    pub fn clear(&mut self) {
        let mut pending: Vec<NonNull<Node<K>>> = self.root.take().0.into_iter().collect();
        let mut freed = 0usize;
        while let Some(ptr) = pending.pop() {
            // SAFETY: Each node is reachable through exactly one owning link. We took the root
            // link above and every child link is only read from its (now freed) parent, so each
            // node ends up in `pending` once and is freed once. All nodes were allocated with
            // `Box::new` in `Node::new_leaked`.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            pending.extend(node.left.0);
            pending.extend(node.right.0);
            freed += 1;
        }
        debug_assert_eq!(freed, self.len);
        if freed > 0 {
            log::trace!("cleared tree, freed {} nodes", freed);
        }
        self.len = 0;
    }

    /// The smallest key in the tree, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.minimum(), None);
    ///
    /// tree.extend(vec![3, 1, 2]);
    /// assert_eq!(tree.minimum(), Some(&1));
    /// ```
    pub fn minimum(&self) -> Option<&K> {
        self.node(self.root)
            .map(|root| &self.outermost(root, Side::Left).key)
    }

    /// The largest key in the tree, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let tree = Tree::from_keys(vec![3, 1, 2]);
    /// assert_eq!(tree.maximum(), Some(&3));
    /// ```
    pub fn maximum(&self) -> Option<&K> {
        self.node(self.root)
            .map(|root| &self.outermost(root, Side::Right).key)
    }

    /// Iterates over the keys in preorder: each node before its left subtree, and the left
    /// subtree before the right one. Each call starts a new walk from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let tree = Tree::from_keys(vec![2, 3, 1]);
    /// let keys: Vec<_> = tree.preorder().copied().collect();
    ///
    /// assert_eq!(keys, [2, 1, 3]);
    /// ```
    pub fn preorder(&self) -> Preorder<'_, K> {
        // SAFETY: The iterator borrows `self` so the tree can't change while it exists.
        unsafe { Preorder::new(self.root, self.len) }
    }

    /// Iterates over the keys in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let tree = Tree::from_keys(vec![2, 3, 1, 2]);
    /// let keys: Vec<_> = tree.inorder().copied().collect();
    ///
    /// assert_eq!(keys, [1, 2, 2, 3]);
    /// ```
    pub fn inorder(&self) -> Inorder<'_, K> {
        // SAFETY: The iterator borrows `self` so the tree can't change while it exists.
        unsafe { Inorder::new(self.root, self.len) }
    }

    /// Same as [`Tree::inorder`].
    pub fn iter(&self) -> Inorder<'_, K> {
        self.inorder()
    }

    /// Dereferences a link of this tree for as long as the tree is borrowed.
    fn node(&self, link: Link<K>) -> Option<&Node<K>> {
        // SAFETY: Every link stored in the tree points at a live node the tree owns. Because we
        // take `&self`, no `&mut self` method can free or relink nodes while the returned
        // reference exists.
        unsafe { link.as_ref() }
    }

    /// Follows `side` children from `node` until there are no more.
    fn outermost<'a>(&'a self, mut node: &'a Node<K>, side: Side) -> &'a Node<K> {
        while let Some(child) = self.node(node.child(side)) {
            node = child;
        }
        node
    }

    /// The node holding the in-order neighbor of `node`: the next larger key when `side` is
    /// `Right`, the next smaller key when `side` is `Left`.
    fn neighbor<'a>(&'a self, node: &'a Node<K>, side: Side) -> Option<&'a Node<K>> {
        if let Some(child) = self.node(node.child(side)) {
            return Some(self.outermost(child, side.opposite()));
        }

        // Climb while we're coming up from the `side` child. The first ancestor we reach from the
        // other side is the neighbor.
        let mut current = node;
        while let Some(parent) = self.node(current.parent) {
            if !parent.child(side).points_to(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// [`Tree::outermost`] for callers that are about to write through the result.
    ///
    /// # Safety
    ///
    /// `node` must be a live node and no references into its subtree may exist.
    unsafe fn outermost_ptr(mut node: NonNull<Node<K>>, side: Side) -> NonNull<Node<K>> {
        while let Some(child) = (*node.as_ptr()).child(side).0 {
            node = child;
        }
        node
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v` in `u`'s parent (or at
    /// the root). `u` keeps its own links; the caller decides what happens to it.
    ///
    /// # Safety
    ///
    /// `u` must be a node of this tree, and `v` must be empty or a node of this tree that isn't
    /// an ancestor of `u`.
    unsafe fn transplant(&mut self, u: NonNull<Node<K>>, v: Link<K>) {
        let parent = (*u.as_ptr()).parent;
        match parent.0 {
            None => self.root = v,
            Some(parent) => {
                // A parent always holds its child on one side or the other.
                let side = match parent.as_ref().side_of(u) {
                    Some(side) => side,
                    None => unreachable!("parent link without a matching child link"),
                };
                *(*parent.as_ptr()).child_mut(side) = v;
            }
        }
        if let Some(v) = v.0 {
            (*v.as_ptr()).parent = parent;
        }

        if cfg!(debug_assertions) {
            if let Some(v) = v.0 {
                match parent.0 {
                    Some(parent) => assert!(parent.as_ref().side_of(v).is_some()),
                    None => assert_eq!(self.root, Link::to(v)),
                }
            }
        }
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Builds a tree by inserting `keys` one after another.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let tree = Tree::from_keys(vec![42, 6, 34, 18, 41, 8]);
    /// let keys: Vec<_> = tree.preorder().copied().collect();
    ///
    /// assert_eq!(keys, [42, 6, 34, 18, 8, 41]);
    /// ```
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }

    /// Inserts `key` as a new leaf. Inserting a key equal to one already stored adds another copy
    /// to the right of the existing one rather than replacing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K) {
        let mut parent = Link::NONE;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(node) = self.node(cursor) {
            side = if key < node.key {
                Side::Left
            } else {
                Side::Right
            };
            parent = cursor;
            cursor = node.child(side);
        }

        let new_node = Link::to(Node::new_leaked(key, parent));
        match parent.0 {
            None => self.root = new_node,
            // SAFETY: `parent` is a live node of this tree and we hold `&mut self` so there are no
            // outstanding references into it.
            Some(parent) => unsafe { *(*parent.as_ptr()).child_mut(side) = new_node },
        }
        self.len += 1;
        log::trace!("inserted leaf, tree now holds {} nodes", self.len);

        if cfg!(debug_assertions) {
            if let (Some(parent), Some(new_node)) = (self.node(parent), self.node(new_node)) {
                match side {
                    Side::Left => assert!(new_node.key < parent.key),
                    Side::Right => assert!(new_node.key >= parent.key),
                }
            }
        }
    }

    /// Finds the stored key equal to `key`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let tree = Tree::from_keys(vec![1, 2]);
    ///
    /// assert_eq!(tree.search(&1), Some(&1));
    /// assert_eq!(tree.search(&42), None);
    /// ```
    pub fn search(&self, key: &K) -> Option<&K> {
        self.find_node(key).map(|node| &node.key)
    }

    /// Whether a key equal to `key` is stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let tree = Tree::from_keys(vec![41]);
    ///
    /// assert!(tree.contains(&41));
    /// assert!(!tree.contains(&481));
    /// ```
    #[doc(alias = "is_key_exists")]
    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// The smallest stored key greater than `key`.
    ///
    /// Returns `Ok(None)` if `key` is the maximum and [`TreeError::KeyNotFound`] if `key` isn't in
    /// the tree at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::{Tree, TreeError};
    ///
    /// let tree = Tree::from_keys(vec![2, 1, 3]);
    ///
    /// assert_eq!(tree.successor(&1), Ok(Some(&2)));
    /// assert_eq!(tree.successor(&3), Ok(None));
    /// assert_eq!(tree.successor(&4), Err(TreeError::KeyNotFound));
    /// ```
    pub fn successor(&self, key: &K) -> Result<Option<&K>, TreeError> {
        self.neighbor_of(key, Side::Right)
    }

    /// The largest stored key smaller than `key`.
    ///
    /// Returns `Ok(None)` if `key` is the minimum and [`TreeError::KeyNotFound`] if `key` isn't in
    /// the tree at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::{Tree, TreeError};
    ///
    /// let tree = Tree::from_keys(vec![2, 1, 3]);
    ///
    /// assert_eq!(tree.predecessor(&3), Ok(Some(&2)));
    /// assert_eq!(tree.predecessor(&1), Ok(None));
    /// assert_eq!(tree.predecessor(&0), Err(TreeError::KeyNotFound));
    /// ```
    pub fn predecessor(&self, key: &K) -> Result<Option<&K>, TreeError> {
        self.neighbor_of(key, Side::Left)
    }

    /// Removes the stored key equal to `key` and returns it. If the tree doesn't contain the key,
    /// nothing happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// let mut tree = Tree::from_keys(vec![1, 2]);
    ///
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert!(!tree.contains(&1));
    /// assert_eq!(tree.remove(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let Some(target) = self.find_link(key).0 else {
            log::debug!("remove: key not in tree, nothing removed");
            return None;
        };

        // SAFETY: `target` and every link read below belong to this tree and we hold `&mut self`,
        // so no references into the tree exist. Each `transplant` gets a replacement that is a
        // descendant of the node being replaced, never an ancestor.
        unsafe {
            let Node { left, right, .. } = *target.as_ptr();
            match (left.0, right.0) {
                (None, _) => {
                    log::trace!("remove: splicing in right subtree");
                    self.transplant(target, right);
                }
                (Some(_), None) => {
                    log::trace!("remove: splicing in left subtree");
                    self.transplant(target, left);
                }
                (Some(left_ptr), Some(right_ptr)) => {
                    // The smallest key in the right subtree has no left child, so it can take
                    // over `target`'s left subtree.
                    let heir = Self::outermost_ptr(right_ptr, Side::Left);
                    log::trace!("remove: promoting in-order successor");
                    if heir != right_ptr {
                        self.transplant(heir, (*heir.as_ptr()).right);
                        (*heir.as_ptr()).right = right;
                        (*right_ptr.as_ptr()).parent = Link::to(heir);
                    }
                    self.transplant(target, Link::to(heir));
                    (*heir.as_ptr()).left = left;
                    (*left_ptr.as_ptr()).parent = Link::to(heir);
                }
            }
        }
        self.len -= 1;

        // SAFETY: `target` is no longer linked from its parent, the root, or any child. It was
        // allocated with `Box::new` and `Node` has no `Drop` so its stale links are just dropped.
        let node = unsafe { Box::from_raw(target.as_ptr()) };
        Some(node.key)
    }

    /// The link of the shallowest node whose key equals `key`, or an empty link.
    fn find_link(&self, key: &K) -> Link<K> {
        let mut cursor = self.root;
        while let Some(node) = self.node(cursor) {
            match key.cmp(&node.key) {
                Ordering::Less => cursor = node.left,
                Ordering::Equal => return cursor,
                Ordering::Greater => cursor = node.right,
            }
        }
        Link::NONE
    }

    fn find_node(&self, key: &K) -> Option<&Node<K>> {
        self.node(self.find_link(key))
    }

    fn neighbor_of(&self, key: &K, side: Side) -> Result<Option<&K>, TreeError> {
        let Some(node) = self.find_node(key) else {
            log::debug!("neighbor query on a key not in the tree");
            return Err(TreeError::KeyNotFound);
        };
        Ok(self.neighbor(node, side).map(|node| &node.key))
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self::from_keys(keys)
    }
}

impl<K, const N: usize> From<[K; N]> for Tree<K>
where
    K: Ord,
{
    fn from(keys: [K; N]) -> Self {
        Self::from_keys(keys)
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Inorder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

#[cfg(test)]
impl<K> Tree<K>
where
    K: Ord + fmt::Debug,
{
    /// Walks the whole tree checking key order against the bounds inherited from every ancestor,
    /// that every child points back at its parent, and that `len` matches the node count.
    pub(crate) fn assert_invariants(&self) {
        if let Some(root) = self.node(self.root) {
            assert_eq!(root.parent, Link::NONE, "root has a parent");
        }

        // (node, inclusive lower bound, exclusive upper bound)
        let mut pending: Vec<(&Node<K>, Option<&K>, Option<&K>)> = self
            .node(self.root)
            .map(|n| (n, None, None))
            .into_iter()
            .collect();
        let mut count = 0;
        while let Some((node, lower, upper)) = pending.pop() {
            count += 1;
            if let Some(lower) = lower {
                assert!(&node.key >= lower, "{:?} is left of {:?}", node.key, lower);
            }
            if let Some(upper) = upper {
                assert!(&node.key < upper, "{:?} is right of {:?}", node.key, upper);
            }
            if let Some(left) = self.node(node.left) {
                assert!(left.parent.points_to(node), "bad parent of {:?}", left.key);
                pending.push((left, lower, Some(&node.key)));
            }
            if let Some(right) = self.node(node.right) {
                assert!(
                    right.parent.points_to(node),
                    "bad parent of {:?}",
                    right.key
                );
                pending.push((right, Some(&node.key), upper));
            }
        }
        assert_eq!(count, self.len);
    }
}
