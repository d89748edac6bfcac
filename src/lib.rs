//! This crate exposes an unbalanced Binary Search Tree (BST) whose nodes keep a link back to
//! their parent.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored keys. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! stores a key and may have child `Node`s. The invariants of this BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key less than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key greater than or equal to
//!    its own key. Equal keys therefore always land to the right.
//! 3. Every `Node` except the root has a parent, and that parent has the `Node` as one of its two
//!    children.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` where `height` is the longest path from the root `Node` to a leaf
//! `Node`. This tree does no rebalancing, so the height depends entirely on insertion order. It
//! is `O(lg N)` for random input and `N` for sorted input. Nothing in the tree recurses, so even
//! that worst case only costs time, never call-stack space.
//!
//! The parent links are what make [`Tree::successor`] and [`Tree::predecessor`] cheap: once the
//! anchor key is found, its in-order neighbor is either in its own subtree or somewhere up the
//! path it was found on.
//!
//! # Examples
//!
//! ```
//! use arbor::Tree;
//!
//! let tree: Tree<_> = vec![42, 6, 34, 18, 41, 8].into_iter().collect();
//!
//! let sorted: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(sorted, [6, 8, 18, 34, 41, 42]);
//! ```
//!
//! ## Logging
//!
//! Structural changes are reported through the [`log`](https://docs.rs/log) facade at `trace`
//! level and misses (removing or querying a key that isn't stored) at `debug` level. The crate
//! never installs a logger itself.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
mod node;
pub mod tree;

pub use error::TreeError;
pub use tree::Tree;
