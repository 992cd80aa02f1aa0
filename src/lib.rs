//! This crate exposes two associative containers built from owned, singly
//! linked nodes: an ordered map on top of a Binary Search Tree and a hash map
//! on top of separately chained buckets.
//!
//! ## Ordered map
//!
//! [`OrderedMap`] is a Binary Search Tree. Every `Node` stores a key, a value
//! and up to two child `Node`s. The invariants are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key less
//!    than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key
//!    greater than its own key.
//!
//! Searching takes `O(height)`. The tree is never rebalanced, so the height
//! depends on insertion order: random keys give `O(lg N)` on average while
//! sorted keys give a linked list of height `N`. The invariants make sorted
//! iteration natural by visiting the left subtree, then the subtree root,
//! then the right subtree.
//!
//! ## Chained hash map
//!
//! [`ChainedHashMap`] owns a fixed number of buckets chosen when it is built.
//! A key lives in bucket `hash(key) % buckets`, in a chain alongside every
//! other key that landed there. Nothing resizes the table, so the average
//! chain grows with the load factor (entries per bucket) and lookups with it.
//!
//! Neither container is synchronized; wrap them in a lock to share them
//! between threads.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod chained;
mod error;
pub mod ordered;


pub use chained::ChainedHashMap;
pub use error::{Error, Result};
pub use ordered::OrderedMap;
