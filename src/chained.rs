//! A hash map using separate chaining. The table is a fixed number of buckets
//! chosen at construction; each bucket heads a singly linked chain of the
//! entries whose keys hash there. The table never grows, so once the number
//! of entries outpaces the bucket count lookups degrade to walking long
//! chains.
//!
//! # Examples
//!
//! ```
//! use chainbst::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::with_buckets(7)?;
//!
//! map.put("apple", 3);
//! map.put("pear", 5);
//! assert_eq!(map.get("apple"), Some(&3));
//!
//! // Values can be searched for too, though that walks every entry.
//! assert!(map.contains(&5));
//! assert_eq!(map.get_key(&5), Some(&"pear"));
//!
//! assert_eq!(map.remove("apple"), Some(3));
//! assert_eq!(map.get("apple"), None);
//! # Ok::<(), chainbst::Error>(())
//! ```

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::{self, FusedIterator};
use std::mem;
use std::slice;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Bucket count used when none is given. Small and prime so keys with
/// patterned hash codes still spread out.
pub const DEFAULT_BUCKETS: usize = 11;

type Chain<K, V> = Option<Box<ChainNode<K, V>>>;

struct ChainNode<K, V> {
    key: K,
    value: V,
    next: Chain<K, V>,
}

/// A key-value store laid out as a fixed array of buckets, each holding a
/// chain of colliding entries. Keys are found by hashing them with `S` and
/// reducing the hash modulo the bucket count.
pub struct ChainedHashMap<K, V, S = RandomState> {
    buckets: Box<[Chain<K, V>]>,
    len: usize,
    hash_builder: S,
}

impl<K, V> ChainedHashMap<K, V, RandomState> {
    /// Creates an empty map with [`DEFAULT_BUCKETS`] buckets.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty map with exactly `buckets` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `buckets` is zero.
    pub fn with_buckets(buckets: usize) -> Result<Self> {
        Self::with_buckets_and_hasher(buckets, RandomState::new())
    }
}

impl<K, V, S> Default for ChainedHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Drop for ChainedHashMap<K, V, S> {
    fn drop(&mut self) {
        for bucket in self.buckets.iter_mut() {
            let mut current = bucket.take();
            while let Some(mut node) = current {
                current = node.next.take();
            }
        }
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Creates an empty map with [`DEFAULT_BUCKETS`] buckets that hashes keys
    /// with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::build(DEFAULT_BUCKETS, hash_builder)
    }

    /// Creates an empty map with exactly `buckets` buckets that hashes keys
    /// with `hash_builder`. The bucket count never changes afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `buckets` is zero.
    pub fn with_buckets_and_hasher(buckets: usize, hash_builder: S) -> Result<Self> {
        if buckets == 0 {
            return Err(Error::InvalidArgument("bucket count must be positive"));
        }

        Ok(Self::build(buckets, hash_builder))
    }

    fn build(buckets: usize, hash_builder: S) -> Self {
        debug!(buckets, "Creating chained hash map.");

        Self {
            buckets: iter::repeat_with(|| None).take(buckets).collect(),
            len: 0,
            hash_builder,
        }
    }

    /// The number of entries across all chains.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The fixed number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Whether any entry stores a value equal to `value`.
    ///
    /// Only keys are hashed, so this is a linear scan over every bucket and
    /// every chain: O(n), not O(1).
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.entries().any(|(_, v)| v == value)
    }

    /// Returns the key of the first entry whose value equals `value`, scanning
    /// buckets in order and each chain from head to tail. Like
    /// [`contains`][Self::contains] this is O(n).
    pub fn get_key(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.entries().find(|(_, v)| *v == value).map(|(k, _)| k)
    }

    fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            buckets: self.buckets.iter(),
            current: None,
        }
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Home bucket of `key`. The hash code is an unsigned 64 bit value, so it
    /// is reduced as is; there is no sign to strip and no overflow when the
    /// hash has its top bit set.
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Stores `value` under `key`. If the key is already in its chain the
    /// value is overwritten in place and the previous value returned;
    /// otherwise a new node goes at the tail of the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbst::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    ///
    /// assert_eq!(map.put(5, "five"), None);
    /// assert_eq!(map.put(5, "FIVE"), Some("five"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);

        let mut position = 0;
        let mut slot = &mut self.buckets[index];
        while let Some(node) = slot {
            if node.key == key {
                return Some(mem::replace(&mut node.value, value));
            }
            slot = &mut node.next;
            position += 1;
        }

        *slot = Some(Box::new(ChainNode {
            key,
            value,
            next: None,
        }));
        self.len += 1;
        trace!(bucket = index, position, "Linked new chain node.");

        None
    }

    /// Potentially finds the value stored under `key`, walking only that
    /// key's chain.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut current = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(node) = current {
            if key.eq(node.key.borrow()) {
                return Some(&node.value);
            }
            current = node.next.as_deref();
        }

        None
    }

    /// Like [`get`][Self::get] but hands out the value mutably.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let mut current = self.buckets[index].as_deref_mut();
        while let Some(node) = current {
            if key.eq(node.key.borrow()) {
                return Some(&mut node.value);
            }
            current = node.next.as_deref_mut();
        }

        None
    }

    /// Whether an entry is stored under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Unlinks the entry stored under `key` and returns its value. The node's
    /// predecessor (or the bucket head) is linked straight to its successor,
    /// so the rest of the chain stays reachable.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbst::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.put("a", 1);
    ///
    /// assert_eq!(map.remove("a"), Some(1));
    /// assert_eq!(map.remove("a"), None);
    /// assert!(map.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);

        let mut slot = &mut self.buckets[index];
        while slot.as_deref().is_some_and(|node| !key.eq(node.key.borrow())) {
            slot = &mut slot.as_mut()?.next;
        }

        let mut removed = slot.take()?;
        *slot = removed.next.take();
        self.len -= 1;
        trace!(bucket = index, "Unlinked chain node.");

        Some(removed.value)
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Visits every entry, bucket by bucket and each chain from head to tail.
struct Entries<'a, K, V> {
    buckets: slice::Iter<'a, Chain<K, V>>,
    current: Option<&'a ChainNode<K, V>>,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current {
                self.current = node.next.as_deref();
                return Some((&node.key, &node.value));
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }
}

impl<K, V> FusedIterator for Entries<'_, K, V> {}
