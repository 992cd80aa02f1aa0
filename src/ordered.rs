//! An ordered map backed by a plain (unbalanced) Binary Search Tree. Keys are
//! kept in sorted order so iteration always yields ascending keys. Nothing is
//! ever rotated, so the shape of the tree is decided entirely by the order of
//! insertion and inserting sorted keys degrades it into a linked list.
//!
//! # Examples
//!
//! ```
//! use chainbst::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//!
//! // Nothing in here yet.
//! assert_eq!(map.get(&1), None);
//!
//! map.put(1, "one");
//! assert_eq!(map.get(&1), Some(&"one"));
//!
//! // Putting a new value for the same key overwrites the value.
//! map.put(1, "uno");
//! assert_eq!(map.get(&1), Some(&"uno"));
//! assert_eq!(map.len(), 1);
//!
//! // Deleting a key returns its value.
//! assert_eq!(map.delete(&1), Some("uno"));
//! assert_eq!(map.get(&1), None);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use tracing::trace;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A `Node` has a key that is used for searching/sorting and a value that is
/// associated with that key. Each node is owned by exactly one parent (or by
/// the map, for the root).
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }

    /// Detaches the node with the smallest key from the subtree in `slot` and
    /// hangs that node's right subtree where it used to be.
    fn take_min(mut slot: &mut Link<K, V>) -> Option<Box<Self>> {
        while slot.as_deref().is_some_and(|node| node.left.is_some()) {
            slot = &mut slot.as_mut()?.left;
        }

        let mut min = slot.take()?;
        *slot = min.right.take();
        Some(min)
    }

    /// Builds the replacement for a deleted node that had both children. The
    /// in-order successor (the smallest key of `right`) becomes the new subtree
    /// root with `left` beneath it.
    ///
    /// # Diagram
    ///
    /// ```text
    ///       (deleted)                 s
    ///       /      \                /   \
    ///    left      right   ->    left   right
    ///              /                    /
    ///            ...                  ...
    ///            /                    /
    ///           s                   s.right
    ///            \
    ///          s.right
    /// ```
    fn splice_successor(left: Box<Self>, mut right: Box<Self>) -> Box<Self> {
        match Self::take_min(&mut right.left) {
            Some(mut successor) => {
                trace!("Promoting successor from deep in the right subtree.");
                successor.left = Some(left);
                successor.right = Some(right);
                successor
            }
            // The right child has no left subtree so it is the successor.
            None => {
                trace!("Promoting right child as successor.");
                right.left = Some(left);
                right
            }
        }
    }
}

/// An ordered map stored as an unbalanced Binary Search Tree. This can be used
/// for putting, getting, and deleting keys and values, and for visiting all
/// entries in ascending key order.
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        // Tear down through the owning iterator so that a list-shaped tree
        // doesn't recurse once per level.
        drop(IntoIter::new(self.root.take(), mem::take(&mut self.len)));
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Generates a new, empty `OrderedMap`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the entries of the map in ascending key order.
    /// The map is borrowed for as long as the iterator lives so every entry it
    /// yields reflects the map as it was when the iterator was created. Call
    /// `iter` again (or clone the iterator) to start over.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbst::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(5, 'e'), (3, 'c'), (8, 'h')].into_iter().collect();
    /// let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    ///
    /// assert_eq!(keys, vec![3, 5, 8]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.len)
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        None
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Stores `value` under `key`. If the key is already present its value is
    /// overwritten in place and the previous value is returned; otherwise a
    /// new node is attached where the search fell off the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// assert_eq!(map.put(5, 1), None);
    /// assert_eq!(map.put(5, 2), Some(1));
    /// assert_eq!(map.get(&5), Some(&2));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
                Ordering::Greater => &mut node.right,
            };
        }

        *slot = Some(Node::new_boxed(key, value));
        self.len += 1;
        trace!(len = self.len, "Attached new node.");
        None
    }

    /// Potentially finds the value associated with the given key. If no node
    /// has the corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbst::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.put(String::from("x"), 2);
    ///
    /// assert_eq!(map.get("x"), Some(&2));
    /// assert_eq!(map.get("y"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|node| &node.value)
    }

    /// Like [`get`][Self::get] but hands out the value mutably.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }

        None
    }

    /// Whether some node holds `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Deletes the node containing the given key and returns its value. If the
    /// map does not contain the key, nothing happens.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children is replaced by its in-order successor, which is first
    /// unlinked from the right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbst::OrderedMap;
    ///
    /// let mut map: OrderedMap<_, _> = [5, 3, 8, 1, 4, 7, 9].into_iter().map(|k| (k, k)).collect();
    ///
    /// assert_eq!(map.delete(&5), Some(5));
    /// assert_eq!(map.delete(&5), None);
    ///
    /// let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, vec![1, 3, 4, 7, 8, 9]);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut slot = &mut self.root;
        loop {
            let ordering = key.cmp(slot.as_deref()?.key.borrow());
            slot = match ordering {
                Ordering::Less => &mut slot.as_mut()?.left,
                Ordering::Equal => break,
                Ordering::Greater => &mut slot.as_mut()?.right,
            };
        }

        let mut target = slot.take()?;
        *slot = match (target.left.take(), target.right.take()) {
            (None, None) => None,
            (None, Some(right)) => Some(right),
            (Some(left), None) => Some(left),
            (Some(left), Some(right)) => Some(Node::splice_successor(left, right)),
        };
        self.len -= 1;
        trace!(len = self.len, "Deleted node.");

        Some(target.value)
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), mem::take(&mut self.len))
    }
}

/// In-order iterator over borrowed entries. Rather than recursing, the path
/// back up to the next unvisited ancestor is kept on an explicit stack.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

/// Manual implementation of `Clone` so cloning an iterator doesn't require
/// `K: Clone` or `V: Clone`.
impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// In-order iterator that takes ownership of the entries.
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    fn new(root: Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Link<K, V>) {
        while let Some(mut node) = current {
            current = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;

        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
