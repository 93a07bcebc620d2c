//! Fixed-capacity hash set of integers using separate chaining.
//!
//! This module provides [`BucketSet`], a hash set whose bucket array is
//! sized once at construction time and never rehashed.
//!
//! # Overview
//!
//! Every key is hashed with [`hash_code`] and mapped to a bucket with
//! [`bucket_index`]. A bucket holds a singly-linked chain of entries, and a
//! new key is prepended to the head of its chain.
//!
//! - O(1) average `add`, `contains` and `remove` (O(n) when every key collides)
//! - O(1) `len` and `is_empty`
//! - Iteration in ascending bucket order, most recent key first per bucket
//!
//! # Examples
//!
//! ```rust
//! use chainset::BucketSet;
//!
//! let mut set = BucketSet::new(8).unwrap();
//! assert!(set.add(3));
//! assert!(set.add(11));
//! assert!(!set.add(3));
//!
//! assert!(set.contains(11));
//! assert!(set.remove(3));
//! assert!(!set.contains(3));
//! assert_eq!(set.len(), 1);
//! ```
//!
//! # Diagnostic Rendering
//!
//! ```rust
//! use chainset::BucketSet;
//!
//! let set = BucketSet::from_keys(4, [1, 2, 5]).unwrap();
//! assert_eq!(set.to_string(), "[1] 5 -> 1\n[2] 2\n");
//! ```

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::SetError;
use crate::hash::{bucket_index, hash_code};
use crate::iter::BucketSetIterator;

/// Bucket count used by [`BucketSet::default`].
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(16).unwrap();

// =============================================================================
// Entry Definition
// =============================================================================

/// Owning link to the next entry of a chain, or the head of a bucket.
pub(crate) type Link = Option<Box<Entry>>;

/// A single key stored in a bucket chain.
pub(crate) struct Entry {
    pub(crate) key: i64,
    pub(crate) next: Link,
}

/// Walks a chain from the given link, head first.
pub(crate) fn chain_entries(link: &Link) -> impl Iterator<Item = &Entry> {
    std::iter::successors(link.as_deref(), |entry| entry.next.as_deref())
}

/// Drops a chain one entry at a time.
///
/// The default recursive drop of `Box<Entry>` would use one stack frame per
/// entry, which overflows on long chains.
fn unlink(mut link: Link) {
    while let Some(mut entry) = link {
        link = entry.next.take();
    }
}

// =============================================================================
// BucketSet Definition
// =============================================================================

/// A hash set of `i64` keys with a fixed number of buckets.
///
/// # Time Complexity
///
/// | Operation     | Complexity                  |
/// |---------------|-----------------------------|
/// | `new`         | O(capacity)                 |
/// | `add`         | O(1) average, O(n) worst    |
/// | `contains`    | O(1) average, O(n) worst    |
/// | `remove`      | O(1) average, O(n) worst    |
/// | `len`         | O(1)                        |
/// | `iter`        | O(capacity + n) in total    |
///
/// # Examples
///
/// ```rust
/// use chainset::BucketSet;
///
/// let mut set = BucketSet::default();
/// set.extend([1, 2, 3]);
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.capacity(), 16);
/// ```
pub struct BucketSet {
    buckets: Box<[Link]>,
    bucket_count: NonZeroUsize,
    size: usize,
}

impl BucketSet {
    /// Creates an empty set with exactly `capacity` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`] when `capacity` is zero, and
    /// [`SetError::CapacityOverflow`] when the bucket array cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::{BucketSet, SetError};
    ///
    /// let set = BucketSet::new(4).unwrap();
    /// assert_eq!(set.capacity(), 4);
    /// assert!(set.is_empty());
    ///
    /// assert_eq!(
    ///     BucketSet::new(0).unwrap_err(),
    ///     SetError::InvalidCapacity { capacity: 0 }
    /// );
    /// assert_eq!(
    ///     BucketSet::new(usize::MAX).unwrap_err(),
    ///     SetError::CapacityOverflow { capacity: usize::MAX }
    /// );
    /// ```
    pub fn new(capacity: usize) -> Result<Self, SetError> {
        let Some(bucket_count) = NonZeroUsize::new(capacity) else {
            tracing::warn!(capacity, "rejected bucket set capacity");
            return Err(SetError::InvalidCapacity { capacity });
        };

        let mut buckets = Vec::new();
        if let Err(error) = buckets.try_reserve_exact(capacity) {
            tracing::warn!(capacity, %error, "could not allocate bucket array");
            return Err(SetError::CapacityOverflow { capacity });
        }
        buckets.resize_with(capacity, || None);
        Ok(Self::from_buckets(buckets.into_boxed_slice(), bucket_count))
    }

    /// Creates an empty set with `bucket_count` buckets.
    ///
    /// # Panics
    ///
    /// Panics if the bucket array cannot be allocated. Use [`BucketSet::new`]
    /// to get a [`SetError::CapacityOverflow`] instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    /// use std::num::NonZeroUsize;
    ///
    /// let set = BucketSet::with_capacity(NonZeroUsize::new(32).unwrap());
    /// assert_eq!(set.capacity(), 32);
    /// ```
    #[must_use]
    pub fn with_capacity(bucket_count: NonZeroUsize) -> Self {
        let buckets = std::iter::repeat_with(|| None)
            .take(bucket_count.get())
            .collect();
        Self::from_buckets(buckets, bucket_count)
    }

    fn from_buckets(buckets: Box<[Link]>, bucket_count: NonZeroUsize) -> Self {
        tracing::debug!(capacity = bucket_count.get(), "created bucket set");
        Self {
            buckets,
            bucket_count,
            size: 0,
        }
    }

    /// Creates a set with `capacity` buckets holding the given keys.
    ///
    /// Repeated keys are stored once.
    ///
    /// # Errors
    ///
    /// Fails like [`BucketSet::new`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    ///
    /// let set = BucketSet::from_keys(8, [4, 4, 9]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn from_keys<I>(capacity: usize, keys: I) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut set = Self::new(capacity)?;
        set.extend(keys);
        Ok(set)
    }

    /// Returns the number of keys in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the set holds no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets, fixed at construction time.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.bucket_count.get()
    }

    /// Returns the ratio of stored keys to buckets.
    ///
    /// The set never acts on this value; chains simply grow longer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    ///
    /// let set = BucketSet::from_keys(4, [1, 2]).unwrap();
    /// assert!((set.load_factor() - 0.5).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.bucket_count.get() as f64
    }

    /// Inserts a key.
    ///
    /// Returns `false` without modifying the set if the key is already
    /// present. Otherwise the key becomes the head of its bucket's chain and
    /// `true` is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    ///
    /// let mut set = BucketSet::new(4).unwrap();
    /// assert!(set.add(7));
    /// assert!(!set.add(7));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, key: i64) -> bool {
        let index = self.bucket_of(key);
        let slot = &mut self.buckets[index];
        if chain_entries(slot).any(|entry| entry.key == key) {
            return false;
        }

        let next = slot.take();
        *slot = Some(Box::new(Entry { key, next }));
        self.size += 1;
        tracing::trace!(key, bucket = index, size = self.size, "added key");
        true
    }

    /// Returns `true` if the set contains `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    ///
    /// let set = BucketSet::from_keys(4, [1, 5]).unwrap();
    /// assert!(set.contains(5));
    /// assert!(!set.contains(9));
    /// ```
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        chain_entries(&self.buckets[self.bucket_of(key)]).any(|entry| entry.key == key)
    }

    /// Removes a key.
    ///
    /// The link that owned the matching entry, either the bucket head or the
    /// previous entry's `next`, is pointed at the entry's successor. Returns
    /// `false` without modifying the set if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    ///
    /// let mut set = BucketSet::from_keys(4, [1, 5]).unwrap();
    /// assert!(set.remove(1));
    /// assert!(!set.remove(1));
    /// assert!(set.contains(5));
    /// ```
    pub fn remove(&mut self, key: i64) -> bool {
        let index = self.bucket_of(key);
        let mut cursor = &mut self.buckets[index];
        loop {
            if let Some(removed) = cursor.take_if(|entry| entry.key == key) {
                *cursor = removed.next;
                self.size -= 1;
                tracing::trace!(key, bucket = index, size = self.size, "removed key");
                return true;
            }
            match cursor {
                Some(entry) => cursor = &mut entry.next,
                None => return false,
            }
        }
    }

    /// Removes every key, keeping the bucket array.
    pub fn clear(&mut self) {
        for slot in &mut self.buckets {
            unlink(slot.take());
        }
        self.size = 0;
        tracing::debug!(capacity = self.capacity(), "cleared bucket set");
    }

    /// Returns an iterator over the keys in bucket order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    ///
    /// let set = BucketSet::from_keys(8, [3, 1, 2]).unwrap();
    /// let keys: Vec<i64> = set.iter().collect();
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub const fn iter(&self) -> BucketSetIterator<'_> {
        BucketSetIterator::new(self)
    }

    /// Returns the keys chained in bucket `index`, head first.
    ///
    /// An out-of-range index yields nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    ///
    /// let set = BucketSet::from_keys(4, [1, 5, 9]).unwrap();
    /// assert_eq!(set.chain(1).collect::<Vec<_>>(), vec![9, 5, 1]);
    /// assert_eq!(set.chain(0).count(), 0);
    /// ```
    pub fn chain(&self, index: usize) -> impl Iterator<Item = i64> + '_ {
        self.buckets
            .get(index)
            .into_iter()
            .flat_map(chain_entries)
            .map(|entry| entry.key)
    }

    /// Returns the number of keys chained in bucket `index`.
    #[must_use]
    pub fn chain_len(&self, index: usize) -> usize {
        self.chain(index).count()
    }

    pub(crate) fn buckets(&self) -> &[Link] {
        &self.buckets
    }

    const fn bucket_of(&self, key: i64) -> usize {
        bucket_index(hash_code(key), self.bucket_count)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl Default for BucketSet {
    #[inline]
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Drop for BucketSet {
    fn drop(&mut self) {
        for slot in &mut self.buckets {
            unlink(slot.take());
        }
    }
}

impl Clone for BucketSet {
    fn clone(&self) -> Self {
        let buckets = self
            .buckets
            .iter()
            .map(|slot| {
                let mut head: Link = None;
                let mut tail = &mut head;
                for entry in chain_entries(slot) {
                    let copy = Box::new(Entry {
                        key: entry.key,
                        next: None,
                    });
                    tail = &mut tail.insert(copy).next;
                }
                head
            })
            .collect();
        Self {
            buckets,
            bucket_count: self.bucket_count,
            size: self.size,
        }
    }
}

impl Extend<i64> for BucketSet {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, keys: I) {
        for key in keys {
            self.add(key);
        }
    }
}

impl<'a> Extend<&'a i64> for BucketSet {
    fn extend<I: IntoIterator<Item = &'a i64>>(&mut self, keys: I) {
        self.extend(keys.into_iter().copied());
    }
}

impl<'a> IntoIterator for &'a BucketSet {
    type Item = i64;
    type IntoIter = BucketSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for BucketSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|key| other.contains(key))
    }
}

impl Eq for BucketSet {}

impl fmt::Debug for BucketSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

/// Renders one line per non-empty bucket as `[index] key -> key -> ...`.
impl fmt::Display for BucketSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            let mut entries = chain_entries(slot);
            if let Some(head) = entries.next() {
                write!(formatter, "[{index}] {}", head.key)?;
                for entry in entries {
                    write!(formatter, " -> {}", entry.key)?;
                }
                writeln!(formatter)?;
            }
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(BucketSet: Send, Sync, Clone, Default);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for BucketSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let keys: Vec<i64> = self.iter().collect();
        let mut state = serializer.serialize_struct("BucketSet", 2)?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("keys", &keys)?;
        state.end()
    }
}

/// Serialized form read back by `Deserialize`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename = "BucketSet")]
struct BucketSetRepr {
    capacity: usize,
    keys: Vec<i64>,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BucketSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let BucketSetRepr { capacity, keys } = BucketSetRepr::deserialize(deserializer)?;
        let mut set = Self::new(capacity).map_err(serde::de::Error::custom)?;
        // Keys arrive head first; re-adding them in reverse restores each chain.
        set.extend(keys.into_iter().rev());
        Ok(set)
    }
}

// =============================================================================
// Tests
// =============================================================================
