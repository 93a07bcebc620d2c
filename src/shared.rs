//! Mutex-guarded bucket set for use across threads.
//!
//! [`BucketSet`] itself has no internal locking. [`SharedBucketSet`] wraps
//! one in a `parking_lot::Mutex` so that every operation, including a full
//! iteration through [`SharedBucketSet::with_set`], runs under the lock.
//!
//! # Examples
//!
//! ```rust
//! use chainset::SharedBucketSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(SharedBucketSet::new(16).unwrap());
//!
//! let handles: Vec<_> = (0..4_i64)
//!     .map(|worker| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             for offset in 0..25 {
//!                 set.add(worker * 100 + offset);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(set.len(), 100);
//! ```

use std::num::NonZeroUsize;

use parking_lot::Mutex;

use crate::bucket_set::BucketSet;
use crate::error::SetError;

/// A [`BucketSet`] behind a mutex.
#[derive(Default)]
pub struct SharedBucketSet {
    inner: Mutex<BucketSet>,
}

impl SharedBucketSet {
    /// Creates an empty shared set with exactly `capacity` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidCapacity`] when `capacity` is zero, and
    /// [`SetError::CapacityOverflow`] when the buckets cannot be allocated.
    pub fn new(capacity: usize) -> Result<Self, SetError> {
        BucketSet::new(capacity).map(Self::from)
    }

    /// Creates an empty shared set with `bucket_count` buckets.
    #[must_use]
    pub fn with_capacity(bucket_count: NonZeroUsize) -> Self {
        Self::from(BucketSet::with_capacity(bucket_count))
    }

    /// Inserts a key. See [`BucketSet::add`].
    pub fn add(&self, key: i64) -> bool {
        self.inner.lock().add(key)
    }

    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.inner.lock().contains(key)
    }

    /// Removes a key. See [`BucketSet::remove`].
    pub fn remove(&self, key: i64) -> bool {
        self.inner.lock().remove(key)
    }

    /// Returns the number of keys in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the set holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns the keys in iteration order, taken under a single lock.
    #[must_use]
    pub fn keys(&self) -> Vec<i64> {
        self.inner.lock().iter().collect()
    }

    /// Returns the diagnostic rendering of the buckets.
    #[must_use]
    pub fn render(&self) -> String {
        self.inner.lock().to_string()
    }

    /// Runs `action` with the set while holding the lock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::SharedBucketSet;
    ///
    /// let set = SharedBucketSet::new(4).unwrap();
    /// set.add(1);
    /// set.add(5);
    ///
    /// let total: i64 = set.with_set(|inner| inner.iter().sum());
    /// assert_eq!(total, 6);
    /// ```
    pub fn with_set<R>(&self, action: impl FnOnce(&BucketSet) -> R) -> R {
        action(&self.inner.lock())
    }

    /// Consumes the wrapper and returns the set.
    #[must_use]
    pub fn into_inner(self) -> BucketSet {
        self.inner.into_inner()
    }
}

impl From<BucketSet> for SharedBucketSet {
    fn from(set: BucketSet) -> Self {
        Self {
            inner: Mutex::new(set),
        }
    }
}

impl std::fmt::Debug for SharedBucketSet {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SharedBucketSet")
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

static_assertions::assert_impl_all!(SharedBucketSet: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
