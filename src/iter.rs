//! Bucket-order cursor over a [`BucketSet`].
//!
//! [`BucketSetIterator`] walks the bucket array in ascending index order
//! and each chain from its head. Keys added later to a bucket come out
//! before older keys of the same bucket.
//!
//! The cursor can be driven explicitly with [`has_next`] and [`try_next`],
//! or consumed as a standard [`Iterator`].
//!
//! [`has_next`]: BucketSetIterator::has_next
//! [`try_next`]: BucketSetIterator::try_next
//!
//! # Examples
//!
//! ```rust
//! use chainset::{BucketSet, SetError};
//!
//! let set = BucketSet::from_keys(4, [1, 5, 2]).unwrap();
//! let mut cursor = set.iter();
//!
//! let mut keys = Vec::new();
//! while cursor.has_next() {
//!     keys.push(cursor.try_next().unwrap());
//! }
//! assert_eq!(keys, vec![5, 1, 2]);
//! assert_eq!(cursor.try_next(), Err(SetError::ExhaustedIterator));
//! ```

use std::iter::FusedIterator;

use crate::bucket_set::{BucketSet, Entry};
use crate::error::SetError;

/// A cursor over the keys of a [`BucketSet`].
///
/// The cursor borrows the set, so the set cannot change while it is alive.
pub struct BucketSetIterator<'a> {
    set: &'a BucketSet,
    /// Bucket of `entry`; `None` before the first call to `try_next`.
    bucket: Option<usize>,
    entry: Option<&'a Entry>,
    yielded: usize,
}

impl<'a> BucketSetIterator<'a> {
    pub(crate) const fn new(set: &'a BucketSet) -> Self {
        Self {
            set,
            bucket: None,
            entry: None,
            yielded: 0,
        }
    }

    /// Returns `true` if another key can be produced.
    ///
    /// Read-only: it does not move the cursor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::BucketSet;
    ///
    /// let set = BucketSet::from_keys(4, [3]).unwrap();
    /// let mut cursor = set.iter();
    /// assert!(cursor.has_next());
    /// assert!(cursor.has_next());
    /// assert_eq!(cursor.try_next(), Ok(3));
    /// assert!(!cursor.has_next());
    /// ```
    #[must_use]
    pub fn has_next(&self) -> bool {
        if self.successor().is_some() {
            return true;
        }
        self.set
            .buckets()
            .iter()
            .skip(self.first_unvisited_bucket())
            .any(Option::is_some)
    }

    /// Advances the cursor and returns the next key.
    ///
    /// Within a chain the cursor moves to the successor entry. At the end of
    /// a chain it skips forward to the next non-empty bucket and returns its
    /// head.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::ExhaustedIterator`] once every key has been
    /// produced, and on every call after that.
    pub fn try_next(&mut self) -> Result<i64, SetError> {
        if let Some(successor) = self.successor() {
            self.entry = Some(successor);
            self.yielded += 1;
            return Ok(successor.key);
        }

        let start = self.first_unvisited_bucket();
        let found = self
            .set
            .buckets()
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(index, slot)| slot.as_deref().map(|head| (index, head)));

        let Some((index, head)) = found else {
            self.bucket = Some(self.set.capacity());
            self.entry = None;
            return Err(SetError::ExhaustedIterator);
        };

        self.bucket = Some(index);
        self.entry = Some(head);
        self.yielded += 1;
        Ok(head.key)
    }

    fn successor(&self) -> Option<&'a Entry> {
        self.entry.and_then(|entry| entry.next.as_deref())
    }

    fn first_unvisited_bucket(&self) -> usize {
        self.bucket.map_or(0, |index| index + 1)
    }
}

impl Iterator for BucketSetIterator<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BucketSetIterator<'_> {
    fn len(&self) -> usize {
        self.set.len() - self.yielded
    }
}

impl FusedIterator for BucketSetIterator<'_> {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_fresh_cursor_starts_before_first_bucket() {
        let set = BucketSet::new(4).unwrap();
        let cursor = set.iter();
        assert_eq!(cursor.bucket, None);
        assert!(cursor.entry.is_none());
    }

    #[rstest]
    fn test_empty_set_is_exhausted_immediately() {
        let set = BucketSet::new(4).unwrap();
        let mut cursor = set.iter();
        assert!(!cursor.has_next());
        assert_eq!(cursor.try_next(), Err(SetError::ExhaustedIterator));
    }

    #[rstest]
    fn test_skips_empty_buckets() {
        let set = BucketSet::from_keys(10, [9, 0, 4]).unwrap();
        let mut cursor = set.iter();
        assert_eq!(cursor.try_next(), Ok(0));
        assert_eq!(cursor.bucket, Some(0));
        assert_eq!(cursor.try_next(), Ok(4));
        assert_eq!(cursor.bucket, Some(4));
        assert_eq!(cursor.try_next(), Ok(9));
        assert_eq!(cursor.bucket, Some(9));
        assert!(!cursor.has_next());
    }

    #[rstest]
    fn test_walks_chain_before_next_bucket() {
        let set = BucketSet::from_keys(4, [1, 5, 2]).unwrap();
        let mut cursor = set.iter();
        assert_eq!(cursor.try_next(), Ok(5));
        assert!(cursor.has_next());
        assert_eq!(cursor.try_next(), Ok(1));
        assert_eq!(cursor.bucket, Some(1));
        assert_eq!(cursor.try_next(), Ok(2));
        assert_eq!(cursor.bucket, Some(2));
    }

    #[rstest]
    fn test_has_next_does_not_move_cursor() {
        let set = BucketSet::from_keys(4, [1, 2]).unwrap();
        let mut cursor = set.iter();
        cursor.try_next().unwrap();
        let before = (cursor.bucket, cursor.yielded);
        for _ in 0..3 {
            assert!(cursor.has_next());
        }
        assert_eq!((cursor.bucket, cursor.yielded), before);
    }

    #[rstest]
    fn test_exhausted_cursor_stays_exhausted() {
        let set = BucketSet::from_keys(2, [1]).unwrap();
        let mut cursor = set.iter();
        assert_eq!(cursor.try_next(), Ok(1));
        assert_eq!(cursor.try_next(), Err(SetError::ExhaustedIterator));
        assert_eq!(cursor.try_next(), Err(SetError::ExhaustedIterator));
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), None);
    }

    #[rstest]
    fn test_exact_size() {
        let set = BucketSet::from_keys(3, 0..7).unwrap();
        let mut cursor = set.iter();
        assert_eq!(cursor.len(), 7);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.len(), 5);
        assert_eq!(cursor.size_hint(), (5, Some(5)));
        assert_eq!(cursor.by_ref().count(), 5);
        assert_eq!(cursor.len(), 0);
    }

    #[rstest]
    fn test_independent_cursors() {
        let set = BucketSet::from_keys(4, [1, 2, 3]).unwrap();
        let mut first = set.iter();
        let mut second = set.iter();
        assert_eq!(first.try_next(), Ok(1));
        assert_eq!(first.try_next(), Ok(2));
        assert_eq!(second.try_next(), Ok(1));
    }
}
