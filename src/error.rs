//! Error types for the bucket set.
//!
//! Membership operations report their outcome as `bool`. Only construction
//! with an unusable or unallocatable capacity and reading past the end of
//! an iterator are treated as failures.

/// Represents the failures a [`BucketSet`](crate::BucketSet) can report.
///
/// # Examples
///
/// ```rust
/// use chainset::{BucketSet, SetError};
///
/// let error = BucketSet::new(0).unwrap_err();
/// assert_eq!(error, SetError::InvalidCapacity { capacity: 0 });
/// assert_eq!(
///     format!("{error}"),
///     "invalid capacity 0: a set needs at least one bucket"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetError {
    /// The requested bucket count cannot hold any key.
    InvalidCapacity {
        /// The rejected bucket count.
        capacity: usize,
    },
    /// The bucket array for the requested bucket count cannot be allocated.
    CapacityOverflow {
        /// The bucket count that could not be allocated.
        capacity: usize,
    },
    /// The iterator has already produced every key.
    ExhaustedIterator,
}

impl std::fmt::Display for SetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCapacity { capacity } => write!(
                formatter,
                "invalid capacity {capacity}: a set needs at least one bucket"
            ),
            Self::CapacityOverflow { capacity } => write!(
                formatter,
                "capacity overflow: cannot allocate {capacity} buckets"
            ),
            Self::ExhaustedIterator => write!(formatter, "iterator exhausted: no more keys"),
        }
    }
}

impl std::error::Error for SetError {}
