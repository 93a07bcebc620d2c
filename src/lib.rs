//! # chainset
//!
//! A fixed-capacity hash set of integers built on separate chaining.
//!
//! ## Overview
//!
//! The set owns an array of buckets chosen once at construction time. Each
//! bucket holds a singly-linked chain of entries; colliding keys are
//! prepended to the chain of their bucket. The table never grows.
//!
//! - **Hashing**: [`hash::hash_code`] and [`hash::bucket_index`]
//! - **Set**: [`BucketSet`] with `add`, `contains` and `remove`
//! - **Iteration**: [`BucketSetIterator`], a cursor that walks buckets in
//!   ascending order and each chain from its head
//! - **Shared access**: `SharedBucketSet`, a mutex-guarded set (`sync` feature)
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize and deserialize [`BucketSet`]
//! - `sync`: `SharedBucketSet` backed by `parking_lot`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use chainset::prelude::*;
//!
//! let mut set = BucketSet::new(4).unwrap();
//! assert!(set.add(1));
//! assert!(set.add(5));
//! assert!(!set.add(1));
//!
//! // 1 and 5 share bucket 1; the most recent key sits at the chain head.
//! assert_eq!(set.to_string(), "[1] 5 -> 1\n");
//!
//! let keys: Vec<i64> = set.iter().collect();
//! assert_eq!(keys, vec![5, 1]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the set, its iterator and the error type.
///
/// # Usage
///
/// ```rust
/// use chainset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bucket_set::{BucketSet, DEFAULT_CAPACITY};
    pub use crate::error::SetError;
    pub use crate::iter::BucketSetIterator;

    #[cfg(feature = "sync")]
    pub use crate::shared::SharedBucketSet;
}

pub mod bucket_set;
pub mod error;
pub mod hash;
pub mod iter;

#[cfg(feature = "sync")]
pub mod shared;

pub use bucket_set::{BucketSet, DEFAULT_CAPACITY};
pub use error::SetError;
pub use iter::BucketSetIterator;

#[cfg(feature = "sync")]
pub use shared::SharedBucketSet;
