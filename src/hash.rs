//! Integer hashing and bucket selection.
//!
//! A key is first reduced to a signed 32-bit hash code with [`hash_code`],
//! then mapped onto the bucket array with [`bucket_index`].
//!
//! # Examples
//!
//! ```rust
//! use chainset::hash::{bucket_index, hash_code};
//! use std::num::NonZeroUsize;
//!
//! let buckets = NonZeroUsize::new(4).unwrap();
//!
//! // Small non-negative keys hash to themselves.
//! assert_eq!(hash_code(5), 5);
//! assert_eq!(bucket_index(hash_code(1), buckets), 1);
//! assert_eq!(bucket_index(hash_code(5), buckets), 1);
//! ```

use std::num::NonZeroUsize;

// =============================================================================
// Hash computation
// =============================================================================

/// Computes the 32-bit hash code of a key.
///
/// The upper half of the key is folded into the lower half with a logical
/// shift, and the result is truncated to 32 bits. Keys in `0..=i32::MAX`
/// hash to themselves.
///
/// # Examples
///
/// ```rust
/// use chainset::hash::hash_code;
///
/// assert_eq!(hash_code(0), 0);
/// assert_eq!(hash_code(42), 42);
/// assert_eq!(hash_code(1 << 32), 1);
/// ```
#[inline]
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub const fn hash_code(key: i64) -> i32 {
    let bits = key as u64;
    (bits ^ (bits >> 32)) as u32 as i32
}

/// Maps a hash code onto a bucket of an array with `bucket_count` slots.
///
/// The absolute value is taken as an unsigned integer, so `i32::MIN` does
/// not overflow. The result is always strictly less than `bucket_count`.
///
/// # Examples
///
/// ```rust
/// use chainset::hash::bucket_index;
/// use std::num::NonZeroUsize;
///
/// let buckets = NonZeroUsize::new(7).unwrap();
/// assert_eq!(bucket_index(-3, buckets), 3);
/// assert_eq!(bucket_index(i32::MIN, buckets), 2);
/// ```
#[inline]
#[must_use]
pub const fn bucket_index(hash_code: i32, bucket_count: NonZeroUsize) -> usize {
    hash_code.unsigned_abs() as usize % bucket_count.get()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn buckets(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(5, 5)]
    #[case(i64::from(i32::MAX), i32::MAX)]
    #[case(-1, 0)]
    #[case(-2, 1)]
    #[case(1 << 32, 1)]
    #[case(2_147_483_648, i32::MIN)]
    fn test_hash_code(#[case] key: i64, #[case] expected: i32) {
        assert_eq!(hash_code(key), expected);
    }

    #[rstest]
    fn test_hash_code_is_deterministic() {
        for key in [-7_i64, 0, 13, i64::MIN, i64::MAX] {
            assert_eq!(hash_code(key), hash_code(key));
        }
    }

    #[rstest]
    #[case(0, 4, 0)]
    #[case(1, 4, 1)]
    #[case(5, 4, 1)]
    #[case(-5, 4, 1)]
    #[case(i32::MAX, 1, 0)]
    #[case(i32::MIN, 7, 2)]
    #[case(i32::MIN, 2, 0)]
    fn test_bucket_index(#[case] code: i32, #[case] count: usize, #[case] expected: usize) {
        assert_eq!(bucket_index(code, buckets(count)), expected);
    }

    #[rstest]
    fn test_bucket_index_is_always_in_range() {
        for count in 1..=17 {
            for code in [i32::MIN, i32::MIN + 1, -100, -1, 0, 1, 100, i32::MAX] {
                assert!(bucket_index(code, buckets(count)) < count);
            }
        }
    }
}
