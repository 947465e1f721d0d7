//! # Sample Attribute Traits
//!
//! Capability bounds for the timestamp and score types stored in a
//! [`SelectiveSeries`](crate::series::SelectiveSeries).
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────┐      ┌──────────────────────────────────┐
//!   │          Timestamp               │      │            Score                 │
//!   │                                  │      │                                  │
//!   │  Copy + Ord                      │      │  Copy + PartialOrd               │
//!   │  origin()      → first default   │      │  best()  → 0 (best possible)     │
//!   │  successor()   → self + 1 (sat.) │      │                                  │
//!   │  abs_diff(o)   → |self - o|      │      │  larger score = worse sample     │
//!   └──────────────────────────────────┘      └──────────────────────────────────┘
//!                  │                                          │
//!                  ▼                                          ▼
//!        ordering of the time view                  eviction / best(n) selection
//! ```
//!
//! Timestamps need a total order (the time view is a sorted permutation) and a
//! successor so that `add` can hand out default timestamps. Scores only need a
//! partial order: floating-point scores are the common case. A `NaN` score
//! ranks below every comparable score (see [`Score::is_worse_than`]): it is
//! evicted first and never displaces a comparable sample.
//!
//! ## Provided Implementations
//!
//! | Trait       | Types                                                   |
//! |-------------|---------------------------------------------------------|
//! | `Timestamp` | `u8`..`u128`, `usize`, `i8`..`i128`, `isize`            |
//! | `Score`     | `f32`, `f64`, `u8`..`u128`, `usize`, `i8`..`i128`, `isize` |
//!
//! ## Example
//!
//! ```
//! use samplekit::traits::{Score, Timestamp};
//!
//! assert_eq!(<u64 as Timestamp>::origin(), 0);
//! assert_eq!(41u64.successor(), 42);
//! assert_eq!(u8::MAX.successor(), u8::MAX); // saturates
//! assert_eq!(Timestamp::abs_diff(-3i32, 4i32), 7u32);
//!
//! assert_eq!(<f32 as Score>::best(), 0.0);
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;

/// Timestamp attached to every sample.
pub trait Timestamp: Copy + Ord + Debug {
    /// Unsigned distance between two timestamps.
    type Delta: Copy + Ord + Debug;

    /// Timestamp handed out by the first default-timestamp `add`.
    fn origin() -> Self;

    /// The next timestamp, saturating at the type's maximum.
    fn successor(self) -> Self;

    /// Absolute distance `|self - other|`.
    fn abs_diff(self, other: Self) -> Self::Delta;
}

/// Score attached to every sample. `best()` (zero) is the best score; larger
/// is worse.
pub trait Score: Copy + PartialOrd + Debug {
    /// The best possible score, used for samples added without a score.
    fn best() -> Self;

    /// Returns `true` if `self` is strictly worse than `other`.
    ///
    /// An incomparable score (`NaN`) is worse than any comparable one, and two
    /// incomparable scores tie.
    #[inline]
    fn is_worse_than(self, other: Self) -> bool {
        match self.partial_cmp(&other) {
            Some(ordering) => ordering == Ordering::Greater,
            None => other.partial_cmp(&other).is_some(),
        }
    }
}

macro_rules! impl_timestamp {
    ($($ty:ty => $delta:ty),* $(,)?) => {
        $(
            impl Timestamp for $ty {
                type Delta = $delta;

                #[inline]
                fn origin() -> Self {
                    0
                }

                #[inline]
                fn successor(self) -> Self {
                    self.saturating_add(1)
                }

                #[inline]
                fn abs_diff(self, other: Self) -> Self::Delta {
                    <$ty>::abs_diff(self, other)
                }
            }
        )*
    };
}

impl_timestamp! {
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    u128 => u128,
    usize => usize,
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
}

macro_rules! impl_score {
    ($zero:literal => $($ty:ty),*) => {
        $(
            impl Score for $ty {
                #[inline]
                fn best() -> Self {
                    $zero
                }
            }
        )*
    };
}

impl_score!(0.0 => f32, f64);
impl_score!(0 => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_successor_saturates() {
        assert_eq!(0u32.successor(), 1);
        assert_eq!(u32::MAX.successor(), u32::MAX);
        assert_eq!(usize::MAX.successor(), usize::MAX);
    }

    #[test]
    fn signed_successor_crosses_zero() {
        assert_eq!((-1i64).successor(), 0);
        assert_eq!(i64::MAX.successor(), i64::MAX);
    }

    #[test]
    fn abs_diff_is_symmetric() {
        assert_eq!(Timestamp::abs_diff(10u64, 3u64), 7);
        assert_eq!(Timestamp::abs_diff(3u64, 10u64), 7);
        assert_eq!(Timestamp::abs_diff(i8::MIN, i8::MAX), 255u8);
    }

    #[test]
    fn origin_is_zero() {
        assert_eq!(<u8 as Timestamp>::origin(), 0);
        assert_eq!(<i32 as Timestamp>::origin(), 0);
    }

    #[test]
    fn worse_is_strict() {
        assert!(2.0f32.is_worse_than(1.0));
        assert!(!1.0f32.is_worse_than(1.0));
        assert!(!0.5f32.is_worse_than(1.0));
        assert!(3u8.is_worse_than(2));
    }

    #[test]
    fn nan_is_worst() {
        assert!(f64::NAN.is_worse_than(1e9));
        assert!(!1e9f64.is_worse_than(f64::NAN));
        assert!(!f64::NAN.is_worse_than(f64::NAN));
    }

    #[test]
    fn best_score_is_zero() {
        assert_eq!(<f64 as Score>::best(), 0.0);
        assert_eq!(<u16 as Score>::best(), 0);
        assert_eq!(<i32 as Score>::best(), 0);
    }
}
