//! Error types for the samplekit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by
//!   [`SelectiveSeries::check_invariants`](crate::series::SelectiveSeries::check_invariants)
//!   when the order permutation, the slot storage and the bookkeeping counters
//!   disagree.
//! - [`ConfigError`]: Returned when series configuration parameters are
//!   invalid (zero capacity).
//!
//! Rejection of a sample by the scoring policy is *not* an error: it is
//! reported through a `bool` (or an unchanged dirty count) by the insertion
//! methods themselves.
//!
//! ## Example Usage
//!
//! ```
//! use samplekit::error::ConfigError;
//! use samplekit::series::SelectiveSeries;
//!
//! let series: Result<SelectiveSeries<u32>, ConfigError> = SelectiveSeries::try_new(16);
//! assert!(series.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = SelectiveSeries::<u32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal series invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when series configuration parameters are invalid.
///
/// Produced by [`SelectiveSeries::try_new`](crate::series::SelectiveSeries::try_new)
/// and [`SeriesBuilder::try_build`](crate::builder::SeriesBuilder::try_build).
///
/// # Example
///
/// ```
/// use samplekit::builder::SeriesBuilder;
///
/// let err = SeriesBuilder::new(0).try_build::<u64, u64, f32>().unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SelectiveSeries;

    #[test]
    fn invariant_error_reports_what_broke() {
        let mut series: SelectiveSeries<u32> = SelectiveSeries::new(2);
        series.add_at(0, 9);
        series.add_at(1, 3);

        let err = series.check_invariants().unwrap_err();
        assert!(err.message().contains("time order"));
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn config_error_propagates_as_dyn_error() {
        fn build(capacity: usize) -> Result<usize, Box<dyn std::error::Error>> {
            let series = SelectiveSeries::<u32>::try_new(capacity)?;
            Ok(series.capacity())
        }

        assert_eq!(build(4).unwrap(), 4);
        let err = build(0).unwrap_err();
        assert_eq!(err.to_string(), "capacity must be greater than zero");
    }
}
