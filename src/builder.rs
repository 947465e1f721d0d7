//! Builder for selective series.
//!
//! Collects the two runtime parameters of a series (capacity and iteration
//! order) and builds either a plain [`SelectiveSeries`] or, with the
//! `concurrency` feature, a [`ConcurrentSelectiveSeries`].
//!
//! ## Example
//!
//! ```rust
//! use samplekit::builder::SeriesBuilder;
//! use samplekit::series::Order;
//!
//! let mut series = SeriesBuilder::new(100)
//!     .order(Order::Reverse)
//!     .build::<String, u64, f32>();
//! series.add_scored("hello".to_string(), 3, 0.5);
//! assert_eq!(series.order(), Order::Reverse);
//! assert_eq!(series.len(), 1);
//! ```
//!
//! [`ConcurrentSelectiveSeries`]: crate::series::ConcurrentSelectiveSeries

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::series::ConcurrentSelectiveSeries;
use crate::series::{Order, SelectiveSeries};
use crate::traits::{Score, Timestamp};

/// Builder for creating series instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesBuilder {
    capacity: usize,
    order: Order,
}

impl SeriesBuilder {
    /// Create a new builder with the specified capacity and forward order.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: Order::default(),
        }
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Oldest sample first.
    pub fn forward(self) -> Self {
        self.order(Order::Forward)
    }

    /// Newest sample first.
    pub fn reverse(self) -> Self {
        self.order(Order::Reverse)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a series.
    ///
    /// A capacity of zero yields a series that rejects every sample; see
    /// [`try_build`](Self::try_build).
    ///
    /// # Type Parameters
    ///
    /// - `V`: Value type
    /// - `T`: Timestamp type, must implement [`Timestamp`]
    /// - `S`: Score type, must implement [`Score`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use samplekit::builder::SeriesBuilder;
    ///
    /// // integer timestamps and scores
    /// let series = SeriesBuilder::new(16).build::<&str, u32, u16>();
    /// assert_eq!(series.capacity(), 16);
    ///
    /// // newest first
    /// let series = SeriesBuilder::new(16).reverse().build::<&str, i64, f64>();
    /// assert!(series.order().is_reverse());
    /// ```
    pub fn build<V, T, S>(self) -> SelectiveSeries<V, T, S>
    where
        T: Timestamp,
        S: Score,
    {
        SelectiveSeries::with_order(self.capacity, self.order)
    }

    /// Build a series, rejecting a capacity of zero.
    pub fn try_build<V, T, S>(self) -> Result<SelectiveSeries<V, T, S>, ConfigError>
    where
        T: Timestamp,
        S: Score,
    {
        SelectiveSeries::try_with_order(self.capacity, self.order)
    }

    /// Build a lock-protected series for sharing across threads.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<V, T, S>(self) -> ConcurrentSelectiveSeries<V, T, S>
    where
        T: Timestamp,
        S: Score,
    {
        ConcurrentSelectiveSeries::with_order(self.capacity, self.order)
    }
}
