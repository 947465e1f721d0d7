//! samplekit: fixed-capacity selective time series.
//!
//! A [`SelectiveSeries`] retains, out of an unbounded stream of timestamped
//! and scored samples, the `capacity` best-scoring ones (score 0 is best) and
//! keeps them in time order, oldest first or newest first.
//!
//! ```
//! use samplekit::prelude::*;
//!
//! let mut series: SelectiveSeries<&str> = SeriesBuilder::new(3).build();
//! series.add_scored("a", 0, 5.0);
//! series.add_scored("b", 1, 3.0);
//! series.add_scored("c", 2, 8.0);
//! series.add_scored("d", 3, 1.0);
//!
//! let kept: Vec<&str> = series.iter().map(|s| s.value).collect();
//! assert_eq!(kept, vec!["a", "b", "d"]);
//! ```
//!
//! ## Modules
//!
//! - [`series`]: the container, its samples and iterators
//! - [`ds`]: the slot arena and order permutation underneath it
//! - [`traits`]: [`Timestamp`](traits::Timestamp) and [`Score`](traits::Score) bounds
//! - [`builder`]: [`SeriesBuilder`](builder::SeriesBuilder)
//! - [`error`]: configuration and invariant errors
//! - `metrics` (feature `metrics`): counters, snapshots, Prometheus export
//!
//! ## Features
//!
//! - `metrics`: operation counters on every series
//! - `concurrency`: `ConcurrentSelectiveSeries` backed by `parking_lot`

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod series;
pub mod traits;

pub use crate::ds::SampleId;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::SeriesMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::series::ConcurrentSelectiveSeries;
pub use crate::series::{Order, Sample, SelectiveSeries};
