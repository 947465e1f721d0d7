//! Optional observability for [`SelectiveSeries`](crate::series::SelectiveSeries).
//!
//! Compiled only with the `metrics` feature.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
