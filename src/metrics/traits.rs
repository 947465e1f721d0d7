//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting* and *export* into small traits so
//! that monitoring never leaks into the retention logic of
//! [`SelectiveSeries`](crate::series::SelectiveSeries).
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │   SeriesMetricsRecorder      │    │  SeriesMetricsReadRecorder   │
//!   │  add/insert/evict/reject     │    │  best / lookups (&self)      │
//!   │  remove/merge/clear (&mut)   │    │                              │
//!   └──────────────┬───────────────┘    └──────────────┬───────────────┘
//!                  └─────────────┬─────────────────────┘
//!                                ▼
//!                        ┌───────────────┐
//!                        │ SeriesMetrics │
//!                        └───────┬───────┘
//!                                │ snapshot
//!           ┌────────────────────┴─────────────────────┐
//!           ▼                                          ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters bumped by mutating series operations.
pub trait SeriesMetricsRecorder {
    fn record_add_call(&mut self);
    fn record_insert_call(&mut self);
    /// Sample stored in a free slot (series not yet full).
    fn record_append(&mut self);
    /// Sample stored by overwriting the worst one.
    fn record_eviction(&mut self);
    fn record_rejection(&mut self);
    fn record_worst_scan_steps(&mut self, steps: u64);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_merge_call(&mut self);
    fn record_merge_duplicate(&mut self);
    fn record_merge_retained(&mut self, count: u64);
    fn record_clear(&mut self);
}

/// Counters bumped from `&self` methods (uses interior mutability).
pub trait SeriesMetricsReadRecorder {
    fn record_best_call(&self);
    fn record_exact_lookup_call(&self);
    fn record_exact_lookup_found(&self);
    fn record_closest_lookup_call(&self);
    fn record_lookup_scan_step(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
