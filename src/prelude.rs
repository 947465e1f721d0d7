pub use crate::builder::SeriesBuilder;
pub use crate::ds::SampleId;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "concurrency")]
pub use crate::series::ConcurrentSelectiveSeries;
pub use crate::series::{Order, Sample, SelectiveSeries};
pub use crate::traits::{Score, Timestamp};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::SeriesMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
