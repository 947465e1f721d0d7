use crate::metrics::metrics_impl::SeriesMetrics;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeriesMetricsSnapshot {
    pub add_calls: u64,
    pub insert_calls: u64,
    pub appended: u64,
    pub evictions: u64,
    pub rejections: u64,
    pub worst_scan_steps: u64, // occupied slots visited while locating the worst sample

    pub remove_calls: u64,
    pub remove_found: u64,

    pub merge_calls: u64,
    pub merge_duplicates: u64,
    pub merge_retained: u64,

    pub clear_calls: u64,

    pub best_calls: u64,
    pub exact_lookup_calls: u64,
    pub exact_lookup_found: u64,
    pub closest_lookup_calls: u64,
    pub lookup_scan_steps: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
    pub dirty: usize,
}

impl SeriesMetricsSnapshot {
    pub(crate) fn capture(metrics: &SeriesMetrics, len: usize, capacity: usize, dirty: usize) -> Self {
        Self {
            add_calls: metrics.add_calls,
            insert_calls: metrics.insert_calls,
            appended: metrics.appended,
            evictions: metrics.evictions,
            rejections: metrics.rejections,
            worst_scan_steps: metrics.worst_scan_steps,
            remove_calls: metrics.remove_calls,
            remove_found: metrics.remove_found,
            merge_calls: metrics.merge_calls,
            merge_duplicates: metrics.merge_duplicates,
            merge_retained: metrics.merge_retained,
            clear_calls: metrics.clear_calls,
            best_calls: metrics.best_calls.get(),
            exact_lookup_calls: metrics.exact_lookup_calls.get(),
            exact_lookup_found: metrics.exact_lookup_found.get(),
            closest_lookup_calls: metrics.closest_lookup_calls.get(),
            lookup_scan_steps: metrics.lookup_scan_steps.get(),
            len,
            capacity,
            dirty,
        }
    }

    /// Samples stored, by appending or by eviction.
    pub fn retained(&self) -> u64 {
        self.appended + self.evictions
    }

    /// Fraction of add/insert calls that stored their sample.
    pub fn retention_rate(&self) -> f64 {
        let calls = self.add_calls + self.insert_calls;
        if calls == 0 {
            0.0
        } else {
            self.retained() as f64 / calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_rate_handles_zero_calls() {
        let snapshot = SeriesMetricsSnapshot::default();
        assert_eq!(snapshot.retention_rate(), 0.0);
    }

    #[test]
    fn retention_rate_counts_appends_and_evictions() {
        let snapshot = SeriesMetricsSnapshot {
            add_calls: 3,
            insert_calls: 1,
            appended: 2,
            evictions: 1,
            rejections: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.retained(), 3);
        assert!((snapshot.retention_rate() - 0.75).abs() < f64::EPSILON);
    }
}
