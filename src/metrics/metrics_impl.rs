use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{SeriesMetricsReadRecorder, SeriesMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct SeriesMetrics {
    pub add_calls: u64,
    pub insert_calls: u64,
    pub appended: u64,
    pub evictions: u64,
    pub rejections: u64,
    pub worst_scan_steps: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub merge_calls: u64,
    pub merge_duplicates: u64,
    pub merge_retained: u64,
    pub clear_calls: u64,
    pub best_calls: MetricsCell,
    pub exact_lookup_calls: MetricsCell,
    pub exact_lookup_found: MetricsCell,
    pub closest_lookup_calls: MetricsCell,
    pub lookup_scan_steps: MetricsCell,
}

impl SeriesMetrics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SeriesMetricsRecorder for SeriesMetrics {
    #[inline]
    fn record_add_call(&mut self) {
        self.add_calls += 1;
    }

    #[inline]
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    #[inline]
    fn record_append(&mut self) {
        self.appended += 1;
    }

    #[inline]
    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    #[inline]
    fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    #[inline]
    fn record_worst_scan_steps(&mut self, steps: u64) {
        self.worst_scan_steps += steps;
    }

    #[inline]
    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    #[inline]
    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    #[inline]
    fn record_merge_call(&mut self) {
        self.merge_calls += 1;
    }

    #[inline]
    fn record_merge_duplicate(&mut self) {
        self.merge_duplicates += 1;
    }

    #[inline]
    fn record_merge_retained(&mut self, count: u64) {
        self.merge_retained += count;
    }

    #[inline]
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl SeriesMetricsReadRecorder for &SeriesMetrics {
    #[inline]
    fn record_best_call(&self) {
        self.best_calls.incr();
    }

    #[inline]
    fn record_exact_lookup_call(&self) {
        self.exact_lookup_calls.incr();
    }

    #[inline]
    fn record_exact_lookup_found(&self) {
        self.exact_lookup_found.incr();
    }

    #[inline]
    fn record_closest_lookup_call(&self) {
        self.closest_lookup_calls.incr();
    }

    #[inline]
    fn record_lookup_scan_step(&self) {
        self.lookup_scan_steps.incr();
    }
}
