use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::SeriesMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for series metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<SeriesMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &SeriesMetricsSnapshot) {
        self.write_counter("add_calls_total", snapshot.add_calls);
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("appended_total", snapshot.appended);
        self.write_counter("evictions_total", snapshot.evictions);
        self.write_counter("rejections_total", snapshot.rejections);
        self.write_counter("worst_scan_steps_total", snapshot.worst_scan_steps);
        self.write_counter("remove_calls_total", snapshot.remove_calls);
        self.write_counter("remove_found_total", snapshot.remove_found);
        self.write_counter("merge_calls_total", snapshot.merge_calls);
        self.write_counter("merge_duplicates_total", snapshot.merge_duplicates);
        self.write_counter("merge_retained_total", snapshot.merge_retained);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("best_calls_total", snapshot.best_calls);
        self.write_counter("exact_lookup_calls_total", snapshot.exact_lookup_calls);
        self.write_counter("exact_lookup_found_total", snapshot.exact_lookup_found);
        self.write_counter("closest_lookup_calls_total", snapshot.closest_lookup_calls);
        self.write_counter("lookup_scan_steps_total", snapshot.lookup_scan_steps);
        self.write_gauge("len", snapshot.len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
        self.write_gauge("dirty", snapshot.dirty as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("samples", Vec::new());
        let snapshot = SeriesMetricsSnapshot {
            add_calls: 12,
            evictions: 4,
            len: 8,
            capacity: 8,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE samples_add_calls_total counter\nsamples_add_calls_total 12\n"));
        assert!(text.contains("samples_evictions_total 4\n"));
        assert!(text.contains("# TYPE samples_len gauge\nsamples_len 8\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&SeriesMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\ndirty 0\n"));
        assert!(text.starts_with("# TYPE add_calls_total counter"));
    }
}
