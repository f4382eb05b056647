use std::io::{self, Write};

use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for LRU metrics snapshots.
///
/// Writes the Prometheus text exposition format into any `io::Write`; serving
/// it over HTTP is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct PrometheusTextExporter {
    prefix: String,
}

impl PrometheusTextExporter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Renders `snapshot` into a `String`.
    pub fn render(&self, snapshot: &LruMetricsSnapshot) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.export(snapshot, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn write_metric<W: Write>(
        &self,
        writer: &mut W,
        kind: &str,
        suffix: &str,
        value: u64,
    ) -> io::Result<()> {
        let name = self.metric_name(suffix);
        writeln!(writer, "# TYPE {name} {kind}")?;
        writeln!(writer, "{name} {value}")
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter {
    fn export<W: Write>(&self, snapshot: &LruMetricsSnapshot, writer: &mut W) -> io::Result<()> {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_updates_total", snapshot.insert_updates),
            ("insert_new_total", snapshot.insert_new),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("touch_calls_total", snapshot.touch_calls),
            ("touch_found_total", snapshot.touch_found),
        ];
        for (suffix, value) in counters {
            self.write_metric(writer, "counter", suffix, value)?;
        }
        self.write_metric(writer, "gauge", "cache_len", snapshot.cache_len as u64)?;
        self.write_metric(writer, "gauge", "capacity", snapshot.capacity as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_prefixes_every_metric() {
        let snap = LruMetricsSnapshot {
            get_calls: 3,
            get_hits: 2,
            cache_len: 1,
            capacity: 4,
            ..Default::default()
        };
        let text = PrometheusTextExporter::new("lru").render(&snap);
        assert!(text.contains("# TYPE lru_get_calls_total counter\nlru_get_calls_total 3\n"));
        assert!(text.contains("lru_get_hits_total 2\n"));
        assert!(text.contains("# TYPE lru_capacity gauge\nlru_capacity 4\n"));
        assert!(text.lines().all(|line| line.starts_with("# TYPE lru_") || line.starts_with("lru_")));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let text = PrometheusTextExporter::default().render(&LruMetricsSnapshot::default());
        assert!(text.contains("\nget_calls_total 0\n"));
        assert!(text.ends_with("capacity 0\n"));
    }
}
