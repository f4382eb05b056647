//! Optional hit/miss/eviction counters (feature `metrics`).
//!
//! Recording, snapshotting and export are split into separate traits so the
//! cache only ever writes counters; readers take a [`LruMetricsSnapshot`].

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsExporter, MetricsSnapshotProvider};
