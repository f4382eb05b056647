//! # Metrics Traits
//!
//! Mirrors the cache trait design by separating *recording*, *snapshotting*
//! and *export* responsibilities.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │   written by LruCache on &mut calls
//!   │  get_hit/get_miss/insert    │
//!   │  evict/touch                │
//!   └──────────────┬──────────────┘
//!                  │
//!     ┌────────────┴─────────────┐
//!     ▼                          ▼
//!  ┌──────────────────────────┐ ┌──────────────────────────┐
//!  │ MetricsSnapshotProvider  │ │ MetricsExporter<S>       │
//!  │ (bench/test)             │ │ (text exposition)        │
//!  └──────────────────────────┘ └──────────────────────────┘
//! ```
//!
//! Only operations that already hold `&mut self` record anything; `peek`,
//! `contains` and friends stay free of side effects.

use std::io;

/// Counters shared by every recording cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset counters between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Publish a snapshot to a monitoring sink.
pub trait MetricsExporter<S> {
    fn export<W: io::Write>(&self, snapshot: &S, writer: &mut W) -> io::Result<()>;
}
