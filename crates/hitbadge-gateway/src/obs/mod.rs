//! Lightweight in-process metrics.
//!
//! Metrics are stored as atomics and rendered in Prometheus text format by the
//! handler mounted at `gateway.metrics_path`.

pub mod metrics;

pub use metrics::HitMetrics;
