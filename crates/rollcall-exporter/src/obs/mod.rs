//! Metric registry and text rendering.
//!
//! Families live in a `prometheus::Registry` and are rendered by the
//! `/metrics` handler.

pub mod metrics;

pub use metrics::ExporterMetrics;
