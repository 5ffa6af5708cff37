//! Optional operation counters for [`BoundedCache`](crate::policy::lru::BoundedCache).
//!
//! Enabled with the `metrics` feature. Counters are plain integers on
//! `&mut self` paths and relaxed atomics on `&self` paths.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
pub use traits::{MetricsReset, MetricsSnapshotProvider};
