//! # Metrics Traits
//!
//! Recording, snapshotting and resetting are split into small traits so the
//! cache core only ever writes counters and callers only ever read them.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │  get hit/miss, insert, evict, clear
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │   │   LruMetricsReadRecorder    │
//!   │  pop_lru / touch (&mut)     │   │  peek / recency_rank (&self)│
//!   └─────────────────────────────┘   └─────────────────────────────┘
//!
//!   Consumption:  MetricsSnapshotProvider<S>, MetricsReset
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU metrics for `&self` methods (uses interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Point-in-time copy of a recorder's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
