use std::sync::atomic::{AtomicU64, Ordering};

/// Counter bumped from `&self` paths (`peek`, `peek_lru`, `recency_rank`).
///
/// Relaxed atomics: readers under a shared lock may increment concurrently,
/// and counters carry no ordering obligations.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}
