use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
};

#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl LruMetrics {
    /// Copies the counters, pairing them with the cache gauges.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            clear_calls: self.clear_calls,
            pop_lru_calls: self.pop_lru_calls,
            pop_lru_found: self.pop_lru_found,
            touch_calls: self.touch_calls,
            touch_found: self.touch_found,
            peek_calls: self.peek_calls.get(),
            peek_found: self.peek_found.get(),
            peek_lru_calls: self.peek_lru_calls.get(),
            peek_lru_found: self.peek_lru_found.get(),
            recency_rank_calls: self.recency_rank_calls.get(),
            recency_rank_found: self.recency_rank_found.get(),
            recency_rank_scan_steps: self.recency_rank_scan_steps.get(),
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl LruMetricsReadRecorder for LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

impl MetricsReset for LruMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_hit_and_miss_both_count_calls() {
        let mut metrics = LruMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_get_miss();

        let snap = metrics.snapshot(0, 8);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 2);
        assert_eq!(snap.capacity, 8);
    }

    #[test]
    fn read_recorders_work_through_shared_ref() {
        let metrics = LruMetrics::default();
        let shared = &metrics;
        shared.record_peek_call();
        shared.record_peek_found();
        shared.record_recency_rank_scan_step();
        shared.record_recency_rank_scan_step();

        let snap = metrics.snapshot(0, 1);
        assert_eq!(snap.peek_calls, 1);
        assert_eq!(snap.peek_found, 1);
        assert_eq!(snap.recency_rank_scan_steps, 2);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut metrics = LruMetrics::default();
        metrics.record_insert_call();
        metrics.record_peek_call();
        metrics.reset_metrics();

        let snap = metrics.snapshot(0, 1);
        assert_eq!(snap.insert_calls, 0);
        assert_eq!(snap.peek_calls, 0);
    }
}
