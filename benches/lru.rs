use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use memokit::policy::lru::BoundedCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn warm(capacity: usize) -> BoundedCache<u64, u64> {
    let mut cache = BoundedCache::try_new(capacity).unwrap();
    for i in 0..capacity as u64 {
        cache.insert(i, i);
    }
    cache
}

fn bench_lru_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || warm(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(black_box(i + 10_000), i);
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_pop_lru(c: &mut Criterion) {
    c.bench_function("lru_pop_lru", |b| {
        b.iter_batched(
            || warm(1024),
            |mut cache| {
                for _ in 0..1024u64 {
                    let _ = black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || warm(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_touch_hotset(c: &mut Criterion) {
    c.bench_function("lru_touch_hotset", |b| {
        b.iter_batched(
            || warm(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = black_box(cache.touch(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

/// Memoization over a skewed key space: 90% of lookups hit 10% of keys.
fn bench_lru_memoize_skewed(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let keys: Vec<u64> = (0..8192)
        .map(|_| {
            if rng.gen_bool(0.9) {
                rng.gen_range(0..400)
            } else {
                rng.gen_range(400..40_000)
            }
        })
        .collect();

    c.bench_function("lru_memoize_skewed", |b| {
        b.iter_batched(
            || BoundedCache::<u64, String>::try_new(512).unwrap(),
            |mut cache| {
                for &key in &keys {
                    let _ = black_box(cache.get_or_insert_with(key, || key.to_string()));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lru_insert_get,
    bench_lru_pop_lru,
    bench_lru_eviction_churn,
    bench_lru_touch_hotset,
    bench_lru_memoize_skewed
);
criterion_main!(benches);
