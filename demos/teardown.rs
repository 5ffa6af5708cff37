use std::cell::Cell;
use std::rc::Rc;

use memokit::cleanup::CleanupRegistry;
use memokit::policy::lru::BoundedCache;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memokit=debug")))
        .init();

    let cache = Rc::new(std::cell::RefCell::new(match BoundedCache::try_new(16) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("{}", err);
            return;
        },
    }));
    cache.borrow_mut().insert("session", 7u64);

    let ticks = Rc::new(Cell::new(3));
    let mut registry = CleanupRegistry::new();

    let c = Rc::clone(&cache);
    registry.register("flush-cache", move || {
        let mut cache = c.borrow_mut();
        println!("flushing {} cached entries", cache.len());
        cache.clear();
    });
    registry.register_fallible("close-socket", || Err::<(), _>("connection reset by peer"));
    registry.register("stop-timer", || panic!("timer already stopped"));

    let t = Rc::clone(&ticks);
    registry.register("stop-timer", move || {
        println!("timer stopped after {} ticks", t.get());
        t.set(0);
    });

    println!("pending: {:?}", registry.names().collect::<Vec<_>>());
    let report = registry.cleanup_all();
    println!("ran {} tasks, {} failed", report.ran, report.failures.len());
    for failure in &report.failures {
        println!("  {}", failure);
    }
    println!("cache empty? {}", cache.borrow().is_empty());
}

// Expected output (stdout):
// pending: ["flush-cache", "close-socket", "stop-timer"]
// flushing 1 cached entries
// timer stopped after 3 ticks
// ran 3 tasks, 1 failed
//   cleanup `close-socket` failed: connection reset by peer
// cache empty? true
//
// The panicking "stop-timer" was replaced before it ever ran.
