//! memokit: bounded LRU memoization, identity-keyed weak caches and
//! best-effort teardown registries.
//!
//! See `DESIGN.md` for internal architecture and invariants.
//!
//! ```
//! use memokit::prelude::*;
//!
//! let mut labels = BoundedCache::try_new(128).unwrap();
//! let label = labels.get_or_insert_with(42u32, || format!("item #{}", 42));
//! assert_eq!(label, "item #42");
//! ```

pub mod builder;
pub mod cleanup;
pub mod ds;
pub mod error;
pub mod policy;
pub mod traits;
pub mod weak;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
