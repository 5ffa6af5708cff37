//! Cache configuration and builder.
//!
//! [`BoundedCacheConfig`] lists every construction option with its default;
//! [`CacheBuilder`] is the chained form of the same thing.
//!
//! ## Example
//!
//! ```rust
//! use memokit::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .preallocate(false)
//!     .build::<u64, String>()
//!     .unwrap();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;
use std::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentBoundedCache;
use crate::policy::lru::BoundedCache;

/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Largest accepted capacity. Entry slots are addressed by `u32` indices.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Construction options for [`BoundedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoundedCacheConfig {
    /// Maximum number of entries. Must be greater than zero.
    pub capacity: usize,
    /// Reserve index and arena storage for `capacity` entries up front.
    pub preallocate: bool,
}

impl Default for BoundedCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            preallocate: true,
        }
    }
}

impl BoundedCacheConfig {
    /// Checks the options, returning the capacity as a `NonZeroUsize`.
    pub fn validate(&self) -> Result<NonZeroUsize, ConfigError> {
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::invalid(
                "capacity",
                format!("must not exceed {}", MAX_CAPACITY),
            ));
        }
        NonZeroUsize::new(self.capacity)
            .ok_or_else(|| ConfigError::invalid("capacity", "must be greater than zero"))
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    config: BoundedCacheConfig,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: BoundedCacheConfig {
                capacity,
                ..BoundedCacheConfig::default()
            },
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: BoundedCacheConfig) -> Self {
        Self { config }
    }

    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.config.preallocate = preallocate;
        self
    }

    pub fn config(&self) -> &BoundedCacheConfig {
        &self.config
    }

    /// Build a single-threaded LRU cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the capacity is zero or above [`MAX_CAPACITY`].
    pub fn build<K, V>(self) -> Result<BoundedCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        BoundedCache::with_config(self.config)
    }

    /// Build a lock-protected LRU cache that can be shared across threads.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(self) -> Result<ConcurrentBoundedCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        ConcurrentBoundedCache::with_config(self.config)
    }
}
