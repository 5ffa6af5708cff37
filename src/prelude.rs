pub use crate::builder::{BoundedCacheConfig, CacheBuilder};
pub use crate::cleanup::{CleanupRegistry, CleanupReport};
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{BoxError, CleanupError, ConfigError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{LruMetricsSnapshot, MetricsSnapshotProvider};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentBoundedCache;
pub use crate::policy::lru::BoundedCache;
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
pub use crate::weak::{WeakAssociationCache, WeakKey};
