pub use crate::builder::{CacheBuilder, CacheConfig};
pub use crate::ds::{KeyIndex, RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{LruMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait};
