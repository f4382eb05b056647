//! lrukit: a fixed-capacity least-recently-used cache.
//!
//! The cache pairs a key index with a sentinel-bounded recency list whose
//! nodes live in a slot arena, giving O(1) `get`/`put` and O(1) eviction with
//! no `unsafe` code.
//!
//! ```
//! use lrukit::LruCache;
//!
//! let mut cache = LruCache::try_new(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//! assert!(!cache.contains(&"b"));
//! # Ok::<(), lrukit::ConfigError>(())
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use error::{ConfigError, InvariantError};
pub use policy::lru::LruCache;
