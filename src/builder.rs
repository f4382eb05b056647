//! Cache configuration and builder.
//!
//! [`CacheConfig`] is a plain value that can be filled from whatever
//! configuration source the application uses; [`CacheBuilder`] validates it
//! and produces an [`LruCache`].
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::{CacheBuilder, CacheConfig};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>().unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! let config = CacheConfig { capacity: 0, ..Default::default() };
//! assert!(CacheBuilder::from_config(config).build::<u64, String>().is_err());
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::{LruCache, validate_capacity};

/// Cache construction parameters.
///
/// # Fields
///
/// | Field             | Type    | Default | Description                       |
/// |-------------------|---------|---------|-----------------------------------|
/// | `capacity`        | `usize` | 1000    | Maximum entries (must be > 0)     |
/// | `prealloc_memory` | `bool`  | true    | Reserve storage for `capacity`    |
///
/// # Example
///
/// ```
/// use lrukit::builder::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert_eq!(config.capacity, 1000);
/// assert!(config.prealloc_memory);
///
/// let config = CacheConfig { capacity: 64, ..Default::default() };
/// assert_eq!(config.capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    pub capacity: usize,

    /// Pre-allocate the arena and index for the full capacity.
    ///
    /// When false, storage grows as entries arrive.
    pub prealloc_memory: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            prealloc_memory: true,
        }
    }
}

/// Builder for [`LruCache`] instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Starts from the default configuration with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig {
                capacity,
                ..CacheConfig::default()
            },
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Sets whether storage for every entry is reserved up front.
    pub fn prealloc_memory(mut self, prealloc: bool) -> Self {
        self.config.prealloc_memory = prealloc;
        self
    }

    /// The configuration the builder will validate.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Validates the configuration and builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if the capacity is zero.
    pub fn build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let capacity = validate_capacity(self.config.capacity)?;
        Ok(LruCache::with_prealloc(
            capacity,
            self.config.prealloc_memory,
        ))
    }
}

impl From<CacheConfig> for CacheBuilder {
    fn from(config: CacheConfig) -> Self {
        Self::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic_ops() {
        let mut cache = CacheBuilder::new(10).build::<u64, String>().unwrap();

        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        assert_eq!(cache.get(&1), Some(&"one".to_string()));
        assert_eq!(cache.get(&3), None);
        assert!(cache.contains(&2));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 10);

        cache.put(1, "ONE".to_string());
        assert_eq!(cache.get(&1), Some(&"ONE".to_string()));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_enforcement() {
        let mut cache = CacheBuilder::new(2)
            .prealloc_memory(false)
            .build::<u64, &str>()
            .unwrap();

        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = CacheBuilder::new(0).build::<u64, u64>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidCapacity { requested: 0 });
    }

    #[test]
    fn test_from_config_round_trips_settings() {
        let config = CacheConfig {
            capacity: 7,
            prealloc_memory: false,
        };
        let builder = CacheBuilder::from(config.clone());
        assert_eq!(builder.config(), &config);
        let cache = builder.build::<u8, u8>().unwrap();
        assert_eq!(cache.capacity(), 7);
    }
}
