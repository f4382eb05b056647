use lrukit::builder::{CacheBuilder, CacheConfig};
use lrukit::ConfigError;

fn main() -> Result<(), ConfigError> {
    let mut cache = CacheBuilder::new(3)
        .prealloc_memory(false)
        .build::<&str, u32>()?;

    cache.extend([("a", 1), ("b", 2), ("c", 3)]);
    cache.touch("a");
    cache.put("d", 4);

    println!("{cache:?}");
    println!("lru entry: {:?}", cache.peek_lru());

    let rejected = CacheBuilder::from_config(CacheConfig {
        capacity: 0,
        ..Default::default()
    })
    .build::<&str, u32>();
    if let Err(err) = rejected {
        println!("rejected: {err}");
    }

    Ok(())
}

// Expected output:
// LruCache { capacity: 3, len: 3, entries: {"d": 4, "a": 1, "c": 3} }
// lru entry: Some(("c", 3))
// rejected: cache capacity must be greater than zero, got 0
