use lrukit::LruCache;

fn main() {
    let mut cache: LruCache<u32, String> = match LruCache::try_new(2) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("bad config: {err}");
            return;
        }
    };

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {value}");
    }

    if let Some((key, value)) = cache.push(3, "gamma".to_string()) {
        println!("evicted {key}: {value}");
    }

    println!("contains 2? {}", cache.contains(&2));
    println!("recency order: {:?}", cache.keys().collect::<Vec<_>>());
}

// Expected output:
// hit 1: alpha
// evicted 2: beta
// contains 2? false
// recency order: [3, 1]
//
// Capacity is 2. After get(&1), key 1 is most recent and key 2 is least
// recent, so pushing key 3 displaces key 2.
