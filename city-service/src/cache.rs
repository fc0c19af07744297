use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resolved image URLs keyed by city name.
///
/// Entries are written once per name after a successful external lookup
/// and never expire; the cache lives as long as the process does.
pub struct ImageCache {
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, city: &str) -> Option<String> {
        let cache = self.cache.read().await;
        cache.get(city).cloned()
    }

    pub async fn set(&self, city: String, url: String) {
        let mut cache = self.cache.write().await;
        cache.insert(city, url);
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}
