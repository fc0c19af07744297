use crate::cache::ImageCache;
use common::errors::AppError;
use common::http_client::HttpClient;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Stock images served when no external lookup is possible
const FALLBACK_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1464983953574-0892a716854b",
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb",
    "https://images.unsplash.com/photo-1502602898657-3e91760cbb34",
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

pub struct UnsplashClient {
    http_client: HttpClient,
    cache: Arc<ImageCache>,
    base_url: String,
    access_key: Option<String>,
}

impl UnsplashClient {
    pub fn new(cache: Arc<ImageCache>, base_url: String, access_key: Option<String>) -> Self {
        Self {
            // Single attempt: a failed lookup falls back, it is not retried
            http_client: HttpClient::new(3, 0),
            cache,
            base_url,
            access_key,
        }
    }

    /// Resolve a representative image URL for a city.
    ///
    /// Never fails: a cache hit skips the network entirely, an absent
    /// access key or any lookup problem degrades to a deterministic
    /// stock image. Only successful lookups are cached.
    #[instrument(skip(self), fields(city = %city))]
    pub async fn get_image_url(&self, city: &str) -> String {
        if let Some(cached) = self.cache.get(city).await {
            info!(city = %city, "Cache hit");
            return cached;
        }

        let Some(key) = self.access_key.as_deref() else {
            return fallback_image(city).to_string();
        };

        match self.search_photo(city, key).await {
            Ok(url) => {
                self.cache.set(city.to_string(), url.clone()).await;
                url
            }
            Err(e) => {
                warn!(city = %city, error = %e, "Image lookup failed, using fallback");
                fallback_image(city).to_string()
            }
        }
    }

    async fn search_photo(&self, city: &str, key: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/search/photos?query={}&client_id={}&orientation=landscape&per_page=1",
            self.base_url,
            urlencoding::encode(city),
            key
        );

        let response: SearchResponse = self.http_client.get_json(&url).await?;

        response
            .results
            .into_iter()
            .next()
            .map(|photo| photo.urls.regular)
            .ok_or_else(|| AppError::internal(format!("No image results for {}", city)))
    }
}

/// Deterministic stock image for a city name.
///
/// A pure function of the name: the same name maps to the same URL
/// across calls and across process restarts, which is why this uses a
/// fixed polynomial hash rather than the process-seeded std hasher.
pub fn fallback_image(city: &str) -> &'static str {
    let hash = city
        .chars()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32));
    FALLBACK_IMAGES[hash.unsigned_abs() as usize % FALLBACK_IMAGES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_deterministic() {
        assert_eq!(fallback_image("Paris"), fallback_image("Paris"));
        assert_eq!(fallback_image("Tokyo"), fallback_image("Tokyo"));
        assert_eq!(fallback_image(""), fallback_image(""));
    }

    #[test]
    fn fallback_comes_from_the_fixed_list() {
        for name in ["Paris", "Tokyo", "New York", "Sao Paulo", ""] {
            assert!(FALLBACK_IMAGES.contains(&fallback_image(name)));
        }
    }

    #[tokio::test]
    async fn absent_access_key_uses_fallback_without_network() {
        let client = UnsplashClient::new(
            Arc::new(ImageCache::new()),
            // Unroutable on purpose: no request may be attempted
            "http://127.0.0.1:1".to_string(),
            None,
        );

        let first = client.get_image_url("Paris").await;
        let second = client.get_image_url("Paris").await;

        assert_eq!(first, fallback_image("Paris"));
        assert_eq!(first, second);
    }
}
