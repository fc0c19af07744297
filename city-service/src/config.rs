use std::env;

pub struct Config {
    pub port: u16,
    pub unsplash_access_key: Option<String>,
    pub unsplash_api_url: String,
    pub dataset_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3004),
            // Blank key counts as absent: external lookups stay disabled
            unsplash_access_key: env::var("UNSPLASH_ACCESS_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            unsplash_api_url: env::var("UNSPLASH_API_URL")
                .unwrap_or_else(|_| "https://api.unsplash.com".to_string()),
            dataset_path: env::var("CITIES_DATASET").ok(),
        }
    }
}
