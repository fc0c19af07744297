use crate::images::UnsplashClient;
use chrono::{Offset, SecondsFormat, Utc};
use chrono_tz::Tz;
use common::models::{City, CityView, TimeOnly};
use std::sync::Arc;

/// Read-only query surface over the city catalog.
///
/// Owns the catalog, which is immutable after startup, plus the image
/// client (and through it the one mutable shared structure, the image
/// cache). Every operation returns enriched views; time fields are
/// recomputed on each call so they always reflect "now".
pub struct CityService {
    cities: Vec<City>,
    images: Arc<UnsplashClient>,
}

struct TimeFields {
    local_time: String,
    utc_time: String,
    time_description: String,
}

impl CityService {
    pub fn new(cities: Vec<City>, images: Arc<UnsplashClient>) -> Self {
        Self { cities, images }
    }

    /// Every catalog entry, enriched, in catalog order
    pub async fn list_all(&self) -> Vec<CityView> {
        let mut views = Vec::with_capacity(self.cities.len());
        for city in &self.cities {
            views.push(self.enrich(city).await);
        }
        views
    }

    /// Case-insensitive substring match on city name, country, or
    /// timezone identifier, catalog order preserved. The empty query
    /// matches everything.
    pub async fn search(&self, query: &str) -> Vec<CityView> {
        let q = query.to_lowercase();
        let mut views = Vec::new();
        for city in &self.cities {
            if city.city.to_lowercase().contains(&q)
                || city.country.to_lowercase().contains(&q)
                || city.timezone.to_lowercase().contains(&q)
            {
                views.push(self.enrich(city).await);
            }
        }
        views
    }

    pub async fn get_by_id(&self, id: u64) -> Option<CityView> {
        match self.cities.iter().find(|c| c.id == id) {
            Some(city) => Some(self.enrich(city).await),
            None => None,
        }
    }

    /// Case-insensitive exact match on city name, first match wins
    pub async fn get_by_name(&self, name: &str) -> Option<CityView> {
        let wanted = name.to_lowercase();
        match self.cities.iter().find(|c| c.city.to_lowercase() == wanted) {
            Some(city) => Some(self.enrich(city).await),
            None => None,
        }
    }

    pub async fn find_by_country(&self, country: &str) -> Vec<CityView> {
        let wanted = country.to_lowercase();
        let mut views = Vec::new();
        for city in &self.cities {
            if city.country.to_lowercase() == wanted {
                views.push(self.enrich(city).await);
            }
        }
        views
    }

    pub async fn find_by_timezone(&self, tz: &str) -> Vec<CityView> {
        let wanted = tz.to_lowercase();
        let mut views = Vec::new();
        for city in &self.cities {
            if city.timezone.to_lowercase() == wanted {
                views.push(self.enrich(city).await);
            }
        }
        views
    }

    pub async fn get_time_only(&self, name: &str) -> Option<TimeOnly> {
        let view = self.get_by_name(name).await?;
        Some(TimeOnly {
            local_time: view.local_time,
            utc_time: view.utc_time,
        })
    }

    /// Project a record into a view: resolve the image (memoized) and
    /// compute the time fields. An unresolvable timezone leaves the
    /// time fields empty; the record is still returned.
    async fn enrich(&self, city: &City) -> CityView {
        let image_url = self.images.get_image_url(&city.city).await;
        let time = time_fields(&city.timezone, &city.city);

        CityView {
            id: city.id,
            city: city.city.clone(),
            country: city.country.clone(),
            latitude: city.latitude,
            longitude: city.longitude,
            timezone: city.timezone.clone(),
            population: city.population,
            image_url,
            local_time: time.as_ref().map(|t| t.local_time.clone()),
            utc_time: time.as_ref().map(|t| t.utc_time.clone()),
            time_description: time.map(|t| t.time_description),
        }
    }
}

/// Current-time display fields for a zone, or None when the identifier
/// does not resolve to a known IANA zone.
fn time_fields(timezone: &str, city: &str) -> Option<TimeFields> {
    let tz: Tz = timezone.parse().ok()?;
    let local = Utc::now().with_timezone(&tz);
    // Whole hours only; half- and quarter-hour zones truncate
    let offset_hours = local.offset().fix().local_minus_utc() / 3600;

    Some(TimeFields {
        local_time: local.format("%Y-%m-%d %H:%M:%S").to_string(),
        utc_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        time_description: format!("{}: {} ({:+} UTC)", city, local.format("%H:%M"), offset_hours),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ImageCache;

    fn city(id: u64, name: &str, country: &str, timezone: &str) -> City {
        City {
            id,
            city: name.to_string(),
            country: country.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            timezone: timezone.to_string(),
            population: 1_000_000,
        }
    }

    fn service(cities: Vec<City>) -> CityService {
        // No access key: image resolution stays local and deterministic
        let images = Arc::new(UnsplashClient::new(
            Arc::new(ImageCache::new()),
            "http://127.0.0.1:1".to_string(),
            None,
        ));
        CityService::new(cities, images)
    }

    fn catalog() -> Vec<City> {
        vec![
            city(1, "Tokyo", "Japan", "Asia/Tokyo"),
            city(2, "New York", "USA", "America/New_York"),
            city(3, "Atlantis", "Nowhere", "Not/A_Zone"),
        ]
    }

    #[tokio::test]
    async fn empty_query_matches_everything() {
        let svc = service(catalog());
        assert_eq!(svc.search("").await.len(), svc.list_all().await.len());
    }

    #[tokio::test]
    async fn search_matches_city_country_or_timezone() {
        let svc = service(catalog());

        let by_country = svc.search("jApAn").await;
        assert_eq!(by_country.len(), 1);
        assert_eq!(by_country[0].city, "Tokyo");

        let by_zone = svc.search("america/new").await;
        assert_eq!(by_zone.len(), 1);
        assert_eq!(by_zone[0].city, "New York");
    }

    #[tokio::test]
    async fn search_results_contain_the_query() {
        let svc = service(catalog());
        let all = svc.list_all().await.len();
        for query in ["o", "usa", "asia", "zzz"] {
            let results = svc.search(query).await;
            assert!(results.len() <= all);
            for view in &results {
                let q = query.to_lowercase();
                assert!(
                    view.city.to_lowercase().contains(&q)
                        || view.country.to_lowercase().contains(&q)
                        || view.timezone.to_lowercase().contains(&q)
                );
            }
        }
    }

    #[tokio::test]
    async fn tokyo_round_trip() {
        let svc = service(catalog());

        let results = svc.search("tokyo").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].city, "Tokyo");

        let by_id = svc.get_by_id(results[0].id).await.unwrap();
        assert_eq!(by_id.city, "Tokyo");
        assert_eq!(by_id.id, results[0].id);

        assert!(svc.get_by_id(999_999).await.is_none());
    }

    #[tokio::test]
    async fn lookup_by_name_is_case_insensitive_first_match_wins() {
        let mut cities = catalog();
        cities.push(city(4, "tokyo", "Duplicate", "Asia/Tokyo"));
        let svc = service(cities);

        let found = svc.get_by_name("TOKYO").await.unwrap();
        assert_eq!(found.id, 1);
        assert!(svc.get_by_name("Nowhere City").await.is_none());
    }

    #[tokio::test]
    async fn exact_match_finders_preserve_catalog_order() {
        let mut cities = catalog();
        cities.push(city(4, "Osaka", "Japan", "Asia/Tokyo"));
        let svc = service(cities);

        let by_country = svc.find_by_country("japan").await;
        assert_eq!(
            by_country.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![1, 4]
        );

        let by_zone = svc.find_by_timezone("asia/tokyo").await;
        assert_eq!(by_zone.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 4]);
        assert!(svc.find_by_country("Wakanda").await.is_empty());
    }

    #[tokio::test]
    async fn enrichment_uses_distinct_zones() {
        let svc = service(catalog());

        let tokyo = svc.get_by_name("Tokyo").await.unwrap();
        let new_york = svc.get_by_name("New York").await.unwrap();

        // +9 vs -5/-4: the wall clocks can never coincide
        assert_ne!(tokyo.local_time, new_york.local_time);
        assert_ne!(tokyo.time_description, new_york.time_description);
        assert!(tokyo.time_description.as_ref().unwrap().contains("(+9 UTC)"));
    }

    #[tokio::test]
    async fn unresolvable_timezone_skips_enrichment() {
        let svc = service(catalog());

        let view = svc.get_by_name("Atlantis").await.unwrap();
        assert_eq!(view.timezone, "Not/A_Zone");
        assert!(view.local_time.is_none());
        assert!(view.utc_time.is_none());
        assert!(view.time_description.is_none());
        // The record itself is untouched
        assert_eq!(view.population, 1_000_000);
        assert!(!view.image_url.is_empty());
    }

    #[tokio::test]
    async fn time_only_lookup() {
        let svc = service(catalog());

        let time = svc.get_time_only("tokyo").await.unwrap();
        assert!(time.local_time.is_some());
        assert!(time.utc_time.is_some());

        assert!(svc.get_time_only("Nowhere City").await.is_none());
    }

    #[test]
    fn local_time_format_is_fixed_pattern() {
        let fields = time_fields("Europe/London", "London").unwrap();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(fields.local_time.len(), 19);
        assert_eq!(&fields.local_time[4..5], "-");
        assert_eq!(&fields.local_time[10..11], " ");
        assert_eq!(&fields.local_time[13..14], ":");
        assert!(fields.utc_time.ends_with('Z'));
        assert!(fields.time_description.starts_with("London: "));
    }

    #[test]
    fn fractional_offsets_truncate_to_whole_hours() {
        // Kathmandu is UTC+5:45
        let fields = time_fields("Asia/Kathmandu", "Kathmandu").unwrap();
        assert!(fields.time_description.contains("(+5 UTC)"));
    }
}
