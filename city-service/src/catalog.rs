use common::errors::AppError;
use common::models::City;
use rand::Rng;
use tracing::{info, warn};

/// Catalog dataset bundled into the binary
pub const BUNDLED_DATASET: &str = include_str!("../data/cities.csv");

/// Parse the catalog dataset into an ordered list of city records.
///
/// The first line is a header and is skipped. Each remaining row carries
/// five comma-separated fields: city, country, latitude, longitude,
/// timezone. Rows with any other field count are skipped with a warning;
/// non-numeric coordinates abort the whole load since they indicate a
/// corrupt dataset rather than a stray bad row.
///
/// Identifiers are assigned sequentially from 1 in row order and never
/// reused. The population placeholder is drawn once here and frozen into
/// the record.
pub fn load(input: &str) -> Result<Vec<City>, AppError> {
    let mut rng = rand::rng();
    let mut cities = Vec::new();
    let mut next_id = 1u64;

    for line in input.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 5 {
            warn!(fields = parts.len(), line = %line, "Skipping malformed catalog row");
            continue;
        }

        let latitude: f64 = parts[2].trim().parse().map_err(|_| {
            AppError::dataset(format!("Invalid latitude {:?} for {}", parts[2], parts[0]))
        })?;
        let longitude: f64 = parts[3].trim().parse().map_err(|_| {
            AppError::dataset(format!("Invalid longitude {:?} for {}", parts[3], parts[0]))
        })?;

        cities.push(City {
            id: next_id,
            city: parts[0].trim().to_string(),
            country: parts[1].trim().to_string(),
            latitude,
            longitude,
            timezone: parts[4].trim().to_string(),
            population: rng.random_range(100_000..9_100_000),
        });
        next_id += 1;
    }

    if cities.is_empty() {
        return Err(AppError::dataset("Catalog dataset contains no cities"));
    }

    info!(count = cities.len(), "City catalog loaded");
    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = "\
city,country,latitude,longitude,timezone
Tokyo,Japan,35.6895,139.6917,Asia/Tokyo
London,United Kingdom,51.5074,-0.1278,Europe/London
Paris,France,48.8566,2.3522,Europe/Paris
";

    #[test]
    fn header_is_skipped_and_ids_are_sequential() {
        let cities = load(DATASET).unwrap();
        assert_eq!(cities.len(), 3);
        assert_eq!(cities[0].city, "Tokyo");
        assert_eq!(
            cities.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let input = "\
city,country,latitude,longitude,timezone
Tokyo,Japan,35.6895,139.6917,Asia/Tokyo
this row has two fields,only
London,United Kingdom,51.5074,-0.1278,Europe/London
";
        let cities = load(input).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1].city, "London");
        assert_eq!(cities[1].id, 2);
    }

    #[test]
    fn non_numeric_coordinate_aborts_load() {
        let input = "\
city,country,latitude,longitude,timezone
Tokyo,Japan,not-a-number,139.6917,Asia/Tokyo
";
        let err = load(input).unwrap_err();
        assert!(matches!(err, AppError::DatasetError(_)));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = load("city,country,latitude,longitude,timezone\n").unwrap_err();
        assert!(matches!(err, AppError::DatasetError(_)));
    }

    #[test]
    fn population_is_within_placeholder_range() {
        let cities = load(DATASET).unwrap();
        for city in &cities {
            assert!((100_000..9_100_000).contains(&city.population));
        }
    }

    #[test]
    fn bundled_dataset_loads() {
        let cities = load(BUNDLED_DATASET).unwrap();
        assert!(!cities.is_empty());
        assert!(cities.iter().any(|c| c.city == "Tokyo"));
    }
}
