use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the city catalog, fixed after startup load
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct City {
    pub id: u64,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier, e.g. "Asia/Tokyo"
    pub timezone: String,
    /// Placeholder value generated once at load, not authoritative
    pub population: u64,
}

/// Read-time projection of a catalog entry: record fields plus the
/// resolved image and freshly computed time fields. Time fields are
/// None when the record's timezone does not resolve.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CityView {
    pub id: u64,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub population: u64,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_description: Option<String>,
}

/// Minimal payload for the time-only lookup
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct TimeOnly {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_time: Option<String>,
}
