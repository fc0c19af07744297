use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use common::errors::AppError;
use common::models::{CityView, TimeOnly};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::service::CityService;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "city-service" }))
}

#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, description = "All cities with current time fields", body = Vec<CityView>)
    )
)]
pub async fn list_cities(State(service): State<Arc<CityService>>) -> Json<Vec<CityView>> {
    Json(service.list_all().await)
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[utoipa::path(
    get,
    path = "/api/cities/search",
    params(
        ("query" = String, Query, description = "Substring matched against city, country, or timezone")
    ),
    responses(
        (status = 200, description = "Matching cities in catalog order", body = Vec<CityView>)
    )
)]
pub async fn search_cities(
    State(service): State<Arc<CityService>>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<CityView>> {
    info!(query = %params.query, "Search request received");

    Json(service.search(&params.query).await)
}

#[utoipa::path(
    get,
    path = "/api/cities/{id}",
    params(
        ("id" = u64, Path, description = "City identifier")
    ),
    responses(
        (status = 200, description = "City with current time fields", body = CityView),
        (status = 404, description = "No city with this identifier")
    )
)]
pub async fn get_city(
    State(service): State<Arc<CityService>>,
    Path(id): Path<u64>,
) -> Result<Json<CityView>, AppError> {
    service
        .get_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("id {}", id)))
}

#[utoipa::path(
    get,
    path = "/api/cities/name/{name}",
    params(
        ("name" = String, Path, description = "City name, case-insensitive")
    ),
    responses(
        (status = 200, description = "City with current time fields", body = CityView),
        (status = 404, description = "No city with this name")
    )
)]
pub async fn get_city_by_name(
    State(service): State<Arc<CityService>>,
    Path(name): Path<String>,
) -> Result<Json<CityView>, AppError> {
    service
        .get_by_name(&name)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(name))
}

#[utoipa::path(
    get,
    path = "/api/cities/country/{country}",
    params(
        ("country" = String, Path, description = "Country name, case-insensitive exact match")
    ),
    responses(
        (status = 200, description = "Cities in the country, catalog order", body = Vec<CityView>)
    )
)]
pub async fn cities_by_country(
    State(service): State<Arc<CityService>>,
    Path(country): Path<String>,
) -> Json<Vec<CityView>> {
    Json(service.find_by_country(&country).await)
}

#[utoipa::path(
    get,
    path = "/api/cities/timezone/{tz}",
    params(
        ("tz" = String, Path, description = "IANA timezone identifier, case-insensitive exact match")
    ),
    responses(
        (status = 200, description = "Cities in the timezone, catalog order", body = Vec<CityView>)
    )
)]
pub async fn cities_by_timezone(
    State(service): State<Arc<CityService>>,
    Path(tz): Path<String>,
) -> Json<Vec<CityView>> {
    Json(service.find_by_timezone(&tz).await)
}

#[utoipa::path(
    get,
    path = "/api/time/{name}",
    params(
        ("name" = String, Path, description = "City name, case-insensitive")
    ),
    responses(
        (status = 200, description = "Local and UTC time for the city", body = TimeOnly),
        (status = 404, description = "No city with this name")
    )
)]
pub async fn get_time(
    State(service): State<Arc<CityService>>,
    Path(name): Path<String>,
) -> Result<Json<TimeOnly>, AppError> {
    info!(city = %name, "Time request received");

    service
        .get_time_only(&name)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(name))
}
