use axum::{Router, routing::get};
use city_service::{cache, catalog, config, handlers, images, openapi, service};
use common::tracing::init_tracing_pretty;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_pretty();

    let config = config::Config::from_env();

    // The catalog is the one thing the service cannot start without
    let dataset = match &config.dataset_path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read dataset {}: {}", path, e))?,
        None => catalog::BUNDLED_DATASET.to_string(),
    };
    let cities = catalog::load(&dataset)?;

    if config.unsplash_access_key.is_none() {
        info!("No Unsplash access key configured, serving fallback images only");
    }

    let cache = Arc::new(cache::ImageCache::new());
    let images = Arc::new(images::UnsplashClient::new(
        cache.clone(),
        config.unsplash_api_url.clone(),
        config.unsplash_access_key.clone(),
    ));
    let service = Arc::new(service::CityService::new(cities, images));

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/cities", get(handlers::list_cities))
        .route("/api/cities/search", get(handlers::search_cities))
        .route("/api/cities/{id}", get(handlers::get_city))
        .route("/api/cities/name/{name}", get(handlers::get_city_by_name))
        .route(
            "/api/cities/country/{country}",
            get(handlers::cities_by_country),
        )
        .route(
            "/api/cities/timezone/{*tz}",
            get(handlers::cities_by_timezone),
        )
        .route("/api/time/{name}", get(handlers::get_time))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("City service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("City service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }

    warn!("Shutting down gracefully...");
}
