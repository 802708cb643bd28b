mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::{http::HeaderValue, routing::get};
use shuttlego::{
    catalog::Catalog,
    dataset::{Config, Dataset},
};
use std::{path::Path, sync::Arc, time::Instant};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info};

const PORT: u32 = 8081;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        error!("Missing data path (directory of CSV tables or a zip bundle)");
        std::process::exit(1);
    }
    let path = Path::new(&args[1]);

    info!("Loading data...");
    let now = Instant::now();
    let config = Config::default();
    let loaded = if path.extension().is_some_and(|ext| ext == "zip") {
        Dataset::load_from_zip(path, &config)
    } else {
        Dataset::load_from_dir(path, &config)
    };
    // No catalog, no serving. A broken dataset must never answer queries.
    let dataset = match loaded {
        Ok(dataset) => dataset,
        Err(err) => {
            error!("Failed to load dataset: {err}");
            std::process::exit(1);
        }
    };
    let catalog = match Catalog::new().with_dataset(dataset) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("Failed to build catalog: {err}");
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState::new(catalog));
    info!("Loading data took {:?}", now.elapsed());

    let app = axum::Router::new()
        .route("/health", get(api::health))
        .route("/api/sites", get(api::sites))
        .route("/api/shuttle/depart", get(api::depart))
        .route("/api/shuttle/depart/options", get(api::depart_options))
        .route("/api/shuttle/arrive", get(api::arrive))
        .route("/api/shuttle/arrive/options", get(api::arrive_options))
        .layer(cors_layer())
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT))
        .await
        .unwrap();
    info!("Listening to port {PORT}");
    axum::serve(listener, app).await.unwrap();
}

/// Allowed origins come from the CORS_ORIGINS environment variable
/// (comma separated). Without it every origin is allowed.
fn cors_layer() -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match std::env::var("CORS_ORIGINS") {
        Ok(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
        Err(_) => layer.allow_origin(Any),
    }
}
