use axum::{Router, http::HeaderValue, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

pub mod auth;
mod error;
mod observability;
mod shows;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

/// Per-process state shared by every handler. Config is immutable for the
/// process lifetime; the store is the only cross-request resource and is
/// safe for concurrent use by contract of the pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub prometheus_handle: Option<PrometheusHandle>,
}

pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::connect(&config.database).await?;

    Ok(Arc::new(AppState {
        config: Arc::new(config),
        store,
        prometheus_handle,
    }))
}

/// State over an already-built store. Lets tests substitute the pool with a
/// double.
pub fn app_state_with_store(
    config: Config,
    store: Store,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(config),
        store,
        prometheus_handle,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new().merge(protected_routes).with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/healthz", get(system::healthz))
        .route("/readyz", get(system::readyz))
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_requests))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/tvshows", get(shows::list_shows))
        .route("/tvshows/filter/year", get(shows::filter_by_year))
        .route("/tvshows/random", get(shows::random_shows))
        .route("/shows", get(shows::list_all_shows))
        .route("/shows/by-name/{name}", get(shows::shows_by_name))
        .route("/shows/by-genre/{genre}", get(shows::shows_by_genre))
        .route("/shows/by-status/{status}", get(shows::shows_by_status))
        .route("/shows/{id}", get(shows::show_by_id))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::require_api_key))
}
