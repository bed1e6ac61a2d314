//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! A small dev server over the composition engine: public pages are served
//! as HTML, the same composition is available as JSON, and when the server
//! runs in edit mode the instance routes expose the edit hook.

pub mod instances;
pub mod sites;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/sites/{org}/{page}", get(sites::page_html))
        .route("/api/sites/{org}/{page}", get(sites::page_json))
        .route("/api/instances", post(instances::create_instance))
        .route("/api/instances/{id}", put(instances::update_instance))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
