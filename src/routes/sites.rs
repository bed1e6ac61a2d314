//! Public page routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use serde::Deserialize;

use crate::composer::{ComposeError, ComposedPage, ViewerContext, compose_page};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Overrides the server's default color mode.
    pub dark: Option<bool>,
}

async fn compose(state: &AppState, org: &str, page: &str, query: &ViewQuery) -> Result<ComposedPage, ComposeError> {
    let viewer = ViewerContext { dark_mode: query.dark.unwrap_or(state.config.default_dark_mode) };
    let edit = state.edit_context();
    compose_page(state.store.as_ref(), state.registry(), org, page, viewer, &edit).await
}

/// `GET /sites/:org/:page`: rendered HTML document.
pub async fn page_html(
    State(state): State<AppState>,
    Path((org, page)): Path<(String, String)>,
    Query(query): Query<ViewQuery>,
) -> Response {
    match compose(&state, &org, &page, &query).await {
        Ok(composed) => Html(composed.to_html()).into_response(),
        Err(err) => {
            let status = compose_error_to_status(&err);
            (status, Html(format!("<!DOCTYPE html><title>{status}</title><h1>{status}</h1>"))).into_response()
        }
    }
}

/// `GET /api/sites/:org/:page`: composed page as JSON.
pub async fn page_json(
    State(state): State<AppState>,
    Path((org, page)): Path<(String, String)>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ComposedPage>, StatusCode> {
    compose(&state, &org, &page, &query)
        .await
        .map(Json)
        .map_err(|e| compose_error_to_status(&e))
}

pub(crate) fn compose_error_to_status(err: &ComposeError) -> StatusCode {
    match err {
        ComposeError::NotFound => StatusCode::NOT_FOUND,
        ComposeError::Storage(e) => {
            tracing::error!(error = %e, "page composition failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
