//! Instance edit routes. Only writable when the server runs in edit mode.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editing::EditError;
use crate::error::ErrorCode;
use crate::models::ComponentInstance;
use crate::store::{NewInstance, StoreError};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateInstanceBody {
    pub configuration: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct CreateInstanceBody {
    pub organization_id: Uuid,
    pub page_id: Uuid,
    pub component_key: String,
    pub instance_key: String,
    #[serde(default)]
    pub configuration: Option<serde_json::Value>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// `PUT /api/instances/:id`: replace an instance's configuration.
pub async fn update_instance(
    State(state): State<AppState>,
    Path(instance_id): Path<Uuid>,
    Json(body): Json<UpdateInstanceBody>,
) -> Result<Json<ComponentInstance>, Response> {
    state
        .edit_context()
        .mutate(instance_id, body.configuration)
        .await
        .map(Json)
        .map_err(edit_error_response)
}

/// `POST /api/instances`: place a component on a page.
pub async fn create_instance(
    State(state): State<AppState>,
    Json(body): Json<CreateInstanceBody>,
) -> Result<(StatusCode, Json<ComponentInstance>), Response> {
    let input = NewInstance {
        organization_id: body.organization_id,
        page_id: body.page_id,
        component_key: body.component_key,
        instance_key: body.instance_key,
        configuration: body.configuration.unwrap_or_else(|| serde_json::json!({})),
        display_order: body.display_order,
    };
    let created = state.edit_context().create(input).await.map_err(edit_error_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) fn edit_error_to_status(err: &EditError) -> StatusCode {
    match err {
        EditError::NotEditable => StatusCode::FORBIDDEN,
        EditError::InstanceNotFound(_) | EditError::DefinitionNotFound(_) => StatusCode::NOT_FOUND,
        EditError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EditError::Store(e) => store_error_to_status(e),
    }
}

pub(crate) fn store_error_to_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::OrganizationNotFound(_)
        | StoreError::PageNotFound(_)
        | StoreError::DefinitionNotFound(_)
        | StoreError::InstanceNotFound(_)
        | StoreError::ThemeNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::DuplicateInstanceKey(_) => StatusCode::CONFLICT,
        StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn edit_error_response(err: EditError) -> Response {
    let status = edit_error_to_status(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "instance edit failed");
    }
    let errors = match &err {
        EditError::Validation(report) => report.errors.clone(),
        _ => Vec::new(),
    };
    let body = ErrorBody { error: err.error_code(), message: err.to_string(), errors };
    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "instances_test.rs"]
mod tests;
