use super::*;
use crate::config::ServerConfig;
use crate::store::{MemoryStore, StoreError};
use crate::test_helpers;
use serde_json::json;
use std::sync::Arc;

async fn state_with_home(config: ServerConfig) -> AppState {
    let (store, _, home) = test_helpers::acme_store().await;
    let hero = test_helpers::definition("hero_banner", json!({}), false);
    test_helpers::place(&store, &home, &hero, "hero", 1, json!({"title": "Clear skies"})).await;
    AppState::new(Arc::new(store), config)
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn compose_error_to_status_maps_not_found() {
    assert_eq!(compose_error_to_status(&ComposeError::NotFound), StatusCode::NOT_FOUND);
}

#[test]
fn compose_error_to_status_maps_storage_failure() {
    let err = ComposeError::Storage(StoreError::Unavailable("down".into()));
    assert_eq!(compose_error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn page_html_renders_document() {
    let state = state_with_home(ServerConfig::default()).await;
    let response = page_html(
        State(state),
        Path(("acme".to_string(), "home".to_string())),
        Query(ViewQuery::default()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Clear skies"));
    assert!(!html.contains("sk-edit"));
}

#[tokio::test]
async fn page_html_not_found_is_404() {
    let state = AppState::new(Arc::new(MemoryStore::new()), ServerConfig::default());
    let response = page_html(
        State(state),
        Path(("acme".to_string(), "home".to_string())),
        Query(ViewQuery::default()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_json_honors_dark_query_and_edit_mode() {
    let config = ServerConfig { edit_mode: true, ..ServerConfig::default() };
    let state = state_with_home(config).await;

    let Json(light) = page_json(
        State(state.clone()),
        Path(("acme".to_string(), "home".to_string())),
        Query(ViewQuery::default()),
    )
    .await
    .unwrap();
    let Json(dark) = page_json(
        State(state),
        Path(("acme".to_string(), "home".to_string())),
        Query(ViewQuery { dark: Some(true) }),
    )
    .await
    .unwrap();

    assert!(!light.dark_mode);
    assert!(dark.dark_mode);
    assert!(light.editable);
    assert!(light.nodes[0].edit.is_some());
}
