//! Shared application state for the dev server.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::editing::EditContext;
use crate::registry::{ComponentRegistry, registry};
use crate::store::PageStore;

/// Injected into Axum handlers via the `State` extractor. Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PageStore>,
    pub config: ServerConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn PageStore>, config: ServerConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn registry(&self) -> &'static ComponentRegistry {
        registry()
    }

    /// Edit context for one request: editable only when the server runs in edit mode.
    #[must_use]
    pub fn edit_context(&self) -> EditContext {
        if self.config.edit_mode { EditContext::editable(self.store.clone()) } else { EditContext::read_only() }
    }
}
