//! Edit context: the single write path for instance configuration.
//!
//! DESIGN
//! ======
//! Composition is read-only. An [`EditContext`] is constructed once per
//! request and passed to the composer by reference; when it is editable,
//! every rendered node carries an edit handle whose activation calls
//! [`EditContext::mutate`] with a new configuration.
//!
//! ERROR HANDLING
//! ==============
//! Writes are validated against the definition's required fields after the
//! definition defaults are merged in, since that merged object is what the
//! renderer will see. A failing report blocks the write. Concurrent updates
//! to the same instance are last-write-wins.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::models::{ComponentDefinition, ComponentInstance};
use crate::store::{NewInstance, PageStore, StoreError};
use crate::validator::{ValidationReport, merge_config, validate};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("editing is disabled")]
    NotEditable,
    #[error("component instance not found: {0}")]
    InstanceNotFound(Uuid),
    #[error("component definition not found: {0}")]
    DefinitionNotFound(String),
    #[error("invalid configuration: {0}")]
    Validation(ValidationReport),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for EditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEditable => "E_NOT_EDITABLE",
            Self::InstanceNotFound(_) => "E_INSTANCE_NOT_FOUND",
            Self::DefinitionNotFound(_) => "E_DEFINITION_NOT_FOUND",
            Self::Validation(_) => "E_VALIDATION",
            Self::Store(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Store(e) if e.retryable())
    }
}

/// Edit capability handed to composition. Read-only unless built with a store.
#[derive(Clone, Default)]
pub struct EditContext {
    store: Option<Arc<dyn PageStore>>,
}

impl std::fmt::Debug for EditContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditContext").field("is_editable", &self.is_editable()).finish()
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl EditContext {
    #[must_use]
    pub fn read_only() -> Self {
        Self { store: None }
    }

    #[must_use]
    pub fn editable(store: Arc<dyn PageStore>) -> Self {
        Self { store: Some(store) }
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&Arc<dyn PageStore>, EditError> {
        self.store.as_ref().ok_or(EditError::NotEditable)
    }

    /// Replace an instance's configuration wholesale.
    ///
    /// # Errors
    ///
    /// `NotEditable` on a read-only context, `InstanceNotFound`, `Validation`
    /// when a required field would be missing, or a storage failure.
    pub async fn mutate(
        &self,
        instance_id: Uuid,
        configuration: serde_json::Value,
    ) -> Result<ComponentInstance, EditError> {
        let store = self.store()?;
        let placed = store.placed_instance(instance_id).await?.ok_or(EditError::InstanceNotFound(instance_id))?;
        check(&configuration, &placed.definition)?;

        let updated = store.update_component_instance(instance_id, configuration).await?;
        info!(instance = %instance_id, component = %placed.definition.key, "instance configuration edited");
        Ok(updated)
    }

    /// Place a new component instance after validating its merged configuration.
    ///
    /// # Errors
    ///
    /// `NotEditable`, `DefinitionNotFound`, `Validation`, or a storage failure
    /// (unknown page, duplicate instance key).
    pub async fn create(&self, input: NewInstance) -> Result<ComponentInstance, EditError> {
        let store = self.store()?;
        let definition = store
            .component_definition_by_key(&input.component_key)
            .await?
            .ok_or_else(|| EditError::DefinitionNotFound(input.component_key.clone()))?;
        check(&input.configuration, &definition)?;

        Ok(store.create_component_instance(input).await?)
    }
}

fn check(configuration: &serde_json::Value, definition: &ComponentDefinition) -> Result<(), EditError> {
    if !configuration.is_object() {
        return Err(EditError::Validation(ValidationReport {
            valid: false,
            errors: vec!["Configuration must be a JSON object".to_string()],
        }));
    }
    let report = validate(&merge_config(&definition.default_config, configuration), definition);
    if report.valid { Ok(()) } else { Err(EditError::Validation(report)) }
}

#[cfg(test)]
#[path = "editing_test.rs"]
mod tests;
