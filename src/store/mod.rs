//! Storage query interface consumed by the composer and the edit hook.
//!
//! DESIGN
//! ======
//! The composer treats every fetch as one atomic request/response: data,
//! absence, or an error. It never retries or paginates. Reads used for
//! composition never write; the only mutations are instance create/update
//! and theme activation, all last-write-wins.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    ComponentDefinition, ComponentInstance, DesignTheme, NavigationMenu, Organization, OrganizationTheme, Page,
    PlacedInstance,
};

pub use memory::MemoryStore;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("organization not found: {0}")]
    OrganizationNotFound(Uuid),
    #[error("page not found: {0}")]
    PageNotFound(Uuid),
    #[error("component definition not found: {0}")]
    DefinitionNotFound(String),
    #[error("component instance not found: {0}")]
    InstanceNotFound(Uuid),
    #[error("instance key already used on page: {0}")]
    DuplicateInstanceKey(String),
    #[error("design theme not found: {0}")]
    ThemeNotFound(Uuid),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl crate::error::ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OrganizationNotFound(_) => "E_ORGANIZATION_NOT_FOUND",
            Self::PageNotFound(_) => "E_PAGE_NOT_FOUND",
            Self::DefinitionNotFound(_) => "E_DEFINITION_NOT_FOUND",
            Self::InstanceNotFound(_) => "E_INSTANCE_NOT_FOUND",
            Self::DuplicateInstanceKey(_) => "E_DUPLICATE_INSTANCE_KEY",
            Self::ThemeNotFound(_) => "E_THEME_NOT_FOUND",
            Self::Unavailable(_) => "E_STORAGE_UNAVAILABLE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Fields required to place a component on a page.
#[derive(Debug, Clone)]
pub struct NewInstance {
    pub organization_id: Uuid,
    pub page_id: Uuid,
    pub component_key: String,
    pub instance_key: String,
    /// Merged over the definition's defaults before persisting.
    pub configuration: serde_json::Value,
    pub display_order: i32,
}

// =============================================================================
// INTERFACE
// =============================================================================

#[async_trait]
pub trait PageStore: Send + Sync {
    async fn organization_by_slug(&self, slug: &str) -> Result<Option<Organization>, StoreError>;

    /// Published page plus its enabled instances joined to their definitions,
    /// ordered by display order ascending (ties in insertion order).
    async fn published_page_with_instances(
        &self,
        organization_id: Uuid,
        page_slug: &str,
    ) -> Result<Option<(Page, Vec<PlacedInstance>)>, StoreError>;

    /// Published pages of an organization, for the navigation fallback.
    async fn published_pages(&self, organization_id: Uuid) -> Result<Vec<Page>, StoreError>;

    async fn active_navigation(&self, organization_id: Uuid) -> Result<Option<NavigationMenu>, StoreError>;

    async fn active_theme(
        &self,
        organization_id: Uuid,
    ) -> Result<Option<(OrganizationTheme, DesignTheme)>, StoreError>;

    async fn component_definition_by_key(&self, key: &str) -> Result<Option<ComponentDefinition>, StoreError>;

    async fn placed_instance(&self, instance_id: Uuid) -> Result<Option<PlacedInstance>, StoreError>;

    /// Look up the definition by key, merge its defaults under the supplied
    /// configuration, and persist.
    ///
    /// # Errors
    ///
    /// `DefinitionNotFound`, `PageNotFound`, or `DuplicateInstanceKey`.
    async fn create_component_instance(&self, input: NewInstance) -> Result<ComponentInstance, StoreError>;

    /// Replace the configuration blob wholesale and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// `InstanceNotFound` if no such instance exists.
    async fn update_component_instance(
        &self,
        instance_id: Uuid,
        configuration: serde_json::Value,
    ) -> Result<ComponentInstance, StoreError>;
}
