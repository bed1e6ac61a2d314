//! In-memory `PageStore` backed by a single `RwLock`-guarded table set.
//!
//! DESIGN
//! ======
//! All tables sit behind one lock so multi-row writes (theme activation,
//! organization cascade) are atomic with respect to readers. Instances are
//! kept in insertion order, which makes the display-order sort stable.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use super::{NewInstance, PageStore, StoreError};
use crate::models::{
    ComponentDefinition, ComponentInstance, DesignTheme, NavigationMenu, Organization, OrganizationTheme, Page,
    PlacedInstance,
};
use crate::validator::merge_config;

#[derive(Default)]
struct Tables {
    organizations: HashMap<Uuid, Organization>,
    pages: HashMap<Uuid, Page>,
    definitions: HashMap<Uuid, ComponentDefinition>,
    instances: Vec<ComponentInstance>,
    design_themes: HashMap<Uuid, DesignTheme>,
    organization_themes: Vec<OrganizationTheme>,
    navigation: HashMap<Uuid, NavigationMenu>,
}

impl Tables {
    fn definition_by_key(&self, key: &str) -> Option<&ComponentDefinition> {
        self.definitions.values().find(|d| d.key == key)
    }

    fn join(&self, instance: &ComponentInstance) -> Option<PlacedInstance> {
        let definition = self.definitions.get(&instance.definition_id)?;
        Some(PlacedInstance { instance: instance.clone(), definition: definition.clone() })
    }
}

/// Cheap to clone; clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // SEEDING
    // =========================================================================

    pub async fn insert_organization(&self, organization: Organization) {
        self.tables.write().await.organizations.insert(organization.id, organization);
    }

    pub async fn insert_page(&self, page: Page) {
        self.tables.write().await.pages.insert(page.id, page);
    }

    pub async fn insert_definition(&self, definition: ComponentDefinition) {
        self.tables.write().await.definitions.insert(definition.id, definition);
    }

    /// Insert a fully formed instance as-is (no default merge).
    pub async fn insert_instance(&self, instance: ComponentInstance) {
        self.tables.write().await.instances.push(instance);
    }

    pub async fn insert_design_theme(&self, theme: DesignTheme) {
        self.tables.write().await.design_themes.insert(theme.id, theme);
    }

    /// Insert an organization theme row. An active row deactivates the others.
    pub async fn insert_organization_theme(&self, org_theme: OrganizationTheme) {
        let mut tables = self.tables.write().await;
        if org_theme.is_active {
            for existing in &mut tables.organization_themes {
                if existing.organization_id == org_theme.organization_id {
                    existing.is_active = false;
                }
            }
        }
        tables.organization_themes.push(org_theme);
    }

    pub async fn set_navigation(&self, organization_id: Uuid, menu: NavigationMenu) {
        self.tables.write().await.navigation.insert(organization_id, menu);
    }

    // =========================================================================
    // ADMIN MUTATIONS
    // =========================================================================

    /// Make `design_theme_id` the organization's only active theme.
    ///
    /// Reuses the organization's existing row for that theme (keeping its
    /// customizations) or creates one. Runs under a single write lock.
    ///
    /// # Errors
    ///
    /// `OrganizationNotFound` or `ThemeNotFound`.
    pub async fn activate_theme(
        &self,
        organization_id: Uuid,
        design_theme_id: Uuid,
    ) -> Result<OrganizationTheme, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.organizations.contains_key(&organization_id) {
            return Err(StoreError::OrganizationNotFound(organization_id));
        }
        if !tables.design_themes.contains_key(&design_theme_id) {
            return Err(StoreError::ThemeNotFound(design_theme_id));
        }

        let mut activated = None;
        for row in &mut tables.organization_themes {
            if row.organization_id != organization_id {
                continue;
            }
            row.is_active = row.design_theme_id == design_theme_id && activated.is_none();
            if row.is_active {
                activated = Some(row.clone());
            }
        }

        let activated = match activated {
            Some(row) => row,
            None => {
                let row = OrganizationTheme {
                    id: Uuid::new_v4(),
                    organization_id,
                    design_theme_id,
                    is_active: true,
                    component_variants: std::collections::BTreeMap::new(),
                    customizations: serde_json::json!({}),
                };
                tables.organization_themes.push(row.clone());
                row
            }
        };

        info!(%organization_id, %design_theme_id, "activated organization theme");
        Ok(activated)
    }

    /// Soft-unpublish a page. Its instances stay attached.
    ///
    /// # Errors
    ///
    /// `PageNotFound` if the page does not exist.
    pub async fn unpublish_page(&self, page_id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let page = tables.pages.get_mut(&page_id).ok_or(StoreError::PageNotFound(page_id))?;
        page.is_published = false;
        Ok(())
    }

    /// Remove an instance from its page.
    ///
    /// # Errors
    ///
    /// `InstanceNotFound` if no such instance exists.
    pub async fn detach_instance(&self, instance_id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.instances.len();
        tables.instances.retain(|i| i.id != instance_id);
        if tables.instances.len() == before {
            return Err(StoreError::InstanceNotFound(instance_id));
        }
        Ok(())
    }

    /// Delete an organization and everything it owns.
    ///
    /// # Errors
    ///
    /// `OrganizationNotFound` if the organization does not exist.
    pub async fn delete_organization(&self, organization_id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.organizations.remove(&organization_id).is_none() {
            return Err(StoreError::OrganizationNotFound(organization_id));
        }
        let page_ids: Vec<Uuid> = tables
            .pages
            .values()
            .filter(|p| p.organization_id == organization_id)
            .map(|p| p.id)
            .collect();
        tables.pages.retain(|_, p| p.organization_id != organization_id);
        tables.instances.retain(|i| !page_ids.contains(&i.page_id));
        tables.organization_themes.retain(|t| t.organization_id != organization_id);
        tables.navigation.remove(&organization_id);
        info!(%organization_id, pages = page_ids.len(), "deleted organization");
        Ok(())
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn organization_by_slug(&self, slug: &str) -> Result<Option<Organization>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.organizations.values().find(|o| o.slug == slug).cloned())
    }

    async fn published_page_with_instances(
        &self,
        organization_id: Uuid,
        page_slug: &str,
    ) -> Result<Option<(Page, Vec<PlacedInstance>)>, StoreError> {
        let tables = self.tables.read().await;
        let Some(page) = tables
            .pages
            .values()
            .find(|p| p.organization_id == organization_id && p.slug == page_slug && p.is_published)
        else {
            return Ok(None);
        };

        let mut placed = Vec::new();
        for instance in tables.instances.iter().filter(|i| i.page_id == page.id && i.is_enabled) {
            match tables.join(instance) {
                Some(joined) => placed.push(joined),
                None => warn!(
                    instance = %instance.id,
                    definition = %instance.definition_id,
                    "instance references a missing definition; skipping"
                ),
            }
        }
        placed.sort_by_key(|p| p.instance.display_order);

        Ok(Some((page.clone(), placed)))
    }

    async fn published_pages(&self, organization_id: Uuid) -> Result<Vec<Page>, StoreError> {
        let tables = self.tables.read().await;
        let mut pages: Vec<Page> = tables
            .pages
            .values()
            .filter(|p| p.organization_id == organization_id && p.is_published)
            .cloned()
            .collect();
        pages.sort_by(|a, b| a.nav_order.cmp(&b.nav_order).then_with(|| a.slug.cmp(&b.slug)));
        Ok(pages)
    }

    async fn active_navigation(&self, organization_id: Uuid) -> Result<Option<NavigationMenu>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.navigation.get(&organization_id).cloned())
    }

    async fn active_theme(
        &self,
        organization_id: Uuid,
    ) -> Result<Option<(OrganizationTheme, DesignTheme)>, StoreError> {
        let tables = self.tables.read().await;
        let Some(org_theme) =
            tables.organization_themes.iter().find(|t| t.organization_id == organization_id && t.is_active)
        else {
            return Ok(None);
        };
        Ok(tables
            .design_themes
            .get(&org_theme.design_theme_id)
            .map(|theme| (org_theme.clone(), theme.clone())))
    }

    async fn component_definition_by_key(&self, key: &str) -> Result<Option<ComponentDefinition>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.definition_by_key(key).cloned())
    }

    async fn placed_instance(&self, instance_id: Uuid) -> Result<Option<PlacedInstance>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.instances.iter().find(|i| i.id == instance_id).and_then(|i| tables.join(i)))
    }

    async fn create_component_instance(&self, input: NewInstance) -> Result<ComponentInstance, StoreError> {
        let mut tables = self.tables.write().await;
        let definition = tables
            .definition_by_key(&input.component_key)
            .ok_or_else(|| StoreError::DefinitionNotFound(input.component_key.clone()))?
            .clone();
        let page = tables.pages.get(&input.page_id).ok_or(StoreError::PageNotFound(input.page_id))?;
        if page.organization_id != input.organization_id {
            return Err(StoreError::PageNotFound(input.page_id));
        }
        if tables
            .instances
            .iter()
            .any(|i| i.page_id == input.page_id && i.instance_key == input.instance_key)
        {
            return Err(StoreError::DuplicateInstanceKey(input.instance_key));
        }

        let instance = ComponentInstance {
            id: Uuid::new_v4(),
            page_id: input.page_id,
            instance_key: input.instance_key,
            definition_id: definition.id,
            configuration: merge_config(&definition.default_config, &input.configuration),
            display_order: input.display_order,
            is_enabled: true,
            is_visible: true,
            updated_at: now_ms(),
        };
        tables.instances.push(instance.clone());

        info!(
            instance = %instance.id,
            page = %instance.page_id,
            component = %definition.key,
            "created component instance"
        );
        Ok(instance)
    }

    async fn update_component_instance(
        &self,
        instance_id: Uuid,
        configuration: serde_json::Value,
    ) -> Result<ComponentInstance, StoreError> {
        let mut tables = self.tables.write().await;
        let instance = tables
            .instances
            .iter_mut()
            .find(|i| i.id == instance_id)
            .ok_or(StoreError::InstanceNotFound(instance_id))?;

        instance.configuration = configuration;
        instance.updated_at = now_ms().max(instance.updated_at + 1);

        info!(instance = %instance_id, "replaced component instance configuration");
        Ok(instance.clone())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
