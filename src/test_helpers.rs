//! Fixtures shared by unit tests across modules.

use std::collections::BTreeMap;

use serde_json::json;
use uuid::Uuid;

use crate::models::{
    AnimationScheme, AnimationSpeed, ColorPair, ComponentDefinition, ComponentInstance, DesignTheme, Organization,
    OrganizationTheme, Page, SubscriptionTier, TypographyScheme,
};
use crate::registry::RenderContext;
use crate::store::MemoryStore;

#[must_use]
pub fn organization(slug: &str, tier: SubscriptionTier) -> Organization {
    Organization {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: format!("{slug} aviation"),
        subscription_tier: tier,
        logo_url: None,
        brand_colors: BTreeMap::new(),
    }
}

/// Published, nav-visible page.
#[must_use]
pub fn page(organization: &Organization, slug: &str, title: &str) -> Page {
    Page {
        id: Uuid::new_v4(),
        organization_id: organization.id,
        slug: slug.to_string(),
        title: title.to_string(),
        meta_description: None,
        is_published: true,
        show_in_nav: true,
        nav_order: 0,
        custom_css: None,
    }
}

#[must_use]
pub fn definition(key: &str, default_config: serde_json::Value, premium: bool) -> ComponentDefinition {
    ComponentDefinition {
        id: Uuid::new_v4(),
        key: key.to_string(),
        name: key.replace('_', " "),
        category: "content".into(),
        default_config,
        required_fields: Vec::new(),
        is_premium: premium,
    }
}

/// Enabled, visible instance of `definition` on a throwaway page id.
#[must_use]
pub fn instance(
    definition: &ComponentDefinition,
    instance_key: &str,
    display_order: i32,
    configuration: serde_json::Value,
) -> ComponentInstance {
    ComponentInstance {
        id: Uuid::new_v4(),
        page_id: Uuid::new_v4(),
        instance_key: instance_key.to_string(),
        definition_id: definition.id,
        configuration,
        display_order,
        is_enabled: true,
        is_visible: true,
        updated_at: 0,
    }
}

#[must_use]
pub fn design_theme(key: &str) -> DesignTheme {
    let mut colors = BTreeMap::new();
    colors.insert("primary".to_string(), ColorPair { light: "#0f766e".into(), dark: "#5eead4".into() });
    colors.insert("background".to_string(), ColorPair { light: "#f8fafc".into(), dark: "#020617".into() });

    let mut fonts = BTreeMap::new();
    fonts.insert("heading".to_string(), "'Oswald', sans-serif".to_string());
    let mut sizes = BTreeMap::new();
    sizes.insert("hero".to_string(), "3.5rem".to_string());
    let mut spacing = BTreeMap::new();
    spacing.insert("section".to_string(), "5rem".to_string());

    DesignTheme {
        id: Uuid::new_v4(),
        key: key.to_string(),
        name: format!("{key} theme"),
        category: "modern".into(),
        colors,
        typography: Some(TypographyScheme { fonts, sizes }),
        spacing: Some(spacing),
        animation: Some(AnimationScheme { speed: Some(AnimationSpeed::Normal), ..AnimationScheme::default() }),
        is_premium: false,
    }
}

/// Active, uncustomized selection of `theme` by `organization`.
#[must_use]
pub fn organization_theme(organization: &Organization, theme: &DesignTheme) -> OrganizationTheme {
    OrganizationTheme {
        id: Uuid::new_v4(),
        organization_id: organization.id,
        design_theme_id: theme.id,
        is_active: true,
        component_variants: BTreeMap::new(),
        customizations: json!({}),
    }
}

#[must_use]
pub fn render_context(component_key: &str) -> RenderContext<'_> {
    RenderContext {
        organization_id: Uuid::nil(),
        organization_slug: "acme",
        instance_id: Uuid::nil(),
        instance_key: "instance-1",
        component_key,
        is_visible: true,
        is_editable: false,
        variant: None,
        navigation: &[],
    }
}

/// Store holding one basic-tier org `acme` with a published `home` page.
pub async fn acme_store() -> (MemoryStore, Organization, Page) {
    let store = MemoryStore::new();
    let org = organization("acme", SubscriptionTier::Basic);
    let home = page(&org, "home", "Home");
    store.insert_organization(org.clone()).await;
    store.insert_page(home.clone()).await;
    (store, org, home)
}

/// Insert `definition` and an instance of it on `page`.
pub async fn place(
    store: &MemoryStore,
    page: &Page,
    definition: &ComponentDefinition,
    instance_key: &str,
    display_order: i32,
    configuration: serde_json::Value,
) -> ComponentInstance {
    if !definition_present(store, &definition.key).await {
        store.insert_definition(definition.clone()).await;
    }
    let mut placed = instance(definition, instance_key, display_order, configuration);
    placed.page_id = page.id;
    store.insert_instance(placed.clone()).await;
    placed
}

async fn definition_present(store: &MemoryStore, key: &str) -> bool {
    use crate::store::PageStore;
    matches!(store.component_definition_by_key(key).await, Ok(Some(_)))
}
