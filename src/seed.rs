//! Site seed loading from YAML into a `MemoryStore`.
//!
//! DESIGN
//! ======
//! A seed file names everything by key or slug; ids are generated on load.
//! The whole file is checked for dangling references before anything is
//! inserted, so a bad seed never leaves a half-populated store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::models::{
    AnimationScheme, ColorPair, ComponentDefinition, ComponentInstance, DesignTheme, NavItem, NavigationMenu,
    Organization, OrganizationTheme, Page, SubscriptionTier, TypographyScheme,
};
use crate::store::MemoryStore;

const DEMO_SEED: &str = include_str!("../seed/demo.yaml");

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("invalid seed yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("duplicate {kind}: {key}")]
    Duplicate { kind: &'static str, key: String },
    #[error("page {page} places unknown component {component}")]
    UnknownComponent { page: String, component: String },
    #[error("organization {organization} selects unknown theme {theme}")]
    UnknownTheme { organization: String, theme: String },
}

impl ErrorCode for SeedError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_SEED_IO",
            Self::Yaml(_) => "E_SEED_YAML",
            Self::Duplicate { .. } => "E_SEED_DUPLICATE",
            Self::UnknownComponent { .. } => "E_SEED_UNKNOWN_COMPONENT",
            Self::UnknownTheme { .. } => "E_SEED_UNKNOWN_THEME",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteSeed {
    pub design_themes: Vec<ThemeSeed>,
    pub components: Vec<DefinitionSeed>,
    pub organizations: Vec<OrganizationSeed>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeSeed {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub colors: BTreeMap<String, ColorPair>,
    #[serde(default)]
    pub typography: Option<TypographyScheme>,
    #[serde(default)]
    pub spacing: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub animation: Option<AnimationScheme>,
    #[serde(default)]
    pub is_premium: bool,
}

#[derive(Debug, Deserialize)]
pub struct DefinitionSeed {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub default_config: Option<serde_json::Value>,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub is_premium: bool,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationSeed {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub brand_colors: BTreeMap<String, String>,
    #[serde(default)]
    pub theme: Option<ThemeSelectionSeed>,
    /// Explicit menu. When absent, navigation is derived from the pages.
    #[serde(default)]
    pub navigation: Option<Vec<NavItem>>,
    #[serde(default)]
    pub pages: Vec<PageSeed>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeSelectionSeed {
    pub key: String,
    #[serde(default)]
    pub component_variants: BTreeMap<String, String>,
    #[serde(default)]
    pub customizations: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct PageSeed {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default = "default_true")]
    pub show_in_nav: bool,
    #[serde(default)]
    pub nav_order: i32,
    #[serde(default)]
    pub custom_css: Option<String>,
    #[serde(default)]
    pub components: Vec<InstanceSeed>,
}

#[derive(Debug, Deserialize)]
pub struct InstanceSeed {
    /// Instance key, unique within the page.
    pub key: String,
    /// Component definition key.
    pub component: String,
    #[serde(default)]
    pub configuration: Option<serde_json::Value>,
    /// Defaults to the entry's 1-based position in the list.
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// Counts of what a load inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub organizations: usize,
    pub pages: usize,
    pub instances: usize,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// PARSING
// =============================================================================

impl SiteSeed {
    /// # Errors
    ///
    /// `Yaml` when the document does not match the seed shape.
    pub fn from_yaml_str(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// # Errors
    ///
    /// `Io` when the file cannot be read, `Yaml` when it does not parse.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io { path: path.display().to_string(), source })?;
        Self::from_yaml_str(&raw)
    }

    /// The built-in demo site.
    ///
    /// # Errors
    ///
    /// Only if the bundled file is malformed.
    pub fn demo() -> Result<Self, SeedError> {
        Self::from_yaml_str(DEMO_SEED)
    }

    /// Reject dangling references and duplicate keys.
    ///
    /// # Errors
    ///
    /// The first problem found, in file order.
    pub fn check(&self) -> Result<(), SeedError> {
        let themes = unique_keys("design theme", self.design_themes.iter().map(|t| t.key.as_str()))?;
        let components = unique_keys("component", self.components.iter().map(|c| c.key.as_str()))?;
        unique_keys("organization", self.organizations.iter().map(|o| o.slug.as_str()))?;

        for org in &self.organizations {
            if let Some(selection) = &org.theme
                && !themes.contains(selection.key.as_str())
            {
                return Err(SeedError::UnknownTheme {
                    organization: org.slug.clone(),
                    theme: selection.key.clone(),
                });
            }
            unique_keys("page", org.pages.iter().map(|p| p.slug.as_str()))?;
            for page in &org.pages {
                unique_keys("instance key", page.components.iter().map(|c| c.key.as_str()))?;
                if let Some(unknown) = page.components.iter().find(|c| !components.contains(c.component.as_str())) {
                    return Err(SeedError::UnknownComponent {
                        page: format!("{}/{}", org.slug, page.slug),
                        component: unknown.component.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn unique_keys<'a>(kind: &'static str, keys: impl Iterator<Item = &'a str>) -> Result<HashSet<&'a str>, SeedError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(SeedError::Duplicate { kind, key: key.to_string() });
        }
    }
    Ok(seen)
}

// =============================================================================
// LOADING
// =============================================================================

/// Insert every row the seed describes.
///
/// # Errors
///
/// Any [`SiteSeed::check`] failure; nothing is inserted in that case.
pub async fn load_into(store: &MemoryStore, seed: &SiteSeed) -> Result<SeedSummary, SeedError> {
    seed.check()?;

    let mut theme_ids = HashMap::new();
    for theme in &seed.design_themes {
        let id = Uuid::new_v4();
        theme_ids.insert(theme.key.as_str(), id);
        store
            .insert_design_theme(DesignTheme {
                id,
                key: theme.key.clone(),
                name: theme.name.clone(),
                category: theme.category.clone(),
                colors: theme.colors.clone(),
                typography: theme.typography.clone(),
                spacing: theme.spacing.clone(),
                animation: theme.animation.clone(),
                is_premium: theme.is_premium,
            })
            .await;
    }

    let mut definition_ids = HashMap::new();
    for def in &seed.components {
        let id = Uuid::new_v4();
        definition_ids.insert(def.key.as_str(), id);
        store
            .insert_definition(ComponentDefinition {
                id,
                key: def.key.clone(),
                name: def.name.clone(),
                category: def.category.clone(),
                default_config: def.default_config.clone().unwrap_or_else(empty_object),
                required_fields: def.required_fields.clone(),
                is_premium: def.is_premium,
            })
            .await;
    }

    let mut summary = SeedSummary::default();
    for org_seed in &seed.organizations {
        let organization = Organization {
            id: Uuid::new_v4(),
            slug: org_seed.slug.clone(),
            name: org_seed.name.clone(),
            subscription_tier: org_seed.subscription_tier,
            logo_url: org_seed.logo_url.clone(),
            brand_colors: org_seed.brand_colors.clone(),
        };
        store.insert_organization(organization.clone()).await;
        summary.organizations += 1;

        if let Some(selection) = &org_seed.theme
            && let Some(&design_theme_id) = theme_ids.get(selection.key.as_str())
        {
            store
                .insert_organization_theme(OrganizationTheme {
                    id: Uuid::new_v4(),
                    organization_id: organization.id,
                    design_theme_id,
                    is_active: true,
                    component_variants: selection.component_variants.clone(),
                    customizations: selection.customizations.clone().unwrap_or_else(empty_object),
                })
                .await;
        }

        if let Some(items) = &org_seed.navigation {
            store.set_navigation(organization.id, NavigationMenu { items: items.clone() }).await;
        }

        for page_seed in &org_seed.pages {
            let page = Page {
                id: Uuid::new_v4(),
                organization_id: organization.id,
                slug: page_seed.slug.clone(),
                title: page_seed.title.clone(),
                meta_description: page_seed.meta_description.clone(),
                is_published: page_seed.is_published,
                show_in_nav: page_seed.show_in_nav,
                nav_order: page_seed.nav_order,
                custom_css: page_seed.custom_css.clone(),
            };
            store.insert_page(page.clone()).await;
            summary.pages += 1;

            for (position, instance) in page_seed.components.iter().enumerate() {
                let Some(&definition_id) = definition_ids.get(instance.component.as_str()) else {
                    continue;
                };
                let fallback_order = i32::try_from(position + 1).unwrap_or(i32::MAX);
                store
                    .insert_instance(ComponentInstance {
                        id: Uuid::new_v4(),
                        page_id: page.id,
                        instance_key: instance.key.clone(),
                        definition_id,
                        configuration: instance.configuration.clone().unwrap_or_else(empty_object),
                        display_order: instance.display_order.unwrap_or(fallback_order),
                        is_enabled: instance.enabled,
                        is_visible: instance.visible,
                        updated_at: 0,
                    })
                    .await;
                summary.instances += 1;
            }
        }
    }

    info!(
        organizations = summary.organizations,
        pages = summary.pages,
        instances = summary.instances,
        "site seed loaded"
    );
    Ok(summary)
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
