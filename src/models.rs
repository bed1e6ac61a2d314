//! Site data model: organizations, pages, component catalog, and themes.
//!
//! DESIGN
//! ======
//! These types mirror the rows handed over by the storage layer. The
//! organization is the ownership root: pages, component instances, the
//! organization theme, and the navigation menu all belong to exactly one
//! organization. Component definitions and design themes are shared catalog
//! data referenced by id.
//!
//! Every struct tolerates partial input via `#[serde(default)]` so seed files
//! and stored JSON can omit optional fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ORGANIZATION
// =============================================================================

/// Ordinal entitlement level. Ordering follows the billing ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Basic,
    Professional,
    Enterprise,
}

impl SubscriptionTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }
}

/// A tenant owning one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Routing key. Unique and immutable after creation.
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Brand colors keyed by role (`primary`, `accent`, ...).
    #[serde(default)]
    pub brand_colors: BTreeMap<String, String>,
}

// =============================================================================
// PAGE
// =============================================================================

/// One routable document within an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Unique within the organization.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub show_in_nav: bool,
    #[serde(default)]
    pub nav_order: i32,
    /// Raw CSS injected after the theme variables.
    #[serde(default)]
    pub custom_css: Option<String>,
}

// =============================================================================
// COMPONENT CATALOG
// =============================================================================

/// Catalog entry describing a kind of component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub id: Uuid,
    /// Registry key, e.g. `hero_banner`.
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "empty_object")]
    pub default_config: serde_json::Value,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub is_premium: bool,
}

/// Placement of one definition on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub id: Uuid,
    pub page_id: Uuid,
    /// Stable render identity. Unique within the page.
    pub instance_key: String,
    pub definition_id: Uuid,
    #[serde(default = "empty_object")]
    pub configuration: serde_json::Value,
    #[serde(default)]
    pub display_order: i32,
    /// Hard kill switch.
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    /// Soft hide. Still rendered (dimmed) in edit mode.
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// Milliseconds since Unix epoch of the last configuration write.
    #[serde(default)]
    pub updated_at: i64,
}

/// An instance joined to its definition, as loaded for composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedInstance {
    pub instance: ComponentInstance,
    pub definition: ComponentDefinition,
}

impl PlacedInstance {
    /// Definition defaults overlaid with the instance configuration.
    #[must_use]
    pub fn effective_config(&self) -> serde_json::Value {
        crate::validator::merge_config(&self.definition.default_config, &self.instance.configuration)
    }
}

// =============================================================================
// THEMES
// =============================================================================

/// A semantic color with per-mode values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub light: String,
    pub dark: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypographyScheme {
    /// Font stacks keyed by role (`heading`, `body`, `mono`).
    #[serde(default)]
    pub fonts: BTreeMap<String, String>,
    /// Named size scale (`sm`, `base`, `lg`, ...).
    #[serde(default)]
    pub sizes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationScheme {
    #[serde(default)]
    pub speed: Option<AnimationSpeed>,
    #[serde(default)]
    pub easing: Option<String>,
    #[serde(default)]
    pub hover_scale: Option<f64>,
    #[serde(default)]
    pub stagger_delay_ms: Option<u32>,
}

/// Catalog entry describing a coherent visual style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTheme {
    pub id: Uuid,
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

/// The design theme an organization has selected, plus its customizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationTheme {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub design_theme_id: Uuid,
    #[serde(default)]
    pub is_active: bool,
    /// Component type key -> chosen design variant.
    #[serde(default)]
    pub component_variants: BTreeMap<String, String>,
    /// Free-form knobs: a `colors` object of role overrides plus scalar values.
    #[serde(default = "empty_object")]
    pub customizations: serde_json::Value,
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    /// Page slug, or a full URL when `is_external`.
    pub target: String,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub order: i32,
}

impl NavItem {
    /// Link target as it should appear in an `href`.
    #[must_use]
    pub fn href(&self, organization_slug: &str) -> String {
        if self.is_external {
            self.target.clone()
        } else {
            format!("/sites/{organization_slug}/{}", self.target)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationMenu {
    pub items: Vec<NavItem>,
}

impl NavigationMenu {
    /// Derive a menu from published, nav-visible pages ordered by `nav_order`.
    #[must_use]
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut visible: Vec<&Page> = pages.iter().filter(|p| p.is_published && p.show_in_nav).collect();
        visible.sort_by_key(|p| p.nav_order);
        let items = visible
            .into_iter()
            .map(|p| NavItem { label: p.title.clone(), target: p.slug.clone(), is_external: false, order: p.nav_order })
            .collect();
        Self { items }
    }

    /// Items in ascending `order`; ties keep stored order.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<NavItem> {
        let mut items = self.items.clone();
        items.sort_by_key(|item| item.order);
        items
    }
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
