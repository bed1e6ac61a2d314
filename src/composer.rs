//! Page composer: storage rows to an ordered, themed, rendered page.
//!
//! DESIGN
//! ======
//! One composition is one read-only request. The organization and page are
//! required; navigation and theme are optional context and any failure to
//! load them is recovered as "absent" (empty navigation, default palette).
//! Surviving instances keep storage order, so the output order is the
//! display order.
//!
//! ERROR HANDLING
//! ==============
//! A missing organization and a missing or unpublished page produce the same
//! [`ComposeError::NotFound`], so callers cannot probe which one exists.
//! Per-instance problems (unknown keys, malformed configuration) never reach
//! this level; the registry degrades them to a diagnostic node.

use std::fmt::Write;

use serde::Serialize;
use tracing::{debug, warn};

use crate::editing::EditContext;
use crate::error::ErrorCode;
use crate::models::{NavItem, NavigationMenu, Organization, OrganizationTheme};
use crate::registry::{ComponentRegistry, RenderContext};
use crate::render::{RenderedNode, escape_html};
use crate::store::{PageStore, StoreError};
use crate::theme::{StyleVariables, apply_customizations, resolve_theme};
use crate::visibility::{SkipReason, skip_reason};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("page not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(StoreError),
}

impl ErrorCode for ComposeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => "E_NOT_FOUND",
            Self::Storage(_) => "E_STORAGE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Storage(e) if e.retryable())
    }
}

/// Per-viewer rendering choices. Passed explicitly, never global.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerContext {
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComposedPage {
    pub organization_slug: String,
    pub page_slug: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub custom_css: Option<String>,
    pub dark_mode: bool,
    pub editable: bool,
    /// Key of the active design theme, if one resolved.
    pub theme_key: Option<String>,
    pub variables: StyleVariables,
    pub navigation: Vec<NavItem>,
    /// Rendered instances in display order.
    pub nodes: Vec<RenderedNode>,
}

// =============================================================================
// COMPOSITION
// =============================================================================

/// Compose one published page of one organization.
///
/// # Errors
///
/// `NotFound` when the organization or published page does not exist;
/// `Storage` when either required lookup fails in the backend.
pub async fn compose_page(
    store: &dyn PageStore,
    registry: &ComponentRegistry,
    organization_slug: &str,
    page_slug: &str,
    viewer: ViewerContext,
    edit: &EditContext,
) -> Result<ComposedPage, ComposeError> {
    let organization = store
        .organization_by_slug(organization_slug)
        .await
        .map_err(ComposeError::Storage)?
        .ok_or(ComposeError::NotFound)?;
    let (page, placed) = store
        .published_page_with_instances(organization.id, page_slug)
        .await
        .map_err(ComposeError::Storage)?
        .ok_or(ComposeError::NotFound)?;

    let navigation = load_navigation(store, &organization).await;
    let theme = load_theme(store, &organization).await;

    let mut variables = resolve_theme(theme.as_ref().map(|(_, t)| t), viewer.dark_mode);
    if let Some((org_theme, _)) = &theme {
        apply_customizations(&mut variables, org_theme, viewer.dark_mode);
    }
    for (role, color) in &organization.brand_colors {
        variables.set(format!("--brand-{role}"), color.clone());
    }

    let editable = edit.is_editable();
    let mut nodes = Vec::with_capacity(placed.len());
    let mut skipped = 0usize;
    for entry in &placed {
        match skip_reason(entry, organization.subscription_tier) {
            None => {}
            Some(SkipReason::Hidden) if editable => {}
            Some(reason) => {
                debug!(
                    instance = %entry.instance.instance_key,
                    tier = organization.subscription_tier.as_str(),
                    ?reason,
                    "instance withheld"
                );
                skipped += 1;
                continue;
            }
        }

        let ctx = RenderContext {
            organization_id: organization.id,
            organization_slug: &organization.slug,
            instance_id: entry.instance.id,
            instance_key: &entry.instance.instance_key,
            component_key: &entry.definition.key,
            is_visible: entry.instance.is_visible,
            is_editable: editable,
            variant: variant_for(theme.as_ref().map(|(o, _)| o), &entry.definition.key),
            navigation: &navigation,
        };
        // Unknown keys dump what was stored, not the definition's defaults merged in.
        let config = if registry.contains(&entry.definition.key) {
            entry.effective_config()
        } else {
            entry.instance.configuration.clone()
        };
        nodes.push(registry.resolve(&entry.definition.key).adapt(&config, &ctx));
    }

    debug!(
        organization = %organization.slug,
        tier = organization.subscription_tier.as_str(),
        page = %page.slug,
        rendered = nodes.len(),
        skipped,
        "composed page"
    );

    Ok(ComposedPage {
        organization_slug: organization.slug,
        page_slug: page.slug,
        title: page.title,
        meta_description: page.meta_description,
        custom_css: page.custom_css,
        dark_mode: viewer.dark_mode,
        editable,
        theme_key: theme.map(|(_, t)| t.key),
        variables,
        navigation,
        nodes,
    })
}

fn variant_for<'a>(org_theme: Option<&'a OrganizationTheme>, component_key: &str) -> Option<&'a str> {
    org_theme.and_then(|t| t.component_variants.get(component_key)).map(String::as_str)
}

/// Stored menu, else derived from published pages. Failures yield no items.
async fn load_navigation(store: &dyn PageStore, organization: &Organization) -> Vec<NavItem> {
    match store.active_navigation(organization.id).await {
        Ok(Some(menu)) => return menu.sorted_items(),
        Ok(None) => {}
        Err(e) => {
            warn!(organization = %organization.slug, error = %e, "navigation load failed; rendering without it");
            return Vec::new();
        }
    }
    match store.published_pages(organization.id).await {
        Ok(pages) => NavigationMenu::from_pages(&pages).items,
        Err(e) => {
            warn!(organization = %organization.slug, error = %e, "page listing failed; rendering without navigation");
            Vec::new()
        }
    }
}

async fn load_theme(
    store: &dyn PageStore,
    organization: &Organization,
) -> Option<(OrganizationTheme, crate::models::DesignTheme)> {
    match store.active_theme(organization.id).await {
        Ok(theme) => theme,
        Err(e) => {
            warn!(organization = %organization.slug, error = %e, "theme load failed; using default palette");
            None
        }
    }
}

// =============================================================================
// HTML
// =============================================================================

impl ComposedPage {
    /// Full HTML document: head metadata, variables, custom CSS, then nodes.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
        out.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
        let _ = write!(out, "<title>{}</title>", escape_html(&self.title));
        if let Some(description) = self.meta_description.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(out, r#"<meta name="description" content="{}">"#, escape_html(description));
        }
        let _ = write!(out, "<style>{}</style>", style_text(&self.variables.to_css()));
        if let Some(css) = self.custom_css.as_deref().filter(|c| !c.trim().is_empty()) {
            let _ = write!(out, "<style>{}</style>", style_text(css));
        }
        out.push_str("</head>");

        let mut body_class = String::from("sk-page");
        if self.dark_mode {
            body_class.push_str(" sk-page--dark");
        }
        if self.editable {
            body_class.push_str(" sk-page--editing");
        }
        let _ = write!(
            out,
            r#"<body class="{body_class}" data-organization="{}" data-page="{}">"#,
            escape_html(&self.organization_slug),
            escape_html(&self.page_slug),
        );
        for node in &self.nodes {
            out.push_str(&node.to_html());
        }
        out.push_str("</body></html>");
        out
    }
}

/// Keep raw CSS from closing its `<style>` element early.
fn style_text(css: &str) -> String {
    css.replace("</", "<\\/")
}

#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;
