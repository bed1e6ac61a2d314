//! Component registry: string keys to renderable components.
//!
//! ARCHITECTURE
//! ============
//! The registry is built once per process ([`registry`]) and never mutated
//! afterwards. Each registered entry is a [`ComponentAdapter`] wrapping a
//! presentational [`Presenter`]. Unknown keys resolve to the explicit
//! [`Resolution::Fallback`] variant, whose renderer shows the key and the raw
//! configuration instead of failing the page.
//!
//! ERROR HANDLING
//! ==============
//! The adapter never fails. Configuration that does not deserialize into the
//! presenter's props degrades to the props' defaults, and a mapper or
//! presenter that panics is replaced by the diagnostic block for that one
//! instance only.

pub mod components;

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::NavItem;
use crate::render::{EditHandle, RenderedNode, escape_html, node_class};

// =============================================================================
// TYPES
// =============================================================================

/// Per-instance context handed to an adapter.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub organization_id: Uuid,
    pub organization_slug: &'a str,
    pub instance_id: Uuid,
    pub instance_key: &'a str,
    /// Key stored on the instance's definition (may be unregistered).
    pub component_key: &'a str,
    pub is_visible: bool,
    pub is_editable: bool,
    /// Design variant chosen by the organization theme for this component type.
    pub variant: Option<&'a str>,
    pub navigation: &'a [NavItem],
}

/// Anything the registry can hand back for a key.
pub trait RenderableComponent: Send + Sync {
    fn key(&self) -> &str;

    /// Render one instance from its effective configuration.
    fn adapt(&self, config: &serde_json::Value, ctx: &RenderContext<'_>) -> RenderedNode;
}

/// Presentational implementation behind an adapter.
pub trait Presenter: Send + Sync {
    type Props: DeserializeOwned + Default;

    fn present(&self, props: &Self::Props, ctx: &RenderContext<'_>, out: &mut String);
}

/// Projects stored configuration (plus built-in fallbacks) into presenter props.
pub type ConfigMapper = fn(&serde_json::Value) -> serde_json::Value;

// =============================================================================
// ADAPTER
// =============================================================================

pub struct ComponentAdapter<P> {
    key: &'static str,
    mapper: Option<ConfigMapper>,
    presenter: P,
}

impl<P: Presenter> ComponentAdapter<P> {
    #[must_use]
    pub fn new(key: &'static str, presenter: P) -> Self {
        Self { key, mapper: None, presenter }
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: ConfigMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    fn props(&self, config: &serde_json::Value) -> P::Props {
        let projected = match self.mapper {
            Some(mapper) => mapper(config),
            None => config.clone(),
        };
        serde_json::from_value(projected).unwrap_or_else(|e| {
            debug!(component = self.key, error = %e, "configuration did not match props; using defaults");
            P::Props::default()
        })
    }
}

impl<P: Presenter> RenderableComponent for ComponentAdapter<P> {
    fn key(&self) -> &str {
        self.key
    }

    fn adapt(&self, config: &serde_json::Value, ctx: &RenderContext<'_>) -> RenderedNode {
        let rendered = catch_unwind(AssertUnwindSafe(|| {
            let props = self.props(config);
            let mut body = String::new();
            self.presenter.present(&props, ctx, &mut body);
            body
        }));

        match rendered {
            Ok(html) => finish_node(ctx, self.key, html, false),
            Err(_) => {
                warn!(component = self.key, instance = ctx.instance_key, "component renderer panicked; isolating");
                diagnostic_node(ctx, config, "Component failed to render")
            }
        }
    }
}

// =============================================================================
// FALLBACK
// =============================================================================

/// Diagnostic placeholder for keys with no registered component.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackRenderer;

pub const FALLBACK_KEY: &str = "__fallback";

impl RenderableComponent for FallbackRenderer {
    fn key(&self) -> &str {
        FALLBACK_KEY
    }

    fn adapt(&self, config: &serde_json::Value, ctx: &RenderContext<'_>) -> RenderedNode {
        diagnostic_node(ctx, config, "Unknown component")
    }
}

/// Visibly marked block naming the key and dumping the raw configuration.
fn diagnostic_node(ctx: &RenderContext<'_>, config: &serde_json::Value, headline: &str) -> RenderedNode {
    let dump = serde_json::to_string_pretty(config).unwrap_or_else(|_| config.to_string());
    let html = format!(
        r#"<div class="sk-diagnostic" role="note" style="border:2px dashed #dc2626;background:#fef2f2;color:#991b1b;padding:1rem"><strong>{}: {}</strong><pre>{}</pre></div>"#,
        escape_html(headline),
        escape_html(ctx.component_key),
        escape_html(&dump),
    );
    finish_node(ctx, ctx.component_key, html, true)
}

fn finish_node(ctx: &RenderContext<'_>, component_key: &str, html: String, is_fallback: bool) -> RenderedNode {
    let hidden = !ctx.is_visible;
    RenderedNode {
        instance_id: ctx.instance_id,
        instance_key: ctx.instance_key.to_string(),
        component_key: component_key.to_string(),
        class: node_class(component_key, ctx.variant, hidden, is_fallback),
        hidden,
        is_fallback,
        edit: ctx.is_editable.then_some(EditHandle { instance_id: ctx.instance_id }),
        html,
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Outcome of a key lookup. The fallback is a variant, not a null.
pub enum Resolution<'a> {
    Registered(&'a dyn RenderableComponent),
    Fallback(&'a FallbackRenderer),
}

impl<'a> Resolution<'a> {
    #[must_use]
    pub fn component(&self) -> &'a dyn RenderableComponent {
        match self {
            Self::Registered(component) => *component,
            Self::Fallback(fallback) => *fallback,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

pub struct ComponentRegistry {
    entries: HashMap<&'static str, Box<dyn RenderableComponent>>,
    fallback: FallbackRenderer,
}

impl ComponentRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self { entries: HashMap::new(), fallback: FallbackRenderer }
    }

    /// Registry holding every built-in component.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        components::register_builtin(&mut registry);
        registry
    }

    /// Register during construction. A later entry with the same key replaces
    /// the earlier one.
    pub fn register<P: Presenter + 'static>(&mut self, adapter: ComponentAdapter<P>) {
        self.entries.insert(adapter.key, Box::new(adapter));
    }

    #[must_use]
    pub fn lookup(&self, key: &str) -> Resolution<'_> {
        match self.entries.get(key) {
            Some(component) => Resolution::Registered(component.as_ref()),
            None => Resolution::Fallback(&self.fallback),
        }
    }

    /// Total: every key yields something renderable.
    #[must_use]
    pub fn resolve(&self, key: &str) -> &dyn RenderableComponent {
        let resolution = self.lookup(key);
        if resolution.is_fallback() {
            warn!(component = key, "unknown component key; rendering diagnostic placeholder");
        }
        resolution.component()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static REGISTRY: OnceLock<ComponentRegistry> = OnceLock::new();

/// Process-wide built-in registry, constructed on first use.
pub fn registry() -> &'static ComponentRegistry {
    REGISTRY.get_or_init(ComponentRegistry::builtin)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
