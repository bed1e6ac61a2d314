//! Theme resolver: design theme plus mode flag to flat style variables.
//!
//! DESIGN
//! ======
//! Resolution starts from a hard-coded default palette and overlays whatever
//! the stored theme provides, so a partial or absent theme still yields the
//! full variable set. Only color variables depend on the mode flag; type,
//! spacing, and animation variables are identical in light and dark.
//!
//! The mode flag is an explicit argument. Nothing here reads process state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{AnimationScheme, AnimationSpeed, DesignTheme, OrganizationTheme};

// =============================================================================
// DEFAULTS
// =============================================================================

/// Semantic color -> (light, dark).
const DEFAULT_COLORS: &[(&str, &str, &str)] = &[
    ("primary", "#1d4ed8", "#60a5fa"),
    ("secondary", "#0f172a", "#e2e8f0"),
    ("accent", "#f59e0b", "#fbbf24"),
    ("background", "#ffffff", "#0b1120"),
    ("surface", "#f8fafc", "#111827"),
    ("text", "#0f172a", "#e5e7eb"),
    ("muted", "#64748b", "#94a3b8"),
    ("border", "#e2e8f0", "#1f2937"),
];

const DEFAULT_FONTS: &[(&str, &str)] = &[
    ("heading", "'Montserrat', system-ui, sans-serif"),
    ("body", "'Inter', system-ui, sans-serif"),
    ("mono", "'JetBrains Mono', ui-monospace, monospace"),
];

const DEFAULT_FONT_SIZES: &[(&str, &str)] = &[
    ("xs", "0.75rem"),
    ("sm", "0.875rem"),
    ("base", "1rem"),
    ("lg", "1.125rem"),
    ("xl", "1.25rem"),
    ("2xl", "1.5rem"),
    ("3xl", "1.875rem"),
    ("4xl", "2.25rem"),
];

const DEFAULT_SPACING: &[(&str, &str)] = &[
    ("xs", "0.25rem"),
    ("sm", "0.5rem"),
    ("md", "1rem"),
    ("lg", "1.5rem"),
    ("xl", "2rem"),
    ("2xl", "3rem"),
];

pub const DURATION_SLOW_MS: u32 = 600;
pub const DURATION_NORMAL_MS: u32 = 300;
pub const DURATION_FAST_MS: u32 = 150;

const DEFAULT_EASING: &str = "cubic-bezier(0.4, 0, 0.2, 1)";
const DEFAULT_HOVER_SCALE: f64 = 1.05;
const DEFAULT_STAGGER_DELAY_MS: u32 = 100;

pub const VAR_ANIMATION_DURATION: &str = "--animation-duration";
pub const VAR_ANIMATION_EASING: &str = "--animation-easing";
pub const VAR_HOVER_SCALE: &str = "--hover-scale";
pub const VAR_STAGGER_DELAY: &str = "--stagger-delay";

// =============================================================================
// TYPES
// =============================================================================

/// Flat, ordered mapping of CSS custom property names to values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct StyleVariables(BTreeMap<String, String>);

impl StyleVariables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a `:root { ... }` declaration block.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root{");
        for (name, value) in self.iter() {
            css.push_str(name);
            css.push(':');
            css.push_str(value);
            css.push(';');
        }
        css.push('}');
        css
    }
}

#[must_use]
pub fn color_var(role: &str) -> String {
    format!("--color-{role}")
}

#[must_use]
pub fn font_var(role: &str) -> String {
    format!("--font-{role}")
}

#[must_use]
pub fn font_size_var(step: &str) -> String {
    format!("--text-{step}")
}

#[must_use]
pub fn spacing_var(step: &str) -> String {
    format!("--space-{step}")
}

/// Duration constant for a speed class.
#[must_use]
pub fn duration_ms(speed: AnimationSpeed) -> u32 {
    match speed {
        AnimationSpeed::Slow => DURATION_SLOW_MS,
        AnimationSpeed::Normal => DURATION_NORMAL_MS,
        AnimationSpeed::Fast => DURATION_FAST_MS,
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Resolve a theme into style variables. Total: never fails.
#[must_use]
pub fn resolve_theme(theme: Option<&DesignTheme>, dark_mode: bool) -> StyleVariables {
    let mut vars = default_variables(dark_mode);
    let Some(theme) = theme else {
        return vars;
    };

    for (role, pair) in &theme.colors {
        let value = if dark_mode { &pair.dark } else { &pair.light };
        vars.set(color_var(role), value.clone());
    }

    if let Some(typography) = &theme.typography {
        for (role, stack) in &typography.fonts {
            vars.set(font_var(role), stack.clone());
        }
        for (step, size) in &typography.sizes {
            vars.set(font_size_var(step), size.clone());
        }
    }

    if let Some(spacing) = &theme.spacing {
        for (step, size) in spacing {
            vars.set(spacing_var(step), size.clone());
        }
    }

    if let Some(animation) = &theme.animation {
        apply_animation(&mut vars, animation);
    }

    vars
}

fn default_variables(dark_mode: bool) -> StyleVariables {
    let mut vars = StyleVariables::new();
    for (role, light, dark) in DEFAULT_COLORS {
        vars.set(color_var(role), if dark_mode { *dark } else { *light });
    }
    for (role, stack) in DEFAULT_FONTS {
        vars.set(font_var(role), *stack);
    }
    for (step, size) in DEFAULT_FONT_SIZES {
        vars.set(font_size_var(step), *size);
    }
    for (step, size) in DEFAULT_SPACING {
        vars.set(spacing_var(step), *size);
    }
    vars.set(VAR_ANIMATION_DURATION, format!("{DURATION_NORMAL_MS}ms"));
    vars.set(VAR_ANIMATION_EASING, DEFAULT_EASING);
    vars.set(VAR_HOVER_SCALE, DEFAULT_HOVER_SCALE.to_string());
    vars.set(VAR_STAGGER_DELAY, format!("{DEFAULT_STAGGER_DELAY_MS}ms"));
    vars
}

fn apply_animation(vars: &mut StyleVariables, animation: &AnimationScheme) {
    if let Some(speed) = animation.speed {
        vars.set(VAR_ANIMATION_DURATION, format!("{}ms", duration_ms(speed)));
    }
    if let Some(easing) = animation.easing.as_deref().filter(|e| !e.is_empty()) {
        vars.set(VAR_ANIMATION_EASING, easing);
    }
    if let Some(scale) = animation.hover_scale.filter(|s| s.is_finite() && *s > 0.0) {
        vars.set(VAR_HOVER_SCALE, scale.to_string());
    }
    if let Some(delay) = animation.stagger_delay_ms {
        vars.set(VAR_STAGGER_DELAY, format!("{delay}ms"));
    }
}

/// Overlay organization-level customizations onto resolved variables.
///
/// `colors` entries override color roles (a plain string, or a
/// `{light, dark}` pair). Other scalar entries become `--custom-<key>`.
/// Anything else is ignored.
pub fn apply_customizations(vars: &mut StyleVariables, org_theme: &OrganizationTheme, dark_mode: bool) {
    let Some(custom) = org_theme.customizations.as_object() else {
        return;
    };

    for (key, value) in custom {
        if key == "colors" {
            let Some(colors) = value.as_object() else {
                continue;
            };
            for (role, color) in colors {
                let picked = match color {
                    serde_json::Value::String(s) => Some(s.as_str()),
                    serde_json::Value::Object(pair) => {
                        pair.get(if dark_mode { "dark" } else { "light" }).and_then(|v| v.as_str())
                    }
                    _ => None,
                };
                if let Some(picked) = picked {
                    vars.set(color_var(role), picked);
                }
            }
            continue;
        }

        let name = format!("--custom-{}", key.replace('_', "-"));
        match value {
            serde_json::Value::String(s) => vars.set(name, s.clone()),
            serde_json::Value::Number(n) => vars.set(name, n.to_string()),
            serde_json::Value::Bool(b) => vars.set(name, b.to_string()),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;
