//! Rendered output: component nodes and HTML helpers.
//!
//! DESIGN
//! ======
//! A `RenderedNode` is the unit the composer emits per surviving instance. It
//! carries the stable instance key, a CSS class derived from the component key
//! and visibility state, the component body markup, and, in edit mode, an
//! edit handle naming the instance to mutate. Markup is plain HTML strings;
//! every interpolated value goes through [`escape_html`].

use std::fmt::Write;

use serde::Serialize;
use uuid::Uuid;

pub const NODE_CLASS: &str = "sk-component";
pub const HIDDEN_CLASS: &str = "sk-component--hidden";
pub const FALLBACK_CLASS: &str = "sk-component--unknown";

/// Edit hook point. Activation calls the composer's edit context with this id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditHandle {
    pub instance_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedNode {
    pub instance_id: Uuid,
    /// Stable render identity.
    pub instance_key: String,
    pub component_key: String,
    pub class: String,
    /// Soft-hidden instance shown dimmed (edit mode only).
    pub hidden: bool,
    /// Rendered by the diagnostic fallback instead of a registered component.
    pub is_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<EditHandle>,
    /// Component body markup.
    pub html: String,
}

impl RenderedNode {
    /// Wrap the body in its identity element, with the edit overlay when present.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<section class="{}" data-instance-key="{}" data-component="{}">"#,
            escape_html(&self.class),
            escape_html(&self.instance_key),
            escape_html(&self.component_key),
        );
        if let Some(edit) = &self.edit {
            let _ = write!(
                out,
                r#"<button type="button" class="sk-edit" data-edit-instance="{}" tabindex="-1" aria-hidden="true">Edit</button>"#,
                edit.instance_id
            );
        }
        out.push_str(&self.html);
        out.push_str("</section>");
        out
    }
}

/// Build the node class list: base, component, variant, then state modifiers.
#[must_use]
pub fn node_class(component_key: &str, variant: Option<&str>, hidden: bool, is_fallback: bool) -> String {
    let mut class = format!("{NODE_CLASS} {NODE_CLASS}--{}", class_token(component_key));
    if let Some(variant) = variant.filter(|v| !v.is_empty()) {
        let _ = write!(class, " {NODE_CLASS}--variant-{}", class_token(variant));
    }
    if hidden {
        class.push(' ');
        class.push_str(HIDDEN_CLASS);
    }
    if is_fallback {
        class.push(' ');
        class.push_str(FALLBACK_CLASS);
    }
    class
}

/// Reduce an arbitrary key to a safe CSS class fragment.
#[must_use]
pub fn class_token(raw: &str) -> String {
    let token: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c.to_ascii_lowercase() } else { '-' })
        .collect();
    if token.is_empty() { "unnamed".to_string() } else { token }
}

#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Allow only relative paths, anchors, and http(s)/mailto/tel links in `href`.
#[must_use]
pub fn safe_href(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    let allowed = trimmed.starts_with('/')
        || trimmed.starts_with('#')
        || lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:");
    if allowed { escape_html(trimmed) } else { "#".to_string() }
}

/// URL safe to place inside a quoted CSS `url('...')`. Only site-relative and
/// http(s) URLs are accepted; anything carrying quotes, escapes, parentheses,
/// declaration separators or control characters is rejected.
#[must_use]
pub fn css_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    let allowed_scheme = (trimmed.starts_with('/') && !trimmed.starts_with("//"))
        || lower.starts_with("http://")
        || lower.starts_with("https://");
    let clean = !trimmed
        .chars()
        .any(|c| matches!(c, '\'' | '"' | '\\' | '(' | ')' | ';' | '<' | '>') || c.is_control());
    (allowed_scheme && clean).then(|| escape_html(trimmed))
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
