//! Built-in presentational components and their configuration mappers.
//!
//! Each mapper reads the stored configuration leniently (accepting a few
//! legacy aliases such as `headline` for `title`) and fills in fallback copy,
//! so the presenters only ever see well-shaped props.

use std::fmt::Write;

use serde::Deserialize;
use serde_json::{Value, json};

use super::{ComponentAdapter, ComponentRegistry, Presenter, RenderContext};
use crate::render::{class_token, css_url, escape_html, safe_href};

pub const HERO_BANNER: &str = "hero_banner";
pub const TEXT_BLOCK: &str = "text_block";
pub const FEATURE_GRID: &str = "feature_grid";
pub const CTA_SECTION: &str = "cta_section";
pub const CONTACT_CARD: &str = "contact_card";
pub const FOOTER_BASIC: &str = "footer_basic";
pub const NAVIGATION_BAR: &str = "navigation_bar";

const DEFAULT_HERO_TITLE: &str = "Welcome aboard";
const DEFAULT_CTA_HEADLINE: &str = "Ready for departure?";
const DEFAULT_CTA_TEXT: &str = "Get in touch";
const DEFAULT_CTA_LINK: &str = "/contact";
const DEFAULT_COPYRIGHT: &str = "All rights reserved.";
const MAX_GRID_COLUMNS: u64 = 4;

pub(super) fn register_builtin(registry: &mut ComponentRegistry) {
    registry.register(ComponentAdapter::new(HERO_BANNER, HeroBanner).with_mapper(map_hero));
    registry.register(ComponentAdapter::new(TEXT_BLOCK, TextBlock).with_mapper(map_text_block));
    registry.register(ComponentAdapter::new(FEATURE_GRID, FeatureGrid).with_mapper(map_feature_grid));
    registry.register(ComponentAdapter::new(CTA_SECTION, CtaSection).with_mapper(map_cta));
    registry.register(ComponentAdapter::new(CONTACT_CARD, ContactCard));
    registry.register(ComponentAdapter::new(FOOTER_BASIC, FooterBasic).with_mapper(map_footer));
    registry.register(ComponentAdapter::new(NAVIGATION_BAR, NavigationBar));
}

// =============================================================================
// MAPPER HELPERS
// =============================================================================

/// First non-empty string among `keys`.
fn first_str<'a>(config: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| config.get(*key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

fn str_or(config: &Value, keys: &[&str], fallback: &str) -> Value {
    Value::String(first_str(config, keys).unwrap_or(fallback).to_string())
}

fn opt_str(config: &Value, keys: &[&str]) -> Value {
    first_str(config, keys).map_or(Value::Null, |s| Value::String(s.to_string()))
}

/// Keep only object items, projecting each through `project`.
fn object_items(config: &Value, key: &str, project: fn(&Value) -> Value) -> Value {
    let items: Vec<Value> = config
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter(|item| item.is_object()).map(project).collect())
        .unwrap_or_default();
    Value::Array(items)
}

fn link_item(item: &Value) -> Value {
    json!({
        "label": str_or(item, &["label", "text"], "Link"),
        "href": str_or(item, &["href", "url", "link"], "#"),
    })
}

// =============================================================================
// HERO BANNER
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroProps {
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
}

fn map_hero(config: &Value) -> Value {
    json!({
        "title": str_or(config, &["title", "headline"], DEFAULT_HERO_TITLE),
        "subtitle": opt_str(config, &["subtitle", "tagline"]),
        "backgroundImage": opt_str(config, &["backgroundImage", "background_image", "image"]),
        "ctaText": opt_str(config, &["ctaText", "cta_text", "buttonText"]),
        "ctaLink": opt_str(config, &["ctaLink", "cta_link", "buttonLink"]),
    })
}

pub struct HeroBanner;

impl Presenter for HeroBanner {
    type Props = HeroProps;

    fn present(&self, props: &HeroProps, ctx: &RenderContext<'_>, out: &mut String) {
        let layout = ctx.variant.map_or_else(|| "centered".to_string(), class_token);
        let _ = write!(out, r#"<div class="hero hero--{layout}""#);
        if let Some(image) = props.background_image.as_deref().and_then(css_url) {
            let _ = write!(out, r#" style="background-image:url('{image}')""#);
        }
        let _ = write!(out, "><h1>{}</h1>", escape_html(&props.title));
        if let Some(subtitle) = &props.subtitle {
            let _ = write!(out, "<p>{}</p>", escape_html(subtitle));
        }
        if let (Some(text), Some(link)) = (&props.cta_text, &props.cta_link) {
            let _ = write!(out, r#"<a class="hero__cta" href="{}">{}</a>"#, safe_href(link), escape_html(text));
        }
        out.push_str("</div>");
    }
}

// =============================================================================
// TEXT BLOCK
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBlockProps {
    pub heading: Option<String>,
    pub body: String,
    pub align: Option<String>,
}

fn map_text_block(config: &Value) -> Value {
    let align = first_str(config, &["align"]).filter(|a| matches!(*a, "left" | "center" | "right"));
    json!({
        "heading": opt_str(config, &["heading", "title"]),
        "body": str_or(config, &["body", "content", "text"], ""),
        "align": align,
    })
}

pub struct TextBlock;

impl Presenter for TextBlock {
    type Props = TextBlockProps;

    fn present(&self, props: &TextBlockProps, _ctx: &RenderContext<'_>, out: &mut String) {
        let align = props.align.as_deref().unwrap_or("left");
        let _ = write!(out, r#"<div class="text-block text-block--{align}">"#);
        if let Some(heading) = &props.heading {
            let _ = write!(out, "<h2>{}</h2>", escape_html(heading));
        }
        for paragraph in props.body.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            let _ = write!(out, "<p>{}</p>", escape_html(paragraph));
        }
        out.push_str("</div>");
    }
}

// =============================================================================
// FEATURE GRID
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureGridProps {
    pub heading: Option<String>,
    pub columns: u64,
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
}

fn feature_item(item: &Value) -> Value {
    json!({
        "title": str_or(item, &["title", "name"], ""),
        "description": str_or(item, &["description", "text"], ""),
        "icon": opt_str(item, &["icon"]),
    })
}

fn map_feature_grid(config: &Value) -> Value {
    let columns = config.get("columns").and_then(Value::as_u64).unwrap_or(3).clamp(1, MAX_GRID_COLUMNS);
    json!({
        "heading": opt_str(config, &["heading", "title"]),
        "columns": columns,
        "items": object_items(config, "items", feature_item),
    })
}

pub struct FeatureGrid;

impl Presenter for FeatureGrid {
    type Props = FeatureGridProps;

    fn present(&self, props: &FeatureGridProps, _ctx: &RenderContext<'_>, out: &mut String) {
        out.push_str(r#"<div class="feature-grid">"#);
        if let Some(heading) = &props.heading {
            let _ = write!(out, "<h2>{}</h2>", escape_html(heading));
        }
        let _ = write!(out, r#"<ul class="feature-grid__items feature-grid__items--cols-{}">"#, props.columns);
        for item in &props.items {
            out.push_str("<li>");
            if let Some(icon) = &item.icon {
                let _ = write!(out, r#"<span class="icon icon--{}"></span>"#, class_token(icon));
            }
            let _ = write!(out, "<h3>{}</h3><p>{}</p></li>", escape_html(&item.title), escape_html(&item.description));
        }
        out.push_str("</ul></div>");
    }
}

// =============================================================================
// CTA SECTION
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaProps {
    pub headline: String,
    pub body: Option<String>,
    pub cta_text: String,
    pub cta_link: String,
}

fn map_cta(config: &Value) -> Value {
    json!({
        "headline": str_or(config, &["headline", "title"], DEFAULT_CTA_HEADLINE),
        "body": opt_str(config, &["body", "description"]),
        "ctaText": str_or(config, &["ctaText", "cta_text", "buttonText"], DEFAULT_CTA_TEXT),
        "ctaLink": str_or(config, &["ctaLink", "cta_link", "buttonLink"], DEFAULT_CTA_LINK),
    })
}

pub struct CtaSection;

impl Presenter for CtaSection {
    type Props = CtaProps;

    fn present(&self, props: &CtaProps, _ctx: &RenderContext<'_>, out: &mut String) {
        let _ = write!(out, r#"<div class="cta"><h2>{}</h2>"#, escape_html(&props.headline));
        if let Some(body) = &props.body {
            let _ = write!(out, "<p>{}</p>", escape_html(body));
        }
        let _ = write!(
            out,
            r#"<a class="cta__button" href="{}">{}</a></div>"#,
            safe_href(&props.cta_link),
            escape_html(&props.cta_text)
        );
    }
}

// =============================================================================
// CONTACT CARD
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactProps {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

pub struct ContactCard;

impl Presenter for ContactCard {
    type Props = ContactProps;

    fn present(&self, props: &ContactProps, _ctx: &RenderContext<'_>, out: &mut String) {
        out.push_str(r#"<address class="contact-card">"#);
        if let Some(name) = &props.name {
            let _ = write!(out, "<strong>{}</strong>", escape_html(name));
        }
        if let Some(role) = &props.role {
            let _ = write!(out, "<span>{}</span>", escape_html(role));
        }
        if let Some(email) = &props.email {
            let _ = write!(
                out,
                r#"<a href="{}">{}</a>"#,
                safe_href(&format!("mailto:{email}")),
                escape_html(email)
            );
        }
        if let Some(phone) = &props.phone {
            let _ = write!(out, r#"<a href="{}">{}</a>"#, safe_href(&format!("tel:{phone}")), escape_html(phone));
        }
        if let Some(location) = &props.location {
            let _ = write!(out, "<span>{}</span>", escape_html(location));
        }
        out.push_str("</address>");
    }
}

// =============================================================================
// FOOTER
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FooterProps {
    pub copyright: String,
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

fn map_footer(config: &Value) -> Value {
    json!({
        "copyright": str_or(config, &["copyright", "text"], DEFAULT_COPYRIGHT),
        "links": object_items(config, "links", link_item),
    })
}

pub struct FooterBasic;

impl Presenter for FooterBasic {
    type Props = FooterProps;

    fn present(&self, props: &FooterProps, _ctx: &RenderContext<'_>, out: &mut String) {
        out.push_str(r#"<footer class="footer">"#);
        if !props.links.is_empty() {
            out.push_str("<nav>");
            for link in &props.links {
                let _ = write!(out, r#"<a href="{}">{}</a>"#, safe_href(&link.href), escape_html(&link.label));
            }
            out.push_str("</nav>");
        }
        let _ = write!(out, "<small>{}</small></footer>", escape_html(&props.copyright));
    }
}

// =============================================================================
// NAVIGATION BAR
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavigationProps {
    pub brand: Option<String>,
}

/// Renders the page's resolved navigation items from the render context.
pub struct NavigationBar;

impl Presenter for NavigationBar {
    type Props = NavigationProps;

    fn present(&self, props: &NavigationProps, ctx: &RenderContext<'_>, out: &mut String) {
        out.push_str(r#"<nav class="navbar">"#);
        if let Some(brand) = &props.brand {
            let _ = write!(out, r#"<span class="navbar__brand">{}</span>"#, escape_html(brand));
        }
        out.push_str("<ul>");
        for item in ctx.navigation {
            let href = item.href(ctx.organization_slug);
            if item.is_external {
                let _ = write!(
                    out,
                    r#"<li><a href="{}" rel="noopener" target="_blank">{}</a></li>"#,
                    safe_href(&href),
                    escape_html(&item.label)
                );
            } else {
                let _ = write!(out, r#"<li><a href="{}">{}</a></li>"#, safe_href(&href), escape_html(&item.label));
            }
        }
        out.push_str("</ul></nav>");
    }
}

#[cfg(test)]
#[path = "components_test.rs"]
mod tests;
