use super::*;
use crate::test_helpers;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BoomProps {
    label: String,
}

struct Boom;

impl Presenter for Boom {
    type Props = BoomProps;

    fn present(&self, props: &BoomProps, _ctx: &RenderContext<'_>, out: &mut String) {
        assert!(props.label != "explode", "presenter failure");
        out.push_str(&props.label);
    }
}

#[test]
fn builtin_registry_contains_catalog_keys() {
    let keys = registry().keys();
    for key in [
        components::HERO_BANNER,
        components::TEXT_BLOCK,
        components::FEATURE_GRID,
        components::CTA_SECTION,
        components::CONTACT_CARD,
        components::FOOTER_BASIC,
        components::NAVIGATION_BAR,
    ] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(registry().len(), keys.len());
}

#[test]
fn registry_is_built_once() {
    assert!(std::ptr::eq(registry(), registry()));
}

#[test]
fn every_string_resolves_to_something_renderable() {
    for key in ["hero_banner", "", "deprecated_carousel", "💥", "HERO_BANNER"] {
        let ctx = test_helpers::render_context(key);
        let node = registry().resolve(key).adapt(&json!({}), &ctx);
        assert_eq!(node.instance_key, ctx.instance_key);
        assert_eq!(node.is_fallback, !registry().contains(key), "key {key:?}");
    }
}

#[test]
fn unknown_key_resolves_to_fallback_variant() {
    let resolution = registry().lookup("deprecated_carousel");
    assert!(resolution.is_fallback());
    assert_eq!(resolution.component().key(), FALLBACK_KEY);
    assert!(!registry().lookup(components::HERO_BANNER).is_fallback());
}

#[test]
fn fallback_dumps_key_and_configuration() {
    let ctx = test_helpers::render_context("deprecated_carousel");
    let node = registry().resolve("deprecated_carousel").adapt(&json!({"slides": ["<b>1</b>"]}), &ctx);
    assert!(node.is_fallback);
    assert_eq!(node.component_key, "deprecated_carousel");
    assert!(node.class.contains("sk-component--unknown"));
    assert!(node.html.contains("Unknown component: deprecated_carousel"));
    assert!(node.html.contains("&lt;b&gt;1&lt;/b&gt;"));
    assert!(node.html.contains("border:2px dashed"));
}

#[test]
fn adapter_marks_hidden_instances_without_dropping_them() {
    let mut ctx = test_helpers::render_context(components::TEXT_BLOCK);
    ctx.is_visible = false;
    let node = registry().resolve(components::TEXT_BLOCK).adapt(&json!({"body": "Hidden"}), &ctx);
    assert!(node.hidden);
    assert!(node.class.contains("sk-component--hidden"));
    assert!(node.html.contains("Hidden"));
}

#[test]
fn adapter_attaches_edit_handle_only_when_editable() {
    let mut ctx = test_helpers::render_context(components::TEXT_BLOCK);
    let node = registry().resolve(components::TEXT_BLOCK).adapt(&json!({}), &ctx);
    assert!(node.edit.is_none());

    ctx.is_editable = true;
    let node = registry().resolve(components::TEXT_BLOCK).adapt(&json!({}), &ctx);
    assert_eq!(node.edit, Some(EditHandle { instance_id: ctx.instance_id }));
}

#[test]
fn panicking_presenter_is_isolated_to_its_instance() {
    let mut custom = ComponentRegistry::empty();
    custom.register(ComponentAdapter::new("boom", Boom));

    let ctx = test_helpers::render_context("boom");
    let ok = custom.resolve("boom").adapt(&json!({"label": "fine"}), &ctx);
    assert!(!ok.is_fallback);
    assert_eq!(ok.html, "fine");

    let failed = custom.resolve("boom").adapt(&json!({"label": "explode"}), &ctx);
    assert!(failed.is_fallback);
    assert!(failed.html.contains("Component failed to render: boom"));
}

#[test]
fn panicking_mapper_is_isolated_to_its_instance() {
    fn explode(config: &serde_json::Value) -> serde_json::Value {
        assert!(config.get("label").and_then(|v| v.as_str()) != Some("explode"), "mapper failure");
        config.clone()
    }

    let mut custom = ComponentRegistry::empty();
    custom.register(ComponentAdapter::new("boom", Boom).with_mapper(explode));
    let ctx = test_helpers::render_context("boom");

    let node = custom.resolve("boom").adapt(&json!({"label": "explode"}), &ctx);
    assert!(node.is_fallback);
    assert!(node.html.contains("Component failed to render: boom"));

    let ok = custom.resolve("boom").adapt(&json!({"label": "fine"}), &ctx);
    assert_eq!(ok.html, "fine");
}

#[test]
fn mapper_runs_before_deserialization() {
    fn upper(config: &serde_json::Value) -> serde_json::Value {
        let label = config.get("label").and_then(|v| v.as_str()).unwrap_or("none");
        json!({"label": label.to_uppercase()})
    }

    let mut custom = ComponentRegistry::empty();
    custom.register(ComponentAdapter::new("boom", Boom).with_mapper(upper));
    let ctx = test_helpers::render_context("boom");
    assert_eq!(custom.resolve("boom").adapt(&json!({}), &ctx).html, "NONE");
}

#[test]
fn empty_registry_still_resolves() {
    let empty = ComponentRegistry::empty();
    assert!(empty.is_empty());
    let ctx = test_helpers::render_context(components::HERO_BANNER);
    assert!(empty.resolve(components::HERO_BANNER).adapt(&json!({}), &ctx).is_fallback);
}
