use super::*;

fn node(edit: Option<EditHandle>) -> RenderedNode {
    RenderedNode {
        instance_id: Uuid::nil(),
        instance_key: "hero".into(),
        component_key: "hero_banner".into(),
        class: node_class("hero_banner", None, false, false),
        hidden: false,
        is_fallback: false,
        edit,
        html: "<h1>Hi</h1>".into(),
    }
}

#[test]
fn node_class_includes_component_and_state() {
    assert_eq!(node_class("hero_banner", None, false, false), "sk-component sk-component--hero_banner");
    assert_eq!(
        node_class("hero_banner", Some("split"), true, false),
        "sk-component sk-component--hero_banner sk-component--variant-split sk-component--hidden"
    );
    assert_eq!(
        node_class("Old Widget!", None, false, true),
        "sk-component sk-component--old-widget- sk-component--unknown"
    );
}

#[test]
fn class_token_never_empty() {
    assert_eq!(class_token(""), "unnamed");
    assert_eq!(class_token("a b"), "a-b");
}

#[test]
fn escape_html_covers_markup_and_quotes() {
    assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
}

#[test]
fn safe_href_rejects_script_urls() {
    assert_eq!(safe_href("javascript:alert(1)"), "#");
    assert_eq!(safe_href(" /contact "), "/contact");
    assert_eq!(safe_href("https://example.com/?a=1&b=2"), "https://example.com/?a=1&amp;b=2");
    assert_eq!(safe_href("mailto:pilot@example.com"), "mailto:pilot@example.com");
}

#[test]
fn css_url_accepts_plain_urls_only() {
    assert_eq!(css_url(" /img/jet.jpg ").as_deref(), Some("/img/jet.jpg"));
    assert_eq!(css_url("https://cdn.example.com/a.jpg?w=1&h=2").as_deref(), Some("https://cdn.example.com/a.jpg?w=1&amp;h=2"));
    assert_eq!(css_url("x');position:fixed;top:0;left:0;width:100%;height:100%;z-index:9999;('"), None);
    assert_eq!(css_url("javascript:alert(1)"), None);
    assert_eq!(css_url("//evil.example.com/a.jpg"), None);
    assert_eq!(css_url("/img/a\\'b.jpg"), None);
    assert_eq!(css_url("/img/a\nb.jpg"), None);
}

#[test]
fn to_html_wraps_body_with_identity() {
    let html = node(None).to_html();
    assert_eq!(
        html,
        r#"<section class="sk-component sk-component--hero_banner" data-instance-key="hero" data-component="hero_banner"><h1>Hi</h1></section>"#
    );
}

#[test]
fn to_html_adds_edit_overlay_when_editable() {
    let html = node(Some(EditHandle { instance_id: Uuid::nil() })).to_html();
    assert!(html.contains(r#"data-edit-instance="00000000-0000-0000-0000-000000000000""#));
    assert!(html.contains(">Edit</button>"));
}
