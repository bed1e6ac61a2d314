use super::*;
use crate::test_helpers;
use serde_json::json;

fn cta_definition() -> ComponentDefinition {
    let mut def = test_helpers::definition("cta_section", json!({"ctaText": "Book a flight"}), false);
    def.required_fields = vec!["headline".into(), "ctaLink".into()];
    def
}

#[test]
fn validate_reports_each_missing_field() {
    let report = validate(&json!({"headline": "Hi"}), &cta_definition());
    assert_eq!(
        report,
        ValidationReport { valid: false, errors: vec!["Required field 'ctaLink' is missing".to_string()] }
    );
}

#[test]
fn validate_accepts_complete_config() {
    let report = validate(&json!({"headline": "Hi", "ctaLink": "/go"}), &cta_definition());
    assert_eq!(report, ValidationReport { valid: true, errors: vec![] });
}

#[test]
fn validate_treats_null_and_empty_string_as_missing() {
    let report = validate(&json!({"headline": null, "ctaLink": ""}), &cta_definition());
    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec![
            "Required field 'headline' is missing".to_string(),
            "Required field 'ctaLink' is missing".to_string(),
        ]
    );
}

#[test]
fn validate_accepts_non_string_values() {
    let mut def = test_helpers::definition("feature_grid", json!({}), false);
    def.required_fields = vec!["columns".into(), "items".into()];
    let report = validate(&json!({"columns": 0, "items": []}), &def);
    assert!(report.valid);
}

#[test]
fn validate_handles_non_object_config() {
    let report = validate(&json!("not an object"), &cta_definition());
    assert_eq!(report.errors.len(), 2);
}

#[test]
fn definition_without_required_fields_is_always_valid() {
    let def = test_helpers::definition("text_block", json!({}), false);
    assert!(validate(&json!({}), &def).valid);
}

#[test]
fn default_config_returns_stored_defaults() {
    let def = cta_definition();
    assert_eq!(default_config(&def), json!({"ctaText": "Book a flight"}));
    // Defaults alone need not satisfy required fields.
    assert!(!validate(&default_config(&def), &def).valid);
}

#[test]
fn merge_config_instance_wins_on_collision() {
    let merged = merge_config(&json!({"a": 1, "b": 2}), &json!({"b": 3, "c": 4}));
    assert_eq!(merged, json!({"a": 1, "b": 3, "c": 4}));
}

#[test]
fn merge_config_is_shallow() {
    let merged = merge_config(&json!({"style": {"color": "red", "size": 2}}), &json!({"style": {"color": "blue"}}));
    assert_eq!(merged, json!({"style": {"color": "blue"}}));
}

#[test]
fn merge_config_ignores_non_object_sides() {
    assert_eq!(merge_config(&json!(null), &json!({"a": 1})), json!({"a": 1}));
    assert_eq!(merge_config(&json!({"a": 1}), &json!([1, 2])), json!({"a": 1}));
}

#[test]
fn report_display_joins_errors() {
    let report = validate(&json!({}), &cta_definition());
    assert_eq!(
        report.to_string(),
        "Required field 'headline' is missing; Required field 'ctaLink' is missing"
    );
}
