//! Configuration validator: required fields, defaults, and the merge rule.
//!
//! DESIGN
//! ======
//! Validation is advisory at render time and blocking at write time: the
//! edit context runs [`validate`] before persisting a new or replaced
//! configuration, while the composer never consults it. Nothing here performs I/O or fails.

use serde::Serialize;

use crate::models::ComponentDefinition;

/// Outcome of checking a configuration against a definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { valid: errors.is_empty(), errors }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.errors.join("; "))
    }
}

/// Check `config` against the definition's required fields.
///
/// A field is missing when absent, `null`, or an empty string. One error per
/// missing field, in declaration order.
#[must_use]
pub fn validate(config: &serde_json::Value, definition: &ComponentDefinition) -> ValidationReport {
    let errors = definition
        .required_fields
        .iter()
        .filter(|field| is_missing(config.get(field.as_str())))
        .map(|field| format!("Required field '{field}' is missing"))
        .collect();
    ValidationReport::from_errors(errors)
}

fn is_missing(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Copy of the definition's stored defaults.
///
/// May itself fail [`validate`] when a required field has no sensible
/// default; callers supplement it before persisting.
#[must_use]
pub fn default_config(definition: &ComponentDefinition) -> serde_json::Value {
    definition.default_config.clone()
}

/// Shallow merge: top-level keys of `overrides` replace those in `defaults`.
///
/// A non-object on either side is treated as empty, so a corrupt stored blob
/// never discards the other side.
#[must_use]
pub fn merge_config(defaults: &serde_json::Value, overrides: &serde_json::Value) -> serde_json::Value {
    let mut merged = defaults.as_object().cloned().unwrap_or_default();
    if let Some(overrides) = overrides.as_object() {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    serde_json::Value::Object(merged)
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
