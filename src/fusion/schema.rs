//! Output-schema validation for fusion bundles.
//!
//! The checks run over the serialized JSON shape rather than the Rust types,
//! so downstream consumers validating the wire format and this crate agree on
//! what a well-formed bundle looks like. Validation is a boolean pass/fail
//! and never panics; the orchestrator decides whether a failure aborts.

use serde_json::Value;

use crate::fusion::FusionBundle;

const CORRELATION_STRING_FIELDS: &[&str] =
    &["correlationId", "ruleId", "hypothesis", "rationale"];
const CORRELATION_NUMBER_FIELDS: &[&str] = &["prior", "likelihood", "posterior"];
const CORRELATION_ARRAY_FIELDS: &[&str] =
    &["involvedEventIds", "involvedAnomalyIds", "bayesianEvidence"];

/// Validate a typed bundle by serializing it and checking the wire shape.
pub fn validate_bundle(bundle: &FusionBundle) -> bool {
    match serde_json::to_value(bundle) {
        Ok(value) => validate_bundle_value(&value),
        Err(_) => false,
    }
}

/// Validate an arbitrary JSON value against the bundle output schema.
pub fn validate_bundle_value(value: &Value) -> bool {
    let Some(bundle) = value.as_object() else {
        return false;
    };

    let Some(window) = bundle.get("window").and_then(Value::as_object) else {
        return false;
    };
    if !window.get("start").is_some_and(Value::is_string)
        || !window.get("end").is_some_and(Value::is_string)
        || !window.get("eventCount").is_some_and(Value::is_number)
        || !window.get("anomalyCount").is_some_and(Value::is_number)
    {
        return false;
    }

    let Some(correlations) = bundle.get("correlations").and_then(Value::as_array) else {
        return false;
    };

    correlations.iter().all(is_valid_correlation)
}

fn is_valid_correlation(value: &Value) -> bool {
    let Some(correlation) = value.as_object() else {
        return false;
    };
    CORRELATION_STRING_FIELDS
        .iter()
        .all(|field| correlation.get(*field).is_some_and(Value::is_string))
        && CORRELATION_NUMBER_FIELDS
            .iter()
            .all(|field| correlation.get(*field).is_some_and(Value::is_number))
        && CORRELATION_ARRAY_FIELDS
            .iter()
            .all(|field| correlation.get(*field).is_some_and(Value::is_array))
}
