//! The pre-condition pass: validating the configuration's own shape before
//! any business validation runs.
//!
//! Two passes share the same machinery ([`Suite`]): a raw pass over
//! undecoded JSON (can detect genuinely missing keys) and a typed pass over
//! decoded descriptors (the missing-key analogue is emptiness). Both collect
//! every failed check for the offending field, join the messages with
//! commas, and abort the run — a failure here is a configuration defect,
//! never a per-field validation result.

use serde_json::Value;
use tracing::debug;

use crate::combinators::{Suite, complement};
use crate::config::{FieldDescriptor, RuleSpec};
use crate::engine::EngineError;

// ============================================================================
// RAW SHAPE PASS
// ============================================================================

fn raw_field_suite() -> Suite<Value> {
    Suite::new()
        .check("missing required key 'id'", |v: &Value| {
            v.get("id").is_some()
        })
        .check("missing required key 'type'", |v: &Value| {
            v.get("type").is_some()
        })
        .check("missing required key 'rules'", |v: &Value| {
            v.get("rules").is_some()
        })
        .check("rules must be an array", |v: &Value| {
            v.get("rules").is_none_or(Value::is_array)
        })
        .check("rules must not be empty", |v: &Value| {
            // A missing or non-array rules key is someone else's failure.
            v.get("rules")
                .and_then(Value::as_array)
                .is_none_or(|rules| !rules.is_empty())
        })
}

fn raw_rule_suite() -> Suite<Value> {
    Suite::new()
        .check("rule missing required key 'type'", |v: &Value| {
            v.get("type").is_some()
        })
        .check("rule missing required key 'message'", |v: &Value| {
            v.get("message").is_some()
        })
}

/// Validates the shape of a raw JSON field list.
///
/// Per element, in declaration order: required keys present, `rules` an
/// array, `rules` non-empty, then each rule's required keys. The first
/// offending element aborts with all of its failures comma-joined.
///
/// # Errors
///
/// [`EngineError::Precondition`] naming the offending field (its `id` when
/// present, otherwise its index).
pub fn check_raw_fields(raw: &Value) -> Result<(), EngineError> {
    let Some(elements) = raw.as_array() else {
        return Err(EngineError::Precondition {
            field_id: "<config>".to_string(),
            detail: "configuration must be an array of fields".to_string(),
        });
    };

    let field_suite = raw_field_suite();
    let rule_suite = raw_rule_suite();

    for (index, element) in elements.iter().enumerate() {
        let field_id = element
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(|| format!("#{index}"), str::to_string);

        let failures = field_suite.failures(element);
        if !failures.is_empty() {
            debug!(field = %field_id, "configuration shape check failed");
            return Err(EngineError::Precondition {
                field_id,
                detail: failures.join(", "),
            });
        }

        // The shape checks above guarantee a non-empty rules array.
        let rules = element.get("rules").and_then(Value::as_array);
        for rule in rules.into_iter().flatten() {
            let failures = rule_suite.failures(rule);
            if !failures.is_empty() {
                debug!(field = %field_id, "rule shape check failed");
                return Err(EngineError::Precondition {
                    field_id,
                    detail: failures.join(", "),
                });
            }
        }
    }

    Ok(())
}

// ============================================================================
// TYPED INVARIANT PASS
// ============================================================================

fn typed_field_suite() -> Suite<FieldDescriptor> {
    Suite::new()
        .check("field id must not be empty", |f: &FieldDescriptor| {
            !f.id.is_empty()
        })
        .check("field type must not be empty", |f: &FieldDescriptor| {
            !f.kind.is_empty()
        })
        .check(
            "rules must not be empty",
            complement(|f: &FieldDescriptor| f.rules.is_empty()),
        )
}

fn typed_rule_suite() -> Suite<RuleSpec> {
    Suite::new()
        .check("rule type must not be empty", |r: &RuleSpec| {
            !r.name.is_empty()
        })
        .check("rule message must not be empty", |r: &RuleSpec| {
            !r.message.is_empty()
        })
}

/// Validates decoded field descriptors before compilation.
///
/// Same aggregation and abort semantics as the raw pass.
///
/// # Errors
///
/// [`EngineError::Precondition`] for the first offending field or rule.
pub fn check_fields(fields: &[FieldDescriptor]) -> Result<(), EngineError> {
    let field_suite = typed_field_suite();
    let rule_suite = typed_rule_suite();

    for (index, field) in fields.iter().enumerate() {
        let field_id = if field.id.is_empty() {
            format!("#{index}")
        } else {
            field.id.clone()
        };

        let failures = field_suite.failures(field);
        if !failures.is_empty() {
            debug!(field = %field_id, "field invariant check failed");
            return Err(EngineError::Precondition {
                field_id,
                detail: failures.join(", "),
            });
        }

        for rule in &field.rules {
            let failures = rule_suite.failures(rule);
            if !failures.is_empty() {
                debug!(field = %field_id, rule = %rule.name, "rule invariant check failed");
                return Err(EngineError::Precondition {
                    field_id,
                    detail: failures.join(", "),
                });
            }
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
