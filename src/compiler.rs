//! The validator compiler: declared rules in, checking functions out.
//!
//! For every field, each declared rule whose name is registered becomes a
//! [`CompiledPredicate`] — a closure bound to the registry predicate, a
//! clone of the rule (its parameters), and the full field set, with the
//! report message rendered eagerly by template substitution. A field's
//! predicates bundle into one [`FieldChecker`] that runs them all and
//! collects every failure.
//!
//! Rules with unrecognized names are skipped silently: they never compile
//! and never report. A field whose rules are all unrecognized passes
//! trivially.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{FieldDescriptor, RuleSpec};
use crate::registry::Registry;
use crate::report::{CheckResult, RuleFailure};
use crate::value::FieldValue;

// ============================================================================
// MESSAGE TEMPLATING
// ============================================================================

/// Matches `${word}` and `{word}` placeholders alike.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\{(\w+)\}").expect("placeholder pattern is valid"));

/// Renders a message template for a field/rule pair.
///
/// `id` resolves to the field's own id; any other word resolves to the
/// matching parameter on the rule. A placeholder with no matching, non-null
/// parameter stays in the text untouched.
#[must_use]
pub fn render_message(template: &str, field: &FieldDescriptor, rule: &RuleSpec) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let word = &caps[1];
            if word == "id" {
                return field.id.clone();
            }
            match rule.param(word) {
                Some(value) if !value.is_null() => render_param(value),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn render_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// COMPILED PREDICATE
// ============================================================================

/// A declared rule turned into an executable, message-bound check.
///
/// The closure carries everything the registry predicate needs: the rule's
/// parameters and the full field set. The message is final — substitution
/// already happened at compile time.
pub struct CompiledPredicate {
    rule_name: String,
    message: String,
    test: Box<dyn Fn(&FieldValue) -> bool>,
}

impl CompiledPredicate {
    /// The rule name this predicate was compiled from.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// The rendered report message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Runs the check against a resolved value.
    pub fn test(&self, value: &FieldValue) -> bool {
        (self.test)(value)
    }
}

impl fmt::Debug for CompiledPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPredicate")
            .field("rule_name", &self.rule_name)
            .field("message", &self.message)
            .field("test", &"<fn>")
            .finish()
    }
}

// ============================================================================
// FIELD CHECKER
// ============================================================================

/// One field's checking function: its compiled predicates in declaration
/// order.
#[derive(Debug)]
pub struct FieldChecker {
    field_id: String,
    predicates: Vec<CompiledPredicate>,
}

impl FieldChecker {
    /// The id of the field this checker recognizes.
    #[must_use]
    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// The compiled predicates, in declaration order.
    #[must_use]
    pub fn predicates(&self) -> &[CompiledPredicate] {
        &self.predicates
    }

    /// Runs every predicate against the value, collecting all failures.
    ///
    /// Failures never short-circuit: a field reports everything wrong with
    /// its value at once. An empty result is a full pass.
    pub fn check(&self, value: &FieldValue) -> CheckResult {
        let mut failures = CheckResult::new();
        for predicate in &self.predicates {
            let passed = predicate.test(value);
            trace!(
                field = %self.field_id,
                rule = %predicate.rule_name(),
                passed,
                "predicate evaluated"
            );
            if !passed {
                failures.push(RuleFailure::new(
                    predicate.rule_name(),
                    predicate.message(),
                ));
            }
        }
        failures
    }
}

// ============================================================================
// COMPILE
// ============================================================================

/// Compiles one field's declared rules into its checking function.
///
/// Unrecognized rule names are dropped without error. The rule's own message
/// is the template; a rule with an empty message falls back to the registry
/// entry's default template.
#[must_use]
pub fn compile(
    field: &FieldDescriptor,
    all_fields: &Arc<[FieldDescriptor]>,
    registry: &Registry,
) -> FieldChecker {
    let mut predicates = Vec::with_capacity(field.rules.len());

    for rule in &field.rules {
        let Some(entry) = registry.get(&rule.name) else {
            debug!(field = %field.id, rule = %rule.name, "skipping unrecognized rule");
            continue;
        };

        let template = if rule.message.is_empty() {
            entry.template.as_ref()
        } else {
            &rule.message
        };
        let message = render_message(template, field, rule);

        let check = entry.check;
        let bound_rule = rule.clone();
        let bound_fields = Arc::clone(all_fields);
        predicates.push(CompiledPredicate {
            rule_name: rule.name.clone(),
            message,
            test: Box::new(move |value| check(value, &bound_rule, &bound_fields)),
        });
    }

    debug!(
        field = %field.id,
        declared = field.rules.len(),
        compiled = predicates.len(),
        "compiled field checker"
    );

    FieldChecker {
        field_id: field.id.clone(),
        predicates,
    }
}

// ============================================================================
// TESTS
// ============================================================================
