//! The per-field outcome records surfaced to callers.
//!
//! Serialized shapes reproduce the declarative wire format:
//!
//! ```json
//! {
//!   "source": { "id": "u", "type": "text" },
//!   "rules": [{ "type": "required", "message": "${id} required" }],
//!   "status": "errors",
//!   "errorMessage": [{ "type": "required", "message": "u required" }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::{FieldDescriptor, FieldSource, RuleSpec};

// ============================================================================
// CHECK RESULT
// ============================================================================

/// One failed rule: the rule name and its rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    /// Name of the rule that failed.
    #[serde(rename = "type")]
    pub rule: String,
    /// Message after template substitution.
    pub message: String,
}

impl RuleFailure {
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// The ordered failures from one field's checking function; empty means the
/// field passed every compiled rule. Fields rarely fail more than a couple
/// of rules at once, hence the inline capacity.
pub type CheckResult = SmallVec<[RuleFailure; 2]>;

// ============================================================================
// FIELD REPORT
// ============================================================================

/// Pass/fail classification of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Success,
    Errors,
}

/// The per-field outcome record.
///
/// `source` is the field descriptor minus its rules; `rules` always echoes
/// the originally declared rule list, independent of which rules compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub source: FieldSource,
    pub rules: Vec<RuleSpec>,
    pub status: FieldStatus,
    #[serde(rename = "errorMessage")]
    pub error_message: CheckResult,
}

impl FieldReport {
    /// Classifies a check result into a report for the given field.
    #[must_use]
    pub fn classify(field: &FieldDescriptor, result: CheckResult) -> Self {
        let status = if result.is_empty() {
            FieldStatus::Success
        } else {
            FieldStatus::Errors
        };
        Self {
            source: field.source(),
            rules: field.rules.clone(),
            status,
            error_message: result,
        }
    }

    /// True if the field failed at least one rule.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.status == FieldStatus::Errors
    }
}

// ============================================================================
// RUN REPORT
// ============================================================================

/// The aggregated outcome of a full run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// True iff no field report has status errors.
    pub passed: bool,
    /// One report per configured field, in declaration order.
    pub fields: Vec<FieldReport>,
}

impl RunReport {
    pub(crate) fn new(fields: Vec<FieldReport>) -> Self {
        let passed = fields.iter().all(|report| !report.has_errors());
        Self { passed, fields }
    }

    /// The first failing field's report, in declaration order.
    #[must_use]
    pub fn first_failure(&self) -> Option<&FieldReport> {
        self.fields.iter().find(|report| report.has_errors())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSpec;
    use serde_json::json;
    use smallvec::smallvec;

    fn field() -> FieldDescriptor {
        FieldDescriptor::new("u", "text", [RuleSpec::new("required", "${id} required")])
    }

    #[test]
    fn empty_result_classifies_as_success() {
        let report = FieldReport::classify(&field(), CheckResult::new());
        assert_eq!(report.status, FieldStatus::Success);
        assert!(!report.has_errors());
        assert!(report.error_message.is_empty());
    }

    #[test]
    fn non_empty_result_classifies_as_errors() {
        let result: CheckResult = smallvec![RuleFailure::new("required", "u required")];
        let report = FieldReport::classify(&field(), result);
        assert!(report.has_errors());
    }

    #[test]
    fn report_serializes_to_wire_shape() {
        let result: CheckResult = smallvec![RuleFailure::new("required", "u required")];
        let report = FieldReport::classify(&field(), result);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "source": { "id": "u", "type": "text" },
                "rules": [{ "type": "required", "message": "${id} required" }],
                "status": "errors",
                "errorMessage": [{ "type": "required", "message": "u required" }]
            })
        );
    }

    #[test]
    fn run_report_finds_first_failure() {
        let ok = FieldReport::classify(&field(), CheckResult::new());
        let failed = FieldReport::classify(
            &field(),
            smallvec![RuleFailure::new("required", "u required")],
        );
        let run = RunReport::new(vec![ok.clone(), failed.clone(), failed.clone()]);

        assert!(!run.passed);
        assert_eq!(run.first_failure(), Some(&run.fields[1]));

        let run = RunReport::new(vec![ok.clone(), ok]);
        assert!(run.passed);
        assert_eq!(run.first_failure(), None);
    }
}
