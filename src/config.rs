//! Configuration model: fields, rules, and the run configuration.
//!
//! A configuration is an ordered list of [`FieldDescriptor`]s. Each field
//! declares an ordered list of [`RuleSpec`]s that the compiler turns into
//! checking functions. The wire shape matches the declarative form:
//!
//! ```json
//! [
//!   { "id": "email", "type": "text", "rules": [
//!     { "type": "required", "message": "${id} is required" },
//!     { "type": "email", "message": "not a valid address" }
//!   ]}
//! ]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::EngineError;
use crate::precheck;
use crate::report::FieldReport;

// ============================================================================
// RULE SPEC
// ============================================================================

/// One declared validation rule: a rule name, a message template, and any
/// rule-specific parameters (e.g. `length` for `minlength`, `value` for
/// `max`).
///
/// Parameters beyond `type` and `message` are captured openly, so a rule
/// entry like `{ "type": "minlength", "message": "...", "length": 5 }`
/// round-trips without a dedicated struct per rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Rule name; must match a registry entry to take effect.
    #[serde(rename = "type")]
    pub name: String,
    /// Message template. Supports `${word}` and `{word}` placeholders.
    pub message: String,
    /// Rule-specific parameters.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl RuleSpec {
    /// Creates a rule with no extra parameters.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            params: Map::new(),
        }
    }

    /// Adds a rule-specific parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Looks up a parameter by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Looks up a parameter and coerces it to `f64`.
    ///
    /// Accepts JSON numbers and numeric strings; anything else is `None`.
    #[must_use]
    pub fn param_f64(&self, key: &str) -> Option<f64> {
        match self.params.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// Configuration unit describing one validated input.
///
/// The identity key is `id`; it is assumed unique across the configuration
/// but not enforced (duplicates mask later fields, see the dispatcher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Identity key, matched by the dispatcher.
    pub id: String,
    /// Input kind ("text", "checkbox", ...). Carried through to reports;
    /// the engine itself does not interpret it.
    #[serde(rename = "type")]
    pub kind: String,
    /// Ordered rule list. Must be non-empty.
    pub rules: Vec<RuleSpec>,
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        rules: impl IntoIterator<Item = RuleSpec>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            rules: rules.into_iter().collect(),
        }
    }

    /// The descriptor minus its rules, as echoed in reports.
    #[must_use]
    pub fn source(&self) -> FieldSource {
        FieldSource {
            id: self.id.clone(),
            kind: self.kind.clone(),
        }
    }
}

/// A field descriptor with the `rules` key stripped; the `source` slot of a
/// [`FieldReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// ============================================================================
// FORM CONFIG
// ============================================================================

/// Callback invoked with the first failing field's report.
pub type ErrorCallback = Box<dyn Fn(&FieldReport)>;

/// A full validation run configuration: the ordered field list plus an
/// optional error callback.
///
/// The callback is invoked at most once per run, with the first field report
/// (in declaration order) whose status is errors.
pub struct FormConfig {
    pub fields: Vec<FieldDescriptor>,
    pub(crate) callback: Option<ErrorCallback>,
}

impl FormConfig {
    /// Creates a configuration without a callback.
    pub fn new(fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            callback: None,
        }
    }

    /// Attaches the error callback.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_callback(mut self, callback: impl Fn(&FieldReport) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Deserializes a field list from raw JSON, validating its shape first.
    ///
    /// The shape pass checks, per element: required keys `id`, `type`,
    /// `rules`; `rules` is an array; `rules` is non-empty; each rule carries
    /// `type` and `message`. The first offending element aborts with the
    /// comma-joined list of everything wrong with it.
    ///
    /// # Errors
    ///
    /// [`EngineError::Precondition`] on a shape failure,
    /// [`EngineError::Parse`] if deserialization fails afterwards.
    pub fn fields_from_json(raw: &Value) -> Result<Vec<FieldDescriptor>, EngineError> {
        precheck::check_raw_fields(raw)?;
        let fields = serde_json::from_value(raw.clone())?;
        Ok(fields)
    }
}

impl fmt::Debug for FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("fields", &self.fields)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
