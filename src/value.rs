//! Value resolution: how the engine obtains a field's current value.
//!
//! The engine never touches a host environment directly. Everything it knows
//! about live values comes through [`ValueProvider`], so the core runs
//! identically against a browser bridge, a parsed request body, or the
//! bundled in-memory [`StaticValues`].
//!
//! A DOM-backed implementation is expected to map its environment onto
//! [`FieldValue`] like so: a single input element resolves to its value
//! attribute as [`FieldValue::Text`]; a select element resolves to its
//! selected value (empty text when nothing is chosen); a radio/checkbox
//! group resolves to the checked values as [`FieldValue::Multi`], with an
//! empty vec (not an error) when nothing is checked.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::config::FieldDescriptor;

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A resolved field value: single text or a multi-value collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single value (text inputs, selects, textareas).
    Text(String),
    /// A collection of values (checkbox or radio groups).
    Multi(Vec<String>),
}

impl FieldValue {
    /// An empty single value.
    #[must_use]
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// Length as validation rules see it: character count for text,
    /// element count for multi-values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Text(s) => s.chars().count(),
            FieldValue::Multi(values) => values.len(),
        }
    }

    /// True if there is nothing to validate against.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text rendering used by pattern and numeric rules.
    ///
    /// Multi-values join with `,`, the same coercion the original host
    /// environment applied to value collections.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Multi(values) => Cow::Owned(values.join(",")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multi(values)
    }
}

// ============================================================================
// VALUE PROVIDER
// ============================================================================

/// Resolves a field descriptor to its current value.
///
/// Implementations must be infallible: "no matching value" is a valid empty
/// value, never an error. Resolution must not mutate anything the engine can
/// observe; a run is deterministic for a fixed provider state.
pub trait ValueProvider {
    /// Returns the field's current value.
    fn resolve(&self, field: &FieldDescriptor) -> FieldValue;
}

/// In-memory provider keyed by field id.
///
/// Fields with no entry resolve to empty text, mirroring a host environment
/// with no matching element.
///
/// # Examples
///
/// ```
/// use formcheck::value::{FieldValue, StaticValues, ValueProvider};
/// use formcheck::config::FieldDescriptor;
///
/// let provider = StaticValues::new()
///     .with("email", "a@example.com")
///     .with("tags", vec!["red".to_string(), "blue".to_string()]);
///
/// let field = FieldDescriptor::new("email", "text", []);
/// assert_eq!(provider.resolve(&field), FieldValue::Text("a@example.com".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticValues {
    values: HashMap<String, FieldValue>,
}

impl StaticValues {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value for a field id.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(id.into(), value.into());
        self
    }

    /// Inserts or replaces a value for a field id.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(id.into(), value.into());
    }
}

impl ValueProvider for StaticValues {
    fn resolve(&self, field: &FieldDescriptor) -> FieldValue {
        self.values
            .get(&field.id)
            .cloned()
            .unwrap_or_else(FieldValue::empty)
    }
}

// ============================================================================
// TESTS
// ============================================================================
