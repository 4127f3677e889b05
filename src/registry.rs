//! The rule registry: the authoritative mapping from rule name to predicate.
//!
//! Adding a rule means adding one registry entry; the compiler, dispatcher,
//! and engine need no changes. Every predicate receives the resolved field
//! value, the declared rule (for its parameters), and the full field set
//! (for rules that need cross-field context).
//!
//! Built-in semantics use strict comparisons throughout: `maxlength` demands
//! the length be strictly *less* than the bound, `minlength` strictly
//! *greater*, and likewise `max`/`min` on numeric values.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{FieldDescriptor, RuleSpec};
use crate::value::FieldValue;

/// Predicate signature: resolved value, declared rule, full field set.
pub type RuleFn = fn(&FieldValue, &RuleSpec, &[FieldDescriptor]) -> bool;

// ============================================================================
// PATTERNS
// ============================================================================

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("digits pattern is valid"));

/// Signed decimal with optional thousands separators: `-1,234.56`.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:-?\d+|-?\d{1,3}(?:,\d{3})+)?(?:\.\d+)?$").expect("number pattern is valid")
});

// ============================================================================
// BUILT-IN PREDICATES
// ============================================================================

fn required(value: &FieldValue, _rule: &RuleSpec, _fields: &[FieldDescriptor]) -> bool {
    !value.is_empty()
}

fn maxlength(value: &FieldValue, rule: &RuleSpec, _fields: &[FieldDescriptor]) -> bool {
    rule.param_f64("length")
        .is_some_and(|max| (value.len() as f64) < max)
}

fn minlength(value: &FieldValue, rule: &RuleSpec, _fields: &[FieldDescriptor]) -> bool {
    rule.param_f64("length")
        .is_some_and(|min| (value.len() as f64) > min)
}

fn email(value: &FieldValue, _rule: &RuleSpec, _fields: &[FieldDescriptor]) -> bool {
    EMAIL_RE.is_match(&value.as_text())
}

fn max(value: &FieldValue, rule: &RuleSpec, _fields: &[FieldDescriptor]) -> bool {
    let Some(bound) = rule.param_f64("value") else {
        return false;
    };
    value
        .as_text()
        .trim()
        .parse::<f64>()
        .is_ok_and(|parsed| parsed < bound)
}

fn min(value: &FieldValue, rule: &RuleSpec, _fields: &[FieldDescriptor]) -> bool {
    let Some(bound) = rule.param_f64("value") else {
        return false;
    };
    value
        .as_text()
        .trim()
        .parse::<f64>()
        .is_ok_and(|parsed| parsed > bound)
}

fn digits(value: &FieldValue, _rule: &RuleSpec, _fields: &[FieldDescriptor]) -> bool {
    DIGITS_RE.is_match(&value.as_text())
}

fn number(value: &FieldValue, _rule: &RuleSpec, _fields: &[FieldDescriptor]) -> bool {
    NUMBER_RE.is_match(&value.as_text())
}

// ============================================================================
// REGISTRY
// ============================================================================

/// One registered rule: its predicate and a fallback message template, used
/// when a programmatically built rule carries no message of its own.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    pub check: RuleFn,
    pub template: Cow<'static, str>,
}

impl RuleEntry {
    pub fn new(check: RuleFn, template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            check,
            template: template.into(),
        }
    }
}

/// The named set of recognized rules.
///
/// Immutable during a run; the engine holds one registry across runs.
///
/// # Examples
///
/// ```
/// use formcheck::registry::{Registry, RuleEntry};
///
/// let mut registry = Registry::builtin();
/// registry.register("even_length", RuleEntry::new(
///     |value, _rule, _fields| value.len() % 2 == 0,
///     "${id} must have even length",
/// ));
/// assert!(registry.contains("even_length"));
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    entries: HashMap<String, RuleEntry>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The registry with all eight built-in rules.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("required", RuleEntry::new(required, "${id} is required"));
        registry.register(
            "maxlength",
            RuleEntry::new(maxlength, "${id} must be shorter than {length}"),
        );
        registry.register(
            "minlength",
            RuleEntry::new(minlength, "${id} must be longer than {length}"),
        );
        registry.register(
            "email",
            RuleEntry::new(email, "${id} must be a valid email address"),
        );
        registry.register("max", RuleEntry::new(max, "${id} must be less than {value}"));
        registry.register(
            "min",
            RuleEntry::new(min, "${id} must be greater than {value}"),
        );
        registry.register(
            "digits",
            RuleEntry::new(digits, "${id} must contain only digits"),
        );
        registry.register("number", RuleEntry::new(number, "${id} must be a number"));
        registry
    }

    /// Registers (or replaces) a rule.
    pub fn register(&mut self, name: impl Into<String>, entry: RuleEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RuleEntry> {
        self.entries.get(name)
    }

    /// True if the rule name is recognized.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// TESTS
// ============================================================================
