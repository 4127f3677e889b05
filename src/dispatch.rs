//! The dispatcher: routing a field's value to its compiled checker.
//!
//! Checkers are keyed by field id. Iteration/reporting order stays with the
//! configuration; routing itself is a map lookup. When two fields declare
//! the same id, the first declared checker wins and later ones are never
//! reachable — id uniqueness is assumed, not enforced.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::compiler::{self, FieldChecker};
use crate::config::FieldDescriptor;
use crate::registry::Registry;
use crate::report::CheckResult;
use crate::value::FieldValue;

/// Routes field values to their compiled checking functions.
#[derive(Debug)]
pub struct Dispatcher {
    checkers: HashMap<String, FieldChecker>,
}

impl Dispatcher {
    /// Compiles every field and indexes the checkers by field id.
    #[must_use]
    pub fn build(fields: &Arc<[FieldDescriptor]>, registry: &Registry) -> Self {
        let mut checkers = HashMap::with_capacity(fields.len());
        for field in fields.iter() {
            checkers
                .entry(field.id.clone())
                .or_insert_with(|| compiler::compile(field, fields, registry));
        }
        Self { checkers }
    }

    /// Runs the checker registered for the field's id against the value.
    ///
    /// `None` means no checker recognizes the id. For a field that exists in
    /// the configuration this signals an internal inconsistency; the caller
    /// must treat it as fatal, never as a pass.
    pub fn dispatch(&self, field: &FieldDescriptor, value: &FieldValue) -> Option<CheckResult> {
        let result = self
            .checkers
            .get(&field.id)
            .map(|checker| checker.check(value));
        trace!(field = %field.id, matched = result.is_some(), "dispatched");
        result
    }

    /// Number of routable field ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// True if nothing is routable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
