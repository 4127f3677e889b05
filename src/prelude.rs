//! Prelude module for convenient imports.
//!
//! Provides a single `use formcheck::prelude::*;` import that brings in the
//! types needed for the common case: declare fields, provide values, run.
//!
//! # Examples
//!
//! ```rust
//! use formcheck::prelude::*;
//!
//! let config = FormConfig::new([FieldDescriptor::new(
//!     "email",
//!     "text",
//!     [RuleSpec::new("email", "${id} must be a valid address")],
//! )]);
//! let engine = Engine::new(StaticValues::new().with("email", "a@b.cc"));
//! assert!(engine.run(&config).unwrap());
//! ```

// ============================================================================
// CONFIGURATION: Fields, rules, run configuration
// ============================================================================

pub use crate::config::{ErrorCallback, FieldDescriptor, FieldSource, FormConfig, RuleSpec};

// ============================================================================
// ENGINE: Entry point and errors
// ============================================================================

pub use crate::engine::{Engine, EngineError};

// ============================================================================
// VALUES: Providers and the field value model
// ============================================================================

pub use crate::value::{FieldValue, StaticValues, ValueProvider};

// ============================================================================
// RULES: Registry and extension points
// ============================================================================

pub use crate::registry::{Registry, RuleEntry, RuleFn};

// ============================================================================
// REPORTS: Per-field and per-run outcomes
// ============================================================================

pub use crate::report::{CheckResult, FieldReport, FieldStatus, RuleFailure, RunReport};
