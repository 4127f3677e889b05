//! # formcheck
//!
//! A declarative form-validation engine: fields declare named rules with
//! message templates, the compiler turns them into checking pipelines, and
//! one synchronous run classifies every field into a pass/fail report.
//!
//! ## Quick Start
//!
//! ```rust
//! use formcheck::prelude::*;
//!
//! let config = FormConfig::new([
//!     FieldDescriptor::new("username", "text", [
//!         RuleSpec::new("required", "${id} is required"),
//!         RuleSpec::new("minlength", "at least {length} characters")
//!             .with_param("length", 3),
//!     ]),
//!     FieldDescriptor::new("email", "text", [
//!         RuleSpec::new("email", "not a valid address"),
//!     ]),
//! ])
//! .with_callback(|report| eprintln!("first failure: {}", report.source.id));
//!
//! let values = StaticValues::new()
//!     .with("username", "martha")
//!     .with("email", "martha@example.com");
//!
//! let engine = Engine::new(values);
//! assert!(engine.run(&config).unwrap());
//! ```
//!
//! ## Built-in Rules
//!
//! - **Presence**: `required`
//! - **Length**: `maxlength`, `minlength` (strict bounds, character counts)
//! - **Pattern**: `email`, `digits`, `number`
//! - **Numeric**: `max`, `min` (strict bounds)
//!
//! Custom rules plug in through [`Registry::register`](registry::Registry::register);
//! unknown rule names in a configuration are skipped at compile time.
//!
//! ## Pipeline
//!
//! [`Engine::run`](engine::Engine::run) is: pre-condition pass over the
//! configuration ([`precheck`]), per-field compilation ([`compiler`]),
//! id-keyed dispatch ([`dispatch`]), and classification into
//! [`FieldReport`](report::FieldReport)s. Configuration defects abort the
//! run with an [`EngineError`](engine::EngineError); rule failures are data,
//! not errors.

pub mod combinators;
pub mod compiler;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod precheck;
pub mod prelude;
pub mod registry;
pub mod report;
pub mod value;

pub use config::{FieldDescriptor, FormConfig, RuleSpec};
pub use engine::{Engine, EngineError};
pub use registry::Registry;
pub use report::{FieldReport, RunReport};
pub use value::{FieldValue, StaticValues, ValueProvider};
