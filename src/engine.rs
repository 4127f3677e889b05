//! The validation engine: the single entry point tying the pipeline
//! together.
//!
//! A run is fully synchronous and deterministic: pre-condition pass over
//! the configuration, one dispatcher build, then one dispatch per field in
//! declaration order. Field values come from a [`ValueProvider`], so the
//! engine never touches the host environment itself.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{FieldDescriptor, FormConfig};
use crate::dispatch::Dispatcher;
use crate::precheck;
use crate::registry::Registry;
use crate::report::{FieldReport, RunReport};
use crate::value::ValueProvider;

// ============================================================================
// ERRORS
// ============================================================================

/// Failure modes of a validation run.
///
/// These are configuration and plumbing defects. A field failing its rules
/// is not an error; it is the `false` outcome of a successful run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration failed the pre-condition pass. `detail` joins
    /// every check the offending field failed with commas.
    #[error("invalid configuration for field '{field_id}': {detail}")]
    Precondition { field_id: String, detail: String },

    /// No compiled checker matched a field id during dispatch.
    #[error("no checker matched field '{0}'")]
    UnmatchedField(String),

    /// The raw configuration did not deserialize.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// ENGINE
// ============================================================================

/// Validation engine generic over the source of field values.
///
/// # Examples
///
/// ```
/// use formcheck::config::{FieldDescriptor, FormConfig, RuleSpec};
/// use formcheck::engine::Engine;
/// use formcheck::value::StaticValues;
///
/// let config = FormConfig::new([FieldDescriptor::new(
///     "email",
///     "text",
///     [RuleSpec::new("required", "${id} is required")],
/// )]);
/// let engine = Engine::new(StaticValues::new().with("email", "a@b.cc"));
/// assert!(engine.run(&config).unwrap());
/// ```
pub struct Engine<P> {
    registry: Registry,
    provider: P,
}

impl<P: ValueProvider> Engine<P> {
    /// Creates an engine with the built-in rule registry.
    pub fn new(provider: P) -> Self {
        Self::with_registry(Registry::builtin(), provider)
    }

    /// Creates an engine with a caller-supplied registry.
    pub fn with_registry(registry: Registry, provider: P) -> Self {
        Self { registry, provider }
    }

    /// The rule registry in use.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs the configuration and reports the overall outcome.
    ///
    /// `true` means every field passed every compiled rule. On `false`, the
    /// configured callback (if any) has been invoked exactly once, with the
    /// report of the first failing field in declaration order.
    ///
    /// # Errors
    ///
    /// [`EngineError::Precondition`] if the configuration fails its shape
    /// checks; no field is validated in that case.
    pub fn run(&self, config: &FormConfig) -> Result<bool, EngineError> {
        Ok(self.execute(config)?.passed)
    }

    /// Runs the configuration and returns the full per-field report.
    ///
    /// Same pipeline and callback semantics as [`Engine::run`].
    ///
    /// # Errors
    ///
    /// See [`Engine::run`].
    pub fn run_report(&self, config: &FormConfig) -> Result<RunReport, EngineError> {
        self.execute(config)
    }

    #[instrument(skip_all, fields(fields = config.fields.len()))]
    fn execute(&self, config: &FormConfig) -> Result<RunReport, EngineError> {
        precheck::check_fields(&config.fields)?;

        let fields: Arc<[FieldDescriptor]> = config.fields.clone().into();
        let dispatcher = Dispatcher::build(&fields, &self.registry);

        let mut reports = Vec::with_capacity(fields.len());
        for field in fields.iter() {
            let value = self.provider.resolve(field);
            let result = dispatcher
                .dispatch(field, &value)
                .ok_or_else(|| EngineError::UnmatchedField(field.id.clone()))?;
            reports.push(FieldReport::classify(field, result));
        }

        let report = RunReport::new(reports);
        debug!(passed = report.passed, "validation run finished");

        if !report.passed {
            if let (Some(callback), Some(failure)) = (&config.callback, report.first_failure()) {
                callback(failure);
            }
        }

        Ok(report)
    }
}

// ============================================================================
// TESTS
// ============================================================================
