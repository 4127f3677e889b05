//! Predicate combinators used to assemble checking pipelines.
//!
//! The building blocks here are deliberately small: a predicate decorated
//! with its failure message ([`Named`]), an all-collecting composition of
//! such predicates ([`Suite`]), and logical negation ([`complement`]). The
//! pre-condition pass and the field compiler are both built from them.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// NAMED PREDICATE
// ============================================================================

/// A boolean predicate bound to the message reported when it fails.
pub struct Named<T: ?Sized> {
    message: Cow<'static, str>,
    test: Box<dyn Fn(&T) -> bool>,
}

impl<T: ?Sized> Named<T> {
    /// Binds a predicate to its failure message.
    pub fn new(message: impl Into<Cow<'static, str>>, test: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            message: message.into(),
            test: Box::new(test),
        }
    }

    /// Runs the predicate.
    pub fn test(&self, subject: &T) -> bool {
        (self.test)(subject)
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<T: ?Sized> fmt::Debug for Named<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Named")
            .field("message", &self.message)
            .field("test", &"<fn>")
            .finish()
    }
}

/// Creates a [`Named`] predicate.
pub fn named<T: ?Sized>(
    message: impl Into<Cow<'static, str>>,
    test: impl Fn(&T) -> bool + 'static,
) -> Named<T> {
    Named::new(message, test)
}

// ============================================================================
// SUITE
// ============================================================================

/// An ordered set of named predicates run as one check.
///
/// Every predicate runs against the subject; failures never short-circuit
/// the rest. The result is the ordered list of failure messages, empty on a
/// full pass.
#[derive(Debug, Default)]
pub struct Suite<T: ?Sized> {
    checks: Vec<Named<T>>,
}

impl<T: ?Sized> Suite<T> {
    /// Creates an empty suite.
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Appends a check.
    #[must_use = "builder methods must be chained or built"]
    pub fn check(
        mut self,
        message: impl Into<Cow<'static, str>>,
        test: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        self.checks.push(Named::new(message, test));
        self
    }

    /// Runs every check, collecting the messages of those that failed.
    pub fn failures(&self, subject: &T) -> Vec<String> {
        self.checks
            .iter()
            .filter(|check| !check.test(subject))
            .map(|check| check.message().to_string())
            .collect()
    }

    /// True if the subject passes every check.
    pub fn passes(&self, subject: &T) -> bool {
        self.checks.iter().all(|check| check.test(subject))
    }
}

// ============================================================================
// NEGATION
// ============================================================================

/// Inverts a predicate.
///
/// # Examples
///
/// ```
/// use formcheck::combinators::complement;
///
/// let non_empty = complement(|s: &String| s.is_empty());
/// assert!(non_empty(&"x".to_string()));
/// assert!(!non_empty(&String::new()));
/// ```
pub fn complement<T: ?Sized>(
    pred: impl Fn(&T) -> bool + 'static,
) -> impl Fn(&T) -> bool + 'static {
    move |subject| !pred(subject)
}

// ============================================================================
// TESTS
// ============================================================================
