//! Assertion entry points.
//!
//! [`compare_for_test`] is the plain comparison call. [`same_bean_as`] and
//! [`assert_that`] wrap it as a matcher that turns a divergent result into a
//! [`ComparisonFailure`] carrying both sides as pretty-printed canonical JSON.
//!
//! ```
//! use samebean_core::matcher::{assert_that, same_bean_as};
//! use samebean_core::model::Obj;
//!
//! let expected = Obj::composite("Person").with_field("name", "Ada");
//! let actual = Obj::composite("Person").with_field("name", "Ada");
//! assert!(assert_that(&actual, &same_bean_as(&expected)).is_ok());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::canonical::{encode_with_stats, CanonicalTree};
use crate::config::{Configuration, SkipPredicate};
use crate::diff::{compare, render_human_summary, DiffResult};
use crate::errors::ComparisonFailure;
use crate::model::{ToValue, Value};
use crate::{log_op_end, log_op_error, log_op_start};

struct Comparison {
    expected: CanonicalTree,
    actual: CanonicalTree,
    result: DiffResult,
}

fn run(op: &str, expected: &Value, actual: &Value, config: &Configuration) -> Comparison {
    let start = Instant::now();
    log_op_start!(op);

    let (expected_tree, expected_stats) = encode_with_stats(expected, config);
    let (actual_tree, actual_stats) = encode_with_stats(actual, config);
    let result = compare(&expected_tree, &actual_tree, config.max_divergences());

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        equal = result.is_equal(),
        divergences = result.divergences().len() as u64,
        cycles = (expected_stats.cycles + actual_stats.cycles) as u64
    );

    Comparison {
        expected: expected_tree,
        actual: actual_tree,
        result,
    }
}

/// Compare two value graphs under `config`.
///
/// Never fails and never recurses natively, whatever the shape of either
/// graph.
pub fn compare_for_test(expected: &Value, actual: &Value, config: &Configuration) -> DiffResult {
    run("compare_for_test", expected, actual, config).result
}

/// Matcher for structural equivalence against a fixed expected value.
#[derive(Clone)]
pub struct SameBeanMatcher {
    expected: Value,
    config: Configuration,
    extra_skips: Vec<SkipPredicate>,
}

impl fmt::Debug for SameBeanMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SameBeanMatcher")
            .field("expected", &self.expected)
            .field("config", &self.config)
            .field("extra_skips", &self.extra_skips.len())
            .finish()
    }
}

/// Build a matcher that accepts values structurally equivalent to `expected`.
pub fn same_bean_as<T: ToValue + ?Sized>(expected: &T) -> SameBeanMatcher {
    SameBeanMatcher {
        expected: expected.to_value(),
        config: Configuration::default(),
        extra_skips: Vec::new(),
    }
}

impl SameBeanMatcher {
    /// Exempt nodes matching `predicate` from cycle tracking.
    ///
    /// Applies on top of whatever configuration the matcher uses, regardless
    /// of call order with [`SameBeanMatcher::with_configuration`].
    pub fn skip_circular_reference_check<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.extra_skips.push(Arc::new(predicate));
        self
    }

    /// Use `config` for adapters, skips and the divergence cap.
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }

    /// The configuration comparisons actually run with.
    pub fn effective_configuration(&self) -> Configuration {
        self.extra_skips
            .iter()
            .fold(self.config.clone(), |config, skip| config.with_skip(skip.clone()))
    }

    fn evaluate(&self, op: &str, actual: &Value) -> Comparison {
        run(op, &self.expected, actual, &self.effective_configuration())
    }

    pub fn matches<T: ToValue + ?Sized>(&self, actual: &T) -> bool {
        self.evaluate("matches", &actual.to_value()).result.is_equal()
    }

    /// Human-readable account of how `actual` differs from the expected value.
    pub fn describe_mismatch<T: ToValue + ?Sized>(&self, actual: &T) -> String {
        render_human_summary(&self.evaluate("describe_mismatch", &actual.to_value()).result)
    }
}

/// Assert that `actual` satisfies `matcher`.
///
/// # Errors
///
/// Returns a [`ComparisonFailure`] when the values diverge. Its `expected`
/// and `actual` strings are the full canonical trees as pretty JSON, prefixed
/// with the root type name for composite roots.
pub fn assert_that<T: ToValue + ?Sized>(
    actual: &T,
    matcher: &SameBeanMatcher,
) -> Result<(), ComparisonFailure> {
    let start = Instant::now();
    let comparison = matcher.evaluate("assert_that", &actual.to_value());
    if comparison.result.is_equal() {
        return Ok(());
    }

    let failure = ComparisonFailure {
        message: format!(
            "Expected values to be structurally equivalent, but found {}",
            render_human_summary(&comparison.result)
        ),
        expected: comparison.expected.render_labelled(),
        actual: comparison.actual.render_labelled(),
    };
    log_op_error!(
        "assert_that",
        failure.clone(),
        duration_ms = start.elapsed().as_millis() as u64
    );
    Err(failure)
}
