//! Error types for arbitree property-based testing.

use std::fmt;
use thiserror::Error;

/// Main error type for arbitree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArbitreeError {
    /// A filtered generator rejected too many consecutive draws.
    #[error("Filter rejected {misses} consecutive values")]
    TooManyFilterMisses { misses: usize },

    /// A custom generator failed to produce a value.
    #[error("Generator failed: {reason}")]
    GeneratorFailed { reason: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type for arbitree operations.
pub type Result<T> = std::result::Result<T, ArbitreeError>;

/// A shrinking step in the failure progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// The counterexample value at this step.
    pub counterexample: String,
    /// The step number (0 = original, 1+ = shrink rounds).
    pub step: usize,
}

/// Outcome of a property test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Every tried input satisfied the property.
    Pass {
        tests_run: usize,
        /// True when the whole input space was enumerated.
        exhausted: bool,
    },

    /// Test failed with a counterexample.
    Fail {
        counterexample: String,
        original: String,
        tests_run: usize,
        shrinks_performed: usize,
        /// The shrinking progression showing how we reached the minimal counterexample.
        shrink_steps: Vec<ShrinkStep>,
    },

    /// Inputs could not be produced at all.
    Aborted { reason: String, tests_run: usize },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass {
                tests_run,
                exhausted,
            } => {
                if *exhausted {
                    write!(f, "  ✓ property passed {tests_run} tests (exhaustive).")
                } else {
                    write!(f, "  ✓ property passed {tests_run} tests.")
                }
            }
            TestResult::Fail {
                counterexample,
                original,
                tests_run,
                shrinks_performed,
                shrink_steps,
            } => {
                writeln!(
                    f,
                    "  ✗ property failed after {tests_run} tests and {shrinks_performed} shrinks."
                )?;

                if !shrink_steps.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "    Shrinking progression:")?;
                    for step in shrink_steps {
                        if step.step == 0 {
                            writeln!(f, "      │ Original: {}", step.counterexample)?;
                        } else {
                            writeln!(f, "      │ Step {}: {}", step.step, step.counterexample)?;
                        }
                    }
                    writeln!(f)?;
                } else {
                    writeln!(f, "    Original: {original}")?;
                }

                write!(f, "    Minimal counterexample: {counterexample}")
            }
            TestResult::Aborted { reason, tests_run } => {
                write!(f, "  ⚐ property aborted after {tests_run} tests: {reason}")
            }
        }
    }
}

impl From<ArbitreeError> for TestResult {
    fn from(error: ArbitreeError) -> Self {
        TestResult::Aborted {
            reason: error.to_string(),
            tests_run: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ArbitreeError::TooManyFilterMisses { misses: 10_000 };
        assert_eq!(error.to_string(), "Filter rejected 10000 consecutive values");
    }

    #[test]
    fn snapshot_failure_reporting() {
        let result = TestResult::Fail {
            counterexample: "\"aa\"".to_string(),
            original: "\"abca\"".to_string(),
            tests_run: 4,
            shrinks_performed: 2,
            shrink_steps: vec![
                ShrinkStep {
                    counterexample: "\"abca\"".to_string(),
                    step: 0,
                },
                ShrinkStep {
                    counterexample: "\"aca\"".to_string(),
                    step: 1,
                },
                ShrinkStep {
                    counterexample: "\"aa\"".to_string(),
                    step: 2,
                },
            ],
        };

        let expected = "  ✗ property failed after 4 tests and 2 shrinks.\n\
                        \n    Shrinking progression:\n\
                        \u{20}     │ Original: \"abca\"\n\
                        \u{20}     │ Step 1: \"aca\"\n\
                        \u{20}     │ Step 2: \"aa\"\n\
                        \n    Minimal counterexample: \"aa\"";
        pretty_assertions::assert_eq!(result.to_string(), expected);
    }

    #[test]
    fn test_error_converts_to_aborted() {
        let result: TestResult = ArbitreeError::InvalidConfig {
            message: "min_length 3 > max_length 1".to_string(),
        }
        .into();
        assert!(matches!(result, TestResult::Aborted { tests_run: 0, .. }));
        assert!(!result.is_pass());
    }
}
