//! Property definitions for property-based testing.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::{arbitrary::*, data::*, error::*, shrinkable::*, shrinking::*};

type Condition<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A boolean condition that must hold for every value of an arbitrary.
pub struct Property<T> {
    arbitrary: BoxedArbitrary<T>,
    condition: Condition<T>,
}

impl<T> Property<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Create a property that checks a boolean condition.
    pub fn for_all<A, F>(arbitrary: A, condition: F) -> Self
    where
        A: Arbitrary<T> + 'static,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Property {
            arbitrary: Arc::new(arbitrary),
            condition: Arc::new(condition),
        }
    }

    /// Run this property with the given configuration.
    ///
    /// Edge cases are tried first. After that the whole space is enumerated
    /// when the generation mode allows it and the space fits into the test
    /// limit; otherwise random values are drawn until the test limit. The
    /// first failing value is shrunk.
    pub fn run(&self, config: &Config) -> TestResult {
        let mut seed = config.seed.map(Seed::from_u64).unwrap_or_else(Seed::random);
        log::debug!("running property with {seed}");
        let mut tests_run = 0;

        for shrinkable in self.arbitrary.edge_cases(config.edge_case_limit).iter() {
            tests_run += 1;
            if let Some(failure) = self.check(shrinkable, tests_run, config) {
                return failure;
            }
        }

        let exhaustive = match config.generation_mode {
            GenerationMode::Randomized => None,
            GenerationMode::Auto | GenerationMode::Exhaustive => {
                self.arbitrary.exhaustive(config.test_limit as u64)
            }
        };
        if let Some(exhaustive) = exhaustive {
            log::debug!("enumerating at most {} values", exhaustive.max_count());
            for value in exhaustive.iter() {
                tests_run += 1;
                if let Some(failure) = self.check(Unshrinkable::shared(value), tests_run, config) {
                    return failure;
                }
            }
            return TestResult::Pass {
                tests_run,
                exhausted: true,
            };
        }
        if config.generation_mode == GenerationMode::Exhaustive {
            return TestResult::Aborted {
                reason: format!(
                    "value space does not fit into {} exhaustive samples",
                    config.test_limit
                ),
                tests_run,
            };
        }

        let generator = self.arbitrary.generator(config.size_limit);
        for _ in 0..config.test_limit {
            let (mut trial, next_seed) = seed.split();
            seed = next_seed;

            let shrinkable = match generator.next(&mut trial) {
                Ok(shrinkable) => shrinkable,
                Err(error) => {
                    log::debug!("generation failed after {tests_run} tests: {error}");
                    return TestResult::Aborted {
                        reason: error.to_string(),
                        tests_run,
                    };
                }
            };
            tests_run += 1;
            if let Some(failure) = self.check(shrinkable, tests_run, config) {
                return failure;
            }
        }

        TestResult::Pass {
            tests_run,
            exhausted: false,
        }
    }

    /// Check one value, shrinking it on failure.
    fn check(
        &self,
        shrinkable: Rc<dyn Shrinkable<T>>,
        tests_run: usize,
        config: &Config,
    ) -> Option<TestResult> {
        let original = shrinkable.value();
        if (self.condition)(&original) {
            return None;
        }

        let falsifier = |value: &T| !(self.condition)(value);
        let shrunk = shrink_to_minimum(shrinkable, &falsifier, config.shrink_limit);
        let shrink_steps = shrunk
            .steps
            .iter()
            .enumerate()
            .map(|(step, value)| ShrinkStep {
                counterexample: format!("{value:?}"),
                step,
            })
            .collect();

        Some(TestResult::Fail {
            counterexample: format!("{:?}", shrunk.value),
            original: format!("{original:?}"),
            tests_run,
            shrinks_performed: shrunk.rounds(),
            shrink_steps,
        })
    }
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, A, F>(arbitrary: A, condition: F) -> Property<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
    A: Arbitrary<T> + 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Property::for_all(arbitrary, condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::StringArbitrary;
    use pretty_assertions::assert_eq;

    #[test_log::test]
    fn test_property_success() {
        let prop = for_all(Integers::between(1, 50), |&x| x > 0);
        let config = Config::default()
            .with_tests(20)
            .with_generation_mode(GenerationMode::Randomized);

        match prop.run(&config) {
            TestResult::Pass {
                exhausted: false, ..
            } => (),
            other => panic!("Expected success, got: {other:?}"),
        }
    }

    #[test_log::test]
    fn test_edge_cases_run_first() {
        let prop = for_all(Integers::between(-5, 5), |&x| x > 0);
        let result = prop.run(&Config::default().with_seed(1));

        match result {
            TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed,
                ..
            } => {
                assert_eq!(counterexample, "0");
                assert_eq!(tests_run, 1);
                assert_eq!(shrinks_performed, 0);
            }
            other => panic!("Expected failure, got: {other:?}"),
        }
    }

    #[test_log::test]
    fn test_small_spaces_are_exhausted() {
        let prop = for_all(Integers::between(0, 9), |&x| x < 100);
        let result = prop.run(&Config::default().with_tests(10));
        // 0, 9, 1 and 8 as edge cases, then all ten values.
        assert_eq!(
            result,
            TestResult::Pass {
                tests_run: 14,
                exhausted: true
            }
        );
    }

    #[test_log::test]
    fn test_exhaustive_mode_aborts_on_large_spaces() {
        let prop = for_all(Integers::between(0, 1000), |_| true);
        let config = Config::default()
            .with_tests(100)
            .with_edge_cases(0)
            .with_generation_mode(GenerationMode::Exhaustive);
        assert!(matches!(
            prop.run(&config),
            TestResult::Aborted { tests_run: 0, .. }
        ));
    }

    #[test_log::test]
    fn test_random_failure_is_shrunk() {
        let strings = StringArbitrary::default()
            .with_char_range('a', 'z')
            .of_max_length(10);
        let prop = for_all(strings, |s: &String| s.len() < 3);
        let config = Config::default()
            .with_edge_cases(0)
            .with_seed(42)
            .with_generation_mode(GenerationMode::Randomized);

        match prop.run(&config) {
            TestResult::Fail {
                counterexample,
                shrink_steps,
                shrinks_performed,
                ..
            } => {
                assert_eq!(counterexample, "\"aaa\"");
                assert_eq!(shrink_steps.len(), shrinks_performed + 1);
                assert_eq!(shrink_steps[0].step, 0);
            }
            other => panic!("Expected failure, got: {other:?}"),
        }
    }

    #[test_log::test]
    fn test_generation_error_aborts() {
        let strings = StringArbitrary::default()
            .with_chars(['a'])
            .exclude_chars(['a'])
            .of_min_length(1);
        let prop = for_all(strings, |_: &String| true);
        let config = Config::default()
            .with_seed(3)
            .with_generation_mode(GenerationMode::Randomized);

        match prop.run(&config) {
            TestResult::Aborted { reason, tests_run } => {
                assert_eq!(reason, "Filter rejected 10000 consecutive values");
                assert_eq!(tests_run, 0);
            }
            other => panic!("Expected abort, got: {other:?}"),
        }
    }

    #[test_log::test]
    fn test_same_seed_same_outcome() {
        let prop = for_all(Integers::between(0, 1_000_000), |&x| x % 7 != 3);
        let config = Config::default()
            .with_edge_cases(0)
            .with_seed(9)
            .with_generation_mode(GenerationMode::Randomized);
        assert_eq!(prop.run(&config), prop.run(&config));
    }
}
