//! Arbitraries: reusable descriptions of how to produce values.

use std::rc::Rc;
use std::sync::Arc;

use crate::{edge_cases::*, exhaustive::*, filtered::*, gen::*, shrinkable::*};

/// Describes how values of `T` are generated randomly, exhaustively and as
/// edge cases.
///
/// Arbitraries are immutable once built, so one instance can serve many draws
/// on many threads.
pub trait Arbitrary<T>: Send + Sync {
    /// A random generator; `gen_size` is forwarded to nested generators.
    fn generator(&self, gen_size: usize) -> RandomGenerator<T>;

    /// Every value of the space, or `None` when there are more than `max_samples`.
    fn exhaustive(&self, _max_samples: u64) -> Option<ExhaustiveGenerator<T>> {
        None
    }

    /// At most `max_edge_cases` boundary values.
    fn edge_cases(&self, _max_edge_cases: usize) -> EdgeCases<T> {
        EdgeCases::none()
    }

    /// Restrict every generation strategy to values accepted by `predicate`.
    fn filter<F>(self, predicate: F) -> Filtered<T>
    where
        Self: Sized + 'static,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Filtered {
            source: Arc::new(self),
            predicate: Arc::new(predicate),
        }
    }

    /// Transform every generated value.
    fn map<U, F>(self, mapper: F) -> Mapped<T, U>
    where
        Self: Sized + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Mapped {
            source: Arc::new(self),
            mapper: Arc::new(mapper),
        }
    }

    fn boxed(self) -> BoxedArbitrary<T>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// A shared, type-erased arbitrary.
pub type BoxedArbitrary<T> = Arc<dyn Arbitrary<T>>;

impl<T: 'static> Arbitrary<T> for BoxedArbitrary<T> {
    fn generator(&self, gen_size: usize) -> RandomGenerator<T> {
        (**self).generator(gen_size)
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<T>> {
        (**self).exhaustive(max_samples)
    }

    fn edge_cases(&self, max_edge_cases: usize) -> EdgeCases<T> {
        (**self).edge_cases(max_edge_cases)
    }
}

/// An arbitrary restricted by a predicate.
pub struct Filtered<T> {
    source: BoxedArbitrary<T>,
    predicate: Predicate<T>,
}

impl<T> Clone for Filtered<T> {
    fn clone(&self) -> Self {
        Filtered {
            source: Arc::clone(&self.source),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> Arbitrary<T> for Filtered<T>
where
    T: Clone + PartialEq + 'static,
{
    fn generator(&self, gen_size: usize) -> RandomGenerator<T> {
        self.source
            .generator(gen_size)
            .filter(Arc::clone(&self.predicate))
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<T>> {
        let predicate = Arc::clone(&self.predicate);
        self.source
            .exhaustive(max_samples)
            .map(|generator| generator.filter(move |value| predicate(value)))
    }

    fn edge_cases(&self, max_edge_cases: usize) -> EdgeCases<T> {
        let predicate = Arc::clone(&self.predicate);
        self.source
            .edge_cases(max_edge_cases)
            .filter(|value| predicate(value))
            .map_shrinkable(move |shrinkable| {
                FilteredShrinkable::shared(shrinkable, Arc::clone(&predicate))
            })
    }
}

/// An arbitrary whose values are transformed by a function.
pub struct Mapped<T, U> {
    source: BoxedArbitrary<T>,
    mapper: Mapper<T, U>,
}

impl<T, U> Arbitrary<U> for Mapped<T, U>
where
    T: Clone + 'static,
    U: 'static,
{
    fn generator(&self, gen_size: usize) -> RandomGenerator<U> {
        let mapper = Arc::clone(&self.mapper);
        self.source
            .generator(gen_size)
            .map(move |value| mapper(value))
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<U>> {
        let mapper = Arc::clone(&self.mapper);
        self.source
            .exhaustive(max_samples)
            .map(|generator| generator.map(move |value| mapper(value)))
    }

    fn edge_cases(&self, max_edge_cases: usize) -> EdgeCases<U> {
        let mapper = Arc::clone(&self.mapper);
        self.source
            .edge_cases(max_edge_cases)
            .map_shrinkable(move |shrinkable| -> Rc<dyn Shrinkable<U>> {
                MappedShrinkable::shared(shrinkable, Arc::clone(&mapper))
            })
    }
}

/// Integers from a closed range, shrinking towards zero or a chosen target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integers {
    min: i64,
    max: i64,
    target: Option<i64>,
}

impl Default for Integers {
    fn default() -> Self {
        Integers::between(i64::MIN, i64::MAX)
    }
}

impl Integers {
    pub fn between(min: i64, max: i64) -> Self {
        Integers {
            min,
            max,
            target: None,
        }
    }

    /// Shrink towards `target` instead of zero; clamped into the range.
    pub fn shrink_towards(&self, target: i64) -> Self {
        Integers {
            target: Some(target),
            ..*self
        }
    }

    fn target(&self) -> i64 {
        let target = self.target.unwrap_or(0);
        if self.min > self.max {
            return target;
        }
        target.clamp(self.min, self.max)
    }

    fn shrinkable(&self, value: i64) -> Rc<dyn Shrinkable<i64>> {
        Rc::new(ShrinkableInteger::new(value, self.min, self.max).with_target(self.target()))
    }
}

impl Arbitrary<i64> for Integers {
    fn generator(&self, _gen_size: usize) -> RandomGenerator<i64> {
        RandomGenerator::integers(self.min, self.max, self.target())
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<i64>> {
        ExhaustiveGenerator::integers(self.min, self.max, max_samples)
    }

    fn edge_cases(&self, max_edge_cases: usize) -> EdgeCases<i64> {
        if self.min > self.max {
            return EdgeCases::none();
        }
        let mut values = vec![self.target(), self.min, self.max];
        if self.min < self.max {
            values.extend([self.min + 1, self.max - 1]);
        }

        let mut seen = Vec::new();
        let mut parts = Vec::new();
        for value in values {
            if seen.contains(&value) {
                continue;
            }
            seen.push(value);
            let this = *self;
            parts.push(EdgeCases::from_supplier(move || this.shrinkable(value)));
        }
        EdgeCases::concat(parts, max_edge_cases)
    }
}
