//! Random generators producing shrinkable values.

use std::rc::Rc;
use std::sync::Arc;

use rand::Rng;

use crate::{data::*, error::*, filtered::*, shrinkable::*};

/// Consecutive rejected draws after which a filtered generator gives up.
pub const MAX_FILTER_MISSES: usize = 10_000;

type DrawFn<T> = dyn Fn(&mut Seed) -> Result<Rc<dyn Shrinkable<T>>> + Send + Sync;

/// A recipe for drawing random shrinkable values of type `T`.
///
/// Generators own no mutable state: every draw consumes the caller's seed.
/// They are cheap to clone and can be shared between threads.
pub struct RandomGenerator<T> {
    draw: Arc<DrawFn<T>>,
    duplicate_probability: f64,
}

impl<T> Clone for RandomGenerator<T> {
    fn clone(&self) -> Self {
        RandomGenerator {
            draw: Arc::clone(&self.draw),
            duplicate_probability: self.duplicate_probability,
        }
    }
}

impl<T: 'static> RandomGenerator<T> {
    /// Create a new generator from a drawing function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Seed) -> Result<Rc<dyn Shrinkable<T>>> + Send + Sync + 'static,
    {
        RandomGenerator {
            draw: Arc::new(f),
            duplicate_probability: 0.0,
        }
    }

    /// Create a generator that always fails with the given error.
    pub fn failing(error: ArbitreeError) -> Self {
        RandomGenerator::new(move |_| Err(error.clone()))
    }

    /// Draw the next value.
    pub fn next(&self, random: &mut Seed) -> Result<Rc<dyn Shrinkable<T>>> {
        (self.draw)(random)
    }

    /// Draw `length` values for one sequence.
    ///
    /// With the configured duplicate probability an element re-uses one
    /// already drawn for the same sequence instead of a fresh draw.
    pub fn next_sequence(
        &self,
        random: &mut Seed,
        length: usize,
    ) -> Result<Vec<Rc<dyn Shrinkable<T>>>> {
        let mut elements: Vec<Rc<dyn Shrinkable<T>>> = Vec::with_capacity(length);
        for _ in 0..length {
            if !elements.is_empty()
                && self.duplicate_probability > 0.0
                && random.gen_bool(self.duplicate_probability)
            {
                let index = random.gen_range(0..elements.len());
                elements.push(Rc::clone(&elements[index]));
            } else {
                elements.push(self.next(random)?);
            }
        }
        Ok(elements)
    }

    /// Bias sequences drawn from this generator towards repeated elements.
    pub fn inject_duplicates(mut self, probability: f64) -> Self {
        self.duplicate_probability = probability.clamp(0.0, 1.0);
        self
    }

    /// Probability that a sequence element repeats an earlier one.
    pub fn duplicate_probability(&self) -> f64 {
        self.duplicate_probability
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> RandomGenerator<U>
    where
        T: Clone,
        F: Fn(T) -> U + Send + Sync + 'static,
        U: 'static,
    {
        let mapper: Mapper<T, U> = Arc::new(f);
        let draw = self.draw;
        RandomGenerator {
            draw: Arc::new(move |random: &mut Seed| -> Result<Rc<dyn Shrinkable<U>>> {
                let source = draw(random)?;
                Ok(MappedShrinkable::shared(source, Arc::clone(&mapper)))
            }),
            duplicate_probability: self.duplicate_probability,
        }
    }

    /// Only produce values satisfying `predicate`.
    ///
    /// Rejected draws are retried up to [`MAX_FILTER_MISSES`] times; the
    /// surfaced shrinkable is filtered as well, so shrinking cannot escape the
    /// predicate either.
    pub fn filter(self, predicate: Predicate<T>) -> Self
    where
        T: Clone + PartialEq,
    {
        let draw = self.draw;
        RandomGenerator {
            draw: Arc::new(move |random: &mut Seed| -> Result<Rc<dyn Shrinkable<T>>> {
                for _ in 0..MAX_FILTER_MISSES {
                    let candidate = draw(random)?;
                    if predicate(&candidate.value()) {
                        return Ok(FilteredShrinkable::shared(candidate, Arc::clone(&predicate)));
                    }
                }
                log::debug!("filter gave up after {MAX_FILTER_MISSES} misses");
                Err(ArbitreeError::TooManyFilterMisses {
                    misses: MAX_FILTER_MISSES,
                })
            }),
            duplicate_probability: self.duplicate_probability,
        }
    }
}

/// Primitive generators.
impl RandomGenerator<i64> {
    /// Uniformly distributed integers in `[min, max]` shrinking towards `target`.
    pub fn integers(min: i64, max: i64, target: i64) -> Self {
        if min > max {
            return RandomGenerator::failing(ArbitreeError::InvalidConfig {
                message: format!("min {min} > max {max}"),
            });
        }
        let target = target.clamp(min, max);
        RandomGenerator::new(move |random: &mut Seed| {
            let value = random.gen_range(min..=max);
            let shrinkable = ShrinkableInteger::new(value, min, max).with_target(target);
            Ok(Rc::new(shrinkable) as Rc<dyn Shrinkable<i64>>)
        })
    }
}

/// Distribution of a drawn length or count inside a range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RandomDistribution {
    /// Every value in the range is equally likely.
    #[default]
    Uniform,
    /// Values close to the lower bound are more likely.
    ///
    /// The offset from the minimum is `span * u^3` for a uniform `u`, so about
    /// half of all draws land in the lowest eighth of the range.
    Biased,
}

impl RandomDistribution {
    /// Draw a value from `[min, max]`; `min <= max` is required.
    pub fn draw(&self, random: &mut Seed, min: usize, max: usize) -> usize {
        match self {
            RandomDistribution::Uniform => random.gen_range(min..=max),
            RandomDistribution::Biased => {
                let unit: f64 = random.gen();
                let span = (max - min) as f64;
                let offset = (span * unit.powi(3)).round() as usize;
                min + offset.min(max - min)
            }
        }
    }
}
