//! Exhaustive enumeration of small value spaces.

use std::ops::RangeInclusive;
use std::sync::Arc;

type ValuesFn<T> = dyn Fn() -> Box<dyn Iterator<Item = T>> + Send + Sync;

/// A finite, restartable enumeration of every value in a space.
///
/// `max_count` is an upper bound: filtering keeps the bound of the
/// unfiltered space while yielding fewer values.
pub struct ExhaustiveGenerator<T> {
    max_count: u64,
    values: Arc<ValuesFn<T>>,
}

impl<T> Clone for ExhaustiveGenerator<T> {
    fn clone(&self) -> Self {
        ExhaustiveGenerator {
            max_count: self.max_count,
            values: Arc::clone(&self.values),
        }
    }
}

impl<T: 'static> ExhaustiveGenerator<T> {
    /// Create a generator yielding at most `max_count` values from `values`.
    pub fn new<F>(max_count: u64, values: F) -> Self
    where
        F: Fn() -> Box<dyn Iterator<Item = T>> + Send + Sync + 'static,
    {
        ExhaustiveGenerator {
            max_count,
            values: Arc::new(values),
        }
    }

    /// Enumerate a fixed list of values.
    pub fn from_values(values: Vec<T>) -> Self
    where
        T: Clone + Send + Sync,
    {
        let values = Arc::new(values);
        ExhaustiveGenerator::new(values.len() as u64, move || {
            let values = Arc::clone(&values);
            Box::new((0..values.len()).map(move |index| values[index].clone()))
        })
    }

    /// Upper bound on the number of values one pass yields.
    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Start a fresh pass over the space.
    pub fn iter(&self) -> Box<dyn Iterator<Item = T>> {
        (self.values)()
    }

    /// Map a function over the enumerated values.
    pub fn map<U, F>(self, f: F) -> ExhaustiveGenerator<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: 'static,
    {
        let f = Arc::new(f);
        let values = self.values;
        ExhaustiveGenerator::new(self.max_count, move || {
            let f = Arc::clone(&f);
            Box::new(values().map(move |value| f(value)))
        })
    }

    /// Skip values rejected by `predicate`; `max_count` stays unchanged.
    pub fn filter<F>(self, predicate: F) -> ExhaustiveGenerator<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let values = self.values;
        ExhaustiveGenerator::new(self.max_count, move || {
            let predicate = Arc::clone(&predicate);
            Box::new(values().filter(move |value| predicate(value)))
        })
    }
}

impl ExhaustiveGenerator<i64> {
    /// Every integer in `[min, max]`, or `None` when there are more than `max_samples`.
    pub fn integers(min: i64, max: i64, max_samples: u64) -> Option<Self> {
        let count = if min > max {
            0
        } else {
            u64::try_from(max as i128 - min as i128 + 1).ok()?
        };
        if count > max_samples {
            return None;
        }
        Some(ExhaustiveGenerator::new(count, move || Box::new(min..=max)))
    }
}

impl<T: Clone + Send + Sync + 'static> ExhaustiveGenerator<Vec<T>> {
    /// Every sequence over `elements` with a length in `[min_length, max_length]`.
    ///
    /// Sequences come shortest first, each length in odometer order over
    /// `elements`. Returns `None` when the number of sequences overflows or
    /// exceeds `max_samples`.
    pub fn sequences(
        elements: Vec<T>,
        min_length: usize,
        max_length: usize,
        max_samples: u64,
    ) -> Option<Self> {
        let count = sequence_count(elements.len() as u64, min_length, max_length, max_samples)?;
        let elements = Arc::new(elements);
        Some(ExhaustiveGenerator::new(count, move || {
            Box::new(Sequences {
                elements: Arc::clone(&elements),
                lengths: min_length..=max_length,
                indices: None,
            })
        }))
    }
}

/// `Σ base^length` over the length range, refusing overflow and counts above `ceiling`.
fn sequence_count(base: u64, min_length: usize, max_length: usize, ceiling: u64) -> Option<u64> {
    if min_length > max_length {
        return Some(0);
    }
    if base == 0 {
        // Only the empty sequence exists.
        let count = u64::from(min_length == 0);
        return (count <= ceiling).then_some(count);
    }
    if base == 1 {
        let count = u64::try_from(max_length - min_length).ok()?.checked_add(1)?;
        return (count <= ceiling).then_some(count);
    }

    let mut total: u64 = 0;
    for length in min_length..=max_length {
        let exponent = u32::try_from(length).ok()?;
        total = total.checked_add(base.checked_pow(exponent)?)?;
        if total > ceiling {
            log::debug!("exhaustive generation refused: more than {ceiling} sequences");
            return None;
        }
    }
    Some(total)
}

struct Sequences<T> {
    elements: Arc<Vec<T>>,
    lengths: RangeInclusive<usize>,
    indices: Option<Vec<usize>>,
}

impl<T: Clone> Iterator for Sequences<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        loop {
            if let Some(indices) = &mut self.indices {
                let item = indices.iter().map(|&i| self.elements[i].clone()).collect();
                if !advance(indices, self.elements.len()) {
                    self.indices = None;
                }
                return Some(item);
            }

            let length = self.lengths.next()?;
            if length > 0 && self.elements.is_empty() {
                return None;
            }
            self.indices = Some(vec![0; length]);
        }
    }
}

/// Step the odometer; false once it wraps around.
fn advance(indices: &mut [usize], base: usize) -> bool {
    for index in indices.iter_mut().rev() {
        *index += 1;
        if *index < base {
            return true;
        }
        *index = 0;
    }
    false
}
