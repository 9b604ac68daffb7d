//! Shrinkable values for distance-guided shrinking.
//!
//! A [`Shrinkable`] is one node of a lazily expanded shrink tree: a generated
//! value, its distance from a fully reduced form, and the means to produce
//! the next generation of smaller candidates for a given falsifier.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// How far a candidate is from its maximally reduced form.
///
/// Only used to prioritise the search. Every shrink step must strictly
/// decrease it.
pub type Distance = u64;

/// A generated value together with the means to shrink it.
pub trait Shrinkable<T> {
    /// The value this node stands for.
    fn value(&self) -> T;

    /// Distance of this value from its shrinking target.
    fn distance(&self) -> Distance;

    /// Produce the smaller candidates that still satisfy `falsifier`.
    ///
    /// Every returned candidate has a distance strictly below
    /// [`Shrinkable::distance`]. Panics raised by `falsifier` propagate.
    fn shrink_next(&self, falsifier: &dyn Fn(&T) -> bool) -> Vec<ShrinkResult<T>>;
}

impl<T: fmt::Debug> fmt::Debug for dyn Shrinkable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shrinkable[{:?}:{}]", self.value(), self.distance())
    }
}

/// A produced shrink candidate.
///
/// The wrapper only carries the candidate through branch selection; whether
/// the candidate falsifies is decided by the falsifier that produced it.
pub struct ShrinkResult<T> {
    shrunk: Rc<dyn Shrinkable<T>>,
}

impl<T> ShrinkResult<T> {
    /// Wrap a candidate shrinkable.
    pub fn of(shrunk: Rc<dyn Shrinkable<T>>) -> Self {
        ShrinkResult { shrunk }
    }

    /// The candidate shrinkable.
    pub fn shrunk_value(&self) -> &Rc<dyn Shrinkable<T>> {
        &self.shrunk
    }

    /// Take the candidate shrinkable out of the result.
    pub fn into_shrunk_value(self) -> Rc<dyn Shrinkable<T>> {
        self.shrunk
    }

    /// Value of the candidate.
    pub fn value(&self) -> T {
        self.shrunk.value()
    }

    /// Distance of the candidate.
    pub fn distance(&self) -> Distance {
        self.shrunk.distance()
    }

    /// Re-wrap the candidate, keeping it in the result stream.
    pub fn map<U, F>(self, f: F) -> ShrinkResult<U>
    where
        F: FnOnce(Rc<dyn Shrinkable<T>>) -> Rc<dyn Shrinkable<U>>,
    {
        ShrinkResult::of(f(self.shrunk))
    }
}

impl<T> Clone for ShrinkResult<T> {
    fn clone(&self) -> Self {
        ShrinkResult {
            shrunk: Rc::clone(&self.shrunk),
        }
    }
}

impl<T: PartialEq> PartialEq for ShrinkResult<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<T: fmt::Debug> fmt::Debug for ShrinkResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShrinkResult({:?})", &*self.shrunk)
    }
}

/// Collapse candidates with equal values, keeping the first occurrence.
pub fn dedup_by_value<T: PartialEq>(results: Vec<ShrinkResult<T>>) -> Vec<ShrinkResult<T>> {
    let mut values: Vec<T> = Vec::with_capacity(results.len());
    let mut unique = Vec::with_capacity(results.len());
    for result in results {
        let value = result.value();
        if !values.contains(&value) {
            values.push(value);
            unique.push(result);
        }
    }
    unique
}

/// A value that cannot be shrunk any further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unshrinkable<T> {
    value: T,
}

impl<T: Clone + 'static> Unshrinkable<T> {
    /// Wrap a value without shrink candidates.
    pub fn new(value: T) -> Self {
        Unshrinkable { value }
    }

    /// Wrap a value as a shared shrinkable.
    pub fn shared(value: T) -> Rc<dyn Shrinkable<T>> {
        Rc::new(Self::new(value))
    }
}

impl<T: Clone> Shrinkable<T> for Unshrinkable<T> {
    fn value(&self) -> T {
        self.value.clone()
    }

    fn distance(&self) -> Distance {
        0
    }

    fn shrink_next(&self, _falsifier: &dyn Fn(&T) -> bool) -> Vec<ShrinkResult<T>> {
        Vec::new()
    }
}

/// An integer inside `[min, max]` that shrinks towards a target.
///
/// The target is zero clamped into the range unless set explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkableInteger {
    value: i64,
    target: i64,
    min: i64,
    max: i64,
}

impl ShrinkableInteger {
    /// An integer shrinking towards zero clamped into `[min, max]`.
    pub fn new(value: i64, min: i64, max: i64) -> Self {
        let target = 0i64.clamp(min.min(max), max.max(min));
        ShrinkableInteger {
            value,
            target,
            min,
            max,
        }
    }

    /// Shrink towards `target` instead, clamped into `[min, max]`.
    pub fn with_target(mut self, target: i64) -> Self {
        self.target = target.clamp(self.min.min(self.max), self.max.max(self.min));
        self
    }

    fn candidates(&self) -> Vec<i64> {
        let value = self.value as i128;
        let target = self.target as i128;
        let diff = value - target;
        if diff == 0 {
            return Vec::new();
        }

        let mut candidates = Vec::with_capacity(3);
        for candidate in [target, target + diff / 2, value - diff.signum()] {
            // Every candidate lies between target and value, so it fits in i64.
            let candidate = candidate as i64;
            if candidate != self.value
                && (self.min..=self.max).contains(&candidate)
                && !candidates.contains(&candidate)
            {
                candidates.push(candidate);
            }
        }
        candidates
    }
}

impl Shrinkable<i64> for ShrinkableInteger {
    fn value(&self) -> i64 {
        self.value
    }

    fn distance(&self) -> Distance {
        self.value.abs_diff(self.target)
    }

    fn shrink_next(&self, falsifier: &dyn Fn(&i64) -> bool) -> Vec<ShrinkResult<i64>> {
        self.candidates()
            .into_iter()
            .filter(|candidate| falsifier(candidate))
            .map(|candidate| {
                let shrunk = ShrinkableInteger {
                    value: candidate,
                    ..*self
                };
                ShrinkResult::of(Rc::new(shrunk) as Rc<dyn Shrinkable<i64>>)
            })
            .collect()
    }
}

/// Shared value mapping function.
pub type Mapper<T, U> = Arc<dyn Fn(T) -> U + Send + Sync>;

/// A shrinkable whose value is derived from another shrinkable.
///
/// Shrinking happens on the source value; the falsifier is evaluated on the
/// mapped value.
pub struct MappedShrinkable<T, U> {
    source: Rc<dyn Shrinkable<T>>,
    mapper: Mapper<T, U>,
}

impl<T: Clone + 'static, U: 'static> MappedShrinkable<T, U> {
    /// Derive values of `source` through `mapper`.
    pub fn new(source: Rc<dyn Shrinkable<T>>, mapper: Mapper<T, U>) -> Self {
        MappedShrinkable { source, mapper }
    }

    /// Same as [`MappedShrinkable::new`], as a shared shrinkable.
    pub fn shared(source: Rc<dyn Shrinkable<T>>, mapper: Mapper<T, U>) -> Rc<dyn Shrinkable<U>> {
        Rc::new(Self::new(source, mapper))
    }
}

impl<T: Clone + 'static, U: 'static> Shrinkable<U> for MappedShrinkable<T, U> {
    fn value(&self) -> U {
        (self.mapper)(self.source.value())
    }

    fn distance(&self) -> Distance {
        self.source.distance()
    }

    fn shrink_next(&self, falsifier: &dyn Fn(&U) -> bool) -> Vec<ShrinkResult<U>> {
        let mapper = Arc::clone(&self.mapper);
        let source_falsifier = |source: &T| falsifier(&mapper(source.clone()));
        self.source
            .shrink_next(&source_falsifier)
            .into_iter()
            .map(|result| {
                result.map(|shrunk| MappedShrinkable::shared(shrunk, Arc::clone(&self.mapper)))
            })
            .collect()
    }
}
