//! Shrinkables that never surface a value rejected by a filter.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::shrinkable::{dedup_by_value, Distance, ShrinkResult, Shrinkable};
use crate::shrinking::min_distance_selection;

/// Shared acceptance predicate.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Decorates a shrinkable so that every candidate satisfies `accept`.
///
/// When a raw candidate is rejected the search dives into its own candidates
/// (minimal distance first) until accepted values turn up. The wrapped value
/// itself must already be accepted.
pub struct FilteredShrinkable<T> {
    to_filter: Rc<dyn Shrinkable<T>>,
    accept: Predicate<T>,
}

/// One rejected node whose accepted descendants are still being collected.
struct Dive<T> {
    fits: Vec<ShrinkResult<T>>,
    rejected: Vec<Rc<dyn Shrinkable<T>>>,
}

impl<T: Clone + PartialEq + 'static> FilteredShrinkable<T> {
    pub fn new(to_filter: Rc<dyn Shrinkable<T>>, accept: Predicate<T>) -> Self {
        FilteredShrinkable { to_filter, accept }
    }

    pub fn shared(to_filter: Rc<dyn Shrinkable<T>>, accept: Predicate<T>) -> Rc<dyn Shrinkable<T>> {
        Rc::new(Self::new(to_filter, accept))
    }

    fn filtered(&self, shrinkable: Rc<dyn Shrinkable<T>>) -> Rc<dyn Shrinkable<T>> {
        FilteredShrinkable::shared(shrinkable, Arc::clone(&self.accept))
    }

    /// Split the raw candidates of `node` into accepted branches and the
    /// minimal-distance rejected ones worth diving into.
    fn branches(&self, node: &dyn Shrinkable<T>, falsifier: &dyn Fn(&T) -> bool) -> Dive<T> {
        let mut fits = Vec::new();
        let mut non_fits = Vec::new();
        for candidate in node.shrink_next(falsifier) {
            if (self.accept)(&candidate.value()) {
                fits.push(candidate.map(|shrunk| self.filtered(shrunk)));
            } else {
                non_fits.push(candidate);
            }
        }

        let rejected = min_distance_selection(non_fits)
            .into_iter()
            .map(ShrinkResult::into_shrunk_value)
            .collect();
        Dive { fits, rejected }
    }
}

impl<T: Clone + PartialEq + 'static> Shrinkable<T> for FilteredShrinkable<T> {
    fn value(&self) -> T {
        self.to_filter.value()
    }

    fn distance(&self) -> Distance {
        self.to_filter.distance()
    }

    fn shrink_next(&self, falsifier: &dyn Fn(&T) -> bool) -> Vec<ShrinkResult<T>> {
        // Post-order walk: a dive's fits are min-distance selected into its
        // parent once all of its own rejected children have been explored.
        let mut stack = vec![self.branches(self.to_filter.as_ref(), falsifier)];
        loop {
            let Some(top) = stack.last_mut() else {
                return Vec::new();
            };
            if let Some(rejected) = top.rejected.pop() {
                log::trace!("filter rejected candidate at distance {}", rejected.distance());
                let dive = self.branches(rejected.as_ref(), falsifier);
                stack.push(dive);
                continue;
            }

            let Some(finished) = stack.pop() else {
                return Vec::new();
            };
            match stack.last_mut() {
                Some(parent) => parent.fits.extend(min_distance_selection(finished.fits)),
                None => return dedup_by_value(finished.fits),
            }
        }
    }
}

impl<T: PartialEq> PartialEq for FilteredShrinkable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.to_filter.value() == other.to_filter.value()
    }
}

impl<T: fmt::Debug> fmt::Debug for FilteredShrinkable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FilteredShrinkable[{:?}:{}]",
            self.to_filter.value(),
            self.to_filter.distance()
        )
    }
}
