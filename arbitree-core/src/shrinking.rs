//! Branch selection and the shrink-search loop.

use std::fmt;
use std::rc::Rc;

use crate::shrinkable::{dedup_by_value, ShrinkResult, Shrinkable};

/// Keep only the candidates with minimal distance.
///
/// Only the locally best candidates survive each level, so a smaller value
/// that is reachable solely through a higher-distance step can be missed.
/// In exchange the fan-out of the shrink tree stays bounded.
pub fn min_distance_selection<T: PartialEq>(
    results: impl IntoIterator<Item = ShrinkResult<T>>,
) -> Vec<ShrinkResult<T>> {
    let results: Vec<ShrinkResult<T>> = results.into_iter().collect();
    let Some(min) = results.iter().map(ShrinkResult::distance).min() else {
        return Vec::new();
    };
    dedup_by_value(
        results
            .into_iter()
            .filter(|result| result.distance() == min)
            .collect(),
    )
}

/// Outcome of a completed shrink search.
#[derive(Debug, Clone, PartialEq)]
pub struct Shrunk<T> {
    /// The smallest falsifying value found.
    pub value: T,
    /// Every value visited, starting with the original.
    pub steps: Vec<T>,
    /// True when the search stopped at the round limit instead of a local minimum.
    pub limit_reached: bool,
}

impl<T> Shrunk<T> {
    /// Number of successful shrink rounds.
    pub fn rounds(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Drive `shrink_next` until no smaller falsifying candidate exists.
///
/// Each round takes the first candidate of minimal distance. The starting
/// value is assumed to falsify already.
pub fn shrink_to_minimum<T>(
    shrinkable: Rc<dyn Shrinkable<T>>,
    falsifier: &dyn Fn(&T) -> bool,
    shrink_limit: usize,
) -> Shrunk<T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    let mut current = shrinkable;
    let mut steps = vec![current.value()];
    let mut limit_reached = false;

    loop {
        let candidates = min_distance_selection(current.shrink_next(falsifier));
        let Some(next) = candidates.into_iter().next() else {
            break;
        };
        if steps.len() > shrink_limit {
            limit_reached = true;
            break;
        }

        let next = next.into_shrunk_value();
        log::trace!(
            "shrink round {}: {:?} (distance {}) -> {:?} (distance {})",
            steps.len(),
            current.value(),
            current.distance(),
            next.value(),
            next.distance()
        );
        steps.push(next.value());
        current = next;
    }

    let value = current.value();
    log::debug!(
        "shrinking finished after {} rounds at {value:?} (limit reached: {limit_reached})",
        steps.len() - 1
    );

    Shrunk {
        value,
        steps,
        limit_reached,
    }
}
