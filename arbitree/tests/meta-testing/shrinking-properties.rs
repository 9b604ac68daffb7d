//! Shrinking correctness properties
//!
//! These properties ensure that shrinking always makes progress towards a
//! smaller distance and that it stops.

use crate::{arbitrary_seed, fast_config};
use arbitree::*;
use std::rc::Rc;

/// Property: shrinking with an always-failing condition ends at the empty string
pub fn test_shrinking_terminates() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let strings = StringArbitrary::default().ascii().of_max_length(20);
        let mut random = seed;
        let shrinkable = strings.generator(10).next(&mut random).unwrap();

        let shrunk = shrink_to_minimum(shrinkable, &|_| true, 10_000);
        !shrunk.limit_reached && shrunk.value.is_empty()
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Shrinking terminates property passed"),
        result => panic!("Shrinking terminates property failed: {result:?}"),
    }
}

/// Property: every candidate is strictly closer to the target than its parent
pub fn test_shrink_steps_decrease_distance() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let strings = StringArbitrary::default()
            .with_char_range('a', 'f')
            .of_min_length(1)
            .of_max_length(8);
        let mut random = seed;
        let mut current: Rc<dyn Shrinkable<String>> =
            strings.generator(10).next(&mut random).unwrap();
        let falsifier = |s: &String| s.contains('f') || s.len() > 2;

        loop {
            let candidates = current.shrink_next(&falsifier);
            if !candidates
                .iter()
                .all(|candidate| candidate.distance() < current.distance())
            {
                return false;
            }
            match min_distance_selection(candidates).into_iter().next() {
                Some(next) => current = next.into_shrunk_value(),
                None => return true,
            }
        }
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Shrink distance property passed"),
        result => panic!("Shrink distance property failed: {result:?}"),
    }
}

/// Property: selection keeps exactly the candidates of minimal distance
pub fn test_min_distance_selection_keeps_minimum() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let mut random = seed;
        let shrinkable = Integers::between(-1000, 1000)
            .generator(10)
            .next(&mut random)
            .unwrap();

        let candidates = shrinkable.shrink_next(&|_| true);
        let selected = min_distance_selection(candidates.clone());
        match candidates.iter().map(ShrinkResult::distance).min() {
            None => selected.is_empty(),
            Some(min) => !selected.is_empty() && selected.iter().all(|s| s.distance() == min),
        }
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Min distance selection property passed"),
        result => panic!("Min distance selection property failed: {result:?}"),
    }
}
