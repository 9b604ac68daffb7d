//! Filter properties
//!
//! Filtered generation and filtered shrinking must never surface a value the
//! filter rejects.

use crate::{arbitrary_seed, fast_config};
use arbitree::*;

/// Property: every value seen while shrinking a filtered integer is accepted
pub fn test_filter_invariant() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let multiples_of_three = Integers::between(0, 1000).filter(|x| x % 3 == 0);
        let mut random = seed;
        let shrinkable = multiples_of_three.generator(10).next(&mut random).unwrap();
        if shrinkable.value() < 10 {
            return shrinkable.value() % 3 == 0;
        }

        let shrunk = shrink_to_minimum(shrinkable, &|&x| x >= 10, 1000);
        shrunk.steps.iter().all(|x| x % 3 == 0) && shrunk.value >= 10
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Filter invariant property passed"),
        result => panic!("Filter invariant property failed: {result:?}"),
    }
}

/// Property: excluded characters never show up, neither drawn nor shrunk
pub fn test_excluded_chars_survive_shrinking() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let strings = StringArbitrary::default()
            .alpha()
            .exclude_chars("aeiouAEIOU".chars())
            .of_min_length(1)
            .of_max_length(12);
        let mut random = seed;
        let shrinkable = strings.generator(10).next(&mut random).unwrap();

        let shrunk = shrink_to_minimum(shrinkable, &|s: &String| !s.is_empty(), 1000);
        let no_vowels = |s: &String| !s.chars().any(|c| "aeiouAEIOU".contains(c));
        shrunk.steps.iter().all(no_vowels) && shrunk.value.chars().count() == 1
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Excluded chars property passed"),
        result => panic!("Excluded chars property failed: {result:?}"),
    }
}
