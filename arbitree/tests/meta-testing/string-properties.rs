//! String arbitrary properties
//!
//! Random strings respect their length bounds and are reproducible from a
//! seed.

use crate::{arbitrary_seed, fast_config};
use arbitree::*;

/// Property: random strings stay within their length bounds
pub fn test_random_string_lengths() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let distributions = [RandomDistribution::Uniform, RandomDistribution::Biased];
        distributions.iter().all(|&distribution| {
            let strings = StringArbitrary::default()
                .all()
                .of_min_length(2)
                .of_max_length(6)
                .with_length_distribution(distribution);
            let mut random = seed;
            let value = strings.generator(10).next(&mut random).unwrap().value();
            (2..=6).contains(&value.chars().count())
        })
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Random string length property passed"),
        result => panic!("Random string length property failed: {result:?}"),
    }
}

/// Property: the same seed draws the same string
pub fn test_same_seed_same_string() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let generator = StringArbitrary::default().ascii().generator(10);
        let (mut first, mut second) = (seed, seed);
        generator.next(&mut first).unwrap().value() == generator.next(&mut second).unwrap().value()
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Seed determinism property passed"),
        result => panic!("Seed determinism property failed: {result:?}"),
    }
}
