//! Exhaustive generation properties
//!
//! Exhaustive generators enumerate each value exactly once and refuse spaces
//! above their sample ceiling.

use crate::fast_config;
use arbitree::*;
use std::collections::HashSet;

/// Property: each string of the space shows up exactly once
pub fn test_exhaustive_completeness() {
    let prop = for_all(Integers::between(0, 3), |&max: &i64| {
        let max_length = max as usize;
        let strings = StringArbitrary::default()
            .with_chars("abc".chars())
            .of_max_length(max_length);
        let Some(exhaustive) = strings.exhaustive(1000) else {
            return false;
        };

        let values: Vec<String> = exhaustive.iter().collect();
        let distinct: HashSet<&String> = values.iter().collect();
        let expected: u64 = (0..=max_length as u32).map(|length| 3u64.pow(length)).sum();
        values.len() as u64 == expected
            && exhaustive.max_count() == expected
            && distinct.len() == values.len()
            && values.iter().all(|s| s.chars().count() <= max_length)
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Exhaustive completeness property passed"),
        result => panic!("Exhaustive completeness property failed: {result:?}"),
    }
}

/// Property: spaces larger than the ceiling are refused
pub fn test_exhaustive_respects_ceiling() {
    let prop = for_all(Integers::between(0, 200), |&ceiling: &i64| {
        let strings = StringArbitrary::default()
            .with_char_range('0', '9')
            .of_min_length(2)
            .of_max_length(2);
        match strings.exhaustive(ceiling as u64) {
            Some(exhaustive) => ceiling >= 100 && exhaustive.max_count() == 100,
            None => ceiling < 100,
        }
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Exhaustive ceiling property passed"),
        result => panic!("Exhaustive ceiling property failed: {result:?}"),
    }
}
