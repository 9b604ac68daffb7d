//! Edge case properties
//!
//! Edge case catalogs must respect their budget and the configured lengths.

use crate::fast_config;
use arbitree::*;

/// Property: a catalog never exceeds the requested number of edge cases
pub fn test_edge_case_budget() {
    let prop = for_all(Integers::between(0, 12), |&budget: &i64| {
        let budget = budget as usize;
        let strings = StringArbitrary::default()
            .numeric()
            .alpha()
            .of_max_length(4);
        let edge_cases = strings.edge_cases(budget);
        edge_cases.size() <= budget
            && edge_cases.iter().count() == edge_cases.size()
            && (budget > 0 || edge_cases.is_empty())
    });

    match prop.run(&fast_config()) {
        TestResult::Pass {
            exhausted: true, ..
        } => println!("✓ Edge case budget property passed"),
        result => panic!("Edge case budget property failed: {result:?}"),
    }
}

/// Property: every edge case string lies within the length bounds
pub fn test_edge_case_lengths() {
    let prop = for_all(Integers::between(0, 5), |&min: &i64| {
        let min_length = min as usize;
        (min_length..min_length + 3).all(|max_length| {
            let strings = StringArbitrary::default()
                .with_char_range('x', 'z')
                .of_min_length(min_length)
                .of_max_length(max_length);
            strings.edge_cases(20).iter().all(|shrinkable| {
                let length = shrinkable.value().chars().count();
                (min_length..=max_length).contains(&length)
            })
        })
    });

    match prop.run(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Edge case length property passed"),
        result => panic!("Edge case length property failed: {result:?}"),
    }
}
