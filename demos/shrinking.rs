//! Example demonstrating distance-guided shrinking of strings and integers.

use arbitree_core::*;

fn main() {
    env_logger::init();

    println!("Testing integer shrinking (should fail and show shrinking)");
    let int_prop = for_all(Integers::between(-20, 20).shrink_towards(3), |&x| x.abs() < 12);
    let config = Config::default().with_tests(50).with_edge_cases(0);
    match int_prop.run(&config.clone().with_generation_mode(GenerationMode::Randomized)) {
        TestResult::Fail {
            counterexample,
            shrinks_performed,
            ..
        } => {
            println!("Integer shrinking worked: {counterexample}, shrinks: {shrinks_performed}");
        }
        result => println!("Unexpected result: {result:?}"),
    }
    println!();

    println!("Testing string shrinking (should fail and show character simplification)");
    let strings = StringArbitrary::default().alpha().of_max_length(40);
    let string_prop = for_all(strings, |s: &String| !s.to_lowercase().contains("zz"));
    let result = string_prop.run(&config.with_tests(1000));
    println!("{result}");
}
