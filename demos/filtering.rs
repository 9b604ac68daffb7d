//! Example demonstrating filtered arbitraries and excluded characters.

use arbitree_core::*;

fn main() {
    env_logger::init();

    println!("Shrinking a multiple of seven (intermediate values stay multiples of seven)");
    let sevens = Integers::between(0, 10_000).filter(|x| x % 7 == 0);
    let prop = for_all(sevens, |&x| x < 500);
    println!("{}", prop.run(&Config::default().with_edge_cases(0)));
    println!();

    println!("Strings without vowels");
    let consonants = StringArbitrary::default()
        .alpha()
        .exclude_chars("aeiouAEIOU".chars())
        .of_length(6);
    for edge_case in consonants.edge_cases(5).iter() {
        println!("  edge case: {:?}", edge_case.value());
    }

    let generator = consonants.generator(10);
    let mut seed = Seed::random();
    for _ in 0..5 {
        match generator.next(&mut seed) {
            Ok(shrinkable) => println!("  drawn: {:?}", shrinkable.value()),
            Err(error) => println!("  generation failed: {error}"),
        }
    }
    println!();

    println!("Excluding the only allowed character");
    let nothing = StringArbitrary::default()
        .with_chars(['a'])
        .exclude_chars(['a'])
        .of_min_length(1);
    let prop = for_all(nothing, |_: &String| true);
    println!(
        "{}",
        prop.run(&Config::default().with_generation_mode(GenerationMode::Randomized))
    );
}
