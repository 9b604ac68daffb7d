//! Character and string arbitraries.
//!
//! Strings are the composite exemplar of the crate: a length policy, a
//! character catalog, an exclusion set and duplicate injection stacked on top
//! of the primitive generation strategies.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::{arbitrary::*, edge_cases::*, error::*, exhaustive::*, gen::*, shrinkable::*};

/// Default upper bound for generated string lengths.
pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Probability that a string element repeats an earlier element.
pub const DUPLICATE_PROBABILITY: f64 = 0.01;

const MAX_CODE_POINT: u32 = char::MAX as u32;
const SURROGATES_START: u32 = 0xD800;
const SURROGATES_END: u32 = 0xDFFF;

/// Characters drawn from a set of code point ranges.
///
/// Builders are additive: `range('a', 'z').range('0', '9')` allows both
/// ranges. Without any range every Unicode scalar value is allowed.
/// Characters shrink towards the lowest character of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterArbitrary {
    // Sorted, merged and free of surrogate code points.
    ranges: Vec<(u32, u32)>,
}

impl CharacterArbitrary {
    /// Allow every Unicode scalar value.
    pub fn all(&self) -> Self {
        self.with_ranges([(0, MAX_CODE_POINT)])
    }

    /// Allow the given characters.
    pub fn with_chars(&self, chars: impl IntoIterator<Item = char>) -> Self {
        self.with_ranges(chars.into_iter().map(|c| (c as u32, c as u32)))
    }

    /// Allow the characters in `[from, to]`; an inverted range adds nothing.
    pub fn range(&self, from: char, to: char) -> Self {
        if from > to {
            return self.clone();
        }
        self.with_ranges([(from as u32, to as u32)])
    }

    /// Allow the ASCII characters.
    pub fn ascii(&self) -> Self {
        self.with_ranges([(0, 0x7F)])
    }

    /// Allow every character Rust considers whitespace.
    pub fn whitespace(&self) -> Self {
        self.with_chars(
            (0..=0x3000)
                .filter_map(char::from_u32)
                .filter(|c| c.is_whitespace()),
        )
    }

    /// Number of allowed characters.
    pub fn size(&self) -> u64 {
        catalog_size(&self.catalog())
    }

    /// The character at `index` in ascending code point order.
    pub fn char_at(&self, index: u64) -> char {
        char_at(&self.catalog(), index)
    }

    fn with_ranges(&self, added: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut ranges = self.ranges.clone();
        ranges.extend(added);
        CharacterArbitrary {
            ranges: normalize(ranges),
        }
    }

    fn catalog(&self) -> Vec<(u32, u32)> {
        if self.ranges.is_empty() {
            normalize(vec![(0, MAX_CODE_POINT)])
        } else {
            self.ranges.clone()
        }
    }
}

fn normalize(mut ranges: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    ranges.sort_unstable();
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
    for (low, high) in ranges {
        match merged.last_mut() {
            Some(last) if low <= last.1.saturating_add(1) => last.1 = last.1.max(high),
            _ => merged.push((low, high)),
        }
    }

    let mut scalars = Vec::with_capacity(merged.len() + 1);
    for (low, high) in merged {
        if low < SURROGATES_START {
            scalars.push((low, high.min(SURROGATES_START - 1)));
        }
        if high > SURROGATES_END {
            scalars.push((low.max(SURROGATES_END + 1), high));
        }
    }
    scalars
}

fn catalog_size(catalog: &[(u32, u32)]) -> u64 {
    catalog
        .iter()
        .map(|&(low, high)| u64::from(high - low) + 1)
        .sum()
}

fn char_at(catalog: &[(u32, u32)], mut index: u64) -> char {
    for &(low, high) in catalog {
        let len = u64::from(high - low) + 1;
        if index < len {
            return char::from_u32(low + index as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
        }
        index -= len;
    }
    char::REPLACEMENT_CHARACTER
}

fn char_mapper(catalog: Vec<(u32, u32)>) -> Mapper<i64, char> {
    Arc::new(move |index: i64| char_at(&catalog, index as u64))
}

impl Arbitrary<char> for CharacterArbitrary {
    fn generator(&self, _gen_size: usize) -> RandomGenerator<char> {
        let catalog = self.catalog();
        let last = catalog_size(&catalog) as i64 - 1;
        let mapper = char_mapper(catalog);
        RandomGenerator::integers(0, last, 0).map(move |index| mapper(index))
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<char>> {
        let catalog = Arc::new(self.catalog());
        let count = catalog_size(&catalog);
        if count > max_samples {
            return None;
        }
        Some(ExhaustiveGenerator::new(count, move || {
            let catalog = Arc::clone(&catalog);
            Box::new((0..catalog.len()).flat_map(move |i| {
                let (low, high) = catalog[i];
                (low..=high).filter_map(char::from_u32)
            }))
        }))
    }

    /// The lowest and highest character of each range.
    fn edge_cases(&self, max_edge_cases: usize) -> EdgeCases<char> {
        let catalog = self.catalog();
        let last = catalog_size(&catalog) as i64 - 1;

        let mut indices: Vec<i64> = Vec::new();
        let mut offset = 0i64;
        for &(low, high) in &catalog {
            let len = i64::from(high - low) + 1;
            for index in [offset, offset + len - 1] {
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
            offset += len;
        }

        let mapper = char_mapper(catalog);
        let parts = indices
            .into_iter()
            .map(|index| {
                let mapper = Arc::clone(&mapper);
                EdgeCases::from_supplier(move || {
                    let source = Rc::new(ShrinkableInteger::new(index, 0, last));
                    MappedShrinkable::shared(source, Arc::clone(&mapper))
                })
            })
            .collect();
        EdgeCases::concat(parts, max_edge_cases)
    }
}

/// A string shrinking by dropping characters and shrinking each character.
///
/// The distance is the length plus the distances of all characters, so
/// shorter strings always win over longer ones.
pub struct ShrinkableString {
    elements: Vec<Rc<dyn Shrinkable<char>>>,
    min_length: usize,
}

impl ShrinkableString {
    /// A string of `elements` that never shrinks below `min_length`.
    pub fn new(elements: Vec<Rc<dyn Shrinkable<char>>>, min_length: usize) -> Self {
        ShrinkableString {
            elements,
            min_length,
        }
    }

    fn with_elements(&self, elements: Vec<Rc<dyn Shrinkable<char>>>) -> Rc<dyn Shrinkable<String>> {
        Rc::new(ShrinkableString::new(elements, self.min_length))
    }

    fn shorter(&self) -> Vec<Vec<Rc<dyn Shrinkable<char>>>> {
        let len = self.elements.len();
        if len <= self.min_length {
            return Vec::new();
        }

        let mut shorter = vec![self.elements[..self.min_length].to_vec()];
        for index in 0..len {
            let mut elements = self.elements.clone();
            elements.remove(index);
            shorter.push(elements);
        }
        shorter
    }
}

impl Shrinkable<String> for ShrinkableString {
    fn value(&self) -> String {
        self.elements.iter().map(|element| element.value()).collect()
    }

    fn distance(&self) -> Distance {
        self.elements
            .iter()
            .map(|element| element.distance())
            .fold(self.elements.len() as Distance, Distance::saturating_add)
    }

    fn shrink_next(&self, falsifier: &dyn Fn(&String) -> bool) -> Vec<ShrinkResult<String>> {
        let mut candidates = Vec::new();
        for elements in self.shorter() {
            let shrunk = self.with_elements(elements);
            if falsifier(&shrunk.value()) {
                candidates.push(ShrinkResult::of(shrunk));
            }
        }

        let chars: Vec<char> = self.elements.iter().map(|element| element.value()).collect();
        for (index, element) in self.elements.iter().enumerate() {
            let element_falsifier = |c: &char| {
                let candidate: String = chars
                    .iter()
                    .enumerate()
                    .map(|(i, &other)| if i == index { *c } else { other })
                    .collect();
                falsifier(&candidate)
            };
            for result in element.shrink_next(&element_falsifier) {
                let mut elements = self.elements.clone();
                elements[index] = result.into_shrunk_value();
                candidates.push(ShrinkResult::of(self.with_elements(elements)));
            }
        }

        dedup_by_value(candidates)
    }
}

impl fmt::Debug for ShrinkableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShrinkableString[{:?}:{}]", self.value(), self.distance())
    }
}

/// Strings with a configurable length range and character catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct StringArbitrary {
    characters: CharacterArbitrary,
    min_length: usize,
    max_length: usize,
    excluded: BTreeSet<char>,
    length_distribution: Option<RandomDistribution>,
}

impl Default for StringArbitrary {
    fn default() -> Self {
        StringArbitrary {
            characters: CharacterArbitrary::default(),
            min_length: 0,
            max_length: DEFAULT_MAX_LENGTH,
            excluded: BTreeSet::new(),
            length_distribution: None,
        }
    }
}

impl StringArbitrary {
    /// Generate strings of at least `min_length` characters.
    pub fn of_min_length(&self, min_length: usize) -> Self {
        StringArbitrary {
            min_length,
            ..self.clone()
        }
    }

    /// Generate strings of at most `max_length` characters.
    pub fn of_max_length(&self, max_length: usize) -> Self {
        StringArbitrary {
            max_length,
            ..self.clone()
        }
    }

    /// Generate strings of exactly `length` characters.
    pub fn of_length(&self, length: usize) -> Self {
        self.of_min_length(length).of_max_length(length)
    }

    /// Distribution of generated lengths; uniform when unset.
    pub fn with_length_distribution(&self, distribution: RandomDistribution) -> Self {
        StringArbitrary {
            length_distribution: Some(distribution),
            ..self.clone()
        }
    }

    /// Allow the given characters.
    pub fn with_chars(&self, chars: impl IntoIterator<Item = char>) -> Self {
        self.with_characters(self.characters.with_chars(chars))
    }

    /// Allow the characters in `[from, to]`.
    pub fn with_char_range(&self, from: char, to: char) -> Self {
        self.with_characters(self.characters.range(from, to))
    }

    /// Allow the ASCII characters.
    pub fn ascii(&self) -> Self {
        self.with_characters(self.characters.ascii())
    }

    /// Allow the ASCII letters.
    pub fn alpha(&self) -> Self {
        self.with_characters(self.characters.range('A', 'Z').range('a', 'z'))
    }

    /// Allow the ASCII digits.
    pub fn numeric(&self) -> Self {
        self.with_characters(self.characters.range('0', '9'))
    }

    /// Allow whitespace characters.
    pub fn whitespace(&self) -> Self {
        self.with_characters(self.characters.whitespace())
    }

    /// Allow every Unicode scalar value.
    pub fn all(&self) -> Self {
        self.with_characters(self.characters.all())
    }

    /// Never produce any of `chars`, neither generated nor while shrinking.
    pub fn exclude_chars(&self, chars: impl IntoIterator<Item = char>) -> Self {
        let mut excluded = self.excluded.clone();
        excluded.extend(chars);
        StringArbitrary {
            excluded,
            ..self.clone()
        }
    }

    fn with_characters(&self, characters: CharacterArbitrary) -> Self {
        StringArbitrary {
            characters,
            ..self.clone()
        }
    }

    /// The character arbitrary with the exclusion set applied.
    fn effective_characters(&self) -> BoxedArbitrary<char> {
        if self.excluded.is_empty() {
            return self.characters.clone().boxed();
        }
        let excluded = self.excluded.clone();
        self.characters
            .clone()
            .filter(move |c| !excluded.contains(c))
            .boxed()
    }

    /// Strings made of `size` copies of each character edge case.
    fn fixed_size_edge_cases(&self, size: usize, max_edge_cases: usize) -> EdgeCases<String> {
        let min_length = self.min_length;
        self.effective_characters()
            .edge_cases(max_edge_cases)
            .map_shrinkable(move |c| -> Rc<dyn Shrinkable<String>> {
                Rc::new(ShrinkableString::new(vec![c; size], min_length))
            })
    }
}

impl Arbitrary<String> for StringArbitrary {
    fn generator(&self, gen_size: usize) -> RandomGenerator<String> {
        let (min_length, max_length) = (self.min_length, self.max_length);
        if min_length > max_length {
            return RandomGenerator::failing(ArbitreeError::InvalidConfig {
                message: format!("min_length {min_length} > max_length {max_length}"),
            });
        }

        let characters = self
            .effective_characters()
            .generator(gen_size)
            .inject_duplicates(DUPLICATE_PROBABILITY);
        let distribution = self.length_distribution.unwrap_or_default();
        RandomGenerator::new(move |random| -> Result<Rc<dyn Shrinkable<String>>> {
            let length = distribution.draw(random, min_length, max_length);
            let elements = characters.next_sequence(random, length)?;
            log::trace!("drew string of length {length}");
            Ok(Rc::new(ShrinkableString::new(elements, min_length)))
        })
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<String>> {
        let chars: Vec<char> = self
            .effective_characters()
            .exhaustive(max_samples)?
            .iter()
            .collect();
        ExhaustiveGenerator::sequences(chars, self.min_length, self.max_length, max_samples)
            .map(|sequences| sequences.map(|chars| chars.into_iter().collect::<String>()))
    }

    fn edge_cases(&self, max_edge_cases: usize) -> EdgeCases<String> {
        if max_edge_cases == 0 {
            return EdgeCases::none();
        }
        let (min_length, max_length) = (self.min_length, self.max_length);

        let empty = if min_length == 0 {
            EdgeCases::from_supplier(move || -> Rc<dyn Shrinkable<String>> {
                Rc::new(ShrinkableString::new(Vec::new(), min_length))
            })
        } else {
            EdgeCases::none()
        };

        let remaining = max_edge_cases.saturating_sub(empty.size());
        let single_char = if min_length <= 1 && max_length >= 1 {
            self.fixed_size_edge_cases(1, remaining)
        } else {
            EdgeCases::none()
        };

        let remaining = remaining.saturating_sub(single_char.size());
        let fixed_size = if min_length <= max_length && min_length > 1 {
            self.fixed_size_edge_cases(min_length, remaining)
        } else {
            EdgeCases::none()
        };

        EdgeCases::concat(vec![single_char, empty, fixed_size], max_edge_cases)
    }
}
