//! Core data types for arbitree property-based testing.

use std::fmt;

use rand::RngCore;

/// Splittable random seed for deterministic test generation.
///
/// A seed is the randomness source of a single trial. It implements
/// [`RngCore`], so generators draw from it through the usual [`rand::Rng`]
/// methods, and it can be split into independent streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate a random seed.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Seed(rng.gen(), rng.gen())
    }

    fn advance(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(self.1);
        splitmix64_mix(self.0)
    }
}

impl RngCore for Seed {
    fn next_u32(&mut self) -> u32 {
        (self.advance() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.advance()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// How a property obtains its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Enumerate exhaustively when the space fits into the test limit,
    /// otherwise fall back to random generation.
    #[default]
    Auto,
    /// Always draw random values.
    Randomized,
    /// Only enumerate; a property whose space does not fit fails.
    Exhaustive,
}

/// Configuration for property testing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of tests to run.
    pub test_limit: usize,

    /// Maximum number of shrink rounds to attempt.
    pub shrink_limit: usize,

    /// Maximum size parameter to use.
    pub size_limit: usize,

    /// Maximum number of edge cases tried before generated values.
    pub edge_case_limit: usize,

    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,

    /// Input strategy.
    pub generation_mode: GenerationMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 1000,
            shrink_limit: 1000,
            size_limit: 100,
            edge_case_limit: 20,
            seed: None,
            generation_mode: GenerationMode::Auto,
        }
    }
}

impl Config {
    /// Create a new config with the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Create a new config with the given shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Create a new config with the given size limit.
    pub fn with_size_limit(mut self, size: usize) -> Self {
        self.size_limit = size;
        self
    }

    /// Create a new config with the given edge case budget.
    pub fn with_edge_cases(mut self, edge_cases: usize) -> Self {
        self.edge_case_limit = edge_cases;
        self
    }

    /// Create a new config that always starts from the given seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with the given generation mode.
    pub fn with_generation_mode(mut self, mode: GenerationMode) -> Self {
        self.generation_mode = mode;
        self
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Ensure gamma is odd for maximal period
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seed_is_deterministic() {
        let mut first = Seed::from_u64(42);
        let mut second = Seed::from_u64(42);
        let a: Vec<u64> = (0..5).map(|_| first.gen_range(0..1000)).collect();
        let b: Vec<u64> = (0..5).map(|_| second.gen_range(0..1000)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_seeds_diverge() {
        let (mut left, mut right) = Seed::from_u64(7).split();
        assert_ne!(left.next_u64(), right.next_u64());
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut seed = Seed::from_u64(1);
        let mut bytes = [0u8; 11];
        seed.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_config_builders() {
        let config = Config::default()
            .with_tests(5)
            .with_shrinks(3)
            .with_edge_cases(0)
            .with_seed(9)
            .with_generation_mode(GenerationMode::Randomized);
        assert_eq!(config.test_limit, 5);
        assert_eq!(config.shrink_limit, 3);
        assert_eq!(config.edge_case_limit, 0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.generation_mode, GenerationMode::Randomized);
    }
}
