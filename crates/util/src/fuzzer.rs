use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Reproducible random source for tree fuzzing.
///
/// Uses the xoshiro256** PRNG so a run can be replayed from its seed.
///
/// # Examples
///
/// ```
/// use avl_strmap_util::Fuzzer;
///
/// let mut fuzzer = Fuzzer::new(Some(7));
/// let n = fuzzer.random_int(1, 10);
/// assert!((1..=10).contains(&n));
///
/// let choices = ["a", "b", "c"];
/// assert!(choices.contains(fuzzer.pick(&choices)));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: u64,
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a fuzzer; without a seed one is drawn from `OsRng`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| OsRng.next_u64());
        Self {
            seed,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Random integer in `[min, max]` (inclusive).
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Random index in `[0, len)`. `len` must be non-zero.
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.random_index(elements.len());
        &elements[idx]
    }

    /// `true` with the given probability.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Random string of `len` characters drawn from `chars`.
    pub fn random_string(&mut self, len: usize, chars: &str) -> String {
        let chars: Vec<char> = chars.chars().collect();
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())])
            .collect()
    }
}
