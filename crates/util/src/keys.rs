use crate::fuzzer::Fuzzer;

/// Starting key of a [`KeyStream`] when none is given.
pub const DEFAULT_KEY_SEED: &str = "CHARACTERS";

const ALPHABET_LEN: u8 = 26;

/// Fixed-width stream of uppercase keys.
///
/// Each call to [`advance`](Self::advance) moves every letter forward by a
/// random step in `0..26`, wrapping from `Z` back to `A`. Consecutive keys
/// can repeat; callers that need distinct keys must filter.
#[derive(Clone, Debug)]
pub struct KeyStream {
    current: Vec<u8>,
}

impl KeyStream {
    /// Stream whose keys are `width` letters long, starting from `"CHARACTERS"`
    /// cycled or truncated to fit.
    pub fn new(width: usize) -> Self {
        Self::from_start(DEFAULT_KEY_SEED, width)
    }

    /// Non-letter bytes in `start` are mapped onto `A..=Z` first.
    pub fn from_start(start: &str, width: usize) -> Self {
        let start: Vec<u8> = if start.is_empty() {
            DEFAULT_KEY_SEED.bytes().collect()
        } else {
            start.bytes().collect()
        };
        let current = start
            .iter()
            .cycle()
            .take(width)
            .map(|b| b'A' + b.to_ascii_uppercase().wrapping_sub(b'A') % ALPHABET_LEN)
            .collect();
        Self { current }
    }

    pub fn width(&self) -> usize {
        self.current.len()
    }

    /// The most recently produced key.
    pub fn current(&self) -> &str {
        // Every byte is kept within `A..=Z`.
        std::str::from_utf8(&self.current).unwrap_or_default()
    }

    pub fn advance(&mut self, fuzzer: &mut Fuzzer) -> String {
        for b in self.current.iter_mut() {
            let step = fuzzer.random_index(ALPHABET_LEN as usize) as u8;
            *b += step;
            if *b > b'Z' {
                *b -= ALPHABET_LEN;
            }
        }
        self.current().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_from_default_seed() {
        let keys = KeyStream::new(10);
        assert_eq!(keys.current(), "CHARACTERS");
        assert_eq!(KeyStream::new(4).current(), "CHAR");
        assert_eq!(KeyStream::new(12).current(), "CHARACTERSCH");
    }

    #[test]
    fn lowercase_start_is_normalized() {
        assert_eq!(KeyStream::from_start("abc", 3).current(), "ABC");
    }

    #[test]
    fn same_seed_same_keys() {
        let mut f1 = Fuzzer::new(Some(42));
        let mut f2 = Fuzzer::new(Some(42));
        let mut k1 = KeyStream::new(10);
        let mut k2 = KeyStream::new(10);
        for _ in 0..20 {
            assert_eq!(k1.advance(&mut f1), k2.advance(&mut f2));
        }
    }

    proptest! {
        #[test]
        fn keys_stay_uppercase_and_fixed_width(seed in any::<u64>(), width in 1usize..32) {
            let mut fuzzer = Fuzzer::new(Some(seed));
            let mut keys = KeyStream::new(width);
            for _ in 0..50 {
                let key = keys.advance(&mut fuzzer);
                prop_assert_eq!(key.len(), width);
                prop_assert!(key.bytes().all(|b| b.is_ascii_uppercase()));
            }
        }
    }
}
