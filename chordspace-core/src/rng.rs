//! Random sources for the non-deterministic steps
//!
//! Cardinality equalization, top-N voice-leading sampling and the bass finder
//! all draw through [`RandomSource`], so tests can pin them with a seeded
//! [`ChordRng`].

/// Anything that can draw uniform integers
pub trait RandomSource {
    /// Uniform integer in `[low, high)`. Callers guarantee `low < high`.
    fn range_usize(&mut self, low: usize, high: usize) -> usize;

    /// Uniform float in `[0, 1)`
    fn next_f64(&mut self) -> f64;
}

/// xoshiro256++ generator seeded through SplitMix64.
///
/// Two generators built from the same seed produce identical streams on
/// every platform.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordRng {
    s: [u64; 4],
}

impl ChordRng {
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform integer in `[low, high)` without modulo bias
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }
}

impl RandomSource for ChordRng {
    fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Pick a key with probability proportional to its weight.
///
/// Draws uniformly in `[0, total)` and returns the first key whose running
/// weight reaches the draw. Zero-weight keys are never picked; non-positive
/// totals yield `None`.
pub fn weighted_choice<K: Copy>(choices: &[(K, f64)], rng: &mut impl RandomSource) -> Option<K> {
    let total: f64 = choices.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }
    let r = rng.next_f64() * total;
    let mut upto = 0.0;
    for &(key, weight) in choices {
        if weight > 0.0 && upto + weight >= r {
            return Some(key);
        }
        upto += weight;
    }
    choices
        .iter()
        .rev()
        .find(|(_, w)| *w > 0.0)
        .map(|&(key, _)| key)
}
