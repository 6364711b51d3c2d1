//! Weighted choice of a bass note
//!
//! Every chord member is scored by how well the intervals above it sit over a
//! bass. A bass pitch class is then drawn with probability proportional to
//! the score.

use crate::modular::Pitch;
use crate::rng::{RandomSource, weighted_choice};
use std::collections::BTreeMap;

/// Interval (semitones above the bass) to preference weight
pub const DEFAULT_INTERVAL_PREFERENCES: [(i32, i32); 6] =
    [(7, 75), (4, 30), (3, 25), (10, 5), (1, -10), (5, -5)];

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BassFinder {
    preferences: BTreeMap<i32, i32>,
}

impl Default for BassFinder {
    fn default() -> Self {
        Self::new(&DEFAULT_INTERVAL_PREFERENCES)
    }
}

impl BassFinder {
    /// Build from interval preferences; an empty table means the defaults.
    ///
    /// When any weight is zero or negative, every interval class is raised
    /// so that the smallest weight becomes zero.
    pub fn new(preferences: &[(i32, i32)]) -> Self {
        let preferences = if preferences.is_empty() {
            &DEFAULT_INTERVAL_PREFERENCES[..]
        } else {
            preferences
        };
        let given: BTreeMap<i32, i32> = preferences
            .iter()
            .map(|&(interval, weight)| (interval.rem_euclid(12), weight))
            .collect();

        let lowest = given.values().copied().min().unwrap_or(0);
        let preferences = if lowest > 0 {
            given
        } else {
            (0..12)
                .map(|i| (i, given.get(&i).copied().unwrap_or(0) - lowest))
                .collect()
        };
        Self { preferences }
    }

    pub fn preference(&self, interval: i32) -> i32 {
        self.preferences
            .get(&interval.rem_euclid(12))
            .copied()
            .unwrap_or(0)
    }

    /// Total preference of each distinct pitch class as the bass, in chord
    /// order; members scoring zero or less are left out.
    pub fn goodness(&self, chord: &[Pitch]) -> Vec<(i32, f64)> {
        let mut scores: Vec<(i32, f64)> = Vec::new();
        for &bass in chord {
            let pc = bass.rem_euclid(12);
            if scores.iter().any(|&(p, _)| p == pc) {
                continue;
            }
            let total: i32 = chord.iter().map(|&m| self.preference(m - bass)).sum();
            if total > 0 {
                scores.push((pc, total as f64));
            }
        }
        scores
    }

    /// Draw a bass pitch class, or `None` when no member scores above zero
    pub fn find_bass(&self, chord: &[Pitch], rng: &mut impl RandomSource) -> Option<i32> {
        let scores = self.goodness(chord);
        log::debug!("bass goodness for {:?}: {:?}", chord, scores);
        weighted_choice(&scores, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ChordRng;

    #[test]
    fn test_default_preferences_are_shifted() {
        let finder = BassFinder::default();
        assert_eq!(finder.preference(1), 0);
        assert_eq!(finder.preference(0), 10);
        assert_eq!(finder.preference(7), 85);
        assert_eq!(finder.preference(-5), 85);
    }

    #[test]
    fn test_positive_preferences_kept() {
        let finder = BassFinder::new(&[(7, 3), (4, 1)]);
        assert_eq!(finder.preference(7), 3);
        assert_eq!(finder.preference(0), 0);
    }

    #[test]
    fn test_root_position_scores_highest() {
        let finder = BassFinder::default();
        assert_eq!(
            finder.goodness(&[60, 64, 67]),
            vec![(0, 135.0), (4, 55.0), (7, 25.0)]
        );
    }

    #[test]
    fn test_find_bass_returns_member() {
        let finder = BassFinder::default();
        let mut rng = ChordRng::new(11);
        for _ in 0..50 {
            let bass = finder.find_bass(&[60, 64, 67], &mut rng).unwrap();
            assert!([0, 4, 7].contains(&bass));
        }
    }

    #[test]
    fn test_no_positive_goodness() {
        let finder = BassFinder::new(&[(7, 1)]);
        let mut rng = ChordRng::new(1);
        assert_eq!(finder.find_bass(&[60, 61], &mut rng), None);
    }
}
