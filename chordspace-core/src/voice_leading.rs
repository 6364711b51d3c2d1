//! Minimal voice leading between pitch-class collections
//!
//! Both chords are reduced to sorted pitch classes and the target is rotated
//! against the source. Rotation `k` pairs source voice `i` with target element
//! `i + k`, adding the modulus to elements that wrap past the end so every
//! rotation's targets stay ascending. The same targets an octave lower are the
//! rotation's downward reading; whichever moves the voices less gives the
//! deltas. A rotation's size is the sum of shortest modular distances; the
//! first rotation with the minimum size wins.

use crate::modular::{Pitch, pc, simple_vl_size, sorted_pcs, scale_matrix};
use crate::rng::RandomSource;
use anyhow::{Result, anyhow};
#[cfg(feature = "colored")]
use colored::*;
use std::fmt;

/// One voice's motion: it starts on pitch class `pc` and moves by `delta`.
///
/// `delta` is the actual signed motion, not reduced to the shortest path, so
/// it may exceed half the modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceMotion {
    pub pc: i32,
    pub delta: i32,
}

impl VoiceMotion {
    pub fn new(pc: i32, delta: i32) -> Self {
        Self { pc, delta }
    }

    /// Pitch class (or unreduced pitch) the voice arrives on
    pub fn destination(&self) -> i32 {
        self.pc + self.delta
    }
}

impl fmt::Display for VoiceMotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.pc, self.delta)
    }
}

/// A complete voice-to-voice assignment and its size
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceLeading {
    pub motions: Vec<VoiceMotion>,
    pub size: i32,
}

impl VoiceLeading {
    /// Motions as `[pc, delta]` pairs
    pub fn pairs(&self) -> Vec<[i32; 2]> {
        self.motions.iter().map(|m| [m.pc, m.delta]).collect()
    }
}

impl fmt::Display for VoiceLeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, motion) in self.motions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            #[cfg(feature = "colored")]
            {
                let text = motion.to_string();
                let painted = match motion.delta.abs() {
                    0 => text.bright_blue(),
                    1..=2 => text.green(),
                    3..=4 => text.yellow(),
                    _ => text.red(),
                };
                write!(f, "{}", painted)?;
            }
            #[cfg(not(feature = "colored"))]
            write!(f, "{}", motion)?;
        }
        write!(f, "] (size {})", self.size)
    }
}

/// Result of a minimal voice-leading search
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinimalVoiceLeading {
    /// First rotation reaching the minimum size
    pub best: VoiceLeading,
    /// Every rotation, stably sorted by ascending size
    pub ranked: Vec<VoiceLeading>,
}

impl MinimalVoiceLeading {
    pub fn size(&self) -> i32 {
        self.best.size
    }

    pub fn motions(&self) -> &[VoiceMotion] {
        &self.best.motions
    }
}

/// Bring `first` to `target_len` voices.
///
/// Lengthening duplicates randomly chosen existing pitches (appended at the
/// end); shortening removes randomly chosen pitches. Fails only when asked to
/// lengthen an empty chord.
pub fn equalize_cardinality(
    first: &[Pitch],
    target_len: usize,
    rng: &mut impl RandomSource,
) -> Result<Vec<Pitch>> {
    let mut out = first.to_vec();
    if target_len > out.len() {
        if out.is_empty() {
            return Err(anyhow!("Cannot pad an empty chord to {} voices", target_len));
        }
        let original_len = out.len();
        for _ in original_len..target_len {
            let index = rng.range_usize(0, original_len);
            out.push(first[index]);
        }
    } else {
        while out.len() > target_len {
            let index = rng.range_usize(0, out.len());
            out.remove(index);
        }
    }
    Ok(out)
}

/// Minimal voice leading between two chords of equal cardinality.
///
/// # Examples
///
/// ```
/// use chordspace_core::voice_leading::minimal_voice_leading;
///
/// let vl = minimal_voice_leading(&[60, 64, 67], &[65, 69, 72], 12).unwrap();
/// assert_eq!(vl.best.pairs(), vec![[0, 0], [4, 1], [7, 2]]);
/// assert_eq!(vl.size(), 3);
/// ```
pub fn minimal_voice_leading(
    first: &[Pitch],
    second: &[Pitch],
    modulus: i32,
) -> Result<MinimalVoiceLeading> {
    if first.len() != second.len() {
        return Err(anyhow!(
            "Chords must have the same number of voices ({} vs {}); equalize them first",
            first.len(),
            second.len()
        ));
    }
    if first.is_empty() {
        return Err(anyhow!("Cannot voice-lead empty chords"));
    }

    let first_pcs = sorted_pcs(first, modulus);
    let second_pcs = sorted_pcs(second, modulus);
    let n = first_pcs.len();

    let mut rotations = Vec::with_capacity(n);
    for k in 0..n {
        let upward: Vec<i32> = (0..n)
            .map(|i| second_pcs[(i + k) % n] + modulus * ((i + k) / n) as i32)
            .collect();
        let downward: Vec<i32> = upward.iter().map(|t| t - modulus).collect();
        let targets = if total_motion(&first_pcs, &downward) < total_motion(&first_pcs, &upward) {
            downward
        } else {
            upward
        };
        let motions: Vec<VoiceMotion> = first_pcs
            .iter()
            .zip(&targets)
            .map(|(&source, &target)| VoiceMotion::new(source, target - source))
            .collect();
        let size = simple_vl_size(&first_pcs, &targets, modulus);
        log::debug!("rotation {}: targets {:?}, size {}", k, targets, size);
        rotations.push(VoiceLeading { motions, size });
    }

    let mut best = rotations[0].clone();
    for candidate in &rotations[1..] {
        if candidate.size < best.size {
            best = candidate.clone();
        }
    }

    let mut ranked = rotations;
    ranked.sort_by_key(|vl| vl.size);

    Ok(MinimalVoiceLeading { best, ranked })
}

fn total_motion(sources: &[i32], targets: &[i32]) -> i32 {
    sources.iter().zip(targets).map(|(s, t)| (t - s).abs()).sum()
}

/// Minimal voice leading that first equalizes `first` to `second`'s
/// cardinality with the given random source
pub fn minimal_voice_leading_with(
    first: &[Pitch],
    second: &[Pitch],
    modulus: i32,
    rng: &mut impl RandomSource,
) -> Result<MinimalVoiceLeading> {
    if first.len() == second.len() {
        return minimal_voice_leading(first, second, modulus);
    }
    let equalized = equalize_cardinality(first, second.len(), rng)?;
    minimal_voice_leading(&equalized, second, modulus)
}

/// Move concrete pitches onto a target pitch-class collection.
///
/// The source pitches are voice-led to `out_pcs` minimally; with `top_n > 1`
/// one of the `top_n` smallest rotations is drawn at random instead. Each
/// motion is applied to the first source pitch carrying its starting pitch
/// class, and the resulting pitches come back in ascending pitch-class order
/// of the sources.
pub fn voicelead(
    in_pitches: &[Pitch],
    out_pcs: &[i32],
    top_n: usize,
    modulus: i32,
    rng: &mut impl RandomSource,
) -> Result<Vec<Pitch>> {
    let in_pcs = sorted_pcs(in_pitches, modulus);
    let result = minimal_voice_leading_with(&in_pcs, out_pcs, modulus, rng)?;

    let motions = if top_n > 1 {
        let range = result.ranked.len().min(top_n);
        &result.ranked[rng.range_usize(0, range)].motions
    } else {
        &result.best.motions
    };

    let mut output = Vec::with_capacity(motions.len());
    for motion in motions {
        if let Some(&source) = in_pitches.iter().find(|&&p| pc(p, modulus) == motion.pc) {
            output.push(source + motion.delta);
        }
    }
    Ok(output)
}

/// Voice leadings from `first` to every scalar transposition of `second`.
///
/// With `fixed_form` the voices are paired index by index; otherwise the
/// minimal voice leading supplies the pairing. Row `k` adds the intervals
/// spanned by `k` steps of the destination chord to each voice's motion.
pub fn interscalar_matrix(
    first: &[Pitch],
    second: &[Pitch],
    fixed_form: bool,
    modulus: i32,
) -> Result<Vec<Vec<i32>>> {
    let motions: Vec<VoiceMotion> = if fixed_form {
        if first.len() != second.len() {
            return Err(anyhow!(
                "Fixed-form matrix needs equal voice counts ({} vs {})",
                first.len(),
                second.len()
            ));
        }
        first
            .iter()
            .zip(second)
            .map(|(&a, &b)| VoiceMotion::new(a, b - a))
            .collect()
    } else {
        minimal_voice_leading(first, second, modulus)?.best.motions
    };

    let destination: Vec<i32> = motions.iter().map(|m| m.destination()).collect();
    Ok(scale_matrix(&destination, modulus)
        .into_iter()
        .map(|row| {
            motions
                .iter()
                .zip(row)
                .map(|(m, step)| m.delta + step)
                .collect()
        })
        .collect())
}

/// Split a voice leading into a scalar step and a uniform chromatic shift.
///
/// Returns `(k, c)` when every voice moves by row `k` of the starting
/// chord's [`scale_matrix`] plus the same `c`; None when no row fits.
pub fn find_scalar_and_chromatic_transposition(
    motions: &[VoiceMotion],
    modulus: i32,
) -> Option<(usize, i32)> {
    let chord: Vec<i32> = motions.iter().map(|m| m.pc).collect();
    scale_matrix(&chord, modulus)
        .into_iter()
        .enumerate()
        .find_map(|(k, row)| {
            let mut shifts = motions.iter().zip(&row).map(|(m, step)| m.delta - step);
            let first = shifts.next()?;
            shifts.all(|c| c == first).then_some((k, first))
        })
}

/// Per-voice motion of `chord` moved `scalar` steps along itself and then
/// `chromatic` semitones. Steps past the chord's length continue into
/// higher octaves.
pub fn scalar_and_chromatic_transposition(
    chord: &[i32],
    scalar: usize,
    chromatic: i32,
    modulus: i32,
) -> Vec<i32> {
    if chord.is_empty() {
        return Vec::new();
    }
    let len = chord.len();
    let octaves = modulus * (scalar / len) as i32;
    scale_matrix(chord, modulus)[scalar % len]
        .iter()
        .map(|step| step + octaves + chromatic)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ChordRng;

    #[test]
    fn test_c_major_to_f_major() {
        let vl = minimal_voice_leading(&[60, 64, 67], &[65, 69, 72], 12).unwrap();
        assert_eq!(vl.best.pairs(), vec![[0, 0], [4, 1], [7, 2]]);
        assert_eq!(vl.size(), 3);

        // parallel motion up a fourth is the next rotation and costs 15
        let parallel = vl
            .ranked
            .iter()
            .find(|r| r.pairs() == vec![[0, 5], [4, 5], [7, 5]])
            .unwrap();
        assert_eq!(parallel.size, 15);
    }

    #[test]
    fn test_identical_chords_have_zero_size() {
        let vl = minimal_voice_leading(&[60, 64, 67, 70], &[60, 64, 67, 70], 12).unwrap();
        assert_eq!(vl.size(), 0);
        assert!(vl.motions().iter().all(|m| m.delta == 0));
    }

    #[test]
    fn test_size_is_symmetric() {
        let pairs: [(&[i32], &[i32]); 3] = [
            (&[60, 64, 67], &[62, 65, 69]),
            (&[0, 4, 7, 10], &[1, 5, 8, 11]),
            (&[0, 3, 6], &[2, 7, 11]),
        ];
        for (a, b) in pairs {
            let forward = minimal_voice_leading(a, b, 12).unwrap();
            let backward = minimal_voice_leading(b, a, 12).unwrap();
            assert_eq!(forward.size(), backward.size());
        }
    }

    #[test]
    fn test_ranked_list_is_sorted_and_complete() {
        let vl = minimal_voice_leading(&[0, 4, 7], &[2, 5, 9], 12).unwrap();
        assert_eq!(vl.ranked.len(), 3);
        assert!(vl.ranked.windows(2).all(|w| w[0].size <= w[1].size));
        assert_eq!(vl.ranked[0].size, vl.size());
    }

    #[test]
    fn test_first_rotation_wins_ties() {
        let vl = minimal_voice_leading(&[0, 4, 8], &[0, 4, 8], 12).unwrap();
        assert_eq!(vl.best.pairs(), vec![[0, 0], [4, 0], [8, 0]]);

        // both rotations of the tritone cost 6
        let vl = minimal_voice_leading(&[0, 6], &[3, 9], 12).unwrap();
        assert_eq!(vl.best.pairs(), vec![[0, 3], [6, 3]]);
    }

    #[test]
    fn test_rejects_unequal_cardinality() {
        assert!(minimal_voice_leading(&[60, 64], &[60, 64, 67], 12).is_err());
        assert!(minimal_voice_leading(&[], &[], 12).is_err());
    }

    #[test]
    fn test_equalize_cardinality() {
        let mut rng = ChordRng::new(11);
        let longer = equalize_cardinality(&[60, 64, 67], 5, &mut rng).unwrap();
        assert_eq!(longer.len(), 5);
        assert_eq!(&longer[..3], &[60, 64, 67]);
        assert!(longer[3..].iter().all(|p| [60, 64, 67].contains(p)));

        let shorter = equalize_cardinality(&[60, 64, 67, 70], 2, &mut rng).unwrap();
        assert_eq!(shorter.len(), 2);
        assert!(shorter.iter().all(|p| [60, 64, 67, 70].contains(p)));

        assert!(equalize_cardinality(&[], 3, &mut rng).is_err());
    }

    #[test]
    fn test_seeded_equalization_is_reproducible() {
        let a = minimal_voice_leading_with(&[60, 64, 67], &[62, 65, 69, 72], 12, &mut ChordRng::new(5))
            .unwrap();
        let b = minimal_voice_leading_with(&[60, 64, 67], &[62, 65, 69, 72], 12, &mut ChordRng::new(5))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.motions().len(), 4);
    }

    #[test]
    fn test_voicelead_returns_concrete_pitches() {
        let mut rng = ChordRng::new(1);
        let out = voicelead(&[48, 64, 67], &[5, 9, 0], 1, 12, &mut rng).unwrap();
        assert_eq!(out, vec![48, 65, 69]);
    }

    #[test]
    fn test_voicelead_top_n_stays_within_candidates() {
        let mut rng = ChordRng::new(2);
        for _ in 0..20 {
            let out = voicelead(&[60, 64, 67], &[5, 9, 0], 2, 12, &mut rng).unwrap();
            assert_eq!(out.len(), 3);
            let mut classes: Vec<i32> = out.iter().map(|&p| pc(p, 12)).collect();
            classes.sort_unstable();
            assert_eq!(classes, vec![0, 5, 9]);
        }
    }

    #[test]
    fn test_wrapped_voices_move_down() {
        let vl = minimal_voice_leading(&[0, 4, 7], &[11, 2, 5], 12).unwrap();
        assert_eq!(vl.best.pairs(), vec![[0, -1], [4, -2], [7, -2]]);
        assert_eq!(vl.size(), 5);
        for candidate in &vl.ranked {
            let moved: i32 = candidate.motions.iter().map(|m| m.delta.abs()).sum();
            assert!(moved >= candidate.size);
        }

        let mut rng = ChordRng::new(1);
        let out = voicelead(&[60, 64, 67], &[11, 2, 5], 1, 12, &mut rng).unwrap();
        assert_eq!(out, vec![59, 62, 65]);
    }

    #[test]
    fn test_find_scalar_and_chromatic_transposition() {
        let motions = |deltas: [i32; 3]| -> Vec<VoiceMotion> {
            [0, 4, 7].iter().zip(deltas).map(|(&p, d)| VoiceMotion::new(p, d)).collect()
        };
        assert_eq!(find_scalar_and_chromatic_transposition(&motions([0, 0, 0]), 12), Some((0, 0)));
        assert_eq!(find_scalar_and_chromatic_transposition(&motions([4, 3, 5]), 12), Some((1, 0)));
        assert_eq!(find_scalar_and_chromatic_transposition(&motions([5, 4, 6]), 12), Some((1, 1)));
        assert_eq!(find_scalar_and_chromatic_transposition(&motions([2, 2, 2]), 12), Some((0, 2)));
        assert_eq!(find_scalar_and_chromatic_transposition(&motions([1, 0, 0]), 12), None);
        assert_eq!(find_scalar_and_chromatic_transposition(&[], 12), None);
    }

    #[test]
    fn test_scalar_and_chromatic_transposition() {
        assert_eq!(scalar_and_chromatic_transposition(&[0, 4, 7], 1, 1, 12), vec![5, 4, 6]);
        assert_eq!(scalar_and_chromatic_transposition(&[0, 4, 7], 2, -1, 12), vec![6, 7, 8]);
        assert_eq!(scalar_and_chromatic_transposition(&[0, 4, 7], 4, 0, 12), vec![16, 15, 17]);
        assert!(scalar_and_chromatic_transposition(&[], 1, 0, 12).is_empty());

        let motions: Vec<VoiceMotion> = [0, 4, 7]
            .iter()
            .zip(scalar_and_chromatic_transposition(&[0, 4, 7], 2, 3, 12))
            .map(|(&p, d)| VoiceMotion::new(p, d))
            .collect();
        assert_eq!(find_scalar_and_chromatic_transposition(&motions, 12), Some((2, 3)));
    }

    #[test]
    fn test_interscalar_matrix_fixed_form() {
        let m = interscalar_matrix(&[0, 4, 7], &[0, 4, 7], true, 12).unwrap();
        assert_eq!(m[0], vec![0, 0, 0]);
        assert_eq!(m[1], vec![4, 3, 5]);
    }
}
