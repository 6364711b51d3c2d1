//! Canonical forms of pitch-class collections
//!
//! Two families live here:
//!
//! - the *geometric* normal form, which compares the cyclic list of gaps
//!   between successive pitch classes and keeps the lexicographically smallest
//!   rotation (so the smallest interval comes first), optionally also trying
//!   the reflection;
//! - the *standard* normal form, which compares whole rotations of the
//!   pitch-class list from the last element backwards, the most compact
//!   rotation winning.
//!
//! Neither keeps any state between calls; auxiliary results (transposition,
//! inversion) come back in [`NormalForm`].

use crate::modular::{Pitch, pc};
use crate::voice_leading::VoiceMotion;
use std::collections::BTreeSet;

/// Geometric normal form of a chord.
///
/// Duplicated pitch classes are kept (they show up as zero gaps), a singleton
/// yields `[0]`, and an empty chord yields an empty form.
///
/// # Examples
///
/// ```
/// use chordspace_core::canonical::canonical_form;
///
/// assert_eq!(canonical_form(&[60, 64, 67], false, 12), vec![0, 3, 8]);
/// assert_eq!(canonical_form(&[60, 64, 67], true, 12), vec![0, 3, 7]);
/// ```
pub fn canonical_form(pitches: &[Pitch], invert: bool, modulus: i32) -> Vec<i32> {
    canonical_form_rotated(pitches, invert, modulus, 0)
}

/// Geometric normal form, optionally rotated to the `extra_rotations`-th
/// other rotation that also begins with the smallest gap.
///
/// The count wraps around the number of gaps equal to the smallest one, so
/// any value is valid.
pub fn canonical_form_rotated(
    pitches: &[Pitch],
    invert: bool,
    modulus: i32,
    extra_rotations: usize,
) -> Vec<i32> {
    if pitches.is_empty() {
        return Vec::new();
    }

    let mut best = smallest_rotation(gaps(pitches, modulus));

    if invert {
        let mut reflection = Vec::with_capacity(best.len());
        reflection.push(best[0]);
        reflection.extend(best[1..].iter().rev());
        let reflected = smallest_rotation(reflection);
        if reflected < best {
            best = reflected;
        }
    }

    if extra_rotations > 0 {
        let min_gap = best[0];
        let ties = best.iter().filter(|&&g| g == min_gap).count();
        let wanted = extra_rotations % ties;
        let mut index = 0;
        let mut count = 0;
        while count < wanted {
            index = (index + 1) % best.len();
            if best[index] == min_gap {
                count += 1;
            }
        }
        best.rotate_left(index);
    }

    cumulative(&best)
}

/// Pitch classes measured up from the first voice, sorted, with no search
/// over rotations. Used where only transposition needs factoring out.
pub fn transposition_form(pitches: &[Pitch], modulus: i32) -> Vec<i32> {
    let Some(&first) = pitches.first() else {
        return Vec::new();
    };
    let mut out: Vec<i32> = pitches.iter().map(|&p| pc(p - first, modulus)).collect();
    out.sort_unstable();
    out
}

/// Sorted pitch offsets whose sum fits within one modulus.
///
/// Pitches above the modulus are reduced, then the highest element is
/// repeatedly wrapped below the lowest (minus one modulus) until the total no
/// longer exceeds the modulus. The cumulative sum is never reduced, which
/// keeps the offsets usable as absolute voice-leading positions.
pub fn voice_leading_region_form(pitches: &[Pitch], modulus: i32) -> Vec<i32> {
    let mut out: Vec<i32> = pitches
        .iter()
        .map(|&k| if k > modulus { pc(k, modulus) } else { k })
        .collect();
    out.sort_unstable();
    while !out.is_empty() && out.iter().sum::<i32>() > modulus {
        out.rotate_right(1);
        out[0] -= modulus;
    }
    out
}

/// Cyclic gap list of a chord measured from its first pitch
fn gaps(pitches: &[Pitch], modulus: i32) -> Vec<i32> {
    let zeroed = transposition_form(pitches, modulus);
    let mut out: Vec<i32> = zeroed.windows(2).map(|w| w[1] - w[0]).collect();
    out.push(modulus - zeroed[zeroed.len() - 1]);
    out
}

/// Lexicographically smallest rotation; earlier rotations win ties
fn smallest_rotation(start: Vec<i32>) -> Vec<i32> {
    let mut best = start.clone();
    let mut challenger = start;
    for _ in 1..challenger.len() {
        challenger.rotate_left(1);
        if challenger < best {
            best = challenger.clone();
        }
    }
    best
}

/// Positions reached by summing every gap but the closing one, from zero
fn cumulative(gaps: &[i32]) -> Vec<i32> {
    let mut out = Vec::with_capacity(gaps.len());
    out.push(0);
    for &gap in &gaps[..gaps.len() - 1] {
        let last = out[out.len() - 1];
        out.push(last + gap);
    }
    out
}

/// Standard normal form together with how the input maps onto it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalForm {
    pub pcs: Vec<i32>,
    /// `t` such that `(pc + t) mod m` (or `(t - pc) mod m` when `inverted`)
    /// lands every input pitch class on the form
    pub transposition: i32,
    pub inverted: bool,
}

/// Standard normal form: the rotation whose last element (then second-last,
/// and so on) is smallest once zeroed on its first element.
pub fn normal_form(
    pitches: &[Pitch],
    invert: bool,
    remove_duplicates: bool,
    modulus: i32,
) -> NormalForm {
    let mut classes: Vec<i32> = pitches.iter().map(|&p| pc(p, modulus)).collect();
    classes.sort_unstable();
    if remove_duplicates {
        classes.dedup();
    }
    if classes.is_empty() {
        return NormalForm {
            pcs: Vec::new(),
            transposition: 0,
            inverted: false,
        };
    }

    let n = classes.len();
    let mut best: Vec<i32> = classes.iter().map(|&k| k - classes[0]).collect();
    let mut transposition = pc(-classes[0], modulus);
    let mut inverted = false;

    let mut challenger = best.clone();
    for &next_bass in &classes[1..] {
        let head = challenger[0];
        challenger.rotate_left(1);
        challenger[n - 1] = head + modulus;
        let zero = challenger[0];
        challenger.iter_mut().for_each(|k| *k -= zero);
        if more_compact(&challenger, &best) {
            best = challenger.clone();
            transposition = pc(-next_bass, modulus);
        }
    }

    if invert {
        let mut mirrored: Vec<i32> = classes.iter().map(|&k| pc(-k, modulus)).collect();
        mirrored.sort_unstable();
        let base = mirrored[0];
        let mirrored: Vec<i32> = mirrored.iter().map(|&k| k - base).collect();
        for i in 0..n {
            let start = mirrored[(n - i) % n];
            let mut candidate: Vec<i32> = mirrored.iter().map(|&k| pc(k - start, modulus)).collect();
            candidate.sort_unstable();
            if more_compact(&candidate, &best) {
                best = candidate;
                transposition = pc(-base - start, modulus);
                inverted = true;
            }
        }
    }

    NormalForm {
        pcs: best,
        transposition,
        inverted,
    }
}

/// Compare from the right: the first differing element from the end decides
fn more_compact(challenger: &[i32], best: &[i32]) -> bool {
    for j in (0..best.len()).rev() {
        if challenger[j] < best[j] {
            return true;
        }
        if challenger[j] > best[j] {
            return false;
        }
    }
    false
}

/// Standard normal form of a voice leading, comparing motions by their
/// starting pitch classes. Returns the normalized motions and the
/// transposition that produced them.
pub fn vl_normal_form(motions: &[VoiceMotion], modulus: i32) -> (Vec<VoiceMotion>, i32) {
    let mut sorted: Vec<VoiceMotion> = motions
        .iter()
        .map(|m| VoiceMotion::new(pc(m.pc, modulus), m.delta))
        .collect();
    sorted.sort();
    let Some(first) = sorted.first().copied() else {
        return (Vec::new(), 0);
    };

    let zero_on = |list: &[VoiceMotion], base: i32| -> Vec<VoiceMotion> {
        let mut out: Vec<VoiceMotion> = list
            .iter()
            .map(|m| VoiceMotion::new(pc(m.pc - base, modulus), m.delta))
            .collect();
        out.sort();
        out
    };

    let n = sorted.len();
    let mut best = zero_on(&sorted, first.pc);
    let mut transposition = pc(-first.pc, modulus);
    for i in 1..n {
        let base = sorted[n - i].pc;
        let challenger = zero_on(&sorted, base);
        let challenger_pcs: Vec<i32> = challenger.iter().map(|m| m.pc).collect();
        let best_pcs: Vec<i32> = best.iter().map(|m| m.pc).collect();
        if more_compact(&challenger_pcs, &best_pcs) {
            best = challenger;
            transposition = pc(-base, modulus);
        }
    }
    (best, transposition)
}

/// Every distinct standard normal form of `set_size` pitch classes drawn
/// from a `scale_size`-note universe
pub fn set_classes(scale_size: i32, set_size: usize, invert: bool) -> BTreeSet<Vec<i32>> {
    let mut out = BTreeSet::new();
    let mut combo: Vec<i32> = Vec::with_capacity(set_size);
    collect_combinations(0, scale_size, set_size, &mut combo, &mut |set| {
        out.insert(normal_form(set, invert, false, scale_size).pcs);
    });
    out
}

fn collect_combinations(
    start: i32,
    universe: i32,
    size: usize,
    combo: &mut Vec<i32>,
    visit: &mut impl FnMut(&[i32]),
) {
    if combo.len() == size {
        visit(combo);
        return;
    }
    for k in start..universe {
        combo.push(k);
        collect_combinations(k + 1, universe, size, combo, visit);
        combo.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_triad_geometric_form() {
        assert_eq!(canonical_form(&[60, 64, 67], false, 12), vec![0, 3, 8]);
    }

    #[test]
    fn test_geometric_form_ignores_transposition_and_voicing() {
        let reference = canonical_form(&[60, 64, 67], false, 12);
        for shift in 0..12 {
            assert_eq!(canonical_form(&[64 + shift, 67 + shift, 72 + shift], false, 12), reference);
            assert_eq!(canonical_form(&[55 + shift, 76 + shift, 60 + shift], false, 12), reference);
        }
    }

    #[test]
    fn test_inversion_merges_major_and_minor() {
        let major = canonical_form(&[60, 64, 67], true, 12);
        let minor = canonical_form(&[60, 63, 67], true, 12);
        assert_eq!(major, minor);
        assert_eq!(major, vec![0, 3, 7]);
    }

    #[test]
    fn test_inverted_form_never_exceeds_plain_form() {
        let chords: [&[i32]; 5] = [
            &[60, 64, 67],
            &[60, 62, 63, 67],
            &[0, 1, 4, 6],
            &[0, 1, 3, 7],
            &[2, 5, 9, 11, 0],
        ];
        for chord in chords {
            assert!(canonical_form(chord, true, 12) <= canonical_form(chord, false, 12));
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(canonical_form(&[61], false, 12), vec![0]);
        assert_eq!(canonical_form(&[60, 72, 48], false, 12), vec![0, 0, 0]);
        assert_eq!(canonical_form(&[60, 60, 64], false, 12), vec![0, 0, 4]);
        assert!(canonical_form(&[], true, 12).is_empty());
    }

    #[test]
    fn test_extra_rotations_cycle_through_smallest_gaps() {
        // augmented triad: every gap is 4, so every rotation is equivalent
        assert_eq!(canonical_form_rotated(&[0, 4, 8], false, 12, 2), vec![0, 4, 8]);
        // dominant seventh: a single smallest gap, so every count wraps home
        let plain = canonical_form(&[7, 11, 2, 5], false, 12);
        assert_eq!(plain, vec![0, 2, 6, 9]);
        assert_eq!(canonical_form_rotated(&[7, 11, 2, 5], false, 12, 1), plain);
        // gaps [1, 1, 4, 6]: the second semitone can start the form instead
        assert_eq!(canonical_form(&[0, 1, 2, 6], false, 12), vec![0, 1, 2, 6]);
        assert_eq!(canonical_form_rotated(&[0, 1, 2, 6], false, 12, 1), vec![0, 1, 5, 11]);
    }

    #[test]
    fn test_transposition_form_measures_from_first_voice() {
        assert_eq!(transposition_form(&[64, 60, 67], 12), vec![0, 3, 8]);
        assert!(transposition_form(&[], 12).is_empty());
    }

    #[test]
    fn test_voice_leading_region_form() {
        assert_eq!(voice_leading_region_form(&[0, 1, 2], 12), vec![0, 1, 2]);
        assert_eq!(voice_leading_region_form(&[4, 7, 12], 12), vec![0, 4, 7]);
        assert_eq!(voice_leading_region_form(&[5, 9, 12], 12), vec![-3, 0, 5]);
    }

    #[test]
    fn test_standard_normal_form() {
        let nf = normal_form(&[67, 60, 64], false, false, 12);
        assert_eq!(nf.pcs, vec![0, 4, 7]);
        assert_eq!(nf.transposition, 0);
        assert!(!nf.inverted);

        let nf = normal_form(&[62, 66, 69], false, false, 12);
        assert_eq!(nf.pcs, vec![0, 4, 7]);
        assert_eq!(nf.transposition, 10);
    }

    #[test]
    fn test_standard_normal_form_with_inversion() {
        let nf = normal_form(&[60, 63, 67], true, false, 12);
        assert_eq!(nf.pcs, vec![0, 3, 7]);
        assert!(!nf.inverted);

        let nf = normal_form(&[60, 64, 67], true, false, 12);
        assert_eq!(nf.pcs, vec![0, 3, 7]);
        assert!(nf.inverted);
        for p in [60, 64, 67] {
            assert!(nf.pcs.contains(&pc(nf.transposition - p, 12)));
        }
    }

    #[test]
    fn test_remove_duplicates() {
        let nf = normal_form(&[60, 72, 64, 67], false, true, 12);
        assert_eq!(nf.pcs, vec![0, 4, 7]);
    }

    #[test]
    fn test_vl_normal_form() {
        let motions = vec![VoiceMotion::new(7, 2), VoiceMotion::new(2, 1), VoiceMotion::new(11, 1)];
        let (form, transposition) = vl_normal_form(&motions, 12);
        let pcs: Vec<i32> = form.iter().map(|m| m.pc).collect();
        // G major triad, measured from G
        assert_eq!(pcs, vec![0, 4, 7]);
        assert_eq!(transposition, 5);
        assert_eq!(form[0], VoiceMotion::new(0, 2));
    }

    #[test]
    fn test_trichord_set_classes() {
        let classes = set_classes(12, 3, true);
        assert_eq!(classes.len(), 12);
        assert!(classes.contains(&vec![0, 3, 7]));
        assert!(classes.contains(&vec![0, 1, 2]));
        assert_eq!(set_classes(12, 3, false).len(), 19);
    }
}
