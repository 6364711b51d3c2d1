//! Modular arithmetic helpers
//!
//! Every other module reduces pitches through these functions, so they all
//! take the modulus explicitly. Pitches are plain integers (MIDI numbers in
//! the usual 12-tone setting); pitch classes are their residues in
//! `[0, modulus)`.

/// A chromatic pitch: a step count from some reference, with no modulus
pub type Pitch = i32;

/// Default number of steps per octave
pub const DEFAULT_MODULUS: i32 = 12;

/// Reduce a pitch to its pitch class
pub fn pc(pitch: Pitch, modulus: i32) -> i32 {
    pitch.rem_euclid(modulus)
}

/// Reduce every pitch of a chord to its pitch class, keeping voice order
pub fn pcs(pitches: &[Pitch], modulus: i32) -> Vec<i32> {
    pitches.iter().map(|&p| pc(p, modulus)).collect()
}

/// Reduce a chord to its pitch classes in ascending order
pub fn sorted_pcs(pitches: &[Pitch], modulus: i32) -> Vec<i32> {
    let mut out = pcs(pitches, modulus);
    out.sort_unstable();
    out
}

/// Shortest distance between two pitch classes, in either direction
pub fn pc_distance(first: i32, second: i32, modulus: i32) -> i32 {
    (first - second)
        .rem_euclid(modulus)
        .min((second - first).rem_euclid(modulus))
}

/// Total voice-leading size of a voice-to-voice pairing, measured as summed
/// shortest modular distances. Extra voices in the longer chord are ignored.
pub fn simple_vl_size(first: &[i32], second: &[i32], modulus: i32) -> i32 {
    first
        .iter()
        .zip(second)
        .map(|(&a, &b)| pc_distance(a, b, modulus))
        .sum()
}

/// Interval-class vector of a set: entry `k` counts pairs at distance `k + 1`
pub fn interval_vector(set: &[i32], modulus: i32) -> Vec<usize> {
    let mut output = vec![0; (modulus / 2) as usize];
    for i in 0..set.len() {
        for j in (i + 1)..set.len() {
            let distance = pc_distance(set[i], set[j], modulus);
            if distance > 0 {
                output[(distance - 1) as usize] += 1;
            }
        }
    }
    output
}

/// Interval-class vector counting every pair with one note from each chord
pub fn interchord_interval_vector(first: &[i32], second: &[i32], modulus: i32) -> Vec<usize> {
    let mut output = vec![0; (modulus / 2) as usize];
    for &a in first {
        for &b in second {
            let distance = pc_distance(a, b, modulus);
            if distance > 0 {
                output[(distance - 1) as usize] += 1;
            }
        }
    }
    output
}

/// Number of transpositions of `subset` whose pitch classes all lie in `set`
pub fn subset_count(set: &[i32], subset: &[i32], modulus: i32) -> usize {
    (0..modulus)
        .filter(|&t| {
            subset
                .iter()
                .all(|&x| set.iter().any(|&s| pc(s, modulus) == pc(x + t, modulus)))
        })
        .count()
}

/// Matrix of the intervals spanned by `k` scale steps from each scale degree.
///
/// Row `i` lists, for each degree `j`, the distance from degree `j` up to
/// degree `j + i` (wrapping through the octave).
pub fn scale_matrix(scale: &[i32], modulus: i32) -> Vec<Vec<i32>> {
    let len = scale.len();
    let extended: Vec<i32> = scale
        .iter()
        .copied()
        .chain(scale.iter().map(|&x| x + modulus))
        .collect();
    (0..len)
        .map(|i| (0..len).map(|j| extended[i + j] - extended[j]).collect())
        .collect()
}
