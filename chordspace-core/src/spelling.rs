//! Chromatic spelling
//!
//! Assigns every pitch class of a set a letter name and accidental. Fixed
//! spellings and a few hand-picked patterns come first, then constraint
//! propagation over the remaining letters, then a greedy cheapest-first pass.
//! Spellings with awkward adjacent intervals get a repair pass that tries
//! all-sharp and all-flat alternatives.
//!
//! Spelling always works in twelve-tone equal temperament.

use crate::config::{AccidentalBias, SpellerConfig};
use crate::diagnostic::{Diagnostic, report};
use crate::modular::Pitch;
use anyhow::{Result, anyhow};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "colored")]
use colored::*;

/// Pitch class of each natural letter, C through B
pub const LETTER_PCS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

pub const UPPERCASE_LETTERS: &str = "CDEFGAB";
pub const LOWERCASE_LETTERS: &str = "cdefgab";

/// A letter index (0 = C .. 6 = B) and a signed accidental count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spelling {
    pub letter: u8,
    pub alteration: i8,
}

/// Notational cost of a spelling; naturals are free
pub type Cost = u32;

const fn sp(letter: u8, alteration: i8) -> Spelling {
    Spelling { letter, alteration }
}

impl Spelling {
    pub fn new(letter: u8, alteration: i8) -> Result<Self> {
        if letter > 6 {
            return Err(anyhow!("Letter index must be 0-6, got {}", letter));
        }
        Ok(sp(letter, alteration))
    }

    /// Spell `pc` on `letter`, choosing the smallest alteration
    pub fn on_letter(pc: i32, letter: u8) -> Result<Self> {
        let natural = *LETTER_PCS
            .get(letter as usize)
            .ok_or_else(|| anyhow!("Letter index must be 0-6, got {}", letter))?;
        let alteration = (pc - natural + 6).rem_euclid(12) - 6;
        Ok(sp(letter, alteration as i8))
    }

    pub fn pc(&self) -> i32 {
        (LETTER_PCS[self.letter as usize] + self.alteration as i32).rem_euclid(12)
    }

    /// Render with the given seven letter glyphs
    pub fn render(&self, letters: &str, courtesy_naturals: bool) -> String {
        let letter = letters.chars().nth(self.letter as usize).unwrap_or('?');
        let accidental = match self.alteration {
            0 if courtesy_naturals => "n".to_string(),
            0 => String::new(),
            a if a > 0 => "#".repeat(a as usize),
            a => "b".repeat(a.unsigned_abs() as usize),
        };
        format!("{}{}", letter, accidental)
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(UPPERCASE_LETTERS, false))
    }
}

/// Candidate spellings per pitch class with their costs. The first entry of
/// a single-option class is its only spelling.
pub const POSSIBLE_SPELLINGS: [&[(Spelling, Cost)]; 12] = [
    &[(sp(6, 1), 7), (sp(0, 0), 0)],
    &[(sp(0, 1), 2), (sp(1, -1), 4)],
    &[(sp(1, 0), 0)],
    &[(sp(1, 1), 4), (sp(2, -1), 2)],
    &[(sp(2, 0), 0), (sp(3, -1), 7)],
    &[(sp(2, 1), 6), (sp(3, 0), 0)],
    &[(sp(3, 1), 1), (sp(4, -1), 5)],
    &[(sp(4, 0), 0)],
    &[(sp(4, 1), 3), (sp(5, -1), 3)],
    &[(sp(5, 0), 0)],
    &[(sp(5, 1), 5), (sp(6, -1), 1)],
    &[(sp(6, 0), 0), (sp(0, -1), 6)],
];

/// Greedy order: classes whose two options differ most in cost commit
/// first; options cheapest first.
pub const SPELLINGS_BY_COST: [(i32, [(Spelling, Cost); 2]); 9] = [
    (0, [(sp(0, 0), 0), (sp(6, 1), 7)]),
    (4, [(sp(2, 0), 0), (sp(3, -1), 7)]),
    (5, [(sp(3, 0), 0), (sp(2, 1), 6)]),
    (11, [(sp(6, 0), 0), (sp(0, -1), 6)]),
    (6, [(sp(3, 1), 1), (sp(4, -1), 5)]),
    (10, [(sp(6, -1), 1), (sp(5, 1), 5)]),
    (1, [(sp(0, 1), 2), (sp(1, -1), 4)]),
    (3, [(sp(2, -1), 2), (sp(1, 1), 4)]),
    (8, [(sp(4, 1), 3), (sp(5, -1), 3)]),
];

/// Pitch classes with exactly one spelling (D, G, A)
pub const SINGLE_SPELLING_PCS: [i32; 3] = [2, 7, 9];

/// Sets containing every class of a pattern get its spellings up front
const FIXED_PATTERNS: [(&[i32], &[(i32, Spelling)]); 4] = [
    (&[4, 5], &[(4, sp(2, 0)), (5, sp(3, 0))]),
    (&[0, 11], &[(0, sp(0, 0)), (11, sp(6, 0))]),
    (&[2, 3, 4], &[(2, sp(1, 0)), (4, sp(2, 0))]),
    (&[9, 10, 11], &[(9, sp(5, 0)), (11, sp(6, 0))]),
];

/// Every black key spelled sharp, white keys natural
pub const SHARP_BLACK: [(Spelling, Cost); 12] = [
    (sp(0, 0), 0),
    (sp(0, 1), 2),
    (sp(1, 0), 0),
    (sp(1, 1), 4),
    (sp(2, 0), 0),
    (sp(3, 0), 0),
    (sp(3, 1), 1),
    (sp(4, 0), 0),
    (sp(4, 1), 3),
    (sp(5, 0), 0),
    (sp(5, 1), 5),
    (sp(6, 0), 0),
];

/// Every black key spelled flat, white keys natural
pub const FLAT_BLACK: [(Spelling, Cost); 12] = [
    (sp(0, 0), 0),
    (sp(1, -1), 4),
    (sp(1, 0), 0),
    (sp(2, -1), 2),
    (sp(2, 0), 0),
    (sp(3, 0), 0),
    (sp(4, -1), 5),
    (sp(4, 0), 0),
    (sp(5, -1), 3),
    (sp(5, 0), 0),
    (sp(6, -1), 1),
    (sp(6, 0), 0),
];

/// White keys respelled with sharps: B#, E#
pub const SHARP_WHITE: [(i32, Spelling, Cost); 2] = [(0, sp(6, 1), 7), (5, sp(2, 1), 6)];

/// White keys respelled with flats: Fb, Cb
pub const FLAT_WHITE: [(i32, Spelling, Cost); 2] = [(4, sp(3, -1), 7), (11, sp(0, -1), 6)];

/// Awkward (chromatic distance, letter distance) pairs between neighbours
pub const PROBLEM_INTERVALS: [((i32, i32), f64); 8] = [
    ((1, 0), 1.0),
    ((3, 1), 0.25),
    ((2, 2), 2.0),
    ((4, 3), 2.0),
    ((4, 1), 2.0),
    ((5, 2), 2.0),
    ((7, 5), 2.0),
    ((7, 3), 2.0),
];

/// Fallback names for classes missing from a spelling
pub const DEFAULT_PITCH_NAMES: [&str; 12] = [
    "c", "c#", "d", "eb", "e", "f", "f#", "g", "g#", "a", "bb", "b",
];

/// The outcome of spelling one pitch-class set
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChromaticSpelling {
    spellings: BTreeMap<i32, Spelling>,
    cost: Cost,
    problem_score: f64,
    repaired: Option<AccidentalBias>,
    courtesy_naturals: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ChromaticSpelling {
    pub fn get(&self, pc: i32) -> Option<Spelling> {
        self.spellings.get(&pc.rem_euclid(12)).copied()
    }

    /// Spellings keyed by pitch class, ascending
    pub fn spellings(&self) -> &BTreeMap<i32, Spelling> {
        &self.spellings
    }

    /// Cost of the greedy spelling before any repair
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Problem score of the greedy spelling before any repair
    pub fn problem_score(&self) -> f64 {
        self.problem_score
    }

    /// Which respelling replaced the greedy result, if any
    pub fn repaired(&self) -> Option<AccidentalBias> {
        self.repaired
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Space-separated names in pitch-class order, e.g. `C# E G#`
    pub fn as_string(&self) -> String {
        self.spellings
            .values()
            .map(|s| s.render(UPPERCASE_LETTERS, self.courtesy_naturals))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lowercase `name/octave` strings for MIDI pitches (middle C is `c/4`).
    ///
    /// B# belongs to the octave below its pitch number and Cb to the one above.
    pub fn render_pitches(&self, pitches: &[Pitch]) -> Vec<String> {
        pitches
            .iter()
            .map(|&p| {
                let mut octave = p.div_euclid(12) - 1;
                let pc = p.rem_euclid(12);
                let name = match self.spellings.get(&pc) {
                    Some(s) => s.render(LOWERCASE_LETTERS, self.courtesy_naturals),
                    None => DEFAULT_PITCH_NAMES[pc as usize].to_string(),
                };
                if name.starts_with("b#") {
                    octave -= 1;
                } else if name.starts_with("cb") {
                    octave += 1;
                }
                format!("{}/{}", name, octave)
            })
            .collect()
    }
}

impl fmt::Display for ChromaticSpelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .spellings
            .values()
            .map(|s| {
                let name = s.render(UPPERCASE_LETTERS, self.courtesy_naturals);
                #[cfg(feature = "colored")]
                let name = match s.alteration {
                    0 => name.normal().to_string(),
                    a if a.abs() > 1 => name.red().to_string(),
                    _ => name.yellow().to_string(),
                };
                name
            })
            .collect();
        write!(f, "{}", names.join(" "))
    }
}

/// Spells pitch-class sets under a fixed [`SpellerConfig`]
#[derive(Debug, Clone, Default)]
pub struct ChromaticSpeller {
    config: SpellerConfig,
}

impl ChromaticSpeller {
    pub fn new(config: SpellerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpellerConfig {
        &self.config
    }

    /// Spell the pitch classes of `pitches`; order and octave are ignored
    pub fn spell(&self, pitches: &[Pitch]) -> ChromaticSpelling {
        let sorted: Vec<i32> = pitches
            .iter()
            .map(|p| p.rem_euclid(12))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut diagnostics = Vec::new();

        let mut assigned: BTreeMap<i32, Spelling> = BTreeMap::new();
        for &p in sorted.iter().filter(|p| SINGLE_SPELLING_PCS.contains(*p)) {
            assigned.insert(p, POSSIBLE_SPELLINGS[p as usize][0].0);
        }
        for (pattern, fixed) in FIXED_PATTERNS {
            if pattern.iter().all(|p| sorted.contains(p)) {
                for &(p, spelling) in fixed {
                    assigned.insert(p, spelling);
                }
            }
        }

        let mut cost = propagate(&sorted, &mut assigned);
        cost += assign_greedily(&sorted, &mut assigned);

        if sorted.is_empty() || sorted.iter().any(|p| !assigned.contains_key(p)) {
            report(&mut diagnostics, Diagnostic::SpellingFailed { pcs: sorted });
            return ChromaticSpelling {
                spellings: BTreeMap::new(),
                cost: 0,
                problem_score: 0.0,
                repaired: None,
                courtesy_naturals: self.config.courtesy_naturals,
                diagnostics,
            };
        }

        let problem_score = problem_score(&sorted, &assigned);
        let mut repaired = None;
        if problem_score > 0.0 {
            if let Some((respelled, bias)) = self.repair(&sorted, &assigned, cost, problem_score) {
                assigned = respelled;
                repaired = Some(bias);
            }
        }

        ChromaticSpelling {
            spellings: assigned,
            cost,
            problem_score,
            repaired,
            courtesy_naturals: self.config.courtesy_naturals,
            diagnostics,
        }
    }

    /// Spell the set formed by `pitches` and render each pitch as `name/octave`
    pub fn spell_pitches(&self, pitches: &[Pitch]) -> Vec<String> {
        if pitches.is_empty() {
            return Vec::new();
        }
        self.spell(pitches).render_pitches(pitches)
    }

    /// Try sharp and flat respellings of a spelling with problem intervals.
    ///
    /// Black keys are respelled first; white keys only when both black-key
    /// candidates still have problems and the white respelling beats the
    /// original score by more than the configured penalty.
    fn repair(
        &self,
        sorted: &[i32],
        original: &BTreeMap<i32, Spelling>,
        original_cost: Cost,
        original_score: f64,
    ) -> Option<(BTreeMap<i32, Spelling>, AccidentalBias)> {
        let penalty = self.config.respell_white_note_penalty;
        let bias = self.config.default_bias;

        let (mut sharp, mut sharp_cost) = respell(original, |p| Some(SHARP_BLACK[p as usize]));
        let mut sharp_problem = problem_score(sorted, &sharp);
        let (mut flat, mut flat_cost) = respell(original, |p| Some(FLAT_BLACK[p as usize]));
        let mut flat_problem = problem_score(sorted, &flat);

        if sharp_problem > 0.0 && flat_problem > 0.0 {
            let (sharp_white, white_cost) = respell(&sharp, |p| white_lookup(&SHARP_WHITE, p));
            let white_problem = problem_score(sorted, &sharp_white);
            if white_problem + penalty < original_score {
                sharp = sharp_white;
                sharp_cost += white_cost;
                sharp_problem = white_problem;
            }
            let (flat_white, white_cost) = respell(&flat, |p| white_lookup(&FLAT_WHITE, p));
            let white_problem = problem_score(sorted, &flat_white);
            if white_problem + penalty < original_score {
                flat = flat_white;
                flat_cost += white_cost;
                flat_problem = white_problem;
            }
        }

        log::debug!(
            "respelling candidates: sharp cost {} problem {}, flat cost {} problem {}",
            sharp_cost,
            sharp_problem,
            flat_cost,
            flat_problem
        );

        let leans_sharp = bias == Some(AccidentalBias::Sharp);
        if (sharp_problem < flat_problem || (sharp_problem == flat_problem && leans_sharp))
            && sharp_problem < original_score
        {
            return Some((sharp, AccidentalBias::Sharp));
        }
        if (flat_problem < sharp_problem || (flat_problem == sharp_problem && !leans_sharp))
            && flat_problem < original_score
        {
            return Some((flat, AccidentalBias::Flat));
        }

        // neither candidate helps; fall back on notational cost
        let original_cheapest = original_cost < sharp_cost && original_cost < flat_cost;
        let all_tied = original_cost == sharp_cost && sharp_cost == flat_cost && bias.is_none();
        if original_cheapest || all_tied {
            return None;
        }
        if sharp_cost < flat_cost || (sharp_cost == flat_cost && leans_sharp) {
            Some((sharp, AccidentalBias::Sharp))
        } else {
            Some((flat, AccidentalBias::Flat))
        }
    }
}

/// Force spellings on classes whose open letters have narrowed to one.
///
/// Letters in use are collected once per pass; passes repeat until nothing
/// changes. Returns the cost of the forced spellings.
fn propagate(sorted: &[i32], assigned: &mut BTreeMap<i32, Spelling>) -> Cost {
    let mut cost = 0;
    loop {
        let used: BTreeSet<u8> = assigned.values().map(|s| s.letter).collect();
        let mut changed = false;
        for &p in sorted {
            if assigned.contains_key(&p) {
                continue;
            }
            let open: Vec<&(Spelling, Cost)> = POSSIBLE_SPELLINGS[p as usize]
                .iter()
                .filter(|(s, _)| !used.contains(&s.letter))
                .collect();
            if let [(spelling, c)] = open.as_slice() {
                assigned.insert(p, *spelling);
                cost += *c;
                changed = true;
            }
        }
        if !changed {
            return cost;
        }
    }
}

/// Cheapest free letter per class in [`SPELLINGS_BY_COST`] order; when both
/// letters are taken the cheaper option is used anyway.
fn assign_greedily(sorted: &[i32], assigned: &mut BTreeMap<i32, Spelling>) -> Cost {
    let mut letters: BTreeSet<u8> = assigned.values().map(|s| s.letter).collect();
    let mut cost = 0;
    for (p, options) in &SPELLINGS_BY_COST {
        if !sorted.contains(p) || assigned.contains_key(p) {
            continue;
        }
        let (spelling, c) = options
            .iter()
            .find(|(s, _)| !letters.contains(&s.letter))
            .copied()
            .unwrap_or(options[0]);
        assigned.insert(*p, spelling);
        letters.insert(spelling.letter);
        cost += c;
    }
    cost
}

/// Sum of [`PROBLEM_INTERVALS`] weights between each class and the one below
/// it (cyclically). Classes inside a chromatic cluster are not counted.
pub fn problem_score(sorted: &[i32], spelling: &BTreeMap<i32, Spelling>) -> f64 {
    let n = sorted.len();
    let mut score = 0.0;
    for (i, &p) in sorted.iter().enumerate() {
        let lower = sorted[(i + n - 1) % n];
        let upper = sorted[(i + 1) % n];
        if lower == (p - 1).rem_euclid(12) && upper == (p + 1).rem_euclid(12) {
            continue;
        }
        let (Some(current), Some(below)) = (spelling.get(&p), spelling.get(&lower)) else {
            continue;
        };
        let interval = (
            (p - lower).rem_euclid(12),
            (current.letter as i32 - below.letter as i32).rem_euclid(7),
        );
        score += PROBLEM_INTERVALS
            .iter()
            .find(|(d, _)| *d == interval)
            .map_or(0.0, |(_, w)| *w);
    }
    score
}

fn respell(
    spelling: &BTreeMap<i32, Spelling>,
    table: impl Fn(i32) -> Option<(Spelling, Cost)>,
) -> (BTreeMap<i32, Spelling>, Cost) {
    let mut cost = 0;
    let respelled = spelling
        .iter()
        .map(|(&p, &current)| match table(p) {
            Some((s, c)) => {
                cost += c;
                (p, s)
            }
            None => (p, current),
        })
        .collect();
    (respelled, cost)
}

fn white_lookup(table: &[(i32, Spelling, Cost)], pc: i32) -> Option<(Spelling, Cost)> {
    table
        .iter()
        .find(|(p, _, _)| *p == pc)
        .map(|&(_, s, c)| (s, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(pcs: &[i32]) -> ChromaticSpelling {
        ChromaticSpeller::default().spell(pcs)
    }

    #[test]
    fn test_tables_are_consistent() {
        for (pc, options) in POSSIBLE_SPELLINGS.iter().enumerate() {
            for (s, _) in options.iter() {
                assert_eq!(s.pc(), pc as i32);
            }
        }
        for (p, options) in SPELLINGS_BY_COST.iter() {
            assert!(options.iter().all(|(s, _)| s.pc() == *p));
            assert!(options[0].1 <= options[1].1);
        }
        for (pc, (s, _)) in SHARP_BLACK.iter().chain(FLAT_BLACK.iter()).enumerate() {
            assert_eq!(s.pc(), (pc % 12) as i32);
        }
    }

    #[test]
    fn test_major_triad() {
        let s = spell(&[60, 64, 67]);
        assert_eq!(s.as_string(), "C E G");
        assert!(s.spellings().values().all(|sp| sp.alteration == 0));
        assert!(s.is_complete());
    }

    #[test]
    fn test_every_spelling_matches_its_pitch_class() {
        for set in [vec![1, 4, 8], vec![0, 1, 2, 3], vec![3, 6, 10], vec![5, 8, 11, 2]] {
            let s = spell(&set);
            for p in &set {
                assert_eq!(s.get(*p).unwrap().pc(), *p);
            }
        }
    }

    #[test]
    fn test_sharp_key_triad() {
        assert_eq!(spell(&[1, 4, 8]).as_string(), "C# E G#");
    }

    #[test]
    fn test_bias_breaks_ties() {
        let s = spell(&[1, 10]);
        assert_eq!(s.problem_score(), 0.25);
        assert_eq!(s.as_string(), "Db Bb");
        assert_eq!(s.repaired(), Some(AccidentalBias::Flat));

        let speller = ChromaticSpeller::new(SpellerConfig::default().with_bias(Some(AccidentalBias::Sharp)));
        assert_eq!(speller.spell(&[1, 10]).as_string(), "C# A#");
    }

    #[test]
    fn test_cluster_repaired_with_sharp() {
        // D Eb E has a unison-letter half step; D D# E does not
        let s = spell(&[2, 3, 4]);
        assert_eq!(s.problem_score(), 1.0);
        assert_eq!(s.as_string(), "D D# E");
        assert_eq!(s.repaired(), Some(AccidentalBias::Sharp));
    }

    #[test]
    fn test_propagation_forces_last_open_letter() {
        // D takes Db's letter, so C# is forced, which leaves only B# for C
        let s = spell(&[0, 1, 2]);
        assert_eq!(s.as_string(), "B# C# D");
        assert_eq!(s.cost(), 9);
        assert_eq!(s.problem_score(), 0.0);
        assert_eq!(s.repaired(), None);
    }

    #[test]
    fn test_fixed_patterns() {
        assert_eq!(spell(&[4, 5]).as_string(), "E F");
        assert_eq!(spell(&[0, 11]).as_string(), "C B");

        let s = spell(&[9, 10, 11]);
        assert_eq!(s.problem_score(), 1.0);
        assert_eq!(s.as_string(), "A A# B");
        assert_eq!(s.repaired(), Some(AccidentalBias::Sharp));
    }

    #[test]
    fn test_white_note_respelling_needs_to_beat_penalty() {
        let s = spell(&[3, 5, 8, 11]);
        assert_eq!(s.problem_score(), 2.25);
        assert_eq!(s.as_string(), "Eb F Ab Cb");
        assert_eq!(s.repaired(), Some(AccidentalBias::Flat));

        let s = spell(&[1, 5, 6, 9]);
        assert_eq!(s.as_string(), "C# E# F# A");
        assert_eq!(s.repaired(), Some(AccidentalBias::Sharp));

        // an improvement equal to the penalty is not enough
        let strict = ChromaticSpeller::new(SpellerConfig {
            respell_white_note_penalty: 2.25,
            ..SpellerConfig::default()
        });
        assert_eq!(strict.spell(&[3, 5, 8, 11]).as_string(), "Eb F Ab B");
        assert_eq!(strict.spell(&[1, 5, 6, 9]).as_string(), "C# F F# A");
    }

    #[test]
    fn test_courtesy_naturals() {
        let speller = ChromaticSpeller::new(SpellerConfig::default().with_courtesy_naturals(true));
        assert_eq!(speller.spell(&[0, 4, 7]).as_string(), "Cn En Gn");
    }

    #[test]
    fn test_empty_set_is_reported() {
        let s = spell(&[]);
        assert!(s.spellings().is_empty());
        assert!(!s.is_complete());
    }

    #[test]
    fn test_spell_pitches() {
        let speller = ChromaticSpeller::default();
        assert_eq!(speller.spell_pitches(&[60, 64, 67]), vec!["c/4", "e/4", "g/4"]);
        assert_eq!(speller.spell_pitches(&[49, 56]), vec!["c#/3", "g#/3"]);
    }

    #[test]
    fn test_white_key_respellings_shift_octave() {
        let mut spellings = BTreeMap::new();
        spellings.insert(0, sp(6, 1));
        spellings.insert(11, sp(0, -1));
        let s = ChromaticSpelling {
            spellings,
            cost: 13,
            problem_score: 0.0,
            repaired: None,
            courtesy_naturals: false,
            diagnostics: Vec::new(),
        };
        assert_eq!(s.render_pitches(&[60, 71, 61]), vec!["b#/3", "cb/5", "c#/4"]);
    }

    #[test]
    fn test_letter_validation() {
        assert!(Spelling::new(7, 0).is_err());
        assert_eq!(Spelling::on_letter(0, 6).unwrap(), sp(6, 1));
        assert_eq!(Spelling::on_letter(11, 0).unwrap(), sp(0, -1));
        assert_eq!(Spelling::new(3, 1).unwrap().to_string(), "F#");
    }
}
