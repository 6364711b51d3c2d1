//! Voice crossings under straight-line motion.
//!
//! Each voice glides linearly from its start pitch to its end pitch over
//! normalized time `[0, 1]`. Two voices cross whenever their pitch classes
//! coincide strictly inside that span; fast relative motion can make a pair
//! cross several times.

use crate::diagnostic::{Diagnostic, report};
use crate::modular::Pitch;
use num_rational::Ratio;
use num_traits::{One, Zero};

/// Exact normalized time within a transition
pub type Time = Ratio<i64>;

/// Two voices meeting at `time`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossingEvent {
    /// Lower voice index of the pair
    pub first_voice: usize,
    pub second_voice: usize,
    pub time: Time,
    /// Modular distance the pair closes before meeting
    pub distance: i64,
}

/// Every crossing of the transition `start -> end`, ordered by time.
///
/// Simultaneous crossings keep pair order (lower first voice first).
pub fn crossing_events(start: &[Pitch], end: &[Pitch], modulus: i32) -> Vec<CrossingEvent> {
    let modulus = modulus as i64;
    let moves: Vec<i64> = start
        .iter()
        .zip(end)
        .map(|(&a, &b)| (b - a) as i64)
        .collect();

    let mut events = Vec::new();
    let n = moves.len();
    for first in 0..n {
        for second in (first + 1)..n {
            let relative_velocity = moves[second] - moves[first];
            if relative_velocity == 0 {
                continue;
            }
            let mut distance = (start[second] as i64 - start[first] as i64).rem_euclid(modulus);
            if relative_velocity > 0 {
                distance = modulus - distance;
            }
            let velocity = relative_velocity.abs();
            let period = Ratio::new(modulus, velocity);
            let mut time = Ratio::new(distance, velocity);
            // voices sharing a pitch class at the outset have not crossed yet
            if time.is_zero() {
                time += period;
            }
            while time < Time::one() {
                events.push(CrossingEvent {
                    first_voice: first,
                    second_voice: second,
                    time,
                    distance,
                });
                time += period;
            }
        }
    }

    events.sort_by(|a, b| a.time.cmp(&b.time));
    events
}

/// Label crossings in time order against a cyclic naming of chord elements.
///
/// `names[v]` is the canonical slot currently occupied by voice `v`; each
/// crossing swaps the two voices' names. With three or more voices a crossing
/// of neighbouring names `k` and `k + 1` is labeled `-k mod n`; other
/// crossings are reported and skipped. Two-voice crossings alternate between
/// 0 and 1, starting at 1 when the first pair is more than half an octave
/// apart.
pub fn label_crossings(
    events: &[CrossingEvent],
    names: &[usize],
    modulus: i32,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<usize> {
    let n = names.len();
    let mut names = names.to_vec();
    let mut last: Option<usize> = None;
    let mut labels = Vec::with_capacity(events.len());

    for event in events {
        let name1 = names[event.first_voice];
        let name2 = names[event.second_voice];

        let label = if n != 2 {
            if name2 == (name1 + 1) % n {
                (n - name1) % n
            } else if name1 == (name2 + 1) % n {
                (n - name2) % n
            } else {
                report(
                    diagnostics,
                    Diagnostic::CrossingUnlabeled {
                        first: name1,
                        second: name2,
                    },
                );
                continue;
            }
        } else {
            match last {
                None if 2 * event.distance > modulus as i64 => 1,
                None => 0,
                Some(previous) => (previous + 1) % 2,
            }
        };

        log::debug!(
            "crossing at t={} between voices {} and {}: C{}",
            event.time,
            event.first_voice,
            event.second_voice,
            label
        );
        last = Some(label);
        labels.push(label);
        names.swap(event.first_voice, event.second_voice);
    }

    labels
}
