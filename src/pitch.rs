//! Pitch input for the REPL
//!
//! A pitch is either an integer (MIDI-style, 60 = middle C) or a note name
//! with an optional octave: `C`, `F#3`, `Bb`, `Eb-1`. Names without an octave
//! sit in octave 4. Sharps may also be written `s` (`Fs`).

use anyhow::{Result, anyhow};
use chordspace_core::Pitch;

/// Parse a single pitch token
pub fn parse_pitch(token: &str) -> Result<Pitch> {
    let token = token.trim();
    if let Ok(n) = token.parse::<Pitch>() {
        return Ok(n);
    }

    let s = token.to_uppercase();
    let mut chars = s.chars();
    let letter = chars
        .next()
        .ok_or_else(|| anyhow!("Empty pitch"))?;
    let natural = match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(anyhow!("Invalid note name: {}", token)),
    };

    // Accidentals follow the letter; the rest is the octave
    let rest = &s[letter.len_utf8()..];
    let accidental_len = rest
        .chars()
        .take_while(|c| matches!(c, '#' | 'S' | 'B'))
        .count();
    let alteration: i32 = rest[..accidental_len]
        .chars()
        .map(|c| if c == 'B' { -1 } else { 1 })
        .sum();
    let octave_part = &rest[accidental_len..];

    let octave = if octave_part.is_empty() {
        4
    } else {
        octave_part
            .parse::<i32>()
            .map_err(|_| anyhow!("Invalid octave: {}", octave_part))?
    };

    Ok((octave + 1) * 12 + natural + alteration)
}

/// Parse a chord: pitches separated by spaces or commas, optionally in brackets
pub fn parse_chord(input: &str) -> Result<Vec<Pitch>> {
    let inner = input
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');
    let pitches = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(parse_pitch)
        .collect::<Result<Vec<_>>>()?;
    if pitches.is_empty() {
        return Err(anyhow!("Expected at least one pitch"));
    }
    Ok(pitches)
}

/// Split `a -> b` into its two sides
pub fn split_transition(input: &str) -> Result<(&str, &str)> {
    input
        .split_once("->")
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| anyhow!("Expected '<chord> -> <chord>'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_pitch("60").unwrap(), 60);
        assert_eq!(parse_pitch("-3").unwrap(), -3);
    }

    #[test]
    fn test_parse_note_names() {
        assert_eq!(parse_pitch("C4").unwrap(), 60);
        assert_eq!(parse_pitch("C").unwrap(), 60);
        assert_eq!(parse_pitch("F#3").unwrap(), 54);
        assert_eq!(parse_pitch("Bb").unwrap(), 70);
        assert_eq!(parse_pitch("fs").unwrap(), 66);
        assert_eq!(parse_pitch("Eb-1").unwrap(), 3);
        assert_eq!(parse_pitch("B").unwrap(), 71);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_pitch("H").is_err());
        assert!(parse_pitch("C#x").is_err());
        assert!(parse_chord("[]").is_err());
    }

    #[test]
    fn test_parse_chord() {
        assert_eq!(parse_chord("[C4, E4, G4]").unwrap(), vec![60, 64, 67]);
        assert_eq!(parse_chord("60 64 67").unwrap(), vec![60, 64, 67]);
    }

    #[test]
    fn test_split_transition() {
        assert_eq!(split_transition("C E G -> C F A").unwrap(), ("C E G", "C F A"));
        assert!(split_transition("C E G").is_err());
    }
}
