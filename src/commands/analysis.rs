//! Analysis commands: forms, voice leading, labels, spelling

use crate::commands::{CommandContext, CommandResult};
use crate::pitch::{parse_chord, split_transition};
use anyhow::{Result, anyhow};
use chordspace_core::canonical::{canonical_form, normal_form};
use chordspace_core::label::{VoiceLeadingLabel, format_ratio};
use chordspace_core::modular::interval_vector;
use chordspace_core::spelling::ChromaticSpeller;
use chordspace_core::voice_leading::{minimal_voice_leading_with, voicelead};
use chordspace_core::{BassFinder, modular};
use colored::*;

/// Handle `gnf <chord>` command
pub fn cmd_gnf(args: &str, ctx: &mut CommandContext) -> CommandResult {
    geometric_form(args, ctx).into()
}

/// Handle `nf <chord>` command
pub fn cmd_nf(args: &str, ctx: &mut CommandContext) -> CommandResult {
    standard_form(args, ctx).into()
}

/// Handle `vl <chord> -> <chord>` command
pub fn cmd_vl(args: &str, ctx: &mut CommandContext) -> CommandResult {
    voice_leading(args, ctx).into()
}

/// Handle `voicelead <chord> -> <pcs> [top <n>]` command
pub fn cmd_voicelead(args: &str, ctx: &mut CommandContext) -> CommandResult {
    move_pitches(args, ctx).into()
}

/// Handle `label <chord> -> <chord>` command
pub fn cmd_label(args: &str, ctx: &mut CommandContext) -> CommandResult {
    label(args, ctx).into()
}

/// Handle `spell <chord>` command
pub fn cmd_spell(args: &str, ctx: &mut CommandContext) -> CommandResult {
    spell(args, ctx).into()
}

/// Handle `bass <chord>` command
pub fn cmd_bass(args: &str, ctx: &mut CommandContext) -> CommandResult {
    bass(args, ctx).into()
}

/// Handle `ivec <chord>` command
pub fn cmd_ivec(args: &str, ctx: &mut CommandContext) -> CommandResult {
    parse_chord(args)
        .map(|chord| {
            let pcs = modular::sorted_pcs(&chord, ctx.config.modulus);
            format!("{:?}", interval_vector(&pcs, ctx.config.modulus))
        })
        .into()
}

fn geometric_form(args: &str, ctx: &CommandContext) -> Result<String> {
    let chord = parse_chord(args)?;
    let form = canonical_form(&chord, ctx.config.invert, ctx.config.modulus);
    Ok(format!("{:?}", form))
}

fn standard_form(args: &str, ctx: &CommandContext) -> Result<String> {
    let chord = parse_chord(args)?;
    let nf = normal_form(&chord, ctx.config.invert, true, ctx.config.modulus);
    let operation = if nf.inverted { "I" } else { "T" };
    Ok(format!("{:?} ({}{})", nf.pcs, operation, nf.transposition))
}

fn voice_leading(args: &str, ctx: &mut CommandContext) -> Result<String> {
    let (a, b) = split_transition(args)?;
    let (first, second) = (parse_chord(a)?, parse_chord(b)?);
    let result = minimal_voice_leading_with(&first, &second, ctx.config.modulus, &mut ctx.rng)?;

    let mut out = format!("{} {}", "Best:".bold(), result.best);
    for (i, vl) in result.ranked.iter().enumerate() {
        out.push_str(&format!("\n  {:>2}. {}", i + 1, vl));
    }
    Ok(out)
}

fn move_pitches(args: &str, ctx: &mut CommandContext) -> Result<String> {
    let (a, rest) = split_transition(args)?;
    let (targets, top_n) = match rest.split_once("top") {
        Some((pcs, n)) => {
            let n = n
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow!("Invalid top count: {}", n.trim()))?;
            (pcs.trim(), n)
        }
        None => (rest, 1),
    };
    let source = parse_chord(a)?;
    let out_pcs = parse_chord(targets)?;
    let moved = voicelead(&source, &out_pcs, top_n, ctx.config.modulus, &mut ctx.rng)?;
    Ok(format!("{:?}", moved))
}

fn label(args: &str, ctx: &CommandContext) -> Result<String> {
    let (a, b) = split_transition(args)?;
    let (start, end) = (parse_chord(a)?, parse_chord(b)?);
    let label = VoiceLeadingLabel::new(&start, &end, ctx.config)?;

    let mut out = if label.label().is_empty() {
        "(identity)".dimmed().to_string()
    } else {
        label.label().bright_cyan().bold().to_string()
    };
    for event in label.crossings() {
        out.push_str(&format!(
            "\n  crossing voices {}-{} at t={}",
            event.first_voice,
            event.second_voice,
            format_ratio(event.time)
        ));
    }
    for diagnostic in label.diagnostics() {
        out.push_str(&format!("\n  {} {}", "warning:".yellow(), diagnostic));
    }
    Ok(out)
}

fn spell(args: &str, ctx: &CommandContext) -> Result<String> {
    let chord = parse_chord(args)?;
    let speller = ChromaticSpeller::new(ctx.speller);
    let spelling = speller.spell(&chord);
    if !spelling.is_complete() {
        return Err(anyhow!("Could not spell {:?}", chord));
    }
    Ok(format!(
        "{}\n  {}",
        spelling,
        spelling.render_pitches(&chord).join(" ")
    ))
}

fn bass(args: &str, ctx: &mut CommandContext) -> Result<String> {
    let chord = parse_chord(args)?;
    let finder = BassFinder::default();
    let scores: Vec<String> = finder
        .goodness(&chord)
        .iter()
        .map(|(pc, score)| format!("{}:{}", pc, score))
        .collect();
    match finder.find_bass(&chord, &mut ctx.rng) {
        Some(pc) => Ok(format!("Bass pc {} ({})", pc, scores.join(" "))),
        None => Err(anyhow!("No chord member works as a bass")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: CommandResult) -> String {
        match result {
            CommandResult::Message(m) => m,
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_gnf_and_nf() {
        let mut ctx = CommandContext::new(0);
        assert_eq!(message(cmd_gnf("C4 E4 G4", &mut ctx)), "[0, 3, 8]");
        assert_eq!(message(cmd_nf("60 64 67", &mut ctx)), "[0, 4, 7] (T0)");
    }

    #[test]
    fn test_ivec() {
        let mut ctx = CommandContext::new(0);
        assert_eq!(message(cmd_ivec("C E G", &mut ctx)), "[0, 0, 1, 1, 1, 0]");
    }

    #[test]
    fn test_label_contains_string() {
        let mut ctx = CommandContext::new(0);
        let out = message(cmd_label("C4 E4 G4 -> G4 E4 C4", &mut ctx));
        assert!(out.contains("C0C1C0"));
        assert_eq!(out.matches("crossing voices").count(), 3);
    }

    #[test]
    fn test_label_rejects_unequal_chords() {
        let mut ctx = CommandContext::new(0);
        assert!(matches!(cmd_label("C E G -> C E", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_label("C E G", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_voicelead() {
        let mut ctx = CommandContext::new(0);
        assert_eq!(message(cmd_voicelead("48 64 67 -> 5 9 0", &mut ctx)), "[48, 65, 69]");
        assert_eq!(message(cmd_voicelead("C4 E4 G4 -> 11 2 5", &mut ctx)), "[59, 62, 65]");
        assert!(matches!(
            cmd_voicelead("48 64 67 -> 5 9 0 top x", &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_spell_renders_pitches() {
        let mut ctx = CommandContext::new(0);
        let out = message(cmd_spell("61 64 68", &mut ctx));
        assert!(out.ends_with("c#/4 e/4 g#/4"));
    }

    #[test]
    fn test_bass_is_reported() {
        let mut ctx = CommandContext::new(3);
        let out = message(cmd_bass("C E G", &mut ctx));
        assert!(out.starts_with("Bass pc "));
        assert!(out.contains("0:135"));
    }
}
