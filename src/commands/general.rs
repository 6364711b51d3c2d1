//! General REPL commands (help, quit, session settings)

use crate::commands::{CommandContext, CommandResult};
use chordspace_core::AccidentalBias;
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `modulus [n]` command
pub fn cmd_modulus(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Modulus: {}", ctx.config.modulus));
    }
    let parsed = args.parse::<i32>().map_err(|_| anyhow::anyhow!("Invalid modulus: {}", args));
    match parsed.and_then(|m| ctx.config.with_modulus(m)) {
        Ok(config) => {
            ctx.config = config;
            CommandResult::Message(
                format!("Modulus set to {}", config.modulus)
                    .bright_green()
                    .to_string(),
            )
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `invert [on|off]` command
pub fn cmd_invert(args: &str, ctx: &mut CommandContext) -> CommandResult {
    toggle("Inversional equivalence", args, &mut ctx.config.invert)
}

/// Handle `region [on|off]` command
pub fn cmd_region(args: &str, ctx: &mut CommandContext) -> CommandResult {
    toggle("Transposition-region labels", args, &mut ctx.config.transposition_region)
}

/// Handle `naturals [on|off]` command
pub fn cmd_naturals(args: &str, ctx: &mut CommandContext) -> CommandResult {
    toggle("Courtesy naturals", args, &mut ctx.speller.courtesy_naturals)
}

/// Handle `bias [sharp|flat|none]` command
pub fn cmd_bias(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Spelling bias: {}", bias_name(ctx.speller.default_bias)));
    }
    let bias = match args.to_lowercase().as_str() {
        "none" | "off" => None,
        other => match AccidentalBias::from_str(other) {
            Some(b) => Some(b),
            None => {
                return CommandResult::Error("Usage: bias [sharp|flat|none]".to_string());
            }
        },
    };
    ctx.speller.default_bias = bias;
    CommandResult::Message(
        format!("Spelling bias set to {}", bias_name(bias))
            .bright_green()
            .to_string(),
    )
}

/// Handle `seed <n>` command
pub fn cmd_seed(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Seed: {}", ctx.seed));
    }
    match args.parse::<u64>() {
        Ok(seed) => {
            ctx.reseed(seed);
            CommandResult::Message(format!("Seeded with {}", seed).bright_green().to_string())
        }
        Err(_) => CommandResult::Error("Usage: seed <non-negative integer>".to_string()),
    }
}

fn bias_name(bias: Option<AccidentalBias>) -> &'static str {
    bias.map_or("none", |b| b.name())
}

fn toggle(name: &str, args: &str, flag: &mut bool) -> CommandResult {
    match args.to_lowercase().as_str() {
        "" => {}
        "on" | "true" | "yes" => *flag = true,
        "off" | "false" | "no" => *flag = false,
        _ => return CommandResult::Error(format!("Expected 'on' or 'off', got '{}'", args)),
    }
    let state = if *flag { "on".bright_green() } else { "off".yellow() };
    CommandResult::Message(format!("{}: {}", name, state))
}

/// Print help information
fn print_help() {
    println!("{}", "Chordspace Help".bold());
    println!("{}", "===============".bold());
    println!();
    println!("{}", "Pitches:".green());
    println!("  Integers ({}) or note names ({}), octave 4 by default", "60".cyan(), "C4 F#3 Bb".cyan());
    println!("  Chords are space- or comma-separated, brackets optional: {}", "[C, E, G]".cyan());
    println!();
    println!("{}", "Forms:".green());
    println!("  {}              - Geometric normal form", "gnf <chord>".cyan());
    println!("  {}               - Standard normal form", "nf <chord>".cyan());
    println!("  {}             - Interval vector", "ivec <chord>".cyan());
    println!();
    println!("{}", "Voice Leading:".green());
    println!("  {}    - Minimal voice leading and ranked rotations", "vl <chord> -> <chord>".cyan());
    println!(
        "  {} - Move pitches onto pitch classes",
        "voicelead <chord> -> <pcs> [top <n>]".cyan()
    );
    println!("  {} - Label a transition", "label <chord> -> <chord>".cyan());
    println!();
    println!("{}", "Spelling:".green());
    println!("  {}            - Spell the chord's pitch classes", "spell <chord>".cyan());
    println!("  {}             - Draw a likely bass", "bass <chord>".cyan());
    println!();
    println!("{}", "Settings:".green());
    println!("  {}            - Show or set the modulus", "modulus [n]".cyan());
    println!("  {}       - Inversional equivalence", "invert [on|off]".cyan());
    println!("  {}       - Transposition-region labels", "region [on|off]".cyan());
    println!("  {} - Spelling tie-break", "bias [sharp|flat|none]".cyan());
    println!("  {}     - Courtesy naturals", "naturals [on|off]".cyan());
    println!("  {}             - Reseed random choices", "seed <n>".cyan());
    println!();
    println!("{}", "Examples:".green());
    println!("  chordspace> {}", "label C4 E4 G4 -> G4 E4 C4".cyan());
    println!("  C0C1C0");
    println!();
    println!("  chordspace> {}", "spell 61 64 68".cyan());
    println!("  C# E G#");
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}              - Show this help", "help".bright_green());
    println!("  {}              - Exit the REPL", "quit".bright_red());
}
