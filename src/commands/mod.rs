//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod analysis;
pub mod general;

use anyhow::{Result, anyhow};
use chordspace_core::{AnalysisConfig, ChordRng, SpellerConfig};

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No registered command matches the input
    NotACommand,
    /// Error occurred
    Error(String),
}

impl From<Result<String>> for CommandResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(msg) => CommandResult::Message(msg),
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }
}

/// Session state passed to command handlers
pub struct CommandContext {
    pub config: AnalysisConfig,
    pub speller: SpellerConfig,
    pub rng: ChordRng,
    pub seed: u64,
}

impl CommandContext {
    /// Create a context with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            config: AnalysisConfig::default(),
            speller: SpellerConfig::default(),
            rng: ChordRng::new(seed),
            seed,
        }
    }

    /// Create a context seeded from the operating system
    pub fn from_entropy() -> Result<Self> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes).map_err(|e| anyhow!("Failed to seed RNG: {}", e))?;
        Ok(Self::new(u64::from_le_bytes(bytes)))
    }

    /// Restart the random stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChordRng::new(seed);
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Analysis commands
    registry.register("gnf", analysis::cmd_gnf);
    registry.register("nf", analysis::cmd_nf);
    registry.register("vl", analysis::cmd_vl);
    registry.register("voicelead", analysis::cmd_voicelead);
    registry.register("label", analysis::cmd_label);
    registry.register("spell", analysis::cmd_spell);
    registry.register("bass", analysis::cmd_bass);
    registry.register("ivec", analysis::cmd_ivec);

    // Session settings
    registry.register("modulus", general::cmd_modulus);
    registry.register("invert", general::cmd_invert);
    registry.register("region", general::cmd_region);
    registry.register("bias", general::cmd_bias);
    registry.register("naturals", general::cmd_naturals);
    registry.register("seed", general::cmd_seed);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_input() {
        let registry = create_registry();
        let mut ctx = CommandContext::new(1);
        assert_eq!(registry.execute("play C", &mut ctx), CommandResult::NotACommand);
        // prefixes only match whole words
        assert_eq!(registry.execute("vlx 1 -> 2", &mut ctx), CommandResult::NotACommand);
    }

    #[test]
    fn test_quit() {
        let registry = create_registry();
        let mut ctx = CommandContext::new(1);
        assert_eq!(registry.execute("quit", &mut ctx), CommandResult::Exit);
        assert_eq!(registry.execute("exit", &mut ctx), CommandResult::Exit);
    }

    #[test]
    fn test_every_command_listed() {
        let registry = create_registry();
        let commands = registry.list_commands();
        for name in ["gnf", "nf", "vl", "voicelead", "label", "spell", "bass", "ivec", "seed"] {
            assert!(commands.contains(&name), "missing {}", name);
        }
    }

    #[test]
    fn test_reseed_repeats_stream() {
        let mut ctx = CommandContext::new(5);
        let first = ctx.rng.next_u64();
        ctx.reseed(5);
        assert_eq!(ctx.rng.next_u64(), first);
    }
}
