//! REPL (Read-Eval-Print Loop) for chord analysis

use crate::commands::{CommandContext, CommandRegistry, CommandResult, create_registry};
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};

/// Interactive REPL over the analysis commands
pub struct Repl {
    editor: DefaultEditor,
    registry: CommandRegistry,
    ctx: CommandContext,
}

impl Repl {
    /// Create a new REPL instance with an OS-seeded random source
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
        let ctx = CommandContext::from_entropy()?;
        log::debug!("session seed {}", ctx.seed);
        Ok(Self::with_context(editor, ctx))
    }

    fn with_context(editor: DefaultEditor, ctx: CommandContext) -> Self {
        Repl {
            editor,
            registry: create_registry(),
            ctx,
        }
    }

    /// Handle one line of input; returns false when the session should end
    pub fn handle_line(&mut self, line: &str) -> bool {
        handle(&self.registry, &mut self.ctx, line)
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> RustylineResult<()> {
        println!("{}", "Chordspace".bright_cyan().bold());
        println!(
            "Try: {}, {}, {}",
            "gnf C E G".cyan(),
            "vl C E G -> F A C".cyan(),
            "label C4 E4 G4 -> G4 E4 C4".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        loop {
            let prompt = format!("{} ", "chordspace>".bright_magenta().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);
                    if !self.handle_line(line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    println!(
                        "{} {}",
                        "Error reading input:".bright_red().bold(),
                        err.to_string().red()
                    );
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

fn handle(registry: &CommandRegistry, ctx: &mut CommandContext, line: &str) -> bool {
    match registry.execute(line, ctx) {
        CommandResult::Success => {}
        CommandResult::Message(msg) => println!("{}", msg),
        CommandResult::Exit => {
            println!("{}", "Goodbye!".bright_cyan());
            return false;
        }
        CommandResult::Error(e) => {
            println!("{} {}", "Error:".bright_red().bold(), e.red());
        }
        CommandResult::NotACommand => {
            println!(
                "{} Unknown command '{}'. Type '{}' for a list.",
                "Error:".bright_red().bold(),
                line.split_whitespace().next().unwrap_or(line),
                "help".bright_green()
            );
        }
    }
    true
}

/// Convenience function to start the REPL
pub fn start() -> Result<()> {
    let mut repl = Repl::new()?;
    repl.run()
        .map_err(|e| anyhow::anyhow!("REPL terminated: {}", e))
}
