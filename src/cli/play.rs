//! Interactive shell session.

use super::CliError;
use necroshell::commands::{dispatch, ParsedCommand};
use necroshell::{save, PlayerState};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if a save file fails to load or stdin breaks.
pub(crate) fn execute(seed: Option<u64>, load: Option<PathBuf>) -> Result<(), CliError> {
    let mut state = match load {
        Some(path) => save::load_game(&path)
            .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?,
        None => PlayerState::new(seed),
    };

    println!("You are dead. The shell, however, still accepts input.");
    println!("Type 'help' for commands.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("necro> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }
        let Some(command) = ParsedCommand::parse(&line) else {
            continue;
        };
        let result = dispatch(&mut state, &command);
        if !result.text.is_empty() {
            println!("{}", result.text.trim_end());
        }
        if let Some(error) = &result.error {
            eprintln!("error: {error}");
        }
        if result.should_exit {
            break;
        }
    }
    Ok(())
}
