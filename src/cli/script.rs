//! Script runner: execute a file of commands against a fresh run.

use super::{CliError, OutputFormat};
use necroshell::commands::{dispatch, CommandResult, ParsedCommand};
use necroshell::PlayerState;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One executed command in the JSON output array.
#[derive(Serialize)]
struct JsonCommandResult<'a> {
    command: &'a str,
    status: &'static str,
    text: &'a str,
    error: Option<&'a str>,
}

/// Execute the script command.
///
/// # Errors
///
/// Returns an error if the script file cannot be read or the JSON output
/// fails to serialize.
pub(crate) fn execute(
    script: &Path,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let source = fs::read_to_string(script)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", script.display())))?;

    let mut state = PlayerState::new(seed);
    let mut results: Vec<(String, CommandResult)> = Vec::new();
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(command) = ParsedCommand::parse(trimmed) else {
            continue;
        };
        let result = dispatch(&mut state, &command);
        let exit = result.should_exit;
        results.push((trimmed.to_string(), result));
        if exit {
            break;
        }
    }

    match format {
        OutputFormat::Text => {
            for (line, result) in &results {
                println!("> {line}");
                if !result.text.is_empty() {
                    println!("{}", result.text.trim_end());
                }
                if let Some(error) = &result.error {
                    println!("error: {error}");
                }
                println!();
            }
        }
        OutputFormat::Json => {
            let entries: Vec<JsonCommandResult<'_>> = results
                .iter()
                .map(|(line, result)| JsonCommandResult {
                    command: line,
                    status: result.status.name(),
                    text: &result.text,
                    error: result.error.as_deref(),
                })
                .collect();
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}
