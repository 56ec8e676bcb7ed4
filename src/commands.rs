//! The shell command contract: parsed input in, result record out.
//!
//! The shell (or a script runner, or a test) turns a line of input into a
//! [`ParsedCommand`] and hands it to [`dispatch`] together with the
//! [`PlayerState`]. Every handler is atomic: a failed command returns an
//! error result and leaves the state untouched.

mod combat;
mod necromancy;
mod system;

use crate::player::PlayerState;
use std::collections::HashMap;

/// Value carried by a `--flag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Bare flag (`--all`).
    Set,
    /// Flag with a value (`--name=Gravel`).
    Value(String),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command name, lowercased.
    pub name: String,
    /// Positional arguments, in order.
    pub positional: Vec<String>,
    /// Flags, keyed without the `--` prefix.
    pub flags: HashMap<String, FlagValue>,
}

impl ParsedCommand {
    /// Parse a raw input line. Returns `None` for blank input.
    ///
    /// Tokens are whitespace-separated; `--flag` is a bare flag and
    /// `--flag=value` carries a value. Everything else is positional.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut tokens = input.split_whitespace();
        let name = tokens.next()?.to_ascii_lowercase();
        let mut positional = Vec::new();
        let mut flags = HashMap::new();
        for token in tokens {
            if let Some(flag) = token.strip_prefix("--") {
                match flag.split_once('=') {
                    Some((key, value)) => {
                        flags.insert(key.to_ascii_lowercase(), FlagValue::Value(value.to_string()));
                    }
                    None => {
                        flags.insert(flag.to_ascii_lowercase(), FlagValue::Set);
                    }
                }
            } else {
                positional.push(token.to_string());
            }
        }
        Some(ParsedCommand {
            name,
            positional,
            flags,
        })
    }

    /// True when the bare or valued flag is present.
    #[must_use]
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// The value of `--name=value`, if present in that form.
    #[must_use]
    pub fn flag_value(&self, name: &str) -> Option<&str> {
        match self.flags.get(name) {
            Some(FlagValue::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// Outcome class of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command ran and succeeded.
    Success,
    /// Unknown command or malformed arguments.
    InvalidCommand,
    /// The command ran and the core refused it.
    CommandFailed,
    /// The command is not allowed in the current state.
    PermissionDenied,
    /// Recognized but not implemented.
    NotImplemented,
    /// Unexpected internal failure (i/o and the like).
    Internal,
}

impl CommandStatus {
    /// Stable lowercase name, used by the JSON output mode.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CommandStatus::Success => "success",
            CommandStatus::InvalidCommand => "invalid_command",
            CommandStatus::CommandFailed => "command_failed",
            CommandStatus::PermissionDenied => "permission_denied",
            CommandStatus::NotImplemented => "not_implemented",
            CommandStatus::Internal => "internal",
        }
    }
}

/// Result record returned for every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Outcome class.
    pub status: CommandStatus,
    /// Text to show the player.
    pub text: String,
    /// Error detail, present on non-success.
    pub error: Option<String>,
    /// True when the shell loop should terminate.
    pub should_exit: bool,
}

impl CommandResult {
    /// Successful result with display text.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        CommandResult {
            status: CommandStatus::Success,
            text: text.into(),
            error: None,
            should_exit: false,
        }
    }

    /// Failed result with an error detail.
    #[must_use]
    pub fn failure(status: CommandStatus, error: impl Into<String>) -> Self {
        CommandResult {
            status,
            text: String::new(),
            error: Some(error.into()),
            should_exit: false,
        }
    }

    /// Result from a core error, classed by the error's nature.
    #[must_use]
    pub fn from_error(error: &crate::GameError) -> Self {
        let status = match error {
            crate::GameError::Io(_) => CommandStatus::Internal,
            _ => CommandStatus::CommandFailed,
        };
        Self::failure(status, error.to_string())
    }
}

/// Execute one command against the state.
pub fn dispatch(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    match command.name.as_str() {
        "attack" => combat::execute_attack(state, command),
        "defend" => combat::execute_defend(state),
        "cast" => combat::execute_cast(state, command),
        "flee" => combat::execute_flee(state),
        "combat" => combat::execute_combat_status(state),
        "raise" => necromancy::execute_raise(state, command),
        "bind" => necromancy::execute_bind(state, command),
        "banish" => necromancy::execute_banish(state, command),
        "harvest" => necromancy::execute_harvest(state, command),
        "heal" => necromancy::execute_heal(state, command),
        "hunt" => necromancy::execute_hunt(state, command),
        "status" => system::execute_status(state),
        "wait" => system::execute_wait(state, command),
        "trial" => system::execute_trial(state, command),
        "judgment" => system::execute_judgment(state),
        "ending" => system::execute_ending(state, command),
        "save" => system::execute_save(state, command),
        "load" => system::execute_load(state, command),
        "help" => system::execute_help(),
        "quit" | "exit" => system::execute_quit(),
        _ => CommandResult::failure(
            CommandStatus::InvalidCommand,
            format!("unknown command '{}'; try 'help'", command.name),
        ),
    }
}
