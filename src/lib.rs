// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Necroshell: the simulation core of a turn-based necromancy RPG.
//!
//! A recently-deceased administrator commands undead forces through a
//! command-line shell. The shell parses input into command records; the core
//! executes each command atomically against a single [`player::PlayerState`]
//! and returns a result record plus combat-log lines.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Command dispatch (shell API)    │
//! ├─────────────────────────────────────┤
//! │  Combat engine: phases, turn order, │
//! │  damage resolver, enemy AI          │
//! ├─────────────────────────────────────┤
//! │  Player state: corruption /         │
//! │  consciousness / resources + rosters│
//! ├─────────────────────────────────────┤
//! │  Ending engine: trials, judgment,   │
//! │  six terminal outcomes              │
//! └─────────────────────────────────────┘
//! ```
//!
//! The core is strictly single-threaded and performs no I/O; the save codec
//! and the binary's REPL sit at the edges.

pub mod combat;
pub mod commands;
pub mod ending;
pub mod entities;
pub mod error;
pub mod player;
pub mod save;
pub mod snapshot;

pub use error::{GameError, GameResult};

// Re-export the types the shell loop touches on every command.
pub use commands::{CommandResult, CommandStatus, ParsedCommand};
pub use player::PlayerState;
