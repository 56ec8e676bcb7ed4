//! Combat command handlers.

use super::{CommandResult, CommandStatus, ParsedCommand};
use crate::combat::{CombatRewards, Spell};
use crate::player::PlayerState;
use crate::snapshot::CombatSnapshot;
use crate::GameError;

/// Render the current combat block plus an optional reward summary.
fn combat_text(state: &PlayerState, rewards: Option<&CombatRewards>) -> String {
    let mut text = state
        .encounter
        .as_ref()
        .map(|e| CombatSnapshot::capture(e).render_text())
        .unwrap_or_default();
    if let Some(r) = rewards {
        text.push('\n');
        text.push_str(&r.summary());
    }
    text
}

pub(crate) fn execute_attack(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let Some(target) = command.positional.first() else {
        return CommandResult::failure(CommandStatus::InvalidCommand, "usage: attack <target-id>");
    };
    match state.attack(target) {
        Ok(rewards) => CommandResult::success(combat_text(state, rewards.as_ref())),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_defend(state: &mut PlayerState) -> CommandResult {
    match state.defend() {
        Ok(rewards) => CommandResult::success(combat_text(state, rewards.as_ref())),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_cast(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let (Some(spell_name), Some(target)) =
        (command.positional.first(), command.positional.get(1))
    else {
        return CommandResult::failure(
            CommandStatus::InvalidCommand,
            "usage: cast <drain|bolt|weaken> <target-id>",
        );
    };
    let Some(spell) = Spell::parse(spell_name) else {
        return CommandResult::failure(
            CommandStatus::InvalidCommand,
            format!("unknown spell '{spell_name}'"),
        );
    };
    match state.cast(spell, target) {
        Ok(rewards) => CommandResult::success(combat_text(state, rewards.as_ref())),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_flee(state: &mut PlayerState) -> CommandResult {
    match state.flee() {
        Ok(true) => CommandResult::success("You slip away from the battle!"),
        Ok(false) => CommandResult::success(combat_text(state, None)),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_combat_status(state: &PlayerState) -> CommandResult {
    match &state.encounter {
        Some(encounter) => {
            CommandResult::success(CombatSnapshot::capture(encounter).render_text())
        }
        None => CommandResult::from_error(&GameError::NoCombat),
    }
}
