//! Necromancy command handlers: rituals on souls and minions.

use super::{CommandResult, CommandStatus, ParsedCommand};
use crate::entities::{EnemyKind, MinionKind, SoulKind};
use crate::player::PlayerState;

fn parse_soul_kind(s: &str) -> Option<SoulKind> {
    SoulKind::ALL
        .into_iter()
        .find(|k| k.name().eq_ignore_ascii_case(s))
}

fn parse_id(s: &str) -> Option<u32> {
    s.parse().ok()
}

pub(crate) fn execute_raise(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let Some(kind) = command.positional.first().and_then(|s| MinionKind::parse(s)) else {
        return CommandResult::failure(
            CommandStatus::InvalidCommand,
            "usage: raise <zombie|skeleton|ghoul|wraith|wight|revenant> [--name=NAME]",
        );
    };
    let name = command.flag_value("name").map(str::to_string);
    match state.raise(kind, name) {
        Ok(id) => {
            let minion = state.minions.get(id).map_or_else(String::new, |m| m.describe());
            CommandResult::success(format!("The earth yields up a servant.\n{minion}"))
        }
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_bind(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let (Some(soul_id), Some(minion_id)) = (
        command.positional.first().and_then(|s| parse_id(s)),
        command.positional.get(1).and_then(|s| parse_id(s)),
    ) else {
        return CommandResult::failure(
            CommandStatus::InvalidCommand,
            "usage: bind <soul-id> <minion-id>",
        );
    };
    match state.bind(soul_id, minion_id) {
        Ok(()) => {
            let minion = state
                .minions
                .get(minion_id)
                .map_or_else(String::new, |m| m.describe());
            CommandResult::success(format!(
                "Soul {soul_id} bound to minion {minion_id}.\n{minion}"
            ))
        }
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_banish(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let Some(minion_id) = command.positional.first().and_then(|s| parse_id(s)) else {
        return CommandResult::failure(CommandStatus::InvalidCommand, "usage: banish <minion-id>");
    };
    match state.banish(minion_id) {
        Ok(minion) => CommandResult::success(format!(
            "{} '{}' crumbles back into the grave.",
            minion.kind.name(),
            minion.name
        )),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_harvest(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let result = match command.positional.first() {
        Some(raw) => match parse_soul_kind(raw) {
            Some(kind) => state.harvest(kind),
            None => {
                return CommandResult::failure(
                    CommandStatus::InvalidCommand,
                    format!("unknown soul kind '{raw}'"),
                )
            }
        },
        None => state.harvest_wild(),
    };
    match result {
        Ok(id) => {
            let soul = state.souls.get(id).map_or_else(String::new, |s| s.describe());
            CommandResult::success(format!("The ritual takes an hour.\n{soul}"))
        }
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_heal(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let Some(minion_id) = command.positional.first().and_then(|s| parse_id(s)) else {
        return CommandResult::failure(CommandStatus::InvalidCommand, "usage: heal <minion-id>");
    };
    match state.heal_minion(minion_id) {
        Ok(healed) => CommandResult::success(format!(
            "Necrotic energy knits minion {minion_id} back together (+{healed} HP)."
        )),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_hunt(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let result = if command.positional.is_empty() {
        state.hunt()
    } else {
        let mut kinds = Vec::with_capacity(command.positional.len());
        for raw in &command.positional {
            match EnemyKind::parse(raw) {
                Some(kind) => kinds.push(kind),
                None => {
                    return CommandResult::failure(
                        CommandStatus::InvalidCommand,
                        format!("unknown enemy kind '{raw}'"),
                    )
                }
            }
        }
        state.start_encounter(&kinds)
    };
    match result {
        Ok(()) => {
            let block = state
                .encounter
                .as_ref()
                .map(|e| crate::snapshot::CombatSnapshot::capture(e).render_text())
                .unwrap_or_default();
            CommandResult::success(block)
        }
        Err(e) => CommandResult::from_error(&e),
    }
}
