//! System command handlers: status, the clock, the endgame, save/load.

use super::{CommandResult, CommandStatus, ParsedCommand};
use crate::ending::{TRIAL_COUNT, TRIAL_NAMES};
use crate::player::PlayerState;
use crate::save;
use std::fmt::Write as _;
use std::path::Path;

pub(crate) fn execute_status(state: &PlayerState) -> CommandResult {
    let mut out = String::new();
    let r = &state.resources;
    let _ = writeln!(
        out,
        "Day {} ({:02}:00), month {}, year {}",
        r.day_count, r.time_hours, r.month + 1, r.year
    );
    let _ = writeln!(
        out,
        "Level {} ({} XP) | Mana {}/{} | Soul Energy {}",
        state.level, state.experience, r.mana, r.mana_max, r.soul_energy
    );
    let latch = if state.corruption.is_irreversible() {
        " [IRREVERSIBLE]"
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "Corruption: {:.1} ({}){latch}",
        state.corruption.value(),
        state.corruption.tier().name()
    );
    let _ = writeln!(
        out,
        "Consciousness: {:.1} stability, {:.1} fragmentation",
        state.consciousness.stability, state.consciousness.fragmentation
    );

    let _ = writeln!(out, "Minions ({}):", state.minions.len());
    for minion in state.minions.iter() {
        let _ = writeln!(out, "{}", minion.describe());
    }
    let _ = writeln!(out, "Souls ({}):", state.souls.len());
    for soul in state.souls.iter() {
        let _ = writeln!(out, "{}", soul.describe());
    }

    let _ = writeln!(out, "Trials:");
    for (name, record) in TRIAL_NAMES.iter().zip(state.trials.records()) {
        let _ = writeln!(
            out,
            "  {name}: {} (best {:.0}, attempts {})",
            record.status.name(),
            record.best_score,
            record.attempts
        );
    }
    match &state.judgment {
        Some(verdict) => {
            let _ = writeln!(
                out,
                "Divine judgment: {} ({} approve, {} deny)",
                if verdict.amnesty_granted { "AMNESTY" } else { "DENIED" },
                verdict.approvals,
                verdict.denials
            );
        }
        None => {
            let _ = writeln!(out, "Divine judgment: not yet held");
        }
    }
    CommandResult::success(out)
}

pub(crate) fn execute_wait(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let Some(hours) = command.positional.first().and_then(|s| s.parse::<u32>().ok()) else {
        return CommandResult::failure(CommandStatus::InvalidCommand, "usage: wait <hours>");
    };
    match state.wait(hours) {
        Ok(days) => {
            let r = &state.resources;
            CommandResult::success(format!(
                "{hours} hours pass ({days} days). It is now day {}, {:02}:00.",
                r.day_count, r.time_hours
            ))
        }
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_trial(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let index = command
        .positional
        .first()
        .and_then(|s| s.parse::<usize>().ok());
    let Some(number) = index.filter(|n| (1..=TRIAL_COUNT).contains(n)) else {
        return CommandResult::failure(CommandStatus::InvalidCommand, "usage: trial <1-7>");
    };
    match state.attempt_trial(number - 1) {
        Ok((score, status)) => CommandResult::success(format!(
            "{}: scored {score:.0} -> {}",
            TRIAL_NAMES[number - 1],
            status.name()
        )),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_judgment(state: &mut PlayerState) -> CommandResult {
    match state.summon_judgment() {
        Ok(verdict) => CommandResult::success(verdict.summary()),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_ending(state: &PlayerState, command: &ParsedCommand) -> CommandResult {
    if command.has_flag("all") {
        let qualified = state.qualified_endings();
        if qualified.is_empty() {
            return CommandResult::success("No ending currently within reach.");
        }
        let names: Vec<&str> = qualified.iter().map(|e| e.name()).collect();
        return CommandResult::success(format!("Within reach: {}", names.join(", ")));
    }
    match state.resolve_ending() {
        Ok(Some(achievement)) => CommandResult::success(format!(
            "ENDING: {}\nDay {}, corruption {:.1}, {} trials passed (avg {:.1}), amnesty: {}",
            achievement.ending.name(),
            achievement.day,
            achievement.final_corruption,
            achievement.trials_passed,
            achievement.avg_trial_score,
            if achievement.divine_approval { "granted" } else { "denied" }
        )),
        Ok(None) => CommandResult::success("The threads of fate have not yet aligned."),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_save(state: &PlayerState, command: &ParsedCommand) -> CommandResult {
    let Some(path) = command.positional.first() else {
        return CommandResult::failure(CommandStatus::InvalidCommand, "usage: save <file>");
    };
    if state.in_combat() {
        return CommandResult::failure(
            CommandStatus::PermissionDenied,
            "cannot save during combat",
        );
    }
    match save::save_game(state, Path::new(path)) {
        Ok(()) => CommandResult::success(format!("Game saved to {path}.")),
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_load(state: &mut PlayerState, command: &ParsedCommand) -> CommandResult {
    let Some(path) = command.positional.first() else {
        return CommandResult::failure(CommandStatus::InvalidCommand, "usage: load <file>");
    };
    match save::load_game(Path::new(path)) {
        Ok(loaded) => {
            let day = loaded.resources.day_count;
            *state = loaded;
            CommandResult::success(format!("Game loaded from {path} (day {day})."))
        }
        Err(e) => CommandResult::from_error(&e),
    }
}

pub(crate) fn execute_help() -> CommandResult {
    CommandResult::success(
        "Commands:\n\
         combat    attack <id> | defend | cast <spell> <id> | flee | combat\n\
         rituals   raise <kind> [--name=N] | bind <soul> <minion> | banish <minion>\n\
                   harvest [kind] | heal <minion> | hunt [enemy-kind...]\n\
         world     status | wait <hours> | trial <1-7> | judgment | ending [--all]\n\
         session   save <file> | load <file> | help | quit",
    )
}

pub(crate) fn execute_quit() -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        text: "The shell releases you. For now.".to_string(),
        error: None,
        should_exit: true,
    }
}
