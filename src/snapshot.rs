//! Read-only combat snapshots for the shell and the JSON output mode.

use crate::combat::{CombatEncounter, Combatant};
use serde::Serialize;

/// Log lines included in a snapshot.
const SNAPSHOT_LOG_LINES: usize = 10;

/// One combatant, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatantView {
    /// Short id (`M1`, `E2`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current hp.
    pub hp: u32,
    /// Hp ceiling.
    pub hp_max: u32,
    /// True while hp is above zero.
    pub is_alive: bool,
    /// Defensive stance flag.
    pub is_defending: bool,
    /// Acted-this-round flag.
    pub has_acted: bool,
}

impl From<&Combatant> for CombatantView {
    fn from(c: &Combatant) -> Self {
        CombatantView {
            id: c.id.clone(),
            name: c.name.clone(),
            hp: c.hp,
            hp_max: c.hp_max,
            is_alive: c.is_alive(),
            is_defending: c.is_defending,
            has_acted: c.has_acted,
        }
    }
}

/// A point-in-time view of an encounter: both sides, the active
/// combatant, and the tail of the log. Serializes to the shell's JSON
/// output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatSnapshot {
    /// Phase display name.
    pub phase: String,
    /// Round counter.
    pub turn_number: u32,
    /// Player-side combatants, in join order.
    pub player_side: Vec<CombatantView>,
    /// Enemy-side combatants, in join order.
    pub enemy_side: Vec<CombatantView>,
    /// Id of the active combatant, if any.
    pub active_id: Option<String>,
    /// Most recent log lines, newest first.
    pub recent_log: Vec<String>,
}

impl CombatSnapshot {
    /// Capture the encounter's current state.
    #[must_use]
    pub fn capture(encounter: &CombatEncounter) -> Self {
        let (player_side, enemy_side): (Vec<_>, Vec<_>) = encounter
            .combatants()
            .iter()
            .partition(|c| c.player_controlled);
        CombatSnapshot {
            phase: encounter.phase.name().to_string(),
            turn_number: encounter.turn_number,
            player_side: player_side.into_iter().map(CombatantView::from).collect(),
            enemy_side: enemy_side.into_iter().map(CombatantView::from).collect(),
            active_id: encounter.active().map(|c| c.id.clone()),
            recent_log: encounter
                .log
                .recent(SNAPSHOT_LOG_LINES)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Render the snapshot as the shell's combat status block.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = format!("=== COMBAT (Turn {}, {}) ===\n", self.turn_number, self.phase);
        out.push_str("Your forces:\n");
        for view in &self.player_side {
            out.push_str(&Self::render_line(view, self.active_id.as_deref()));
        }
        out.push_str("Enemies:\n");
        for view in &self.enemy_side {
            out.push_str(&Self::render_line(view, self.active_id.as_deref()));
        }
        if !self.recent_log.is_empty() {
            out.push_str("Recent events:\n");
            // the log walks newest-first; print oldest-first
            for line in self.recent_log.iter().rev() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    fn render_line(view: &CombatantView, active_id: Option<&str>) -> String {
        let marker = if active_id == Some(view.id.as_str()) {
            ">"
        } else {
            " "
        };
        let state = if !view.is_alive {
            " [DEAD]"
        } else if view.is_defending {
            " [DEFENDING]"
        } else {
            ""
        };
        format!(
            "{marker} [{}] {} {}/{} HP{state}\n",
            view.id, view.name, view.hp, view.hp_max
        )
    }
}
