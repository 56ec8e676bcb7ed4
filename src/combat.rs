//! Turn-based combat engine.
//!
//! A phase-driven state machine over a homogeneous collection of
//! [`Combatant`] wrappers: initiative ordering, a pure damage resolver,
//! five enemy AI policies, a ring-buffer log, and victory rewards.

mod ai;
mod combatant;
mod damage;
mod encounter;
mod log;
mod rewards;

pub use ai::{decide, AiAction};
pub use combatant::{Combatant, CombatantKind, EntityRef};
pub use damage::{
    apply, heal_amount, resolve, resolve_with_roll, AttackResult, DamageKind, Spell, CRIT_CHANCE,
    CRIT_MULTIPLIER,
};
pub use encounter::{
    flee_chance, CombatEncounter, CombatOutcome, CombatPhase, MAX_SIDE_COMBATANTS,
};
pub use log::CombatLog;
pub use rewards::CombatRewards;
