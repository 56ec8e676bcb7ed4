//! Entity model: souls, minions, enemies, and the rosters that own them.
//!
//! Souls and minions reference each other by id only; the rosters resolve
//! the cycle. Combat never touches these types directly; it operates on
//! [`crate::combat::Combatant`] wrappers and syncs back at encounter end.

mod enemy;
mod minion;
mod roster;
mod soul;

pub use enemy::{AiBehavior, Enemy, EnemyKind};
pub use minion::{Minion, MinionKind, MinionStats};
pub use roster::{MinionRoster, SoulVault};
pub use soul::{soul_energy, Binding, Soul, SoulKind};
