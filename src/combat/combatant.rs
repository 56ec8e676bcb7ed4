//! The uniform combat wrapper over minions and enemies.

use crate::entities::{AiBehavior, Enemy, Minion};
use rand::Rng;

/// Initiative ceiling.
const INITIATIVE_MAX: u32 = 255;

/// What a combatant wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatantKind {
    /// Wraps a roster minion.
    Minion,
    /// Wraps an encounter enemy.
    Enemy,
    /// Wraps the player character.
    Player,
}

/// Back-reference to the wrapped entity for end-of-combat sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    /// Minion id in the player roster.
    Minion(u32),
    /// Enemy index within the encounter.
    Enemy(usize),
}

/// The combat engine's homogeneous view of any fighting entity. Owns stat
/// copies taken at wrap time; the wrapped entity is synced back when the
/// encounter ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    /// Short id: `"M<n>"` for minion-derived, `"E<n>"` for enemy-derived.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Kind tag.
    pub kind: CombatantKind,
    /// Current hit points.
    pub hp: u32,
    /// Hit point ceiling.
    pub hp_max: u32,
    /// Attack rating.
    pub attack: u32,
    /// Defense rating.
    pub defense: u32,
    /// Speed rating.
    pub speed: u32,
    /// Rolled initiative in `[0, 255]`.
    pub initiative: u32,
    /// True for the player side.
    pub player_controlled: bool,
    /// Decision policy; enemies only.
    pub ai: Option<AiBehavior>,
    /// Set once this combatant has acted in the current round.
    pub has_acted: bool,
    /// Set by the defend action; boosts effective defense until reset.
    pub is_defending: bool,
    /// Back-reference for the end-of-combat entity sync.
    pub entity: EntityRef,
}

impl Combatant {
    /// Wrap a minion, copying its stats.
    #[must_use]
    pub fn from_minion(minion: &Minion, seq: u32) -> Self {
        Combatant {
            id: format!("M{seq}"),
            name: minion.name.clone(),
            kind: CombatantKind::Minion,
            hp: minion.stats.hp,
            hp_max: minion.stats.hp_max,
            attack: minion.stats.attack,
            defense: minion.stats.defense,
            speed: minion.stats.speed,
            initiative: 0,
            player_controlled: true,
            ai: None,
            has_acted: false,
            is_defending: false,
            entity: EntityRef::Minion(minion.id),
        }
    }

    /// Wrap an enemy, copying its stats and attaching its kind's AI.
    #[must_use]
    pub fn from_enemy(enemy: &Enemy, seq: u32, enemy_index: usize) -> Self {
        Combatant {
            id: format!("E{seq}"),
            name: enemy.name.clone(),
            kind: CombatantKind::Enemy,
            hp: enemy.hp,
            hp_max: enemy.hp_max,
            attack: enemy.attack,
            defense: enemy.defense,
            speed: enemy.speed,
            initiative: 0,
            player_controlled: false,
            ai: Some(enemy.kind.ai_behavior()),
            has_acted: false,
            is_defending: false,
            entity: EntityRef::Enemy(enemy_index),
        }
    }

    /// Roll initiative: `min(speed, 255) + uniform(0, 50)`, clamped to 255.
    pub fn roll_initiative<R: Rng>(&mut self, rng: &mut R) {
        let base = self.speed.min(INITIATIVE_MAX);
        self.initiative = (base + rng.gen_range(0..=50)).min(INITIATIVE_MAX);
    }

    /// True while hp is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Defense rating after the defending bonus: +50% while defending.
    #[must_use]
    pub fn effective_defense(&self) -> u32 {
        if self.is_defending {
            self.defense * 150 / 100
        } else {
            self.defense
        }
    }

    /// Reduce hp, flooring at zero.
    pub fn take_damage(&mut self, damage: u32) {
        self.hp = self.hp.saturating_sub(damage);
    }

    /// Restore hp, capped at `hp_max`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.hp_max - self.hp);
        self.hp += healed;
        healed
    }

    /// Fraction of hp remaining, in percent.
    #[must_use]
    pub fn hp_percent(&self) -> u32 {
        if self.hp_max == 0 {
            0
        } else {
            self.hp * 100 / self.hp_max
        }
    }

    /// Clear the per-round flags.
    pub fn reset_turn_flags(&mut self) {
        self.has_acted = false;
        self.is_defending = false;
    }

    /// Write hp and combat stats back to the wrapped minion. Enemies live
    /// and die inside the encounter, so only minions sync.
    pub fn sync_to_minion(&self, minion: &mut Minion) {
        minion.stats.hp = self.hp.min(minion.stats.hp_max);
        minion.stats.attack = self.attack;
        minion.stats.defense = self.defense;
        minion.stats.speed = self.speed;
    }
}
