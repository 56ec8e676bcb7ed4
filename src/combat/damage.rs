//! The pure damage resolver and combat spells.

use super::combatant::Combatant;
use super::log::CombatLog;
use rand::Rng;

/// Probability of a critical hit.
pub const CRIT_CHANCE: f64 = 0.10;
/// Damage multiplier on a critical hit.
pub const CRIT_MULTIPLIER: f32 = 1.5;
/// Healing is never weaker than this.
const MIN_HEAL: u32 = 10;

/// Damage typing. Pure damage bypasses defense entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    /// Weapon damage; mitigated by defense.
    Physical,
    /// Death magic; mitigated by defense.
    Necrotic,
    /// Divine power; mitigated by defense.
    Holy,
    /// Unmitigable.
    Pure,
}

impl DamageKind {
    /// Lowercase name used in log lines.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DamageKind::Physical => "physical",
            DamageKind::Necrotic => "necrotic",
            DamageKind::Holy => "holy",
            DamageKind::Pure => "pure",
        }
    }
}

/// Full bookkeeping of one resolved attack. The resolver never mutates;
/// [`apply`] commits the result to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackResult {
    /// Attacker's raw attack value.
    pub base: u32,
    /// Damage to apply after crit and mitigation.
    pub dealt: u32,
    /// Damage absorbed by defense.
    pub mitigated: u32,
    /// Whether the crit roll landed.
    pub is_crit: bool,
    /// 1.5 on a crit, 1.0 otherwise.
    pub crit_multiplier: f32,
    /// True when mitigation swallowed the hit (floor damage of 1 applies).
    pub was_blocked: bool,
    /// The damage typing used.
    pub kind: DamageKind,
}

/// Resolve an attack with an explicit crit roll in `[0, 1)`.
///
/// Pipeline: crit check against [`CRIT_CHANCE`], then defense mitigation
/// (half the defender's effective defense; skipped for Pure), then a floor
/// of 1 damage.
#[must_use]
pub fn resolve_with_roll(
    attacker: &Combatant,
    defender: &Combatant,
    kind: DamageKind,
    crit_roll: f64,
) -> AttackResult {
    let base = attacker.attack;
    let is_crit = crit_roll < CRIT_CHANCE;
    // base * 1.5 in integer arithmetic
    let mut damage = if is_crit { base * 3 / 2 } else { base };

    let mut mitigated = 0;
    let mut was_blocked = false;
    if kind != DamageKind::Pure {
        let mitigation = defender.effective_defense() / 2;
        if damage > mitigation {
            damage -= mitigation;
            mitigated = mitigation;
        } else {
            was_blocked = true;
            mitigated = damage;
            damage = 1;
        }
    }
    damage = damage.max(1);

    AttackResult {
        base,
        dealt: damage,
        mitigated,
        is_crit,
        crit_multiplier: if is_crit { CRIT_MULTIPLIER } else { 1.0 },
        was_blocked,
        kind,
    }
}

/// Resolve an attack, drawing the crit roll from `rng`.
#[must_use]
pub fn resolve<R: Rng>(
    attacker: &Combatant,
    defender: &Combatant,
    kind: DamageKind,
    rng: &mut R,
) -> AttackResult {
    resolve_with_roll(attacker, defender, kind, rng.r#gen::<f64>())
}

/// Commit a resolved attack to the target, logging the damage line, the
/// remaining-HP line, and a death line when hp reaches zero. Returns
/// whether the target is still alive.
pub fn apply(log: &mut CombatLog, target: &mut Combatant, result: &AttackResult) -> bool {
    target.take_damage(result.dealt);
    if result.is_crit {
        log.push("Critical hit!");
    }
    log.push(format!(
        "{} takes {} {} damage ({} base - {} mitigated)",
        target.name,
        result.dealt,
        result.kind.name(),
        result.base,
        result.mitigated
    ));
    if target.is_alive() {
        log.push(format!(
            "{} has {}/{} HP remaining",
            target.name, target.hp, target.hp_max
        ));
        true
    } else {
        log.push(format!("{} has been slain!", target.name));
        false
    }
}

/// How much a healer restores: `max(attack / 2, 10)`, capped by the
/// target's missing hp.
#[must_use]
pub fn heal_amount(healer: &Combatant, target: &Combatant) -> u32 {
    (healer.attack / 2).max(MIN_HEAL).min(target.hp_max - target.hp)
}

/// Combat spells. Each calls the resolver, then overwrites `base` and
/// `dealt` with the spell's power, keeping the crit/block bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spell {
    /// Necrotic; heals the caster for half the damage dealt.
    Drain,
    /// Pure damage.
    Bolt,
    /// Log-only defense reduction.
    Weaken,
}

impl Spell {
    /// Parse a spell name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "drain" => Some(Spell::Drain),
            "bolt" => Some(Spell::Bolt),
            "weaken" => Some(Spell::Weaken),
            _ => None,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Spell::Drain => "Drain",
            Spell::Bolt => "Bolt",
            Spell::Weaken => "Weaken",
        }
    }

    /// Mana cost.
    #[must_use]
    pub fn mana_cost(self) -> u32 {
        match self {
            Spell::Drain => 15,
            Spell::Bolt => 20,
            Spell::Weaken => 10,
        }
    }

    /// Fixed spell damage, overriding the attacker's attack.
    #[must_use]
    pub fn power(self) -> u32 {
        match self {
            Spell::Drain => 15,
            Spell::Bolt => 20,
            Spell::Weaken => 0,
        }
    }

    /// Damage typing of the spell.
    #[must_use]
    pub fn damage_kind(self) -> DamageKind {
        match self {
            Spell::Drain => DamageKind::Necrotic,
            Spell::Bolt => DamageKind::Pure,
            Spell::Weaken => DamageKind::Physical,
        }
    }
}

#[cfg(kani)]
mod proofs {
    use super::*;
    use crate::combat::combatant::EntityRef;
    use crate::combat::CombatantKind;

    fn any_combatant(attack: u32, defense: u32, defending: bool) -> Combatant {
        Combatant {
            id: String::new(),
            name: String::new(),
            kind: CombatantKind::Enemy,
            hp: 1,
            hp_max: 1,
            attack,
            defense,
            speed: 0,
            initiative: 0,
            player_controlled: false,
            ai: None,
            has_acted: false,
            is_defending: defending,
            entity: EntityRef::Enemy(0),
        }
    }

    #[kani::proof]
    fn damage_floor_holds() {
        let attack: u32 = kani::any();
        let defense: u32 = kani::any();
        kani::assume(attack < 1_000_000);
        kani::assume(defense < 1_000_000);
        let attacker = any_combatant(attack, 0, false);
        let defender = any_combatant(0, defense, kani::any());
        let result = resolve_with_roll(&attacker, &defender, DamageKind::Physical, 0.5);
        assert!(result.dealt >= 1);
        assert!(result.mitigated <= result.base.max(1));
    }
}
