//! Enemy decision policies.
//!
//! Each policy picks exactly one action for the acting combatant from a
//! read-only view of the battlefield. Policies never touch turn ordering
//! or phases; the encounter executes the returned action.

use super::combatant::Combatant;
use crate::entities::AiBehavior;
use rand::Rng;

/// Hp percentage below which Defensive enemies heal an ally.
const DEFENSIVE_HEAL_PCT: u32 = 50;
/// Hp percentage below which Support enemies heal an ally.
const SUPPORT_HEAL_PCT: u32 = 80;
/// Attack rating a Defensive enemy needs before it will heal.
const DEFENSIVE_HEAL_MIN_ATTACK: u32 = 20;
/// Self-hp percentage below which Balanced enemies turtle.
const BALANCED_DEFEND_PCT: u32 = 30;

/// One action chosen by a policy. Indices point into the encounter's
/// combatant array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Attack the combatant at this index.
    Attack(usize),
    /// Heal the ally at this index.
    Heal(usize),
    /// Take a defensive stance and do nothing else.
    Defend,
    /// Take a defensive stance, then attack.
    DefendAndAttack(usize),
}

/// Living player-side combatant with the lowest hp.
fn lowest_hp_player(combatants: &[Combatant]) -> Option<usize> {
    combatants
        .iter()
        .enumerate()
        .filter(|(_, c)| c.player_controlled && c.is_alive())
        .min_by_key(|(_, c)| c.hp)
        .map(|(i, _)| i)
}

/// Uniformly random living player-side combatant.
fn random_living_player<R: Rng>(combatants: &[Combatant], rng: &mut R) -> Option<usize> {
    let living: Vec<usize> = combatants
        .iter()
        .enumerate()
        .filter(|(_, c)| c.player_controlled && c.is_alive())
        .map(|(i, _)| i)
        .collect();
    if living.is_empty() {
        None
    } else {
        Some(living[rng.gen_range(0..living.len())])
    }
}

/// Living enemy-side ally (excluding the actor) with the lowest hp, among
/// those below `pct` percent hp.
fn wounded_ally_below(combatants: &[Combatant], actor: usize, pct: u32) -> Option<usize> {
    combatants
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            *i != actor && !c.player_controlled && c.is_alive() && c.hp_percent() < pct
        })
        .min_by_key(|(_, c)| c.hp)
        .map(|(i, _)| i)
}

/// Pick the action for `actor` under `behavior`. Returns `None` when no
/// valid target exists (the encounter logs and no-ops).
pub fn decide<R: Rng>(
    behavior: AiBehavior,
    actor: usize,
    combatants: &[Combatant],
    rng: &mut R,
) -> Option<AiAction> {
    let me = &combatants[actor];
    match behavior {
        AiBehavior::Aggressive | AiBehavior::Tactical => {
            lowest_hp_player(combatants).map(AiAction::Attack)
        }
        AiBehavior::Defensive => {
            if me.attack >= DEFENSIVE_HEAL_MIN_ATTACK {
                if let Some(ally) = wounded_ally_below(combatants, actor, DEFENSIVE_HEAL_PCT) {
                    return Some(AiAction::Heal(ally));
                }
            }
            lowest_hp_player(combatants).map(AiAction::DefendAndAttack)
        }
        AiBehavior::Balanced => {
            if me.hp_percent() < BALANCED_DEFEND_PCT {
                Some(AiAction::Defend)
            } else {
                random_living_player(combatants, rng).map(AiAction::Attack)
            }
        }
        AiBehavior::Support => {
            if let Some(ally) = wounded_ally_below(combatants, actor, SUPPORT_HEAL_PCT) {
                Some(AiAction::Heal(ally))
            } else {
                lowest_hp_player(combatants).map(AiAction::Attack)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Enemy, EnemyKind, Minion, MinionKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Battlefield: [minion hp100, minion hp50, enemy, enemy].
    fn battlefield() -> Vec<Combatant> {
        let mut rng = StdRng::seed_from_u64(3);
        let m1 = Minion::new(1, MinionKind::Zombie, None, &mut rng);
        let m2 = Minion::new(2, MinionKind::Zombie, None, &mut rng);
        let mut c1 = Combatant::from_minion(&m1, 1);
        let mut c2 = Combatant::from_minion(&m2, 2);
        c1.hp = 100;
        c2.hp = 50;
        let e1 = Combatant::from_enemy(&Enemy::new(1, EnemyKind::Paladin), 1, 0);
        let e2 = Combatant::from_enemy(&Enemy::new(2, EnemyKind::Paladin), 2, 1);
        vec![c1, c2, e1, e2]
    }

    #[test]
    fn test_aggressive_attacks_lowest() {
        let field = battlefield();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            decide(AiBehavior::Aggressive, 2, &field, &mut rng),
            Some(AiAction::Attack(1))
        );
        assert_eq!(
            decide(AiBehavior::Tactical, 2, &field, &mut rng),
            Some(AiAction::Attack(1))
        );
    }

    #[test]
    fn test_defensive_heals_wounded_ally() {
        let mut field = battlefield();
        field[3].hp = 40; // paladin at 33%
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            decide(AiBehavior::Defensive, 2, &field, &mut rng),
            Some(AiAction::Heal(3))
        );
    }

    #[test]
    fn test_defensive_falls_back_to_defend_and_attack() {
        let field = battlefield();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            decide(AiBehavior::Defensive, 2, &field, &mut rng),
            Some(AiAction::DefendAndAttack(1))
        );
    }

    #[test]
    fn test_weak_defensive_never_heals() {
        let mut field = battlefield();
        field[2] = Combatant::from_enemy(&Enemy::new(3, EnemyKind::Villager), 3, 0);
        field[3].hp = 10;
        let mut rng = StdRng::seed_from_u64(1);
        // villager attack 5 < 20, so no heal even with a dying ally
        assert_eq!(
            decide(AiBehavior::Defensive, 2, &field, &mut rng),
            Some(AiAction::DefendAndAttack(1))
        );
    }

    #[test]
    fn test_balanced_defends_when_hurt() {
        let mut field = battlefield();
        field[2].hp = 30; // paladin at 25%
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            decide(AiBehavior::Balanced, 2, &field, &mut rng),
            Some(AiAction::Defend)
        );
    }

    #[test]
    fn test_balanced_attacks_random_living() {
        let mut field = battlefield();
        field[0].hp = 0;
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let action = decide(AiBehavior::Balanced, 2, &field, &mut rng);
            assert_eq!(action, Some(AiAction::Attack(1)), "only living target");
        }
    }

    #[test]
    fn test_support_heals_below_80() {
        let mut field = battlefield();
        field[3].hp = 90; // paladin at 75%
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            decide(AiBehavior::Support, 2, &field, &mut rng),
            Some(AiAction::Heal(3))
        );
        field[3].hp = 120;
        assert_eq!(
            decide(AiBehavior::Support, 2, &field, &mut rng),
            Some(AiAction::Attack(1))
        );
    }

    #[test]
    fn test_no_targets_yields_none() {
        let mut field = battlefield();
        field[0].hp = 0;
        field[1].hp = 0;
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(decide(AiBehavior::Aggressive, 2, &field, &mut rng), None);
        assert_eq!(decide(AiBehavior::Defensive, 2, &field, &mut rng), None);
    }
}
