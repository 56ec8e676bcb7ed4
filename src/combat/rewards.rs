//! Victory rewards: walk the dead enemies and bundle the spoils.

use super::encounter::CombatEncounter;
use crate::entities::{EnemyKind, SoulKind};

/// Corruption gained per villager killed.
const VILLAGER_CORRUPTION: f32 = 5.0;

/// Everything a won encounter pays out. Computed from the encounter,
/// applied to the player state in one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatRewards {
    /// Total experience from dead enemies.
    pub experience: u32,
    /// Total soul energy from dead enemies.
    pub soul_energy: u32,
    /// Corruption gained (villager kills).
    pub corruption: f32,
    /// Villager deaths; feeds the civilian-kill counter.
    pub villager_kills: u32,
    /// One harvested soul per dead enemy: `(kind, quality)`.
    pub souls: Vec<(SoulKind, u8)>,
}

/// The soul a dead enemy leaves behind.
fn soul_for(kind: EnemyKind) -> (SoulKind, u8) {
    match kind {
        EnemyKind::Paladin | EnemyKind::Guard => (SoulKind::Warrior, 60),
        EnemyKind::Priest | EnemyKind::Inquisitor => (SoulKind::Mage, 65),
        EnemyKind::Villager => (SoulKind::Innocent, 40),
        EnemyKind::RivalNecromancer => (SoulKind::Corrupted, 70),
    }
}

impl CombatRewards {
    /// Compute the reward bundle from a finished (or finishing) encounter.
    #[must_use]
    pub fn calculate(encounter: &CombatEncounter) -> Self {
        let mut rewards = CombatRewards::default();
        let dead_ids: Vec<u32> = encounter
            .combatants()
            .iter()
            .filter_map(|c| {
                if c.player_controlled || c.is_alive() {
                    None
                } else {
                    match c.entity {
                        super::combatant::EntityRef::Enemy(idx) => {
                            encounter.enemies().get(idx).map(|e| e.id)
                        }
                        super::combatant::EntityRef::Minion(_) => None,
                    }
                }
            })
            .collect();
        for enemy in encounter.enemies() {
            if !dead_ids.contains(&enemy.id) {
                continue;
            }
            rewards.experience += enemy.xp_reward();
            rewards.soul_energy += enemy.soul_energy_reward();
            if enemy.kind == EnemyKind::Villager {
                rewards.corruption += VILLAGER_CORRUPTION;
                rewards.villager_kills += 1;
            }
            rewards.souls.push(soul_for(enemy.kind));
        }
        rewards
    }

    /// Human-readable payout summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::from("=== VICTORY REWARDS ===\n");
        if self.experience > 0 {
            out.push_str(&format!("Experience: +{}\n", self.experience));
        }
        if self.soul_energy > 0 {
            out.push_str(&format!("Soul Energy: +{}\n", self.soul_energy));
        }
        if !self.souls.is_empty() {
            out.push_str(&format!("Souls Harvested: {}\n", self.souls.len()));
            for (kind, quality) in &self.souls {
                out.push_str(&format!("  - {} (quality {})\n", kind.name(), quality));
            }
        }
        if self.corruption > 0.0 {
            out.push_str(&format!(
                "Corruption: +{} (innocent blood spilled)\n",
                self.corruption
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Minion, MinionKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn won_encounter() -> CombatEncounter {
        let mut rng = StdRng::seed_from_u64(9);
        let minion = Minion::new(1, MinionKind::Revenant, None, &mut rng);
        let mut enc = CombatEncounter::new(1);
        enc.add_minion(&minion).unwrap();
        enc.add_enemy(EnemyKind::Villager).unwrap();
        enc.add_enemy(EnemyKind::Guard).unwrap();
        enc.initialize(&mut rng);
        let mut guard = 0;
        while !enc.is_over() && guard < 300 {
            let target = enc
                .combatants()
                .iter()
                .find(|c| !c.player_controlled && c.is_alive())
                .map(|c| c.id.clone());
            if let Some(id) = target {
                enc.player_attack(&id, &mut rng).unwrap();
            }
            guard += 1;
        }
        enc
    }

    #[test]
    fn test_rewards_from_victory() {
        let enc = won_encounter();
        let rewards = CombatRewards::calculate(&enc);
        // villager (10 xp, 5 energy) + guard (25 xp, 20 energy)
        assert_eq!(rewards.experience, 35);
        assert_eq!(rewards.soul_energy, 25);
        assert_eq!(rewards.villager_kills, 1);
        assert!((rewards.corruption - 5.0).abs() < f32::EPSILON);
        assert_eq!(rewards.souls.len(), 2);
        assert!(rewards.souls.contains(&(SoulKind::Innocent, 40)));
        assert!(rewards.souls.contains(&(SoulKind::Warrior, 60)));
    }

    #[test]
    fn test_soul_table() {
        assert_eq!(soul_for(EnemyKind::Paladin), (SoulKind::Warrior, 60));
        assert_eq!(soul_for(EnemyKind::Priest), (SoulKind::Mage, 65));
        assert_eq!(soul_for(EnemyKind::Inquisitor), (SoulKind::Mage, 65));
        assert_eq!(soul_for(EnemyKind::RivalNecromancer), (SoulKind::Corrupted, 70));
    }

    #[test]
    fn test_live_enemies_pay_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let minion = Minion::new(1, MinionKind::Zombie, None, &mut rng);
        let mut enc = CombatEncounter::new(1);
        enc.add_minion(&minion).unwrap();
        enc.add_enemy(EnemyKind::Paladin).unwrap();
        enc.initialize(&mut rng);
        let rewards = CombatRewards::calculate(&enc);
        assert_eq!(rewards.experience, 0);
        assert!(rewards.souls.is_empty());
    }
}
