//! The per-encounter combat state machine.

use super::ai::{decide, AiAction};
use super::combatant::{Combatant, EntityRef};
use super::damage::{apply, heal_amount, resolve, DamageKind, Spell};
use super::log::CombatLog;
use crate::entities::{Enemy, EnemyKind, Minion, MinionRoster};
use crate::error::{GameError, GameResult};
use crate::player::Resources;
use rand::Rng;

/// Capacity of each combat side.
pub const MAX_SIDE_COMBATANTS: usize = 32;

/// Hp percentage below which an ally counts as critical for fleeing.
const FLEE_CRITICAL_PCT: u32 = 30;

/// Lifecycle phases of an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    /// Assembling combatants; nothing rolled yet.
    Init,
    /// A player-controlled combatant is active.
    PlayerTurn,
    /// An enemy combatant is active.
    EnemyTurn,
    /// End-of-round victory/defeat check.
    Resolution,
    /// Terminal.
    End,
}

impl CombatPhase {
    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CombatPhase::Init => "Init",
            CombatPhase::PlayerTurn => "Player Turn",
            CombatPhase::EnemyTurn => "Enemy Turn",
            CombatPhase::Resolution => "Resolution",
            CombatPhase::End => "End",
        }
    }
}

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Every enemy is dead.
    Victory,
    /// Every player-side combatant is dead.
    Defeat,
    /// The player escaped.
    Fled,
}

/// Escape chance: half, plus 10% per dead enemy, minus 20% once if any
/// living ally is below 30% hp; clamped to `[0.10, 0.95]`.
#[must_use]
pub fn flee_chance(dead_enemies: u32, ally_critical: bool) -> f64 {
    let mut chance = 0.5 + 0.1 * f64::from(dead_enemies);
    if ally_critical {
        chance -= 0.2;
    }
    chance.clamp(0.10, 0.95)
}

/// One combat encounter: two capped sides flattened into a single
/// combatant array, a sorted turn order, and a ring-buffer log.
///
/// Enemy entities are owned by the encounter; minions stay in the roster
/// and are synced back through [`CombatEncounter::sync_to_roster`] when the
/// encounter ends.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatEncounter {
    /// Current phase.
    pub phase: CombatPhase,
    /// Round counter, starting at 1.
    pub turn_number: u32,
    /// Terminal outcome, set by the End transition.
    pub outcome: Option<CombatOutcome>,
    /// True while the player side may submit actions.
    pub player_can_act: bool,
    /// Game day the encounter started.
    pub started_day: u32,
    /// Combat log.
    pub log: CombatLog,
    combatants: Vec<Combatant>,
    enemies: Vec<Enemy>,
    turn_order: Vec<usize>,
    current_turn_index: usize,
    next_minion_seq: u32,
    next_enemy_seq: u32,
}

impl CombatEncounter {
    /// Empty encounter in the Init phase.
    #[must_use]
    pub fn new(started_day: u32) -> Self {
        CombatEncounter {
            phase: CombatPhase::Init,
            turn_number: 0,
            outcome: None,
            player_can_act: false,
            started_day,
            log: CombatLog::new(),
            combatants: Vec::new(),
            enemies: Vec::new(),
            turn_order: Vec::new(),
            current_turn_index: 0,
            next_minion_seq: 1,
            next_enemy_seq: 1,
        }
    }

    /// All combatants, player side and enemy side interleaved.
    #[must_use]
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    /// Enemy entities owned by this encounter.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Add a player-side combatant wrapping `minion`.
    pub fn add_minion(&mut self, minion: &Minion) -> GameResult<()> {
        let player_count = self.combatants.iter().filter(|c| c.player_controlled).count();
        if player_count >= MAX_SIDE_COMBATANTS {
            return Err(GameError::SideFull { player_side: true });
        }
        self.combatants.push(Combatant::from_minion(minion, self.next_minion_seq));
        self.next_minion_seq += 1;
        Ok(())
    }

    /// Spawn an enemy of `kind` and add its combatant wrapper.
    pub fn add_enemy(&mut self, kind: EnemyKind) -> GameResult<()> {
        let enemy_count = self.combatants.iter().filter(|c| !c.player_controlled).count();
        if enemy_count >= MAX_SIDE_COMBATANTS {
            return Err(GameError::SideFull { player_side: false });
        }
        let enemy = Enemy::new(self.next_enemy_seq, kind);
        let combatant = Combatant::from_enemy(&enemy, self.next_enemy_seq, self.enemies.len());
        self.enemies.push(enemy);
        self.combatants.push(combatant);
        self.next_enemy_seq += 1;
        Ok(())
    }

    /// Roll initiative for everyone, sort the turn order descending, and
    /// open round 1. Enemies that out-rolled every player unit act
    /// immediately.
    pub fn initialize<R: Rng>(&mut self, rng: &mut R) {
        for c in &mut self.combatants {
            c.roll_initiative(rng);
        }
        let mut order: Vec<usize> = (0..self.combatants.len()).collect();
        order.sort_by(|&a, &b| self.combatants[b].initiative.cmp(&self.combatants[a].initiative));
        self.turn_order = order;
        self.turn_number = 1;
        self.current_turn_index = 0;
        self.log.push("=== COMBAT START ===");
        self.log.push("Turn 1 begins");
        log::debug!(
            "combat initialized: {} combatants, {} enemies",
            self.combatants.len(),
            self.enemies.len()
        );
        self.set_phase_for_active();
        self.drive(rng);
    }

    /// Index (into the combatant array) of the active combatant.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.turn_order.get(self.current_turn_index).copied()
    }

    /// The active combatant.
    #[must_use]
    pub fn active(&self) -> Option<&Combatant> {
        self.active_index().map(|i| &self.combatants[i])
    }

    /// Find a combatant by its short id.
    #[must_use]
    pub fn find_combatant(&self, id: &str) -> Option<usize> {
        self.combatants.iter().position(|c| c.id.eq_ignore_ascii_case(id))
    }

    /// True once the encounter reached the End phase.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == CombatPhase::End
    }

    fn all_enemies_dead(&self) -> bool {
        self.combatants
            .iter()
            .filter(|c| !c.player_controlled)
            .all(|c| !c.is_alive())
    }

    fn all_players_dead(&self) -> bool {
        self.combatants
            .iter()
            .filter(|c| c.player_controlled)
            .all(|c| !c.is_alive())
    }

    fn dead_enemy_count(&self) -> u32 {
        let n = self
            .combatants
            .iter()
            .filter(|c| !c.player_controlled && !c.is_alive())
            .count();
        u32::try_from(n).unwrap_or(u32::MAX)
    }

    /// Escape chance for the current battlefield; see [`flee_chance`].
    #[must_use]
    pub fn current_flee_chance(&self) -> f64 {
        let ally_critical = self
            .combatants
            .iter()
            .any(|c| c.player_controlled && c.is_alive() && c.hp_percent() < FLEE_CRITICAL_PCT);
        flee_chance(self.dead_enemy_count(), ally_critical)
    }

    /// Check the player-action preconditions in order, returning the
    /// active combatant's index. Never mutates.
    pub fn validate_player_action(&self) -> GameResult<usize> {
        if self.phase != CombatPhase::PlayerTurn {
            return Err(GameError::NotPlayerTurn);
        }
        if !self.player_can_act {
            return Err(GameError::CannotAct);
        }
        let actor = self.active_index().ok_or(GameError::NoActiveCombatant)?;
        if !self.combatants[actor].player_controlled {
            return Err(GameError::NotPlayerControlled);
        }
        if self.combatants[actor].has_acted {
            return Err(GameError::AlreadyActed);
        }
        Ok(actor)
    }

    /// Resolve a target id to a living enemy combatant. Never mutates.
    pub fn validate_enemy_target(&self, id: &str) -> GameResult<usize> {
        let target = self
            .find_combatant(id)
            .ok_or_else(|| GameError::TargetNotFound(id.to_string()))?;
        if self.combatants[target].player_controlled {
            return Err(GameError::TargetNotEnemy(id.to_string()));
        }
        if !self.combatants[target].is_alive() {
            return Err(GameError::TargetDead(id.to_string()));
        }
        Ok(target)
    }

    /// Player action: basic attack with an explicit crit roll.
    pub fn player_attack_with_roll<R: Rng>(
        &mut self,
        target_id: &str,
        crit_roll: f64,
        rng: &mut R,
    ) -> GameResult<()> {
        let actor = self.validate_player_action()?;
        let target = self.validate_enemy_target(target_id)?;
        self.log.push(format!(
            "{} attacks {}!",
            self.combatants[actor].name, self.combatants[target].name
        ));
        let result = super::damage::resolve_with_roll(
            &self.combatants[actor],
            &self.combatants[target],
            DamageKind::Physical,
            crit_roll,
        );
        apply(&mut self.log, &mut self.combatants[target], &result);
        self.finish_player_action(actor, rng);
        Ok(())
    }

    /// Player action: basic attack.
    pub fn player_attack<R: Rng>(&mut self, target_id: &str, rng: &mut R) -> GameResult<()> {
        let roll = rng.r#gen::<f64>();
        self.player_attack_with_roll(target_id, roll, rng)
    }

    /// Player action: take a defensive stance (+50% defense until the
    /// round flags reset).
    pub fn player_defend<R: Rng>(&mut self, rng: &mut R) -> GameResult<()> {
        let actor = self.validate_player_action()?;
        self.combatants[actor].is_defending = true;
        self.log
            .push(format!("{} takes a defensive stance!", self.combatants[actor].name));
        self.finish_player_action(actor, rng);
        Ok(())
    }

    /// Player action: cast a combat spell. Deducts mana after the combat
    /// preconditions pass; a failed precondition leaves mana untouched.
    pub fn player_cast<R: Rng>(
        &mut self,
        spell: Spell,
        target_id: &str,
        resources: &mut Resources,
        rng: &mut R,
    ) -> GameResult<()> {
        let actor = self.validate_player_action()?;
        let target = self.validate_enemy_target(target_id)?;
        resources.spend_mana(spell.mana_cost())?;

        match spell {
            Spell::Weaken => {
                // Log-only: the reduction is announced but no status effect
                // persists across turns.
                let reduction = self.combatants[target].defense * 20 / 100;
                self.log.push(format!(
                    "{} casts Weaken on {}: -{} defense for 2 turns",
                    self.combatants[actor].name, self.combatants[target].name, reduction
                ));
            }
            Spell::Drain | Spell::Bolt => {
                self.log.push(format!(
                    "{} casts {} at {}!",
                    self.combatants[actor].name,
                    spell.name(),
                    self.combatants[target].name
                ));
                let mut result = resolve(
                    &self.combatants[actor],
                    &self.combatants[target],
                    spell.damage_kind(),
                    rng,
                );
                // Spells deal fixed damage but keep the crit/block bookkeeping.
                result.base = spell.power();
                result.dealt = spell.power();
                apply(&mut self.log, &mut self.combatants[target], &result);
                if spell == Spell::Drain {
                    let restored = self.combatants[actor].heal(result.dealt / 2);
                    self.log.push(format!(
                        "{} drains {} HP",
                        self.combatants[actor].name, restored
                    ));
                }
            }
        }
        self.finish_player_action(actor, rng);
        Ok(())
    }

    /// Player action: attempt to flee with an explicit roll in `[0, 1)`.
    /// Returns true on escape. On failure every living enemy lands a free
    /// attack on a random living ally before the round continues.
    pub fn player_flee_with_roll<R: Rng>(&mut self, roll: f64, rng: &mut R) -> GameResult<bool> {
        self.validate_player_action()?;
        let chance = self.current_flee_chance();
        if roll < chance {
            self.log.push("You slip away from the battle!");
            self.end(CombatOutcome::Fled);
            return Ok(true);
        }
        self.log.push("Escape failed!");
        let enemies: Vec<usize> = (0..self.combatants.len())
            .filter(|&i| !self.combatants[i].player_controlled && self.combatants[i].is_alive())
            .collect();
        for attacker in enemies {
            let living: Vec<usize> = (0..self.combatants.len())
                .filter(|&i| self.combatants[i].player_controlled && self.combatants[i].is_alive())
                .collect();
            let Some(&target) = living.get(rng.gen_range(0..living.len().max(1))) else {
                break;
            };
            self.log.push(format!(
                "{} strikes at the fleeing {}!",
                self.combatants[attacker].name, self.combatants[target].name
            ));
            let result = resolve(
                &self.combatants[attacker],
                &self.combatants[target],
                DamageKind::Physical,
                rng,
            );
            apply(&mut self.log, &mut self.combatants[target], &result);
        }
        if self.all_players_dead() {
            self.end(CombatOutcome::Defeat);
            return Ok(false);
        }
        // The attempt consumes the actor's turn; enemies that have not yet
        // acted this round still get their normal turn.
        self.advance_turn();
        self.drive(rng);
        Ok(false)
    }

    /// Player action: attempt to flee.
    pub fn player_flee<R: Rng>(&mut self, rng: &mut R) -> GameResult<bool> {
        let roll = rng.r#gen::<f64>();
        self.player_flee_with_roll(roll, rng)
    }

    /// Mark the actor done and advance the machine until the player can
    /// act again or the encounter ends.
    fn finish_player_action<R: Rng>(&mut self, actor: usize, rng: &mut R) {
        self.combatants[actor].has_acted = true;
        if self.phase == CombatPhase::End {
            return;
        }
        self.advance_turn();
        self.drive(rng);
    }

    /// Advance `current_turn_index`, skipping dead combatants. Past the
    /// end of the order the phase becomes Resolution; otherwise the phase
    /// follows the next combatant's controller.
    pub fn advance_turn(&mut self) {
        if let Some(actor) = self.active_index() {
            self.combatants[actor].has_acted = true;
        }
        self.current_turn_index += 1;
        while let Some(&idx) = self.turn_order.get(self.current_turn_index) {
            if self.combatants[idx].is_alive() {
                break;
            }
            self.current_turn_index += 1;
        }
        if self.current_turn_index >= self.turn_order.len() {
            self.phase = CombatPhase::Resolution;
            self.player_can_act = false;
        } else {
            self.set_phase_for_active();
        }
    }

    fn set_phase_for_active(&mut self) {
        let player_next = self.active().is_some_and(|c| c.player_controlled);
        self.phase = if player_next {
            CombatPhase::PlayerTurn
        } else {
            CombatPhase::EnemyTurn
        };
        self.player_can_act = player_next;
    }

    /// Run enemy turns and round resolutions until the player is active
    /// again or the encounter ends.
    fn drive<R: Rng>(&mut self, rng: &mut R) {
        loop {
            match self.phase {
                CombatPhase::Init | CombatPhase::PlayerTurn | CombatPhase::End => break,
                CombatPhase::EnemyTurn => {
                    if let Some(actor) = self.active_index() {
                        self.run_ai_turn(actor, rng);
                    }
                    self.advance_turn();
                }
                CombatPhase::Resolution => self.resolve_round(),
            }
        }
    }

    /// Execute one enemy's policy. A policy with no valid target no-ops.
    fn run_ai_turn<R: Rng>(&mut self, actor: usize, rng: &mut R) {
        let Some(behavior) = self.combatants[actor].ai else {
            self.log
                .push(format!("{} stands idle", self.combatants[actor].name));
            return;
        };
        match decide(behavior, actor, &self.combatants, rng) {
            Some(AiAction::Attack(target)) => self.ai_attack(actor, target, rng),
            Some(AiAction::Heal(target)) => {
                let amount = heal_amount(&self.combatants[actor], &self.combatants[target]);
                self.combatants[target].heal(amount);
                self.log.push(format!(
                    "{} heals {} for {} HP",
                    self.combatants[actor].name, self.combatants[target].name, amount
                ));
            }
            Some(AiAction::Defend) => {
                self.combatants[actor].is_defending = true;
                self.log
                    .push(format!("{} takes a defensive stance!", self.combatants[actor].name));
            }
            Some(AiAction::DefendAndAttack(target)) => {
                self.combatants[actor].is_defending = true;
                self.log
                    .push(format!("{} takes a defensive stance!", self.combatants[actor].name));
                self.ai_attack(actor, target, rng);
            }
            None => {
                self.log
                    .push(format!("{} finds no target", self.combatants[actor].name));
            }
        }
    }

    fn ai_attack<R: Rng>(&mut self, actor: usize, target: usize, rng: &mut R) {
        self.log.push(format!(
            "{} attacks {}!",
            self.combatants[actor].name, self.combatants[target].name
        ));
        let result = resolve(
            &self.combatants[actor],
            &self.combatants[target],
            DamageKind::Physical,
            rng,
        );
        apply(&mut self.log, &mut self.combatants[target], &result);
    }

    /// End-of-round check: victory, defeat, or a fresh round.
    fn resolve_round(&mut self) {
        if self.all_enemies_dead() {
            self.end(CombatOutcome::Victory);
        } else if self.all_players_dead() {
            self.end(CombatOutcome::Defeat);
        } else {
            self.start_new_round();
        }
    }

    fn start_new_round(&mut self) {
        self.turn_number += 1;
        for c in &mut self.combatants {
            c.reset_turn_flags();
        }
        self.current_turn_index = 0;
        while let Some(&idx) = self.turn_order.get(self.current_turn_index) {
            if self.combatants[idx].is_alive() {
                break;
            }
            self.current_turn_index += 1;
        }
        self.log.push(format!("--- Turn {} ---", self.turn_number));
        self.set_phase_for_active();
    }

    /// Terminal transition: set the outcome and log the banner.
    pub fn end(&mut self, outcome: CombatOutcome) {
        self.phase = CombatPhase::End;
        self.outcome = Some(outcome);
        self.player_can_act = false;
        let banner = match outcome {
            CombatOutcome::Victory => "=== VICTORY ===",
            CombatOutcome::Defeat => "=== DEFEAT ===",
            CombatOutcome::Fled => "=== FLED ===",
        };
        self.log.push(banner);
    }

    /// Write minion combatants' hp and stats back to the roster. Called
    /// once when the encounter ends.
    pub fn sync_to_roster(&self, roster: &mut MinionRoster) {
        for c in &self.combatants {
            if let EntityRef::Minion(id) = c.entity {
                if let Some(minion) = roster.get_mut(id) {
                    c.sync_to_minion(minion);
                }
            }
        }
    }
}
