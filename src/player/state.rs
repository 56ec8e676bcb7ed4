//! The single mutable game state threaded through every command.

use super::consciousness::Consciousness;
use super::corruption::Corruption;
use super::resources::Resources;
use crate::combat::{CombatEncounter, CombatOutcome, CombatRewards, Spell};
use crate::ending::{
    self, EndingAchievement, EndingInputs, EndingType, JudgmentInput, JudgmentVerdict, TrialSet,
    TrialStatus,
};
use crate::entities::{EnemyKind, Minion, MinionKind, MinionRoster, Soul, SoulKind, SoulVault};
use crate::error::{GameError, GameResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Corruption gained by the raise ritual.
const RAISE_CORRUPTION: f32 = 10.0;
/// Mana cost of healing a minion outside combat.
const HEAL_MANA_COST: u32 = 15;
/// Hp restored by healing a minion outside combat.
const HEAL_AMOUNT: u32 = 30;
/// Hours a harvest ritual takes.
const HARVEST_HOURS: u32 = 1;
/// Experience required per player level.
const XP_PER_LEVEL: u32 = 1000;

/// The whole run: the three axes, both rosters, trial and judgment
/// records, and the active encounter if any.
///
/// Every operation is atomic: a returned error means nothing changed.
#[derive(Debug)]
pub struct PlayerState {
    /// Soul energy, mana, and the clock.
    pub resources: Resources,
    /// The moral axis.
    pub corruption: Corruption,
    /// The mental axis.
    pub consciousness: Consciousness,
    /// Harvested souls.
    pub souls: SoulVault,
    /// Raised minions.
    pub minions: MinionRoster,
    /// Player level, starting at 1.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Opaque world location id.
    pub location: u32,
    /// Villagers killed in combat; read by Anara and the Revenant gate.
    pub civilian_kills: u32,
    /// Terminal-branch narrative choice.
    pub maya_saved: bool,
    /// The seven trials.
    pub trials: TrialSet,
    /// Council verdict, once held.
    pub judgment: Option<JudgmentVerdict>,
    /// The current (or most recently finished) encounter.
    pub encounter: Option<CombatEncounter>,
    rng: StdRng,
    combat_finalized: bool,
}

impl PlayerState {
    /// Fresh run. A seed makes the whole run deterministic.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        PlayerState {
            resources: Resources::new(),
            corruption: Corruption::new(),
            consciousness: Consciousness::new(),
            souls: SoulVault::new(),
            minions: MinionRoster::new(),
            level: 1,
            experience: 0,
            location: 0,
            civilian_kills: 0,
            maya_saved: false,
            trials: TrialSet::new(),
            judgment: None,
            encounter: None,
            rng: match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            },
            combat_finalized: false,
        }
    }

    /// True while an encounter is running.
    #[must_use]
    pub fn in_combat(&self) -> bool {
        self.encounter.as_ref().is_some_and(|e| !e.is_over())
    }

    fn ensure_no_combat(&self) -> GameResult<()> {
        if self.in_combat() {
            return Err(GameError::AlreadyInCombat);
        }
        Ok(())
    }

    /// Advance the clock, firing mana regen and the monthly
    /// consciousness decay. Returns the days that elapsed.
    pub fn advance_time(&mut self, hours: u32) -> u32 {
        let days = self.resources.advance_time(hours);
        self.consciousness.apply_decay(self.resources.months_elapsed());
        days
    }

    /// Wait out `hours` of game time. Refused during combat.
    pub fn wait(&mut self, hours: u32) -> GameResult<u32> {
        self.ensure_no_combat()?;
        Ok(self.advance_time(hours))
    }

    // ---- necromancy -----------------------------------------------------

    /// Harvest a soul of `kind` from the surroundings. Takes an hour;
    /// quality is rolled in `[20, 80]`. Returns the new soul's id.
    pub fn harvest(&mut self, kind: SoulKind) -> GameResult<u32> {
        self.ensure_no_combat()?;
        let quality = self.rng.gen_range(20..=80);
        self.advance_time(HARVEST_HOURS);
        let id = self.souls.allocate_id();
        self.souls
            .add(Soul::new(id, kind, quality, self.resources.day_count));
        log::debug!("harvested {} soul #{id} (quality {quality})", kind.name());
        Ok(id)
    }

    /// Harvest whatever the surroundings offer: a random kind, weighted
    /// toward Common.
    pub fn harvest_wild(&mut self) -> GameResult<u32> {
        self.ensure_no_combat()?;
        let kind = match self.rng.gen_range(0..7) {
            0 | 1 => SoulKind::Common,
            2 => SoulKind::Warrior,
            3 => SoulKind::Mage,
            4 => SoulKind::Innocent,
            5 => SoulKind::Corrupted,
            _ => SoulKind::Ancient,
        };
        self.harvest(kind)
    }

    /// Raise a minion of `kind`, spending soul energy and gaining
    /// corruption. Returns the new minion's id.
    pub fn raise(&mut self, kind: MinionKind, name: Option<String>) -> GameResult<u32> {
        self.ensure_no_combat()?;
        self.resources.spend_energy(kind.raise_cost())?;
        let day = self.resources.day_count;
        self.corruption
            .add(RAISE_CORRUPTION, &format!("Raised a {}", kind.name()), day);
        let id = self.minions.allocate_id();
        let minion = Minion::new(id, kind, name, &mut self.rng);
        log::debug!("raised {} '{}' (#{id})", kind.name(), minion.name);
        self.minions.add(minion);
        Ok(id)
    }

    /// Bind a free soul to an unbound minion, applying the permanent
    /// quality boost. Both sides record the link.
    pub fn bind(&mut self, soul_id: u32, minion_id: u32) -> GameResult<()> {
        let soul = self
            .souls
            .get(soul_id)
            .ok_or(GameError::SoulNotFound(soul_id))?;
        if soul.is_bound() {
            return Err(GameError::SoulAlreadyBound(soul_id));
        }
        let quality = soul.quality;
        let minion = self
            .minions
            .get_mut(minion_id)
            .ok_or(GameError::MinionNotFound(minion_id))?;
        if minion.bound_soul.is_some() {
            return Err(GameError::MinionAlreadyBound(minion_id));
        }
        minion.bound_soul = Some(soul_id);
        minion.apply_bind_boost(quality);
        if let Some(soul) = self.souls.get_mut(soul_id) {
            soul.bind(minion_id)?;
        }
        Ok(())
    }

    /// Banish a minion permanently. Its bound soul, if any, returns to
    /// the vault free (the stat boost is not reverted).
    pub fn banish(&mut self, minion_id: u32) -> GameResult<Minion> {
        self.ensure_no_combat()?;
        let minion = self.minions.remove(minion_id)?;
        if let Some(soul_id) = minion.bound_soul {
            if let Some(soul) = self.souls.get_mut(soul_id) {
                let _ = soul.unbind();
            }
        }
        Ok(minion)
    }

    /// Heal a minion outside combat: 15 mana for 30 hp. Returns the hp
    /// actually restored.
    pub fn heal_minion(&mut self, minion_id: u32) -> GameResult<u32> {
        self.ensure_no_combat()?;
        if self.minions.get(minion_id).is_none() {
            return Err(GameError::MinionNotFound(minion_id));
        }
        self.resources.spend_mana(HEAL_MANA_COST)?;
        // the lookup above guarantees the minion exists
        let Some(minion) = self.minions.get_mut(minion_id) else {
            return Err(GameError::MinionNotFound(minion_id));
        };
        let healed = HEAL_AMOUNT.min(minion.stats.hp_max - minion.stats.hp);
        minion.heal(HEAL_AMOUNT);
        Ok(healed)
    }

    // ---- combat ---------------------------------------------------------

    /// Start an encounter against the given enemy kinds, fielding every
    /// living minion.
    pub fn start_encounter(&mut self, kinds: &[EnemyKind]) -> GameResult<()> {
        self.ensure_no_combat()?;
        let living: Vec<u32> = self
            .minions
            .iter()
            .filter(|m| m.is_alive())
            .map(|m| m.id)
            .collect();
        if living.is_empty() {
            return Err(GameError::NoLivingMinions);
        }
        let mut encounter = CombatEncounter::new(self.resources.day_count);
        for id in living {
            if let Some(minion) = self.minions.get(id) {
                encounter.add_minion(minion)?;
            }
        }
        for &kind in kinds {
            encounter.add_enemy(kind)?;
        }
        encounter.initialize(&mut self.rng);
        self.combat_finalized = false;
        self.encounter = Some(encounter);
        Ok(())
    }

    /// Hunt for a fight: one to three random enemies.
    pub fn hunt(&mut self) -> GameResult<()> {
        self.ensure_no_combat()?;
        let count = self.rng.gen_range(1..=3);
        let kinds: Vec<EnemyKind> = (0..count)
            .map(|_| EnemyKind::ALL[self.rng.gen_range(0..EnemyKind::ALL.len())])
            .collect();
        self.start_encounter(&kinds)
    }

    /// Combat action: attack `target_id`. Returns the reward bundle when
    /// this action won the fight.
    pub fn attack(&mut self, target_id: &str) -> GameResult<Option<CombatRewards>> {
        match self.encounter.as_mut() {
            Some(e) if !e.is_over() => e.player_attack(target_id, &mut self.rng)?,
            _ => return Err(GameError::NoCombat),
        }
        Ok(self.finalize_if_over())
    }

    /// Combat action: defend.
    pub fn defend(&mut self) -> GameResult<Option<CombatRewards>> {
        match self.encounter.as_mut() {
            Some(e) if !e.is_over() => e.player_defend(&mut self.rng)?,
            _ => return Err(GameError::NoCombat),
        }
        Ok(self.finalize_if_over())
    }

    /// Combat action: cast `spell` at `target_id`.
    pub fn cast(&mut self, spell: Spell, target_id: &str) -> GameResult<Option<CombatRewards>> {
        match self.encounter.as_mut() {
            Some(e) if !e.is_over() => {
                e.player_cast(spell, target_id, &mut self.resources, &mut self.rng)?;
            }
            _ => return Err(GameError::NoCombat),
        }
        Ok(self.finalize_if_over())
    }

    /// Combat action: attempt to flee. Returns true on escape.
    pub fn flee(&mut self) -> GameResult<bool> {
        match self.encounter.as_mut() {
            Some(e) if !e.is_over() => {
                let escaped = e.player_flee(&mut self.rng)?;
                self.finalize_if_over();
                Ok(escaped)
            }
            _ => Err(GameError::NoCombat),
        }
    }

    /// Finalize a just-finished encounter exactly once: sync minions
    /// back to the roster and, on victory, apply the rewards. The
    /// finished encounter stays readable until the next one starts.
    fn finalize_if_over(&mut self) -> Option<CombatRewards> {
        if self.combat_finalized {
            return None;
        }
        let rewards = {
            let encounter = self.encounter.as_ref()?;
            if !encounter.is_over() {
                return None;
            }
            encounter.sync_to_roster(&mut self.minions);
            if encounter.outcome == Some(CombatOutcome::Victory) {
                Some(CombatRewards::calculate(encounter))
            } else {
                None
            }
        };
        self.combat_finalized = true;
        if let Some(r) = &rewards {
            self.apply_rewards(r);
        }
        rewards
    }

    /// Fold a reward bundle into the run: energy, experience (with
    /// level-ups), corruption for innocent blood, and harvested souls.
    pub fn apply_rewards(&mut self, rewards: &CombatRewards) {
        let day = self.resources.day_count;
        self.resources.soul_energy += rewards.soul_energy;
        self.experience += rewards.experience;
        while self.experience >= self.level * XP_PER_LEVEL {
            self.experience -= self.level * XP_PER_LEVEL;
            self.level += 1;
        }
        if rewards.corruption > 0.0 {
            self.corruption
                .add(rewards.corruption, "Killed innocent enemies", day);
        }
        self.civilian_kills += rewards.villager_kills;
        for &(kind, quality) in &rewards.souls {
            let id = self.souls.allocate_id();
            self.souls.add(Soul::new(id, kind, quality, day));
        }
    }

    // ---- endgame --------------------------------------------------------

    /// Attempt trial `index` (0-based). The score is a d(40..=90) roll
    /// plus twice the player level, capped at 100.
    pub fn attempt_trial(&mut self, index: usize) -> GameResult<(f32, TrialStatus)> {
        self.ensure_no_combat()?;
        let roll: u32 = self.rng.gen_range(40..=90);
        let raw = (roll + 2 * self.level).min(100);
        let score = f32::from(u16::try_from(raw).unwrap_or(100));
        let status = self.trials.record_attempt(index, score)?;
        Ok((score, status))
    }

    /// Summon the Divine Council. Requires every trial resolved; the
    /// council convenes exactly once.
    pub fn summon_judgment(&mut self) -> GameResult<JudgmentVerdict> {
        self.ensure_no_combat()?;
        if self.judgment.is_some() {
            return Err(GameError::JudgmentAlreadyHeld);
        }
        if !self.trials.all_resolved() {
            return Err(GameError::JudgmentNotReady);
        }
        let input = JudgmentInput {
            corruption: self.corruption.value(),
            trial_scores: self.trials.scores(),
            maya_saved: self.maya_saved,
            civilian_kills: self.civilian_kills,
            trials_first_try: self.trials.all_passed_first_try(),
        };
        let verdict = ending::summon_judgment(&input);
        self.judgment = Some(verdict);
        Ok(verdict)
    }

    /// The predicate inputs for the ending engine, as of now.
    #[must_use]
    pub fn ending_inputs(&self) -> EndingInputs {
        EndingInputs {
            corruption: self.corruption.value(),
            irreversible: self.corruption.is_irreversible(),
            trials_passed: self.trials.trials_passed(),
            avg_trial_score: self.trials.average_score(),
            divine_approval: self.judgment.is_some_and(|v| v.amnesty_granted),
            civilian_kills: self.civilian_kills,
            maya_saved: self.maya_saved,
        }
    }

    /// Outcomes the player currently qualifies for, regardless of the
    /// completion gate.
    #[must_use]
    pub fn qualified_endings(&self) -> Vec<EndingType> {
        ending::qualified_endings(&self.ending_inputs())
    }

    /// Resolve the run's ending. Fails before the completion gate (day
    /// 155 with every trial resolved); afterwards returns the highest
    /// qualifying outcome, or `None` when nothing matches yet.
    pub fn resolve_ending(&self) -> GameResult<Option<EndingAchievement>> {
        if !ending::is_complete(self.resources.day_count, &self.trials) {
            return Err(GameError::GameNotComplete);
        }
        let inputs = self.ending_inputs();
        Ok(ending::determine_ending(&inputs).map(|e| EndingAchievement {
            ending: e,
            day: self.resources.day_count,
            final_corruption: inputs.corruption,
            trials_passed: inputs.trials_passed,
            avg_trial_score: inputs.avg_trial_score,
            divine_approval: inputs.divine_approval,
            civilian_kills: inputs.civilian_kills,
            maya_saved: inputs.maya_saved,
        }))
    }
}
