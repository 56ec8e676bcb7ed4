//! Property-based tests for the simulation core.
//!
//! These tests verify invariants of the damage resolver, corruption axis,
//! ending engine, and combat state machine.
//! Run with: cargo test --release prop_engine

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use necroshell::combat::{
    flee_chance, resolve_with_roll, CombatEncounter, CombatPhase, Combatant, CombatantKind,
    DamageKind, EntityRef,
};
use necroshell::ending::{determine_ending, qualified_endings, EndingInputs, EndingType};
use necroshell::entities::{soul_energy, EnemyKind, Minion, MinionKind, SoulKind};
use necroshell::player::Corruption;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn combatant(attack: u32, defense: u32, hp: u32, defending: bool) -> Combatant {
    Combatant {
        id: "M1".to_string(),
        name: "prop".to_string(),
        kind: CombatantKind::Minion,
        hp,
        hp_max: hp.max(1),
        attack,
        defense,
        speed: 10,
        initiative: 0,
        player_controlled: true,
        ai: None,
        has_acted: false,
        is_defending: defending,
        entity: EntityRef::Minion(1),
    }
}

fn soul_kind(index: usize) -> SoulKind {
    SoulKind::ALL[index % SoulKind::ALL.len()]
}

fn damage_kind(index: usize) -> DamageKind {
    [
        DamageKind::Physical,
        DamageKind::Necrotic,
        DamageKind::Holy,
        DamageKind::Pure,
    ][index % 4]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Energy grows monotonically with quality for every kind.
    #[test]
    fn prop_energy_monotone(kind in 0usize..6, q1 in 0u8..=100, q2 in 0u8..=100) {
        let (lo, hi) = if q1 <= q2 { (q1, q2) } else { (q2, q1) };
        prop_assert!(soul_energy(soul_kind(kind), lo) <= soul_energy(soul_kind(kind), hi));
    }

    /// Damage floor: any attack deals at least 1.
    #[test]
    fn prop_damage_floor(
        attack in 0u32..1000,
        defense in 0u32..1000,
        defending in any::<bool>(),
        kind in 0usize..4,
        roll in 0.0f64..1.0
    ) {
        let attacker = combatant(attack, 10, 100, false);
        let defender = combatant(10, defense, 100, defending);
        let result = resolve_with_roll(&attacker, &defender, damage_kind(kind), roll);
        prop_assert!(result.dealt >= 1);
    }

    /// Defending never increases the damage taken (non-Pure).
    #[test]
    fn prop_defense_benefit(
        attack in 0u32..1000,
        defense in 0u32..1000,
        kind in 0usize..3,
        roll in 0.0f64..1.0
    ) {
        let attacker = combatant(attack, 10, 100, false);
        let open = combatant(10, defense, 100, false);
        let braced = combatant(10, defense, 100, true);
        let dealt_open = resolve_with_roll(&attacker, &open, damage_kind(kind), roll).dealt;
        let dealt_braced = resolve_with_roll(&attacker, &braced, damage_kind(kind), roll).dealt;
        prop_assert!(dealt_braced <= dealt_open);
    }

    /// Pure damage ignores defense and the defensive stance entirely.
    #[test]
    fn prop_pure_bypass(
        attack in 0u32..1000,
        d1 in 0u32..1000,
        d2 in 0u32..1000,
        defending in any::<bool>(),
        roll in 0.0f64..1.0
    ) {
        let attacker = combatant(attack, 10, 100, false);
        let a = combatant(10, d1, 100, false);
        let b = combatant(10, d2, 100, defending);
        let dealt_a = resolve_with_roll(&attacker, &a, DamageKind::Pure, roll).dealt;
        let dealt_b = resolve_with_roll(&attacker, &b, DamageKind::Pure, roll).dealt;
        prop_assert_eq!(dealt_a, dealt_b);
    }

    /// Corruption stays in [0, 100] under any delta sequence, and a zero
    /// delta records nothing.
    #[test]
    fn prop_corruption_clamped(deltas in prop::collection::vec(-200.0f32..200.0, 0..40)) {
        let mut corruption = Corruption::new();
        for (day, delta) in deltas.iter().enumerate() {
            corruption.add(*delta, "prop", u32::try_from(day).unwrap());
            prop_assert!((0.0..=100.0).contains(&corruption.value()));
        }
        let events_before = corruption.events().len();
        prop_assert_eq!(corruption.add(0.0, "noop", 999), 0.0);
        prop_assert_eq!(corruption.events().len(), events_before);
    }

    /// Once corruption touches 70 the three redemption predicates stay
    /// false forever.
    #[test]
    fn prop_irreversibility_latches(deltas in prop::collection::vec(-80.0f32..80.0, 1..40)) {
        let mut corruption = Corruption::new();
        let mut latched = false;
        for (day, delta) in deltas.iter().enumerate() {
            corruption.add(*delta, "prop", u32::try_from(day).unwrap());
            latched |= corruption.value() >= 70.0;
            if latched {
                prop_assert!(corruption.is_irreversible());
                prop_assert!(!corruption.revenant_available());
                prop_assert!(!corruption.wraith_available());
                prop_assert!(!corruption.archon_available());
            }
        }
    }

    /// The ending scan returns the first qualified outcome, and the
    /// Morningstar/Archon priority holds.
    #[test]
    fn prop_ending_priority(
        corruption in 0.0f32..=100.0,
        irreversible in any::<bool>(),
        trials_passed in 0u32..=7,
        avg in 0.0f32..=100.0,
        approval in any::<bool>(),
        kills in 0u32..30,
        maya in any::<bool>()
    ) {
        let inputs = EndingInputs {
            corruption,
            irreversible,
            trials_passed,
            avg_trial_score: avg,
            divine_approval: approval,
            civilian_kills: kills,
            maya_saved: maya,
        };
        let qualified = qualified_endings(&inputs);
        prop_assert_eq!(determine_ending(&inputs), qualified.first().copied());
        prop_assert_eq!(determine_ending(&inputs).is_some(), !qualified.is_empty());
        if qualified.contains(&EndingType::Morningstar) && qualified.contains(&EndingType::Archon) {
            prop_assert_eq!(determine_ending(&inputs), Some(EndingType::Morningstar));
        }
    }

    /// Flee chance is always inside [0.10, 0.95].
    #[test]
    fn prop_flee_chance_bounds(dead in 0u32..100, critical in any::<bool>()) {
        let chance = flee_chance(dead, critical);
        prop_assert!((0.10..=0.95).contains(&chance));
    }

    /// A full fight never breaks the structural invariants: hp stays
    /// clamped, the active combatant is alive while the fight runs, the
    /// most recent log line is retrieved first, and the fight terminates.
    #[test]
    fn prop_fight_invariants(seed in any::<u64>(), enemies in 1usize..4) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut encounter = CombatEncounter::new(1);
        let minion = Minion::new(1, MinionKind::Revenant, None, &mut rng);
        encounter.add_minion(&minion).unwrap();
        for i in 0..enemies {
            encounter.add_enemy(EnemyKind::ALL[i % EnemyKind::ALL.len()]).unwrap();
        }
        encounter.initialize(&mut rng);

        for _ in 0..400 {
            if encounter.is_over() {
                break;
            }
            prop_assert!(encounter.phase == CombatPhase::PlayerTurn);
            let active = encounter.active().unwrap();
            prop_assert!(active.is_alive());

            let target = encounter
                .combatants()
                .iter()
                .find(|c| !c.player_controlled && c.is_alive())
                .map(|c| c.id.clone())
                .unwrap();
            encounter.player_attack(&target, &mut rng).unwrap();

            for c in encounter.combatants() {
                prop_assert!(c.hp <= c.hp_max);
            }
        }
        prop_assert!(encounter.is_over(), "fights terminate");
    }

    /// Reverse retrieval: the first element returned is the newest line.
    #[test]
    fn prop_log_reverse_order(lines in prop::collection::vec("[a-z]{1,12}", 1..250)) {
        let mut log = necroshell::combat::CombatLog::new();
        for line in &lines {
            log.push(line.clone());
        }
        let recent = log.recent(lines.len());
        prop_assert_eq!(recent[0], lines[lines.len() - 1].as_str());
        // newest-first over the retained window
        for (offset, line) in recent.iter().enumerate() {
            let original = &lines[lines.len() - 1 - offset];
            prop_assert_eq!(*line, original.as_str());
        }
    }

    /// Binding symmetry: both sides of the link agree after a bind.
    #[test]
    fn prop_binding_symmetry(seed in any::<u64>(), quality in 0u8..=100) {
        let mut state = necroshell::PlayerState::new(Some(seed));
        state.resources.soul_energy = 50;
        let minion_id = state.raise(MinionKind::Zombie, None).unwrap();
        let soul_id = state.souls.allocate_id();
        state
            .souls
            .add(necroshell::entities::Soul::new(soul_id, SoulKind::Warrior, quality, 1));
        state.bind(soul_id, minion_id).unwrap();

        let soul = state.souls.get(soul_id).unwrap();
        prop_assert!(soul.is_bound());
        prop_assert_eq!(
            soul.binding,
            necroshell::entities::Binding::BoundTo(minion_id)
        );
        prop_assert_eq!(state.minions.get(minion_id).unwrap().bound_soul, Some(soul_id));
    }
}
