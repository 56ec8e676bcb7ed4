//! The six terminal outcomes and the priority-ordered predicate scan.

use super::trial::TrialSet;
use serde::Serialize;

/// The run is complete no earlier than this game day.
pub const COMPLETION_DAY: u32 = 155;

/// The six terminal outcomes, hardest first. Evaluation order is the
/// declaration order: the first matching predicate wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndingType {
    /// Perfect balance: corruption pinned to the midpoint, a flawless
    /// trial record, and divine approval.
    Morningstar,
    /// Sanctioned reformer.
    Archon,
    /// Walked away clean.
    Revenant,
    /// Faded into the space between deaths.
    Wraith,
    /// Death's civil servant.
    Reaper,
    /// Total corruption.
    LichLord,
}

impl EndingType {
    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EndingType::Morningstar => "Morningstar",
            EndingType::Archon => "Archon",
            EndingType::Revenant => "Revenant",
            EndingType::Wraith => "Wraith",
            EndingType::Reaper => "Reaper",
            EndingType::LichLord => "Lich Lord",
        }
    }

    const PRIORITY: [EndingType; 6] = [
        EndingType::Morningstar,
        EndingType::Archon,
        EndingType::Revenant,
        EndingType::Wraith,
        EndingType::Reaper,
        EndingType::LichLord,
    ];
}

/// Inputs the predicates read. Assembled by the player state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndingInputs {
    /// Current corruption.
    pub corruption: f32,
    /// The corruption latch: once 70 was reached, the redemption
    /// predicates never match again.
    pub irreversible: bool,
    /// Trials passed (status Passed, best score at or above 70).
    pub trials_passed: u32,
    /// Average best score over passed trials.
    pub avg_trial_score: f32,
    /// Council verdict.
    pub divine_approval: bool,
    /// Civilian kill count.
    pub civilian_kills: u32,
    /// Terminal-branch narrative choice.
    pub maya_saved: bool,
}

/// Completion gate: day 155 reached and every trial resolved.
#[must_use]
pub fn is_complete(day: u32, trials: &TrialSet) -> bool {
    day >= COMPLETION_DAY && trials.all_resolved()
}

fn matches(ending: EndingType, inputs: &EndingInputs) -> bool {
    let c = inputs.corruption;
    match ending {
        EndingType::Morningstar => {
            (c - 50.0).abs() <= 0.5
                && inputs.divine_approval
                && inputs.trials_passed == 7
                && inputs.avg_trial_score >= 80.0
        }
        EndingType::Archon => {
            !inputs.irreversible
                && (30.0..=60.0).contains(&c)
                && inputs.divine_approval
                && inputs.trials_passed >= 6
                && inputs.avg_trial_score >= 70.0
        }
        EndingType::Revenant => {
            !inputs.irreversible && c < 30.0 && inputs.civilian_kills < 10 && inputs.maya_saved
        }
        EndingType::Wraith => !inputs.irreversible && c < 40.0 && inputs.trials_passed >= 5,
        EndingType::Reaper => (40.0..=69.0).contains(&c) && inputs.divine_approval,
        EndingType::LichLord => c >= 100.0,
    }
}

/// Priority scan: the first matching outcome, or `None` when nothing
/// matches (the run drifts on unresolved).
#[must_use]
pub fn determine_ending(inputs: &EndingInputs) -> Option<EndingType> {
    EndingType::PRIORITY
        .into_iter()
        .find(|&ending| matches(ending, inputs))
}

/// Every outcome the player currently qualifies for, in priority order.
/// Feeds the UI that shows the player's options.
#[must_use]
pub fn qualified_endings(inputs: &EndingInputs) -> Vec<EndingType> {
    EndingType::PRIORITY
        .into_iter()
        .filter(|&ending| matches(ending, inputs))
        .collect()
}

/// The cinematic contract: emitted once when the run terminates.
/// Cinematic text is external content keyed by `ending`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EndingAchievement {
    /// The outcome reached.
    pub ending: EndingType,
    /// Game day of termination.
    pub day: u32,
    /// Corruption at termination.
    pub final_corruption: f32,
    /// Trials passed.
    pub trials_passed: u32,
    /// Average best score over passed trials.
    pub avg_trial_score: f32,
    /// Council verdict.
    pub divine_approval: bool,
    /// Civilian kill count.
    pub civilian_kills: u32,
    /// Terminal-branch narrative choice.
    pub maya_saved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> EndingInputs {
        EndingInputs {
            corruption: 50.0,
            irreversible: false,
            trials_passed: 7,
            avg_trial_score: 85.0,
            divine_approval: true,
            civilian_kills: 2,
            maya_saved: true,
        }
    }

    #[test]
    fn test_priority_picks_morningstar() {
        let inputs = inputs();
        let qualified = qualified_endings(&inputs);
        assert!(qualified.contains(&EndingType::Morningstar));
        assert!(qualified.contains(&EndingType::Archon));
        assert_eq!(determine_ending(&inputs), Some(EndingType::Morningstar));
    }

    #[test]
    fn test_morningstar_window_is_half_a_point() {
        let mut i = inputs();
        i.corruption = 50.5;
        assert_eq!(determine_ending(&i), Some(EndingType::Morningstar));
        i.corruption = 50.6;
        assert_eq!(determine_ending(&i), Some(EndingType::Archon));
    }

    #[test]
    fn test_revenant_needs_clean_hands() {
        let mut i = inputs();
        i.corruption = 20.0;
        i.divine_approval = false;
        i.trials_passed = 3;
        assert_eq!(determine_ending(&i), Some(EndingType::Revenant));
        i.civilian_kills = 10;
        assert_eq!(determine_ending(&i), None);
        i.civilian_kills = 2;
        i.maya_saved = false;
        assert_eq!(determine_ending(&i), None);
    }

    #[test]
    fn test_wraith_and_reaper() {
        let mut i = inputs();
        i.corruption = 35.0;
        i.divine_approval = false;
        i.trials_passed = 5;
        i.maya_saved = false;
        assert_eq!(determine_ending(&i), Some(EndingType::Wraith));
        i.corruption = 65.0;
        i.divine_approval = true;
        assert_eq!(determine_ending(&i), Some(EndingType::Reaper));
        i.corruption = 69.5;
        assert_eq!(determine_ending(&i), None, "Reaper band stops at 69");
    }

    #[test]
    fn test_lich_lord_is_the_floor() {
        let mut i = inputs();
        i.corruption = 100.0;
        i.divine_approval = false;
        i.trials_passed = 0;
        i.avg_trial_score = 0.0;
        i.maya_saved = false;
        assert_eq!(determine_ending(&i), Some(EndingType::LichLord));
    }

    #[test]
    fn test_latch_blocks_redemption_paths() {
        let mut i = inputs();
        i.corruption = 25.0;
        i.irreversible = true;
        i.divine_approval = false;
        assert_eq!(determine_ending(&i), None);
        let qualified = qualified_endings(&i);
        assert!(!qualified.contains(&EndingType::Revenant));
        assert!(!qualified.contains(&EndingType::Wraith));
    }

    #[test]
    fn test_exactly_one_outcome_from_determine() {
        // qualified may hold several; determine always picks the first
        let inputs = inputs();
        let qualified = qualified_endings(&inputs);
        assert!(qualified.len() > 1);
        assert_eq!(determine_ending(&inputs), Some(qualified[0]));
    }

    #[test]
    fn test_completion_gate() {
        let mut trials = TrialSet::new();
        assert!(!is_complete(200, &trials));
        for i in 0..7 {
            trials.record_attempt(i, 95.0).unwrap();
        }
        assert!(!is_complete(100, &trials), "day gate");
        assert!(is_complete(155, &trials));
    }
}
