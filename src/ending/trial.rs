//! The seven trials of the Archon path.

use crate::error::{GameError, GameResult};

/// Number of trials.
pub const TRIAL_COUNT: usize = 7;
/// Attempts allowed per trial.
pub const MAX_TRIAL_ATTEMPTS: u8 = 3;
/// Best score at or above this passes.
pub const PASS_SCORE: f32 = 70.0;

/// Trial names, indexed 0..6.
pub const TRIAL_NAMES: [&str; TRIAL_COUNT] = [
    "Trial of Law",
    "Trial of Empathy",
    "Trial of Memory",
    "Trial of Souls",
    "Trial of Protection",
    "Trial of Connection",
    "Trial of Time",
];

/// Lifecycle of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialStatus {
    /// Not yet reachable.
    Locked,
    /// Open for attempts.
    Available,
    /// An attempt is underway.
    InProgress,
    /// Best score reached the pass mark.
    Passed,
    /// All attempts spent without passing.
    Failed,
}

impl TrialStatus {
    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TrialStatus::Locked => "Locked",
            TrialStatus::Available => "Available",
            TrialStatus::InProgress => "In Progress",
            TrialStatus::Passed => "Passed",
            TrialStatus::Failed => "Failed",
        }
    }
}

/// One trial's record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialRecord {
    /// Current status.
    pub status: TrialStatus,
    /// Attempts used, capped at [`MAX_TRIAL_ATTEMPTS`].
    pub attempts: u8,
    /// Best score across attempts, in `[0, 100]`.
    pub best_score: f32,
    /// True when the first attempt passed.
    pub passed_first_try: bool,
}

impl Default for TrialRecord {
    fn default() -> Self {
        TrialRecord {
            status: TrialStatus::Available,
            attempts: 0,
            best_score: 0.0,
            passed_first_try: false,
        }
    }
}

/// All seven trial records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrialSet {
    trials: [TrialRecord; TRIAL_COUNT],
}

impl TrialSet {
    /// Fresh set: every trial Available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved records.
    #[must_use]
    pub fn from_records(trials: [TrialRecord; TRIAL_COUNT]) -> Self {
        TrialSet { trials }
    }

    /// The record for trial `index` (0-based).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TrialRecord> {
        self.trials.get(index)
    }

    /// All records, in order.
    #[must_use]
    pub fn records(&self) -> &[TrialRecord; TRIAL_COUNT] {
        &self.trials
    }

    /// Record one attempt at trial `index` with the given score.
    ///
    /// A score at or above [`PASS_SCORE`] passes the trial; a third failed
    /// attempt locks it as Failed. Returns the resulting status.
    pub fn record_attempt(&mut self, index: usize, score: f32) -> GameResult<TrialStatus> {
        let trial = self
            .trials
            .get_mut(index)
            .ok_or(GameError::TrialOutOfRange(index + 1))?;
        match trial.status {
            TrialStatus::Available | TrialStatus::InProgress => {}
            TrialStatus::Locked => return Err(GameError::TrialUnavailable(index + 1)),
            TrialStatus::Passed | TrialStatus::Failed => {
                return Err(GameError::TrialExhausted(index + 1))
            }
        }
        let score = score.clamp(0.0, 100.0);
        trial.attempts += 1;
        if score > trial.best_score {
            trial.best_score = score;
        }
        if score >= PASS_SCORE {
            trial.status = TrialStatus::Passed;
            if trial.attempts == 1 {
                trial.passed_first_try = true;
            }
        } else if trial.attempts >= MAX_TRIAL_ATTEMPTS {
            trial.status = TrialStatus::Failed;
        } else {
            trial.status = TrialStatus::Available;
        }
        Ok(trial.status)
    }

    /// Trials counted as passed: status Passed with best score at or
    /// above the pass mark.
    #[must_use]
    pub fn trials_passed(&self) -> u32 {
        let n = self
            .trials
            .iter()
            .filter(|t| t.status == TrialStatus::Passed && t.best_score >= PASS_SCORE)
            .count();
        u32::try_from(n).unwrap_or(0)
    }

    /// Average best score over passed trials; zero when none passed.
    #[must_use]
    pub fn average_score(&self) -> f32 {
        let passed: Vec<f32> = self
            .trials
            .iter()
            .filter(|t| t.status == TrialStatus::Passed)
            .map(|t| t.best_score)
            .collect();
        if passed.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = passed.len() as f32;
            passed.iter().sum::<f32>() / count
        }
    }

    /// Best scores of all seven trials, for the judgment input.
    #[must_use]
    pub fn scores(&self) -> [f32; TRIAL_COUNT] {
        let mut out = [0.0; TRIAL_COUNT];
        for (slot, trial) in out.iter_mut().zip(self.trials.iter()) {
            *slot = trial.best_score;
        }
        out
    }

    /// Every trial passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.trials.iter().all(|t| t.status == TrialStatus::Passed)
    }

    /// Every trial passed on its first attempt.
    #[must_use]
    pub fn all_passed_first_try(&self) -> bool {
        self.trials.iter().all(|t| t.passed_first_try)
    }

    /// No trial remains Locked, Available, or InProgress: the
    /// completion-gate condition.
    #[must_use]
    pub fn all_resolved(&self) -> bool {
        self.trials
            .iter()
            .all(|t| matches!(t.status, TrialStatus::Passed | TrialStatus::Failed))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_pass_on_first_try() {
        let mut set = TrialSet::new();
        assert_eq!(set.record_attempt(0, 85.0).unwrap(), TrialStatus::Passed);
        let t = set.get(0).unwrap();
        assert!(t.passed_first_try);
        assert_eq!(t.best_score, 85.0);
        assert!(matches!(
            set.record_attempt(0, 90.0),
            Err(GameError::TrialExhausted(1))
        ));
    }

    #[test]
    fn test_three_failures_lock_the_trial() {
        let mut set = TrialSet::new();
        assert_eq!(set.record_attempt(2, 30.0).unwrap(), TrialStatus::Available);
        assert_eq!(set.record_attempt(2, 50.0).unwrap(), TrialStatus::Available);
        assert_eq!(set.record_attempt(2, 60.0).unwrap(), TrialStatus::Failed);
        assert_eq!(set.get(2).unwrap().best_score, 60.0);
        assert!(matches!(
            set.record_attempt(2, 99.0),
            Err(GameError::TrialExhausted(3))
        ));
    }

    #[test]
    fn test_later_pass_is_not_first_try() {
        let mut set = TrialSet::new();
        set.record_attempt(1, 10.0).unwrap();
        assert_eq!(set.record_attempt(1, 75.0).unwrap(), TrialStatus::Passed);
        assert!(!set.get(1).unwrap().passed_first_try);
    }

    #[test]
    fn test_aggregates() {
        let mut set = TrialSet::new();
        for i in 0..TRIAL_COUNT {
            set.record_attempt(i, 80.0).unwrap();
        }
        assert_eq!(set.trials_passed(), 7);
        assert_eq!(set.average_score(), 80.0);
        assert!(set.all_passed());
        assert!(set.all_passed_first_try());
        assert!(set.all_resolved());
    }

    #[test]
    fn test_unresolved_until_all_decided() {
        let mut set = TrialSet::new();
        assert!(!set.all_resolved());
        for i in 0..TRIAL_COUNT - 1 {
            set.record_attempt(i, 90.0).unwrap();
        }
        assert!(!set.all_resolved(), "one trial still available");
        for _ in 0..3 {
            set.record_attempt(TRIAL_COUNT - 1, 10.0).unwrap();
        }
        assert!(set.all_resolved());
        assert_eq!(set.trials_passed(), 6);
    }

    #[test]
    fn test_out_of_range() {
        let mut set = TrialSet::new();
        assert!(matches!(
            set.record_attempt(7, 50.0),
            Err(GameError::TrialOutOfRange(8))
        ));
    }
}
