//! Ending determination: trials, divine judgment, and the six outcomes.

mod engine;
mod judgment;
mod trial;

pub use engine::{
    determine_ending, is_complete, qualified_endings, EndingAchievement, EndingInputs, EndingType,
    COMPLETION_DAY,
};
pub use judgment::{summon_judgment, GodVote, JudgmentInput, JudgmentVerdict, GODS};
pub use trial::{TrialRecord, TrialSet, TrialStatus, MAX_TRIAL_ATTEMPTS, PASS_SCORE, TRIAL_COUNT, TRIAL_NAMES};
