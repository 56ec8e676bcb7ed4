//! The Divine Council: seven gods voting on amnesty.

use super::trial::TRIAL_COUNT;

/// Approvals needed for amnesty.
const AMNESTY_VOTES: u8 = 4;
/// A trial score at or above this counts as passed for the council.
const COUNCIL_PASS_SCORE: f32 = 70.0;

/// The seven Divine Architects: `(name, aspect)`.
pub const GODS: [(&str, &str); 7] = [
    ("Keldrin", "Law"),
    ("Anara", "Empathy"),
    ("Myrith", "Souls"),
    ("Vorathos", "Entropy"),
    ("Seraph", "Protection"),
    ("Nexus", "Connection"),
    ("Theros", "Time"),
];

/// One god's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GodVote {
    /// In favor of amnesty.
    Approve,
    /// Against amnesty.
    Deny,
    /// Withheld.
    Abstain,
}

impl GodVote {
    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GodVote::Approve => "APPROVE",
            GodVote::Deny => "DENY",
            GodVote::Abstain => "ABSTAIN",
        }
    }
}

/// Everything the council inspects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgmentInput {
    /// Player corruption.
    pub corruption: f32,
    /// Best score per trial.
    pub trial_scores: [f32; TRIAL_COUNT],
    /// Whether the terminal-branch choice saved Maya.
    pub maya_saved: bool,
    /// Civilian kill count.
    pub civilian_kills: u32,
    /// Every trial passed on its first attempt.
    pub trials_first_try: bool,
}

impl JudgmentInput {
    fn all_trials_passed(&self) -> bool {
        self.trial_scores.iter().all(|&s| s >= COUNCIL_PASS_SCORE)
    }
}

/// The council's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgmentVerdict {
    /// Per-god votes, in [`GODS`] order.
    pub votes: [GodVote; 7],
    /// Number of approvals.
    pub approvals: u8,
    /// Number of denials.
    pub denials: u8,
    /// Amnesty requires at least four approvals.
    pub amnesty_granted: bool,
}

impl JudgmentVerdict {
    /// Rebuild from saved votes.
    #[must_use]
    pub fn from_votes(votes: [GodVote; 7]) -> Self {
        let approvals =
            u8::try_from(votes.iter().filter(|v| **v == GodVote::Approve).count()).unwrap_or(0);
        let denials =
            u8::try_from(votes.iter().filter(|v| **v == GodVote::Deny).count()).unwrap_or(0);
        JudgmentVerdict {
            votes,
            approvals,
            denials,
            amnesty_granted: approvals >= AMNESTY_VOTES,
        }
    }

    /// Human-readable tally.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::from("THE DIVINE COUNCIL DELIVERS ITS JUDGMENT\n");
        for ((name, aspect), vote) in GODS.iter().zip(self.votes.iter()) {
            out.push_str(&format!("{name} ({aspect}): {}\n", vote.name()));
        }
        let abstains = 7 - self.approvals - self.denials;
        out.push_str(&format!(
            "FINAL TALLY: {} Approve, {} Deny, {} Abstain\n",
            self.approvals, self.denials, abstains
        ));
        if self.amnesty_granted {
            out.push_str("The Divine Council grants you AMNESTY.\n");
        } else {
            out.push_str("The Divine Council DENIES your petition.\n");
        }
        out
    }
}

/// Anara's favor: compassion for Maya, penalized by civilian deaths.
fn anara_favor(input: &JudgmentInput) -> i32 {
    let base = if input.maya_saved { 60 } else { -40 };
    base - i32::try_from(input.civilian_kills / 10).unwrap_or(i32::MAX)
}

/// Nexus's favor: flawless infrastructure work scores highest.
fn nexus_favor(input: &JudgmentInput) -> i32 {
    if input.trials_first_try && input.all_trials_passed() {
        90
    } else if input.all_trials_passed() {
        40
    } else {
        -10
    }
}

/// Summon the council and collect the verdict.
#[must_use]
pub fn summon_judgment(input: &JudgmentInput) -> JudgmentVerdict {
    let corruption = input.corruption;
    let all_passed = input.all_trials_passed();

    // Keldrin (Law): balanced corruption and a clean trial record.
    let keldrin = if (30.0..=60.0).contains(&corruption) && all_passed {
        GodVote::Approve
    } else if corruption > 70.0 || !all_passed {
        GodVote::Deny
    } else {
        GodVote::Abstain
    };

    // Anara (Empathy): votes her favor score.
    let favor = anara_favor(input);
    let anara = if favor >= 20 {
        GodVote::Approve
    } else if favor <= -20 {
        GodVote::Deny
    } else {
        GodVote::Abstain
    };

    // Myrith (Souls): judges the Trial of Souls alone.
    let myrith = if input.trial_scores[3] >= 80.0 {
        GodVote::Approve
    } else if input.trial_scores[3] < 50.0 {
        GodVote::Deny
    } else {
        GodVote::Abstain
    };

    // Vorathos (Entropy): approves those balanced near dissolution.
    let vorathos = if (40.0..=50.0).contains(&corruption) {
        GodVote::Approve
    } else if corruption < 30.0 || corruption > 65.0 {
        GodVote::Deny
    } else {
        GodVote::Abstain
    };

    // Seraph (Protection): denies the soft.
    let seraph = if (50.0..=60.0).contains(&corruption) {
        GodVote::Approve
    } else if corruption < 50.0 {
        GodVote::Deny
    } else {
        GodVote::Abstain
    };

    // Nexus (Connection): votes the favor score.
    let nexus_score = nexus_favor(input);
    let nexus = if nexus_score >= 80 {
        GodVote::Approve
    } else if nexus_score < 0 {
        GodVote::Deny
    } else {
        GodVote::Abstain
    };

    // Theros (Time): judges the Trial of Time alone.
    let theros = if input.trial_scores[6] >= 70.0 {
        GodVote::Approve
    } else if input.trial_scores[6] < 40.0 {
        GodVote::Deny
    } else {
        GodVote::Abstain
    };

    JudgmentVerdict::from_votes([keldrin, anara, myrith, vorathos, seraph, nexus, theros])
}
