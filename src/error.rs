//! Error types for the simulation core.

use std::fmt;

/// Errors surfaced by the simulation core.
///
/// Every failure is returned as a value; the core never unwinds. Combat
/// precondition failures leave the encounter untouched.
#[derive(Debug)]
pub enum GameError {
    /// No combat encounter is active.
    NoCombat,
    /// A combat encounter is already active.
    AlreadyInCombat,
    /// Combat needs at least one living minion on the player side.
    NoLivingMinions,
    /// The encounter is not in the player-turn phase.
    NotPlayerTurn,
    /// The player side cannot act right now.
    CannotAct,
    /// The turn order has no active combatant.
    NoActiveCombatant,
    /// The active combatant is not player-controlled.
    NotPlayerControlled,
    /// The active combatant has already acted this round.
    AlreadyActed,
    /// No combatant matches the given id.
    TargetNotFound(String),
    /// The target is not on the enemy side.
    TargetNotEnemy(String),
    /// The target is already dead.
    TargetDead(String),
    /// A combat side is at its 32-combatant capacity.
    SideFull {
        /// True for the player side, false for the enemy side.
        player_side: bool,
    },
    /// Not enough mana for the action.
    InsufficientMana {
        /// Mana required.
        needed: u32,
        /// Mana available.
        available: u32,
    },
    /// Not enough soul energy for the ritual.
    InsufficientEnergy {
        /// Energy required.
        needed: u32,
        /// Energy available.
        available: u32,
    },
    /// No soul with the given id.
    SoulNotFound(u32),
    /// No minion with the given id.
    MinionNotFound(u32),
    /// The soul is already bound to a minion.
    SoulAlreadyBound(u32),
    /// The soul is not bound to anything.
    SoulNotBound(u32),
    /// The minion already has a bound soul.
    MinionAlreadyBound(u32),
    /// Trial index outside 1..=7.
    TrialOutOfRange(usize),
    /// The trial cannot be attempted in its current state.
    TrialUnavailable(usize),
    /// The trial has used all three attempts.
    TrialExhausted(usize),
    /// Judgment requires every trial to be resolved first.
    JudgmentNotReady,
    /// The divine council has already delivered its verdict.
    JudgmentAlreadyHeld,
    /// The run does not yet satisfy the completion gate.
    GameNotComplete,
    /// Save or load I/O failure.
    Io(std::io::Error),
    /// The save file magic does not match.
    BadMagic(u32),
    /// The save file major version is incompatible.
    VersionMismatch {
        /// Major version found in the file.
        found: u8,
        /// Major version this build reads.
        expected: u8,
    },
    /// The data section checksum does not match the header.
    ChecksumMismatch,
    /// The save file ended before the declared data length.
    TruncatedSave,
    /// The save file contains an invalid field encoding.
    InvalidSaveData(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NoCombat => write!(f, "no active combat encounter"),
            GameError::AlreadyInCombat => write!(f, "a combat encounter is already active"),
            GameError::NoLivingMinions => {
                write!(f, "you have no living minions to send into battle")
            }
            GameError::NotPlayerTurn => write!(f, "it is not the player turn"),
            GameError::CannotAct => write!(f, "the player side cannot act right now"),
            GameError::NoActiveCombatant => write!(f, "no active combatant"),
            GameError::NotPlayerControlled => {
                write!(f, "the active combatant is not under your control")
            }
            GameError::AlreadyActed => write!(f, "this combatant has already acted this round"),
            GameError::TargetNotFound(id) => write!(f, "no combatant with id '{id}'"),
            GameError::TargetNotEnemy(id) => write!(f, "'{id}' is not an enemy"),
            GameError::TargetDead(id) => write!(f, "'{id}' is already dead"),
            GameError::SideFull { player_side } => {
                let side = if *player_side { "player" } else { "enemy" };
                write!(f, "the {side} side is full (32 combatants)")
            }
            GameError::InsufficientMana { needed, available } => {
                write!(f, "not enough mana: need {needed}, have {available}")
            }
            GameError::InsufficientEnergy { needed, available } => {
                write!(f, "not enough soul energy: need {needed}, have {available}")
            }
            GameError::SoulNotFound(id) => write!(f, "no soul with id {id}"),
            GameError::MinionNotFound(id) => write!(f, "no minion with id {id}"),
            GameError::SoulAlreadyBound(id) => write!(f, "soul {id} is already bound"),
            GameError::SoulNotBound(id) => write!(f, "soul {id} is not bound"),
            GameError::MinionAlreadyBound(id) => {
                write!(f, "minion {id} already has a bound soul")
            }
            GameError::TrialOutOfRange(n) => write!(f, "trial {n} does not exist (1-7)"),
            GameError::TrialUnavailable(n) => write!(f, "trial {n} cannot be attempted now"),
            GameError::TrialExhausted(n) => {
                write!(f, "trial {n} has no attempts remaining")
            }
            GameError::JudgmentNotReady => {
                write!(f, "the divine council will not convene until every trial is resolved")
            }
            GameError::JudgmentAlreadyHeld => {
                write!(f, "the divine council has already delivered its verdict")
            }
            GameError::GameNotComplete => write!(f, "the run is not yet complete"),
            GameError::Io(e) => write!(f, "save file i/o error: {e}"),
            GameError::BadMagic(m) => write!(f, "not a save file (magic {m:#010x})"),
            GameError::VersionMismatch { found, expected } => {
                write!(f, "incompatible save version: file major {found}, expected {expected}")
            }
            GameError::ChecksumMismatch => write!(f, "save file checksum mismatch"),
            GameError::TruncatedSave => write!(f, "save file is truncated"),
            GameError::InvalidSaveData(what) => write!(f, "invalid save data: {what}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

/// Result type for simulation-core operations.
pub type GameResult<T> = Result<T, GameError>;
