//! Player state: the three interlocking axes plus the entity rosters.
//!
//! Corruption gates narrative paths, consciousness decays with game time,
//! and resources (soul energy, mana, the clock) fuel every ritual. All of
//! it hangs off a single [`PlayerState`] threaded through command handlers.

mod consciousness;
mod corruption;
mod resources;
mod state;

pub use consciousness::{
    Consciousness, CRITICAL_STABILITY, NEVER_CRITICAL, STABLE_STABILITY, WRAITH_FRAGMENTATION,
};
pub use corruption::{
    Corruption, CorruptionEvent, CorruptionTier, EVENT_LOG_CAP, IRREVERSIBLE_THRESHOLD,
};
pub use resources::{
    Resources, DAYS_PER_MONTH, HOURS_PER_DAY, MANA_REGEN_PER_HOUR, MONTHS_PER_YEAR,
};
pub use state::PlayerState;
