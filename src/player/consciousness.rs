//! Consciousness: stability decay driven by the game-month clock.

/// Stability below this is critical.
pub const CRITICAL_STABILITY: f32 = 10.0;
/// Stability at or above this is stable.
pub const STABLE_STABILITY: f32 = 80.0;
/// Fragmentation at or above this flags the Wraith path as imminent.
pub const WRAITH_FRAGMENTATION: f32 = 50.0;
/// Sentinel returned by `months_until_critical` when decay is non-negative.
pub const NEVER_CRITICAL: u32 = 9999;

/// Mental cohesion of the dead administrator. Decays once per game month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consciousness {
    /// Stability in `[0, 100]`; the run-ending axis.
    pub stability: f32,
    /// Monthly stability delta (negative decays).
    pub decay_rate: f32,
    /// Fragmentation in `[0, 100]`.
    pub fragmentation: f32,
    /// Last month the decay fired for, against `Resources::months_elapsed`.
    pub last_decay_month: u32,
}

impl Default for Consciousness {
    fn default() -> Self {
        Self::new()
    }
}

impl Consciousness {
    /// Fresh mind: full stability, −0.1/month decay.
    #[must_use]
    pub fn new() -> Self {
        Consciousness {
            stability: 100.0,
            decay_rate: -0.1,
            fragmentation: 0.0,
            last_decay_month: 0,
        }
    }

    /// Fire the monthly decay if `current_month` is new. At most one step
    /// per observed month; clamps stability into `[0, 100]`.
    pub fn apply_decay(&mut self, current_month: u32) {
        if current_month != self.last_decay_month {
            self.stability = (self.stability + self.decay_rate).clamp(0.0, 100.0);
            self.last_decay_month = current_month;
        }
    }

    /// Stability below 10.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.stability < CRITICAL_STABILITY
    }

    /// Stability at or above 80.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.stability >= STABLE_STABILITY
    }

    /// Fragmentation at or above 50.
    #[must_use]
    pub fn approaching_wraith(&self) -> bool {
        self.fragmentation >= WRAITH_FRAGMENTATION
    }

    /// Months until stability drops below critical at the current rate.
    /// Zero when already critical; [`NEVER_CRITICAL`] when the rate does
    /// not decay.
    #[must_use]
    pub fn months_until_critical(&self) -> u32 {
        if self.is_critical() {
            return 0;
        }
        if self.decay_rate >= 0.0 {
            return NEVER_CRITICAL;
        }
        let months = ((self.stability - CRITICAL_STABILITY) / -self.decay_rate).ceil();
        if months >= 9999.0 {
            NEVER_CRITICAL
        } else {
            // non-negative and bounded by the sentinel check above
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                months as u32
            }
        }
    }
}
