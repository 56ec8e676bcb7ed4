//! Corruption: the moral axis, with tiered thresholds and a one-way gate.

/// The irreversible threshold. Crossing it permanently locks the
/// redemption paths, even if corruption is later reduced.
pub const IRREVERSIBLE_THRESHOLD: f32 = 70.0;

/// Capacity of the corruption event ring.
pub const EVENT_LOG_CAP: usize = 50;

/// One recorded change to corruption.
#[derive(Debug, Clone, PartialEq)]
pub struct CorruptionEvent {
    /// Why the change happened.
    pub description: String,
    /// Signed delta actually applied (post-clamp).
    pub delta: f32,
    /// Game day of the change.
    pub day: u32,
}

/// The eleven named corruption bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptionTier {
    /// 0–10.
    Pristine,
    /// 11–20.
    Tainted,
    /// 21–30.
    Shadowed,
    /// 31–40.
    Darkened,
    /// 41–50.
    Vile,
    /// 51–60.
    Malevolent,
    /// 61–69.
    Abyssal,
    /// Exactly the 70 boundary.
    Irreversible,
    /// 71–89.
    Damned,
    /// 90–99.
    VoidTouched,
    /// 100.
    LichLord,
}

impl CorruptionTier {
    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CorruptionTier::Pristine => "Pristine",
            CorruptionTier::Tainted => "Tainted",
            CorruptionTier::Shadowed => "Shadowed",
            CorruptionTier::Darkened => "Darkened",
            CorruptionTier::Vile => "Vile",
            CorruptionTier::Malevolent => "Malevolent",
            CorruptionTier::Abyssal => "Abyssal",
            CorruptionTier::Irreversible => "IRREVERSIBLE",
            CorruptionTier::Damned => "Damned",
            CorruptionTier::VoidTouched => "Void-Touched",
            CorruptionTier::LichLord => "Lich Lord",
        }
    }
}

/// Corruption value in `[0, 100]` plus the sticky irreversibility latch
/// and a bounded event history.
#[derive(Debug, Clone, PartialEq)]
pub struct Corruption {
    value: f32,
    irreversible: bool,
    events: Vec<CorruptionEvent>,
}

impl Default for Corruption {
    fn default() -> Self {
        Self::new()
    }
}

impl Corruption {
    /// Start pristine.
    #[must_use]
    pub fn new() -> Self {
        Corruption {
            value: 0.0,
            irreversible: false,
            events: Vec::new(),
        }
    }

    /// Rebuild from saved parts. A history longer than [`EVENT_LOG_CAP`]
    /// keeps only the newest entries.
    #[must_use]
    pub fn from_parts(value: f32, irreversible: bool, mut events: Vec<CorruptionEvent>) -> Self {
        if events.len() > EVENT_LOG_CAP {
            events.drain(..events.len() - EVENT_LOG_CAP);
        }
        Corruption {
            value: value.clamp(0.0, 100.0),
            irreversible,
            events,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// True once the 70 threshold has ever been reached.
    #[must_use]
    pub fn is_irreversible(&self) -> bool {
        self.irreversible
    }

    /// The named band the current value falls in.
    #[must_use]
    pub fn tier(&self) -> CorruptionTier {
        let v = self.value;
        if v <= 10.0 {
            CorruptionTier::Pristine
        } else if v <= 20.0 {
            CorruptionTier::Tainted
        } else if v <= 30.0 {
            CorruptionTier::Shadowed
        } else if v <= 40.0 {
            CorruptionTier::Darkened
        } else if v <= 50.0 {
            CorruptionTier::Vile
        } else if v <= 60.0 {
            CorruptionTier::Malevolent
        } else if v < IRREVERSIBLE_THRESHOLD {
            CorruptionTier::Abyssal
        } else if v < 71.0 {
            CorruptionTier::Irreversible
        } else if v < 90.0 {
            CorruptionTier::Damned
        } else if v < 100.0 {
            CorruptionTier::VoidTouched
        } else {
            CorruptionTier::LichLord
        }
    }

    /// Apply a signed delta, clamping into `[0, 100]`. Records an event
    /// (ring of [`EVENT_LOG_CAP`]) and latches irreversibility at 70.
    /// Returns the delta actually applied; a zero request is a no-op.
    pub fn add(&mut self, delta: f32, reason: &str, day: u32) -> f32 {
        if delta == 0.0 {
            return 0.0;
        }
        let before = self.value;
        self.value = (self.value + delta).clamp(0.0, 100.0);
        let applied = self.value - before;
        if self.value >= IRREVERSIBLE_THRESHOLD {
            self.irreversible = true;
        }
        if self.events.len() == EVENT_LOG_CAP {
            self.events.remove(0);
        }
        self.events.push(CorruptionEvent {
            description: reason.to_string(),
            delta: applied,
            day,
        });
        applied
    }

    /// Reduce corruption; convenience for `add(-delta, ...)`.
    pub fn reduce(&mut self, delta: f32, reason: &str, day: u32) -> f32 {
        self.add(-delta, reason, day)
    }

    /// Revenant path: never crossed 70 and currently below 30.
    #[must_use]
    pub fn revenant_available(&self) -> bool {
        !self.irreversible && self.value < 30.0
    }

    /// Wraith path: never crossed 70 and currently below 40.
    #[must_use]
    pub fn wraith_available(&self) -> bool {
        !self.irreversible && self.value < 40.0
    }

    /// Archon path: never crossed 70 and currently in `[30, 60]`.
    #[must_use]
    pub fn archon_available(&self) -> bool {
        !self.irreversible && (30.0..=60.0).contains(&self.value)
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[CorruptionEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let mut c = Corruption::new();
        assert_eq!(c.tier(), CorruptionTier::Pristine);
        c.add(10.0, "t", 1);
        assert_eq!(c.tier(), CorruptionTier::Pristine);
        c.add(1.0, "t", 1);
        assert_eq!(c.tier(), CorruptionTier::Tainted);
        c.add(39.0, "t", 1);
        assert_eq!(c.tier(), CorruptionTier::Vile);
        c.add(19.0, "t", 1);
        assert_eq!(c.tier(), CorruptionTier::Abyssal);
        c.add(1.0, "t", 1);
        assert_eq!(c.tier(), CorruptionTier::Irreversible);
        c.add(5.0, "t", 1);
        assert_eq!(c.tier(), CorruptionTier::Damned);
        c.add(15.0, "t", 1);
        assert_eq!(c.tier(), CorruptionTier::VoidTouched);
        c.add(10.0, "t", 1);
        assert_eq!(c.tier(), CorruptionTier::LichLord);
    }

    #[test]
    fn test_clamp_and_applied_delta() {
        let mut c = Corruption::new();
        assert_eq!(c.add(150.0, "overload", 1), 100.0);
        assert_eq!(c.value(), 100.0);
        assert_eq!(c.reduce(250.0, "penance", 2), -100.0);
        assert_eq!(c.value(), 0.0);
    }

    #[test]
    fn test_zero_delta_records_nothing() {
        let mut c = Corruption::new();
        assert_eq!(c.add(0.0, "noop", 1), 0.0);
        assert!(c.events().is_empty());
    }

    #[test]
    fn test_irreversibility_is_sticky() {
        let mut c = Corruption::new();
        c.add(65.0, "dark deeds", 3);
        assert!(c.revenant_available() || c.value() >= 30.0);
        assert!(!c.is_irreversible());
        c.add(10.0, "the line is crossed", 4);
        assert!(c.is_irreversible());
        assert!(!c.revenant_available());
        assert!(!c.wraith_available());
        assert!(!c.archon_available());
        c.reduce(50.0, "too late", 5);
        assert_eq!(c.value(), 25.0);
        assert!(!c.revenant_available(), "the gate never reopens");
        assert!(!c.wraith_available());
        assert!(!c.archon_available());
    }

    #[test]
    fn test_from_parts_trims_oversized_history() {
        let events: Vec<CorruptionEvent> = (0..70)
            .map(|day| CorruptionEvent {
                description: "drip".to_string(),
                delta: 0.1,
                day,
            })
            .collect();
        let mut c = Corruption::from_parts(10.0, false, events);
        assert_eq!(c.events().len(), EVENT_LOG_CAP);
        assert_eq!(c.events()[0].day, 20, "oldest entries dropped");
        assert_eq!(c.events()[EVENT_LOG_CAP - 1].day, 69);
        // the bound holds through subsequent changes
        c.add(1.0, "next", 70);
        assert_eq!(c.events().len(), EVENT_LOG_CAP);
        assert_eq!(c.events()[EVENT_LOG_CAP - 1].day, 70);
    }

    #[test]
    fn test_path_predicates() {
        let mut c = Corruption::new();
        c.add(25.0, "t", 1);
        assert!(c.revenant_available());
        assert!(c.wraith_available());
        assert!(!c.archon_available());
        c.add(10.0, "t", 1);
        assert!(!c.revenant_available());
        assert!(c.wraith_available());
        assert!(c.archon_available());
        c.add(30.0, "t", 1);
        assert!(!c.wraith_available());
        assert!(c.archon_available());
    }

    #[test]
    fn test_event_ring_caps_at_50() {
        let mut c = Corruption::new();
        for day in 0..60 {
            c.add(0.5, "drip", day);
            c.reduce(0.5, "drip", day);
        }
        assert_eq!(c.events().len(), EVENT_LOG_CAP);
        // oldest entries dropped
        assert_eq!(c.events()[0].day, 35);
        assert_eq!(c.events()[EVENT_LOG_CAP - 1].day, 59);
    }
}
