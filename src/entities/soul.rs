//! Souls: harvested essences with quality-weighted energy.

use crate::error::{GameError, GameResult};

/// The six soul kinds, each with its own energy range and memory flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoulKind {
    /// Ordinary souls from unremarkable lives.
    Common,
    /// Souls of soldiers and fighters.
    Warrior,
    /// Souls of spellcasters and scholars.
    Mage,
    /// Souls of the blameless; harvesting these has consequences.
    Innocent,
    /// Souls twisted before death.
    Corrupted,
    /// Souls older than written history.
    Ancient,
}

impl SoulKind {
    /// All kinds, in stable encoding order.
    pub const ALL: [SoulKind; 6] = [
        SoulKind::Common,
        SoulKind::Warrior,
        SoulKind::Mage,
        SoulKind::Innocent,
        SoulKind::Corrupted,
        SoulKind::Ancient,
    ];

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SoulKind::Common => "Common",
            SoulKind::Warrior => "Warrior",
            SoulKind::Mage => "Mage",
            SoulKind::Innocent => "Innocent",
            SoulKind::Corrupted => "Corrupted",
            SoulKind::Ancient => "Ancient",
        }
    }

    /// The `[min, max]` energy range for this kind.
    #[must_use]
    pub fn energy_range(self) -> (u32, u32) {
        match self {
            SoulKind::Common => (10, 20),
            SoulKind::Warrior => (20, 40),
            SoulKind::Mage => (30, 50),
            SoulKind::Innocent => (15, 25),
            SoulKind::Corrupted => (25, 35),
            SoulKind::Ancient => (50, 100),
        }
    }

    fn memory_templates(self) -> [&'static str; 4] {
        match self {
            SoulKind::Common => [
                "Memories of simple toil and daily labor",
                "Fragments of a quiet, unremarkable life",
                "Echoes of mundane routines and simple pleasures",
                "Whispers of ordinary joys and sorrows",
            ],
            SoulKind::Warrior => [
                "Battle cries echo through blood-soaked memories",
                "The weight of steel and the taste of victory",
                "Screams of fallen comrades haunt the edges",
                "Glory and carnage intertwined in death's embrace",
            ],
            SoulKind::Mage => [
                "Arcane formulas dance at the edge of comprehension",
                "Libraries of lost knowledge flicker in the void",
                "The taste of raw magic lingers on spectral lips",
                "Secrets of forbidden spells whisper endlessly",
            ],
            SoulKind::Innocent => [
                "Laughter of children, now forever silenced",
                "Simple kindness untouched by the world's cruelty",
                "Pure hope that never knew true darkness",
                "Gentle warmth of a life cut too short",
            ],
            SoulKind::Corrupted => [
                "Darkness that spread from within, consuming all",
                "Twisted desires that warped the soul beyond recognition",
                "Malevolence crystallized into spectral essence",
                "Evil that persists even in death's cold grip",
            ],
            SoulKind::Ancient => [
                "Centuries compressed into timeless echoes",
                "Wisdom of ages mixed with the dust of empires",
                "Memories so old they predate written history",
                "Power accumulated across countless lifetimes",
            ],
        }
    }
}

/// Compute a soul's energy from its kind and quality.
///
/// Linear interpolation over the kind's `[min, max]` range in integer
/// arithmetic: `min + (max - min) * quality / 100`.
#[must_use]
pub fn soul_energy(kind: SoulKind, quality: u8) -> u32 {
    let quality = u32::from(quality.min(100));
    let (min, max) = kind.energy_range();
    min + (max - min) * quality / 100
}

/// Generate the memory blurb for a kind/quality pair.
///
/// Quality below 30 degrades the blurb: the tail is cut and replaced with
/// an ellipsis, cutting deeper the lower the quality.
fn generate_memory(kind: SoulKind, quality: u8) -> String {
    let templates = kind.memory_templates();
    let mut memory = templates[usize::from(quality) % templates.len()].to_string();
    if quality < 30 && memory.len() > 20 {
        let cut = memory.len() - usize::from((30 - quality) / 5);
        memory.truncate(cut);
        memory.push_str("...");
    }
    memory
}

/// Binding state of a soul.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Not bound to any minion.
    Free,
    /// Bound to the minion with this id.
    BoundTo(u32),
}

/// A harvested essence.
#[derive(Debug, Clone, PartialEq)]
pub struct Soul {
    /// Stable unique id assigned by the vault.
    pub id: u32,
    /// The kind of life this soul led.
    pub kind: SoulKind,
    /// Quality in `[0, 100]`; drives energy and binding bonuses.
    pub quality: u8,
    /// Derived energy; see [`soul_energy`].
    pub energy: u32,
    /// Narrative memory blurb.
    pub memory: String,
    /// Binding state; kept consistent with the minion roster.
    pub binding: Binding,
    /// Game day the soul was harvested.
    pub harvested_day: u32,
}

impl Soul {
    /// Create a soul. Quality above 100 is clamped.
    #[must_use]
    pub fn new(id: u32, kind: SoulKind, quality: u8, harvested_day: u32) -> Self {
        let quality = quality.min(100);
        Soul {
            id,
            kind,
            quality,
            energy: soul_energy(kind, quality),
            memory: generate_memory(kind, quality),
            binding: Binding::Free,
            harvested_day,
        }
    }

    /// True if the soul is bound to a minion.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self.binding, Binding::BoundTo(_))
    }

    /// Bind this soul to a minion. Fails if already bound.
    pub fn bind(&mut self, minion_id: u32) -> GameResult<()> {
        if self.is_bound() {
            return Err(GameError::SoulAlreadyBound(self.id));
        }
        self.binding = Binding::BoundTo(minion_id);
        Ok(())
    }

    /// Unbind this soul, returning the minion id it was bound to.
    pub fn unbind(&mut self) -> GameResult<u32> {
        match self.binding {
            Binding::BoundTo(minion_id) => {
                self.binding = Binding::Free;
                Ok(minion_id)
            }
            Binding::Free => Err(GameError::SoulNotBound(self.id)),
        }
    }

    /// One-line description for the status display.
    #[must_use]
    pub fn describe(&self) -> String {
        let bound = match self.binding {
            Binding::BoundTo(id) => format!(" [BOUND to minion {id}]"),
            Binding::Free => String::new(),
        };
        format!(
            "{} Soul #{} (Quality: {}%, Energy: {}){}\n  Memories: {}",
            self.kind.name(),
            self.id,
            self.quality,
            self.energy,
            bound,
            self.memory
        )
    }
}
