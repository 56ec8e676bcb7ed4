//! Enemies: opposition units with fixed per-kind stat and reward rows.

/// Decision policy an enemy combatant runs on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiBehavior {
    /// Always attack the weakest player unit.
    Aggressive,
    /// Heal badly wounded allies when able, otherwise defend and attack.
    Defensive,
    /// Defend when hurt, otherwise attack a random player unit.
    Balanced,
    /// Heal wounded allies first, attack as a fallback.
    Support,
    /// Focus fire on the weakest player unit.
    Tactical,
}

impl AiBehavior {
    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AiBehavior::Aggressive => "Aggressive",
            AiBehavior::Defensive => "Defensive",
            AiBehavior::Balanced => "Balanced",
            AiBehavior::Support => "Support",
            AiBehavior::Tactical => "Tactical",
        }
    }
}

/// The six enemy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Heavily armored holy knight.
    Paladin,
    /// Fragile healer.
    Priest,
    /// High-damage zealot.
    Inquisitor,
    /// Harmless civilian; killing one stains the player.
    Villager,
    /// Town watch.
    Guard,
    /// A competing necromancer.
    RivalNecromancer,
}

impl EnemyKind {
    /// All kinds, in stable encoding order.
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Paladin,
        EnemyKind::Priest,
        EnemyKind::Inquisitor,
        EnemyKind::Villager,
        EnemyKind::Guard,
        EnemyKind::RivalNecromancer,
    ];

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Paladin => "Paladin",
            EnemyKind::Priest => "Priest",
            EnemyKind::Inquisitor => "Inquisitor",
            EnemyKind::Villager => "Villager",
            EnemyKind::Guard => "Guard",
            EnemyKind::RivalNecromancer => "Rival Necromancer",
        }
    }

    /// Parse a kind from user input (case-insensitive; the rival also
    /// answers to "rival").
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("rival") {
            return Some(EnemyKind::RivalNecromancer);
        }
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s) || k.name().replace(' ', "").eq_ignore_ascii_case(s))
    }

    /// Stat row: `(hp, attack, defense, speed)`.
    #[must_use]
    pub fn base_stats(self) -> (u32, u32, u32, u32) {
        match self {
            EnemyKind::Paladin => (120, 35, 40, 8),
            EnemyKind::Priest => (60, 20, 15, 10),
            EnemyKind::Inquisitor => (80, 50, 20, 12),
            EnemyKind::Villager => (30, 5, 5, 6),
            EnemyKind::Guard => (60, 25, 15, 9),
            EnemyKind::RivalNecromancer => (70, 40, 18, 11),
        }
    }

    /// The decision policy this kind fights with.
    #[must_use]
    pub fn ai_behavior(self) -> AiBehavior {
        match self {
            EnemyKind::Paladin | EnemyKind::Villager => AiBehavior::Defensive,
            EnemyKind::Priest => AiBehavior::Support,
            EnemyKind::Inquisitor => AiBehavior::Aggressive,
            EnemyKind::Guard => AiBehavior::Balanced,
            EnemyKind::RivalNecromancer => AiBehavior::Tactical,
        }
    }

    /// Reward row: `(xp, soul_energy)`.
    #[must_use]
    pub fn rewards(self) -> (u32, u32) {
        match self {
            EnemyKind::Paladin => (50, 40),
            EnemyKind::Priest => (35, 30),
            EnemyKind::Inquisitor => (60, 50),
            EnemyKind::Villager => (10, 5),
            EnemyKind::Guard => (25, 20),
            EnemyKind::RivalNecromancer => (70, 60),
        }
    }
}

/// An opposition unit. Lives inside the encounter that spawned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    /// Id unique within the encounter.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Kind; fixes stats, behavior, and rewards.
    pub kind: EnemyKind,
    /// Current hit points.
    pub hp: u32,
    /// Hit point ceiling.
    pub hp_max: u32,
    /// Attack rating.
    pub attack: u32,
    /// Defense rating.
    pub defense: u32,
    /// Speed rating; feeds initiative.
    pub speed: u32,
}

impl Enemy {
    /// Create an enemy of the given kind.
    #[must_use]
    pub fn new(id: u32, kind: EnemyKind) -> Self {
        let (hp, attack, defense, speed) = kind.base_stats();
        Enemy {
            id,
            name: kind.name().to_string(),
            kind,
            hp,
            hp_max: hp,
            attack,
            defense,
            speed,
        }
    }

    /// Experience granted when this enemy dies.
    #[must_use]
    pub fn xp_reward(&self) -> u32 {
        self.kind.rewards().0
    }

    /// Soul energy granted when this enemy dies.
    #[must_use]
    pub fn soul_energy_reward(&self) -> u32 {
        self.kind.rewards().1
    }
}
