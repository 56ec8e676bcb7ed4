//! Minions: player-controlled undead raised from soul energy.

use rand::Rng;

/// The six minion kinds, each with a fixed base-stat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinionKind {
    /// Slow, durable frontline.
    Zombie,
    /// Fast and fragile.
    Skeleton,
    /// High attack, middling everything else.
    Ghoul,
    /// Fastest kind, almost no defense.
    Wraith,
    /// Heavy bruiser with high loyalty.
    Wight,
    /// Top of every column; expensive to raise.
    Revenant,
}

impl MinionKind {
    /// All kinds, in stable encoding order.
    pub const ALL: [MinionKind; 6] = [
        MinionKind::Zombie,
        MinionKind::Skeleton,
        MinionKind::Ghoul,
        MinionKind::Wraith,
        MinionKind::Wight,
        MinionKind::Revenant,
    ];

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MinionKind::Zombie => "Zombie",
            MinionKind::Skeleton => "Skeleton",
            MinionKind::Ghoul => "Ghoul",
            MinionKind::Wraith => "Wraith",
            MinionKind::Wight => "Wight",
            MinionKind::Revenant => "Revenant",
        }
    }

    /// Parse a kind from user input (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
    }

    /// Base stats at level 1.
    #[must_use]
    pub fn base_stats(self) -> MinionStats {
        // {hp, atk, def, spd, loyalty}
        let (hp, attack, defense, speed, loyalty) = match self {
            MinionKind::Zombie => (100, 15, 20, 5, 50),
            MinionKind::Skeleton => (50, 25, 10, 15, 40),
            MinionKind::Ghoul => (80, 30, 15, 10, 35),
            MinionKind::Wraith => (60, 35, 8, 20, 30),
            MinionKind::Wight => (120, 40, 25, 12, 60),
            MinionKind::Revenant => (150, 50, 30, 15, 80),
        };
        MinionStats {
            hp,
            hp_max: hp,
            attack,
            defense,
            speed,
            loyalty,
        }
    }

    /// Soul energy cost of the raise ritual.
    #[must_use]
    pub fn raise_cost(self) -> u32 {
        match self {
            MinionKind::Zombie => 50,
            MinionKind::Skeleton => 75,
            MinionKind::Ghoul => 100,
            MinionKind::Wraith => 150,
            MinionKind::Wight => 200,
            MinionKind::Revenant => 300,
        }
    }
}

/// Mutable stat block of a minion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinionStats {
    /// Current hit points, always in `[0, hp_max]`.
    pub hp: u32,
    /// Hit point ceiling.
    pub hp_max: u32,
    /// Attack rating.
    pub attack: u32,
    /// Defense rating.
    pub defense: u32,
    /// Speed rating; feeds initiative.
    pub speed: u32,
    /// Loyalty in `[0, 100]`. Tracked and boosted by binding, not yet
    /// consumed by any mechanic.
    pub loyalty: u8,
}

/// A raised undead servant.
#[derive(Debug, Clone, PartialEq)]
pub struct Minion {
    /// Stable unique id assigned by the roster.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Kind; fixes the base-stat row.
    pub kind: MinionKind,
    /// Current stats (mutated by binding, level-ups, and combat sync).
    pub stats: MinionStats,
    /// Level, starting at 1.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Current location id (world bookkeeping, opaque to the core).
    pub location: u32,
    /// Id of the bound soul, if any. The soul's binding points back here.
    pub bound_soul: Option<u32>,
}

/// 5% stat growth with a floor of +1.
fn grow(stat: u32) -> u32 {
    stat + (stat / 20).max(1)
}

impl Minion {
    /// Create a minion. When `name` is `None` an auto-name of the form
    /// `"<Kind>-NNNN"` is rolled.
    pub fn new<R: Rng>(id: u32, kind: MinionKind, name: Option<String>, rng: &mut R) -> Self {
        let name = name.unwrap_or_else(|| format!("{}-{:04}", kind.name(), rng.gen_range(0..10_000)));
        Minion {
            id,
            name,
            kind,
            stats: kind.base_stats(),
            level: 1,
            experience: 0,
            location: 0,
            bound_soul: None,
        }
    }

    /// True while hp is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.stats.hp > 0
    }

    /// Grant experience. Levels cascade while `experience >= level * 100`;
    /// each level-up scales every stat by 1.05 (floor +1) and refills hp.
    /// Returns the number of levels gained.
    pub fn add_experience(&mut self, xp: u32) -> u32 {
        self.experience += xp;
        let mut gained = 0;
        while self.experience >= self.level * 100 {
            self.experience -= self.level * 100;
            self.level += 1;
            gained += 1;
            self.stats.hp_max = grow(self.stats.hp_max);
            self.stats.attack = grow(self.stats.attack);
            self.stats.defense = grow(self.stats.defense);
            self.stats.speed = grow(self.stats.speed);
            self.stats.hp = self.stats.hp_max;
        }
        gained
    }

    /// Apply the binding boost for a soul of the given quality:
    /// attack/defense/speed scale by `1 + quality/1000`, loyalty gains
    /// `quality / 10` (clamped to 100). The boost is never reverted.
    pub fn apply_bind_boost(&mut self, quality: u8) {
        let q = u32::from(quality);
        self.stats.attack += self.stats.attack * q / 1000;
        self.stats.defense += self.stats.defense * q / 1000;
        self.stats.speed += self.stats.speed * q / 1000;
        self.stats.loyalty = self.stats.loyalty.saturating_add(quality / 10).min(100);
    }

    /// Reduce hp, flooring at zero. Returns true while still alive.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.stats.hp = self.stats.hp.saturating_sub(damage);
        self.is_alive()
    }

    /// Restore hp, capped at `hp_max`.
    pub fn heal(&mut self, amount: u32) {
        self.stats.hp = (self.stats.hp + amount).min(self.stats.hp_max);
    }

    /// Multi-line description for the status display.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} '{}' (ID: {}, Level {})\n  Soul: {}\n  HP: {}/{} | Atk: {} | Def: {} | Spd: {} | Loyalty: {}%\n  Experience: {}/{}",
            self.kind.name(),
            self.name,
            self.id,
            self.level,
            self.bound_soul.map_or_else(|| "None".to_string(), |id| format!("Bound (#{id})")),
            self.stats.hp,
            self.stats.hp_max,
            self.stats.attack,
            self.stats.defense,
            self.stats.speed,
            self.stats.loyalty,
            self.experience,
            self.level * 100
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_base_stat_table() {
        let z = MinionKind::Zombie.base_stats();
        assert_eq!((z.hp, z.attack, z.defense, z.speed, z.loyalty), (100, 15, 20, 5, 50));
        let r = MinionKind::Revenant.base_stats();
        assert_eq!((r.hp, r.attack, r.defense, r.speed, r.loyalty), (150, 50, 30, 15, 80));
        assert_eq!(MinionKind::Wraith.raise_cost(), 150);
    }

    #[test]
    fn test_auto_name_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Minion::new(1, MinionKind::Ghoul, None, &mut rng);
        assert!(m.name.starts_with("Ghoul-"));
        assert_eq!(m.name.len(), "Ghoul-".len() + 4);
    }

    #[test]
    fn test_level_up_scales_and_refills() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut m = Minion::new(1, MinionKind::Zombie, Some("Shambles".to_string()), &mut rng);
        m.stats.hp = 40;
        assert_eq!(m.add_experience(100), 1);
        assert_eq!(m.level, 2);
        assert_eq!(m.experience, 0);
        assert_eq!(m.stats.hp_max, 105);
        assert_eq!(m.stats.hp, 105, "hp refills on level-up");
        assert_eq!(m.stats.attack, 16, "floor of +1 when 5% rounds to zero");
        assert_eq!(m.stats.speed, 6);
    }

    #[test]
    fn test_level_up_cascades() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut m = Minion::new(1, MinionKind::Skeleton, None, &mut rng);
        // 100 for level 1->2, 200 for 2->3, 50 spare
        assert_eq!(m.add_experience(350), 2);
        assert_eq!(m.level, 3);
        assert_eq!(m.experience, 50);
    }

    #[test]
    fn test_bind_boost() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut m = Minion::new(1, MinionKind::Wight, None, &mut rng);
        m.apply_bind_boost(100);
        assert_eq!(m.stats.attack, 44); // 40 + 40*100/1000
        assert_eq!(m.stats.defense, 27);
        assert_eq!(m.stats.loyalty, 70);
        m.apply_bind_boost(255);
        assert_eq!(m.stats.loyalty, 95);
        m.apply_bind_boost(100);
        assert_eq!(m.stats.loyalty, 100, "loyalty clamps at 100");
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut m = Minion::new(1, MinionKind::Skeleton, None, &mut rng);
        assert!(m.take_damage(49));
        assert!(!m.take_damage(500));
        assert_eq!(m.stats.hp, 0);
        m.heal(10_000);
        assert_eq!(m.stats.hp, m.stats.hp_max);
    }
}
