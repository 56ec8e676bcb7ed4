//! Rosters: id-keyed owners of souls and minions.
//!
//! The soul/minion binding cycle is broken by storing ids on both sides and
//! resolving through these owners. Cross-entity operations (bind, banish)
//! live on [`crate::player::PlayerState`], which owns both rosters.

use super::minion::Minion;
use super::soul::Soul;
use crate::error::{GameError, GameResult};

/// Owner of every harvested soul, keyed by stable id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoulVault {
    souls: Vec<Soul>,
    next_id: u32,
}

impl SoulVault {
    /// Empty vault; ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        SoulVault {
            souls: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a vault from saved parts. The id counter must exceed every
    /// stored id.
    #[must_use]
    pub fn from_parts(souls: Vec<Soul>, next_id: u32) -> Self {
        SoulVault { souls, next_id }
    }

    /// Reserve the next soul id.
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The id the next allocation will return.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Store a soul.
    pub fn add(&mut self, soul: Soul) {
        self.souls.push(soul);
    }

    /// Look up a soul by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Soul> {
        self.souls.iter().find(|s| s.id == id)
    }

    /// Look up a soul by id, mutably.
    pub fn get_mut(&mut self, id: u32) -> Option<&mut Soul> {
        self.souls.iter_mut().find(|s| s.id == id)
    }

    /// Remove a soul permanently (release to the afterlife).
    pub fn remove(&mut self, id: u32) -> GameResult<Soul> {
        let pos = self
            .souls
            .iter()
            .position(|s| s.id == id)
            .ok_or(GameError::SoulNotFound(id))?;
        Ok(self.souls.remove(pos))
    }

    /// Number of stored souls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.souls.len()
    }

    /// True when no souls are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.souls.is_empty()
    }

    /// Iterate over stored souls in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Soul> {
        self.souls.iter()
    }
}

/// Owner of every raised minion, keyed by stable id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinionRoster {
    minions: Vec<Minion>,
    next_id: u32,
}

impl MinionRoster {
    /// Empty roster; ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        MinionRoster {
            minions: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a roster from saved parts.
    #[must_use]
    pub fn from_parts(minions: Vec<Minion>, next_id: u32) -> Self {
        MinionRoster { minions, next_id }
    }

    /// Reserve the next minion id.
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The id the next allocation will return.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Store a minion.
    pub fn add(&mut self, minion: Minion) {
        self.minions.push(minion);
    }

    /// Look up a minion by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Minion> {
        self.minions.iter().find(|m| m.id == id)
    }

    /// Look up a minion by id, mutably.
    pub fn get_mut(&mut self, id: u32) -> Option<&mut Minion> {
        self.minions.iter_mut().find(|m| m.id == id)
    }

    /// Remove a minion permanently (banish).
    pub fn remove(&mut self, id: u32) -> GameResult<Minion> {
        let pos = self
            .minions
            .iter()
            .position(|m| m.id == id)
            .ok_or(GameError::MinionNotFound(id))?;
        Ok(self.minions.remove(pos))
    }

    /// Number of stored minions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.minions.len()
    }

    /// True when no minions are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.minions.is_empty()
    }

    /// Iterate over stored minions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Minion> {
        self.minions.iter()
    }

    /// Iterate mutably, for end-of-combat entity sync.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Minion> {
        self.minions.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{MinionKind, SoulKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_vault_ids_are_stable() {
        let mut vault = SoulVault::new();
        let a = vault.allocate_id();
        vault.add(Soul::new(a, SoulKind::Common, 50, 0));
        let b = vault.allocate_id();
        vault.add(Soul::new(b, SoulKind::Mage, 70, 0));
        assert_eq!((a, b), (1, 2));
        vault.remove(1).unwrap();
        assert!(vault.get(1).is_none());
        assert_eq!(vault.get(2).map(|s| s.kind), Some(SoulKind::Mage));
        assert_eq!(vault.allocate_id(), 3, "ids are never reused");
    }

    #[test]
    fn test_roster_remove_missing() {
        let mut roster = MinionRoster::new();
        assert!(matches!(roster.remove(9), Err(GameError::MinionNotFound(9))));
        let mut rng = StdRng::seed_from_u64(1);
        let id = roster.allocate_id();
        roster.add(Minion::new(id, MinionKind::Zombie, None, &mut rng));
        assert_eq!(roster.len(), 1);
        roster.remove(id).unwrap();
        assert!(roster.is_empty());
    }
}
