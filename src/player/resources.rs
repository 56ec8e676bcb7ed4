//! Resources and the game clock.

use crate::error::{GameError, GameResult};

/// Hours per game day.
pub const HOURS_PER_DAY: u32 = 24;
/// Days per game month.
pub const DAYS_PER_MONTH: u32 = 30;
/// Months per game year.
pub const MONTHS_PER_YEAR: u32 = 12;
/// Mana regenerated per hour of passed time.
pub const MANA_REGEN_PER_HOUR: u32 = 10;

/// Soul energy, mana, and the clock. `advance_time` is the single mutator
/// that moves the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resources {
    /// Harvested soul energy, spent by rituals.
    pub soul_energy: u32,
    /// Current mana.
    pub mana: u32,
    /// Mana ceiling.
    pub mana_max: u32,
    /// Total days elapsed since the run began (starts at 1).
    pub day_count: u32,
    /// Hour of the day in `[0, 23]`.
    pub time_hours: u32,
    /// Day of the month in `[1, 30]`.
    pub day_of_month: u32,
    /// Month of the year in `[0, 11]`.
    pub month: u32,
    /// Years elapsed.
    pub year: u32,
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

impl Resources {
    /// Fresh start: no energy, full mana, day 1 hour 0.
    #[must_use]
    pub fn new() -> Self {
        Resources {
            soul_energy: 0,
            mana: 100,
            mana_max: 100,
            day_count: 1,
            time_hours: 0,
            day_of_month: 1,
            month: 0,
            year: 0,
        }
    }

    /// Advance the clock by `hours`, regenerating mana and rolling the
    /// calendar. Returns the number of days that elapsed.
    pub fn advance_time(&mut self, hours: u32) -> u32 {
        self.mana = (self.mana + hours * MANA_REGEN_PER_HOUR).min(self.mana_max);
        self.time_hours += hours;
        let mut days = 0;
        while self.time_hours >= HOURS_PER_DAY {
            self.time_hours -= HOURS_PER_DAY;
            self.day_count += 1;
            self.day_of_month += 1;
            days += 1;
            if self.day_of_month > DAYS_PER_MONTH {
                self.day_of_month = 1;
                self.month += 1;
                if self.month >= MONTHS_PER_YEAR {
                    self.month = 0;
                    self.year += 1;
                }
            }
        }
        days
    }

    /// Total months elapsed, for the consciousness decay clock.
    #[must_use]
    pub fn months_elapsed(&self) -> u32 {
        self.year * MONTHS_PER_YEAR + self.month
    }

    /// Spend mana, failing without mutation when short.
    pub fn spend_mana(&mut self, cost: u32) -> GameResult<()> {
        if self.mana < cost {
            return Err(GameError::InsufficientMana {
                needed: cost,
                available: self.mana,
            });
        }
        self.mana -= cost;
        Ok(())
    }

    /// Spend soul energy, failing without mutation when short.
    pub fn spend_energy(&mut self, cost: u32) -> GameResult<()> {
        if self.soul_energy < cost {
            return Err(GameError::InsufficientEnergy {
                needed: cost,
                available: self.soul_energy,
            });
        }
        self.soul_energy -= cost;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let r = Resources::new();
        assert_eq!(r.soul_energy, 0);
        assert_eq!((r.mana, r.mana_max), (100, 100));
        assert_eq!((r.day_count, r.time_hours), (1, 0));
    }

    #[test]
    fn test_day_rollover() {
        let mut r = Resources::new();
        assert_eq!(r.advance_time(23), 0);
        assert_eq!(r.time_hours, 23);
        assert_eq!(r.advance_time(2), 1);
        assert_eq!(r.day_count, 2);
        assert_eq!(r.time_hours, 1);
    }

    #[test]
    fn test_month_and_year_rollover() {
        let mut r = Resources::new();
        // 30 days ends month 0
        r.advance_time(30 * 24);
        assert_eq!((r.month, r.day_of_month), (1, 1));
        assert_eq!(r.months_elapsed(), 1);
        // 11 more months ends the year
        r.advance_time(11 * 30 * 24);
        assert_eq!((r.year, r.month), (1, 0));
        assert_eq!(r.months_elapsed(), 12);
    }

    #[test]
    fn test_mana_regen_clamped() {
        let mut r = Resources::new();
        r.mana = 25;
        r.advance_time(3);
        assert_eq!(r.mana, 55);
        r.advance_time(100);
        assert_eq!(r.mana, 100);
    }

    #[test]
    fn test_spend_is_atomic() {
        let mut r = Resources::new();
        r.soul_energy = 30;
        assert!(r.spend_energy(50).is_err());
        assert_eq!(r.soul_energy, 30, "failed spend must not mutate");
        r.spend_energy(30).unwrap();
        assert_eq!(r.soul_energy, 0);
        assert!(matches!(
            r.spend_mana(200),
            Err(GameError::InsufficientMana { needed: 200, available: 100 })
        ));
    }
}
