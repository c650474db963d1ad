//! Source of "today" for date-based rules.

use chrono::{Days, Local, NaiveDate};

/// Supplies the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date; used by tests and replay tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Moves the pinned date forward by `days`, saturating at the calendar end.
    pub fn advance(&mut self, days: u64) {
        self.0 = self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_advances_by_days() {
        let mut clock = FixedClock(NaiveDate::from_ymd_opt(2026, 12, 30).unwrap());
        clock.advance(3);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2027, 1, 2).unwrap());
    }
}
