//! Wall-clock access, swappable for tests and replayed dates

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use std::cell::Cell;

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    /// The local calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The system clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone)]
pub struct FixedClock(Cell<DateTime<FixedOffset>>);

impl FixedClock {
    #[must_use]
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self(Cell::new(now))
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.0.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_moves_on_set() {
        let start = DateTime::parse_from_rfc3339("2026-10-17T23:59:00+08:00").unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());

        clock.set(DateTime::parse_from_rfc3339("2026-10-18T00:01:00+08:00").unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }

    #[test]
    fn today_uses_local_offset() {
        // 2026-10-17T20:00Z is already the 18th in Manila
        let now = DateTime::parse_from_rfc3339("2026-10-18T04:00:00+08:00").unwrap();
        let clock = FixedClock::new(now);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }

    #[test]
    fn boxed_clock_delegates() {
        let now = DateTime::parse_from_rfc3339("2026-10-17T12:00:00+08:00").unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock::new(now));
        assert_eq!(clock.now(), now);
    }
}
