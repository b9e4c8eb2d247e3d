use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so the view stays
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// The year every year-choice set is anchored on.
    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Real-time clock; the calendar date follows the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen on a given day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Frozen on June 15th of `year`.
    pub fn in_year(year: i32) -> Self {
        let today = NaiveDate::from_ymd_opt(year, 6, 15).unwrap_or(NaiveDate::MIN);
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_year() {
        let clock = FixedClock::in_year(2021);
        assert_eq!(clock.current_year(), 2021);
        assert_eq!(clock.now().date_naive(), clock.today());
    }

    #[test]
    fn system_clock_year_is_plausible() {
        assert!(SystemClock.current_year() >= 2024);
    }
}
