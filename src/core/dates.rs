//! Building invoice dates from the three numeric form fields.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::time::{Clock, SystemClock};
use crate::errors::InvalidDateError;

/// How many years back an invoice date may reach.
pub const DEFAULT_YEAR_SPAN: i32 = 100;

/// Validates day/month/year triples against the calendar and an accepted
/// year window ending at the current year.
#[derive(Clone)]
pub struct DateValidator {
    clock: Arc<dyn Clock>,
    year_span: i32,
}

impl DateValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_year_span(clock, DEFAULT_YEAR_SPAN)
    }

    pub fn with_year_span(clock: Arc<dyn Clock>, year_span: i32) -> Self {
        Self {
            clock,
            year_span: year_span.max(0),
        }
    }

    pub fn set_year_span(&mut self, year_span: i32) {
        self.year_span = year_span.max(0);
    }

    /// Oldest and newest accepted years, inclusive.
    pub fn year_window(&self) -> (i32, i32) {
        let current = self.clock.current_year();
        (current - self.year_span, current)
    }

    /// Returns the calendar date or the rejected triple.
    pub fn build_date(&self, day: u32, month: u32, year: i32) -> Result<NaiveDate, InvalidDateError> {
        let (oldest, newest) = self.year_window();
        if !(oldest..=newest).contains(&year) {
            tracing::debug!(day, month, year, oldest, newest, "year outside accepted window");
            return Err(InvalidDateError::new(day, month, year));
        }
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            tracing::debug!(day, month, year, "not a calendar date");
            InvalidDateError::new(day, month, year)
        })
    }
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// [`DateValidator::build_date`] against the system clock and the default
/// 100-year window.
pub fn build_date(day: u32, month: u32, year: i32) -> Result<NaiveDate, InvalidDateError> {
    DateValidator::default().build_date(day, month, year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;

    fn validator() -> DateValidator {
        DateValidator::new(Arc::new(FixedClock::in_year(2020)))
    }

    #[test]
    fn accepts_leap_day() {
        let date = validator().build_date(29, 2, 2020).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    }

    #[test]
    fn rejects_day_overflow_and_bad_month() {
        assert_eq!(
            validator().build_date(31, 2, 2020),
            Err(InvalidDateError::new(31, 2, 2020))
        );
        assert_eq!(
            validator().build_date(29, 2, 2019),
            Err(InvalidDateError::new(29, 2, 2019))
        );
        assert_eq!(
            validator().build_date(1, 13, 2020),
            Err(InvalidDateError::new(1, 13, 2020))
        );
        assert!(validator().build_date(0, 1, 2020).is_err());
    }

    #[test]
    fn enforces_the_year_window() {
        let validator = validator();
        assert!(validator.build_date(1, 5, 2021).is_err());
        assert!(validator.build_date(1, 5, 1920).is_ok());
        assert!(validator.build_date(1, 5, 1919).is_err());
    }

    #[test]
    fn custom_span_narrows_the_window() {
        let validator = DateValidator::with_year_span(Arc::new(FixedClock::in_year(2020)), 1);
        assert_eq!(validator.year_window(), (2019, 2020));
        assert!(validator.build_date(1, 1, 2018).is_err());
    }
}
