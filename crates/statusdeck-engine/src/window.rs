//! Reporting window resolution and clocks

use chrono::{Local, NaiveDate};
use statusdeck_core::{Clock, ReportingWindow};

/// Wall clock in the local timezone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a single date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The calendar month containing `now`
pub fn reporting_window(now: NaiveDate) -> ReportingWindow {
    ReportingWindow::containing(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(date(2024, 3, 17));
        assert_eq!(clock.today(), clock.today());
        assert_eq!(clock.today(), date(2024, 3, 17));
    }

    #[test]
    fn window_from_fixed_clock() {
        let window = reporting_window(FixedClock(date(2024, 3, 17)).today());
        assert_eq!(window.start, date(2024, 3, 1));
        assert_eq!(window.end, date(2024, 3, 31));
    }

    #[test]
    fn window_on_first_and_last_day() {
        assert_eq!(reporting_window(date(2024, 4, 1)).end, date(2024, 4, 30));
        assert_eq!(reporting_window(date(2024, 4, 30)).start, date(2024, 4, 1));
    }

    #[test]
    fn system_clock_window_contains_today() {
        let today = SystemClock.today();
        let window = reporting_window(today);
        assert!(window.start <= today && today <= window.end);
    }
}
