//! Blackout-date classification and return-window suggestion

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::debug;

use crate::LavandaError;
use crate::config::ScheduleConfig;
use crate::models::{PickupWindow, ReturnWindow};
use crate::schedule::holidays::BlackoutCalendar;

/// Pure scheduling rules over the immutable blackout calendar.
///
/// Every method is independent given its inputs; the validator holds no
/// mutable state and is safe to share across form fields.
pub struct ScheduleValidator<'a> {
    calendar: &'a BlackoutCalendar,
    rest_day: Weekday,
    turnaround: Duration,
}

impl<'a> ScheduleValidator<'a> {
    /// Build a validator from the schedule configuration
    pub fn new(config: &ScheduleConfig, calendar: &'a BlackoutCalendar) -> anyhow::Result<Self> {
        Ok(Self {
            calendar,
            rest_day: config.rest_day()?,
            turnaround: Duration::hours(i64::from(config.turnaround_hours)),
        })
    }

    /// True when returns are disallowed on `date`: weekly rest day, or a
    /// date present in the holiday calendar.
    #[must_use]
    pub fn is_blackout_date(&self, date: NaiveDate) -> bool {
        date.weekday() == self.rest_day || self.calendar.contains(date)
    }

    /// Earliest legal return window for a pickup.
    ///
    /// The pickup start instant plus the fixed turnaround yields a target
    /// date, advanced day by day past any blackout dates. Time-of-day is
    /// carried over from the pickup as a placeholder for the host to
    /// repopulate.
    #[must_use]
    pub fn suggest_return_window(&self, pickup: &PickupWindow) -> ReturnWindow {
        let target = pickup.start_instant() + self.turnaround;
        let mut date = target.date();

        while self.is_blackout_date(date) {
            debug!("Return candidate {} is a blackout date, advancing", date);
            date = match date.succ_opt() {
                Some(next) => next,
                None => break, // end of the calendar range, nowhere to advance
            };
        }

        ReturnWindow {
            date,
            window: pickup.window,
        }
    }

    /// Parse a host-supplied ISO calendar date (`YYYY-MM-DD`).
    ///
    /// Malformed input is a programmer error in the form wiring, not a
    /// user condition; there is nothing to retry.
    pub fn parse_return_date(&self, value: &str) -> Result<NaiveDate, LavandaError> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|e| LavandaError::invalid_date(format!("{value:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;
    use chrono::NaiveTime;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pickup(date: NaiveDate) -> PickupWindow {
        PickupWindow {
            date,
            window: TimeWindow::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            )
            .unwrap(),
        }
    }

    fn validator(calendar: &BlackoutCalendar) -> ScheduleValidator<'_> {
        let config = crate::config::LavandaConfig::default();
        ScheduleValidator::new(&config.schedule, calendar).unwrap()
    }

    #[rstest]
    #[case(date(2026, 8, 2))]
    #[case(date(2026, 8, 9))]
    #[case(date(2026, 8, 16))]
    fn test_every_sunday_is_blackout_even_with_empty_calendar(#[case] sunday: NaiveDate) {
        let calendar = BlackoutCalendar::from_dates([]);
        let v = validator(&calendar);

        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert!(v.is_blackout_date(sunday));
    }

    #[test]
    fn test_holidays_are_blackout() {
        let calendar = BlackoutCalendar::argentina(2026);
        let v = validator(&calendar);

        assert!(v.is_blackout_date(date(2026, 7, 9)));
        assert!(!v.is_blackout_date(date(2026, 7, 10)));
    }

    #[test]
    fn test_default_turnaround_is_two_days() {
        let calendar = BlackoutCalendar::from_dates([]);
        let v = validator(&calendar);

        // Wednesday pickup, Friday return
        let suggested = v.suggest_return_window(&pickup(date(2026, 8, 5)));
        assert_eq!(suggested.date, date(2026, 8, 7));
    }

    #[test]
    fn test_suggestion_skips_rest_day() {
        let calendar = BlackoutCalendar::from_dates([]);
        let v = validator(&calendar);

        // Friday pickup + 48h lands on Sunday, pushed to Monday
        let suggested = v.suggest_return_window(&pickup(date(2026, 8, 7)));
        assert_eq!(suggested.date, date(2026, 8, 10));
    }

    #[test]
    fn test_suggestion_skips_rest_day_then_holiday() {
        // Pickup Friday Jul 17 2026 + 48h → Sunday Jul 19, then a contrived
        // Monday holiday pushes the suggestion to Tuesday
        let calendar = BlackoutCalendar::from_dates([date(2026, 7, 20)]);
        let v = validator(&calendar);

        let suggested = v.suggest_return_window(&pickup(date(2026, 7, 17)));
        assert_eq!(suggested.date, date(2026, 7, 21));
    }

    #[test]
    fn test_suggestion_never_returns_blackout() {
        let calendar = BlackoutCalendar::argentina(2026);
        let v = validator(&calendar);

        let mut day = date(2026, 1, 1);
        while day < date(2026, 12, 31) {
            let suggested = v.suggest_return_window(&pickup(day));
            assert!(
                !v.is_blackout_date(suggested.date),
                "pickup {day} suggested blackout {}",
                suggested.date
            );
            assert!(suggested.date >= day, "suggestion moved backwards");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_time_window_carried_from_pickup() {
        let calendar = BlackoutCalendar::from_dates([]);
        let v = validator(&calendar);

        let p = pickup(date(2026, 8, 5));
        let suggested = v.suggest_return_window(&p);
        assert_eq!(suggested.window, p.window);
    }

    #[test]
    fn test_parse_return_date() {
        let calendar = BlackoutCalendar::from_dates([]);
        let v = validator(&calendar);

        assert_eq!(v.parse_return_date("2026-08-07").unwrap(), date(2026, 8, 7));
        assert_eq!(v.parse_return_date(" 2026-08-07 ").unwrap(), date(2026, 8, 7));

        let err = v.parse_return_date("07/08/2026").unwrap_err();
        assert!(matches!(err, LavandaError::InvalidDate { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_user_chosen_blackout_date_is_classified_not_substituted() {
        let calendar = BlackoutCalendar::argentina(2026);
        let v = validator(&calendar);

        // Classification only: the validator reports the date as blackout
        // and leaves the substitution decision to the host
        let chosen = v.parse_return_date("2026-07-09").unwrap();
        assert!(v.is_blackout_date(chosen));
        assert_eq!(chosen, date(2026, 7, 9));
    }
}
