//! Blackout calendar: Argentine national holidays
//!
//! Fixed-date holidays recur every year; the movable ones (Carnival and
//! Good Friday) hang off the Easter computus. The calendar is built once
//! at startup for the current and surrounding years and is read-only
//! afterwards.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Fixed national holidays as (month, day)
const FIXED_HOLIDAYS: &[(u32, u32)] = &[
    (1, 1),   // Año Nuevo
    (3, 24),  // Día de la Memoria
    (4, 2),   // Malvinas
    (5, 1),   // Día del Trabajador
    (5, 25),  // Revolución de Mayo
    (6, 17),  // Güemes
    (6, 20),  // Belgrano
    (7, 9),   // Independencia
    (12, 8),  // Inmaculada Concepción
    (12, 25), // Navidad
];

/// Immutable set of dates on which returns are disallowed
#[derive(Debug, Clone)]
pub struct BlackoutCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl BlackoutCalendar {
    /// Build the Argentine holiday calendar for `base_year` and the years
    /// on either side of it.
    #[must_use]
    pub fn argentina(base_year: i32) -> Self {
        let mut holidays = BTreeSet::new();

        for year in (base_year - 1)..=(base_year + 1) {
            for &(month, day) in FIXED_HOLIDAYS {
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    holidays.insert(date);
                }
            }

            let easter = easter_sunday(year);
            holidays.insert(easter - Duration::days(48)); // Lunes de Carnaval
            holidays.insert(easter - Duration::days(47)); // Martes de Carnaval
            holidays.insert(easter - Duration::days(2)); // Viernes Santo
        }

        Self { holidays }
    }

    /// Build a calendar from explicit dates
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            holidays: dates.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

/// Easter Sunday for a given year (Meeus/Jones/Butcher Gregorian computus)
fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    // The computus only yields March or April days, always valid
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 4, 1).expect("valid date"))
}
