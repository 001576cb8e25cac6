//! Scheduling models: pickup and return windows

use crate::LavandaError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Start/end time pair within one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Build a window, rejecting `end <= start`
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, LavandaError> {
        if end <= start {
            return Err(LavandaError::invalid_date(format!(
                "Time window end {end} must be after start {start}"
            )));
        }
        Ok(Self { start, end })
    }
}

/// Scheduled pickup slot chosen by the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupWindow {
    pub date: NaiveDate,
    pub window: TimeWindow,
}

impl PickupWindow {
    /// Instant the turnaround is measured from
    #[must_use]
    pub fn start_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.window.start)
    }
}

/// Suggested or user-chosen return slot
///
/// The date is derived from the pickup by the schedule validator; the
/// time-of-day fields are the host's to populate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnWindow {
    pub date: NaiveDate,
    pub window: TimeWindow,
}
