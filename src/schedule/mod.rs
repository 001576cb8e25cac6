//! Return scheduling
//!
//! This module derives a legal return date from a pickup window and
//! classifies candidate dates against blackout rules:
//! - Holidays: the immutable blackout calendar (fixed + movable dates)
//! - Validation: rest-day/holiday classification and the turnaround offset

pub mod holidays;
pub mod validator;

// Re-export commonly used types from submodules
pub use holidays::BlackoutCalendar;
pub use validator::ScheduleValidator;
