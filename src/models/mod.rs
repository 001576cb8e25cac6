//! Data models for the Lavanda order core
//!
//! This module contains the core domain models organized by concern:
//! - Address: parsed input, geocoded suggestions, confirmed addresses
//! - Schedule: pickup and return windows

pub mod address;
pub mod schedule;

// Re-export all public types for convenient access
pub use address::{AddressSuggestion, ConfirmedAddress, ParsedAddress};
pub use schedule::{PickupWindow, ReturnWindow, TimeWindow};
