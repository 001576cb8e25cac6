//! `Lavanda` - Order core for a Córdoba laundry pickup service
//!
//! This library provides the two verification components behind the order
//! form: free-text address verification against a geocoding service with
//! coverage filtering, and return-date scheduling with blackout rules.
//! The surrounding UI is an external collaborator: it calls in with plain
//! values and receives plain results.

pub mod address;
pub mod config;
pub mod error;
pub mod geo;
pub mod geocoding;
pub mod logging;
pub mod models;
pub mod schedule;

// Re-export core types for public API
pub use address::{AddressField, AddressVerifier, SearchToken, VerificationState, parse_address};
pub use config::LavandaConfig;
pub use error::LavandaError;
pub use geo::BoundingRegion;
pub use geocoding::NominatimClient;
pub use models::{
    AddressSuggestion, ConfirmedAddress, ParsedAddress, PickupWindow, ReturnWindow, TimeWindow,
};
pub use schedule::{BlackoutCalendar, ScheduleValidator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, LavandaError>;
