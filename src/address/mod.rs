//! Address verification
//!
//! This module turns free-text address input into a geocoded,
//! coverage-validated, user-confirmable suggestion:
//! - Parsing: street / house-number extraction from raw text
//! - Verification: query, post-filter, ranking and label normalization
//! - Field state: the per-field editing/searching/suggested/confirmed machine

pub mod field;
pub mod parser;
pub mod verifier;

// Re-export commonly used types from submodules
pub use field::{AddressField, SearchToken, VerificationState};
pub use parser::parse_address;
pub use verifier::AddressVerifier;
