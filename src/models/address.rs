//! Address models: parsed input, geocoded suggestions and confirmed addresses

use serde::{Deserialize, Serialize};

/// Street and optional house number extracted from free-text input
///
/// `house_number` is empty when the input carried no trailing numeric token;
/// `street` is never empty while `house_number` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub street: String,
    pub house_number: String,
}

impl ParsedAddress {
    /// Street filter as sent to the structured geocoding query
    #[must_use]
    pub fn street_filter(&self) -> String {
        if self.house_number.is_empty() {
            self.street.clone()
        } else {
            format!("{} {}", self.street, self.house_number)
        }
    }

    #[must_use]
    pub fn has_house_number(&self) -> bool {
        !self.house_number.is_empty()
    }
}

/// The single confirmable suggestion produced by a verification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Normalized label, e.g. "Av. Patria 1480, Pueyrredón, Córdoba"
    pub label: String,
    /// True when the service itself confirmed the house number
    pub exact_house_number: bool,
}

impl AddressSuggestion {
    /// True when the user asked for a number the service could not confirm.
    /// Advisory only: confirmation is still allowed.
    #[must_use]
    pub fn is_approximate(&self, requested: &ParsedAddress) -> bool {
        !self.exact_house_number && requested.has_house_number()
    }
}

/// A user-accepted, normalized, geocoded address ready for order submission
///
/// Immutable once created; replaced only when the field re-enters edit mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedAddress {
    pub latitude: f64,
    pub longitude: f64,
    pub normalized_label: String,
    pub exact_house_number_match: bool,
}

impl From<&AddressSuggestion> for ConfirmedAddress {
    fn from(suggestion: &AddressSuggestion) -> Self {
        Self {
            latitude: suggestion.latitude,
            longitude: suggestion.longitude,
            normalized_label: suggestion.label.clone(),
            exact_house_number_match: suggestion.exact_house_number,
        }
    }
}
