//! Per-field verification state machine
//!
//! Each address field of the order form (pickup, return) exclusively owns
//! one `AddressField`. The field serializes verification runs with a
//! generation counter: starting a new search invalidates any in-flight
//! result, so a stale response can never overwrite newer state.

use tracing::debug;

use crate::LavandaError;
use crate::models::{AddressSuggestion, ConfirmedAddress};

/// Verification lifecycle of one address field
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationState {
    /// Raw text editable, nothing verified
    Editing,
    /// A verification run is in flight
    Searching,
    /// One confirmable suggestion is on offer
    Suggested(AddressSuggestion),
    /// The user accepted the suggestion; label frozen
    Confirmed(ConfirmedAddress),
    /// The last run failed; user-facing reason kept for display
    Failed(String),
}

/// Token tying an in-flight verification run to the generation that started it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken(u64);

/// State holder for one address field
#[derive(Debug)]
pub struct AddressField {
    state: VerificationState,
    generation: u64,
}

impl Default for AddressField {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressField {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: VerificationState::Editing,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &VerificationState {
        &self.state
    }

    /// The field's current value for order submission, if confirmed
    #[must_use]
    pub fn confirmed(&self) -> Option<&ConfirmedAddress> {
        match &self.state {
            VerificationState::Confirmed(address) => Some(address),
            _ => None,
        }
    }

    /// Start a verification run. Any previous state, including a confirmed
    /// address, is discarded; the returned token must accompany the result.
    pub fn begin_search(&mut self) -> SearchToken {
        self.generation += 1;
        self.state = VerificationState::Searching;
        SearchToken(self.generation)
    }

    /// Deliver the outcome of a verification run.
    ///
    /// Outcomes carrying a stale token are dropped: a newer search or an
    /// edit superseded them while they were in flight.
    pub fn resolve(
        &mut self,
        token: SearchToken,
        outcome: Result<AddressSuggestion, LavandaError>,
    ) {
        if token.0 != self.generation {
            debug!(
                "Dropping stale verification result (token {}, current {})",
                token.0, self.generation
            );
            return;
        }

        self.state = match outcome {
            Ok(suggestion) => VerificationState::Suggested(suggestion),
            Err(error) => VerificationState::Failed(error.user_message()),
        };
    }

    /// Accept the suggestion on offer, freezing its label as the field value.
    ///
    /// Valid only while `Suggested`; calling again once confirmed returns the
    /// same address. In any other state there is nothing to confirm.
    pub fn confirm(&mut self) -> Option<ConfirmedAddress> {
        match &self.state {
            VerificationState::Suggested(suggestion) => {
                let confirmed = ConfirmedAddress::from(suggestion);
                self.state = VerificationState::Confirmed(confirmed.clone());
                Some(confirmed)
            }
            VerificationState::Confirmed(address) => Some(address.clone()),
            _ => None,
        }
    }

    /// Return to editing, discarding any suggestion or confirmation.
    ///
    /// Also invalidates in-flight runs, so a result arriving after the edit
    /// cannot resurrect discarded state.
    pub fn edit(&mut self) {
        self.generation += 1;
        self.state = VerificationState::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(label: &str) -> AddressSuggestion {
        AddressSuggestion {
            latitude: -31.41,
            longitude: -64.18,
            label: label.to_string(),
            exact_house_number: true,
        }
    }

    #[test]
    fn test_happy_path_to_confirmed() {
        let mut field = AddressField::new();
        assert_eq!(field.state(), &VerificationState::Editing);

        let token = field.begin_search();
        assert_eq!(field.state(), &VerificationState::Searching);

        field.resolve(token, Ok(suggestion("Av. Patria 1480, Córdoba")));
        assert!(matches!(field.state(), VerificationState::Suggested(_)));

        let confirmed = field.confirm().unwrap();
        assert_eq!(confirmed.normalized_label, "Av. Patria 1480, Córdoba");
        assert_eq!(field.confirmed(), Some(&confirmed));
    }

    #[test]
    fn test_confirm_is_idempotent() {
        let mut field = AddressField::new();
        let token = field.begin_search();
        field.resolve(token, Ok(suggestion("Av. Patria 1480, Córdoba")));

        let first = field.confirm().unwrap();
        let second = field.confirm().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_confirm_without_suggestion_is_noop() {
        let mut field = AddressField::new();
        assert!(field.confirm().is_none());

        field.begin_search();
        assert!(field.confirm().is_none());
        assert_eq!(field.state(), &VerificationState::Searching);
    }

    #[test]
    fn test_edit_after_confirmed_resets() {
        let mut field = AddressField::new();
        let token = field.begin_search();
        field.resolve(token, Ok(suggestion("Av. Patria 1480, Córdoba")));
        field.confirm().unwrap();

        field.edit();
        assert_eq!(field.state(), &VerificationState::Editing);
        assert!(field.confirmed().is_none());
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut field = AddressField::new();

        let stale = field.begin_search();
        let current = field.begin_search();

        field.resolve(stale, Ok(suggestion("Calle Vieja 1, Córdoba")));
        assert_eq!(field.state(), &VerificationState::Searching);

        field.resolve(current, Ok(suggestion("Av. Patria 1480, Córdoba")));
        match field.state() {
            VerificationState::Suggested(s) => {
                assert_eq!(s.label, "Av. Patria 1480, Córdoba");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_stale_result_cannot_overwrite_confirmed() {
        let mut field = AddressField::new();

        let stale = field.begin_search();
        let current = field.begin_search();
        field.resolve(current, Ok(suggestion("Av. Patria 1480, Córdoba")));
        field.confirm().unwrap();

        field.resolve(stale, Ok(suggestion("Calle Vieja 1, Córdoba")));
        assert!(matches!(field.state(), VerificationState::Confirmed(_)));
    }

    #[test]
    fn test_result_arriving_after_edit_is_dropped() {
        let mut field = AddressField::new();

        let token = field.begin_search();
        field.edit();

        field.resolve(token, Ok(suggestion("Av. Patria 1480, Córdoba")));
        assert_eq!(field.state(), &VerificationState::Editing);
    }

    #[test]
    fn test_failure_carries_user_message() {
        let mut field = AddressField::new();
        let token = field.begin_search();

        field.resolve(token, Err(LavandaError::out_of_coverage("Córdoba")));
        match field.state() {
            VerificationState::Failed(message) => {
                assert!(message.contains("Córdoba"));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_new_search_from_confirmed_discards_confirmation() {
        let mut field = AddressField::new();
        let token = field.begin_search();
        field.resolve(token, Ok(suggestion("Av. Patria 1480, Córdoba")));
        field.confirm().unwrap();

        field.begin_search();
        assert_eq!(field.state(), &VerificationState::Searching);
        assert!(field.confirmed().is_none());
    }
}
