//! Candidate filtering, ranking and label normalization
//!
//! `AddressVerifier` drives a full verification run: parse the raw text,
//! query the geocoding service (structured first, free-text fallback),
//! keep only candidates in the fixed city and inside the coverage box,
//! rank them, and compose the normalized label the user confirms.

use tracing::{debug, info};

use crate::LavandaError;
use crate::address::parser::parse_address;
use crate::config::LavandaConfig;
use crate::geo::BoundingRegion;
use crate::geocoding::{NominatimClient, NominatimPlace};
use crate::models::{AddressSuggestion, ParsedAddress};

/// Address verification service for one fixed city
pub struct AddressVerifier {
    client: NominatimClient,
    city: String,
    region: BoundingRegion,
}

/// A filtered candidate with its coordinates already parsed
struct Candidate {
    place: NominatimPlace,
    lat: f64,
    lon: f64,
}

impl AddressVerifier {
    /// Create a verifier over the configured geocoding endpoint
    pub fn new(config: &LavandaConfig) -> Result<Self, LavandaError> {
        Ok(Self {
            client: NominatimClient::new(&config.geocoding)?,
            city: config.geocoding.city.clone(),
            region: config.coverage.region,
        })
    }

    /// Verify raw address text, producing the single confirmable suggestion.
    ///
    /// Fails with `EmptyInput` when no street can be parsed, `OutOfCoverage`
    /// when nothing serviceable remains after filtering, and `Network` on
    /// transport trouble (retryable).
    pub async fn verify(&self, raw_text: &str) -> Result<AddressSuggestion, LavandaError> {
        let parsed = parse_address(raw_text);
        if parsed.street.is_empty() {
            return Err(LavandaError::EmptyInput);
        }

        let mut places = self.client.search_structured(&parsed).await?;
        if places.is_empty() {
            debug!("Structured query empty, trying free-text fallback");
            places = self.client.search_freeform(&parsed).await?;
        }

        self.pick_best(places, &parsed)
    }

    /// Parse raw text the same way `verify` does; exposed so hosts can
    /// compute the approximate-number advisory for a suggestion.
    #[must_use]
    pub fn parse(&self, raw_text: &str) -> ParsedAddress {
        parse_address(raw_text)
    }

    fn pick_best(
        &self,
        places: Vec<NominatimPlace>,
        parsed: &ParsedAddress,
    ) -> Result<AddressSuggestion, LavandaError> {
        let within: Vec<Candidate> = places
            .into_iter()
            .filter_map(|place| {
                let (lat, lon) = place.coordinates()?;
                Some(Candidate { place, lat, lon })
            })
            .filter(|c| self.matches_city(&c.place) && self.region.contains(c.lat, c.lon))
            .collect();

        if within.is_empty() {
            info!("No candidates left inside {} coverage", self.city);
            return Err(LavandaError::out_of_coverage(self.city.clone()));
        }

        // Exact house-number equality outranks a "house"-typed record;
        // otherwise the service's relevance order stands.
        let pick = within
            .iter()
            .find(|c| {
                parsed.has_house_number()
                    && c.place.address.house_number.as_deref() == Some(parsed.house_number.as_str())
            })
            .or_else(|| {
                within
                    .iter()
                    .find(|c| c.place.place_type.as_deref() == Some("house"))
            })
            .unwrap_or(&within[0]);

        Ok(self.to_suggestion(pick, parsed))
    }

    fn matches_city(&self, place: &NominatimPlace) -> bool {
        let city = self.city.as_str();
        place.address.city.as_deref() == Some(city)
            || place.address.town.as_deref() == Some(city)
            || place
                .display_name
                .to_lowercase()
                .contains(&city.to_lowercase())
    }

    fn to_suggestion(&self, pick: &Candidate, parsed: &ParsedAddress) -> AddressSuggestion {
        let road = pick.place.road_name().unwrap_or(parsed.street.as_str());

        let confirmed_number = pick.place.address.house_number.as_deref().unwrap_or("");
        // When the service did not confirm a number, keep the one the user typed
        let use_number = if confirmed_number.is_empty() {
            parsed.house_number.as_str()
        } else {
            confirmed_number
        };

        let mut label = String::from(road);
        if !use_number.is_empty() {
            label.push(' ');
            label.push_str(use_number);
        }
        if let Some(neighbourhood) = pick.place.neighbourhood_name() {
            label.push_str(", ");
            label.push_str(neighbourhood);
        }
        label.push_str(", ");
        label.push_str(&self.city);

        let suggestion = AddressSuggestion {
            latitude: pick.lat,
            longitude: pick.lon,
            label,
            exact_house_number: !confirmed_number.is_empty(),
        };

        if suggestion.is_approximate(parsed) {
            info!(
                "House number {} not confirmed by the service, keeping typed number",
                parsed.house_number
            );
        }

        suggestion
    }
}
