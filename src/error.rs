//! Error types and handling for the `Lavanda` order core

use thiserror::Error;

/// Main error type for the `Lavanda` order core
#[derive(Error, Debug)]
pub enum LavandaError {
    /// Nothing to search: the parsed street was empty
    #[error("Empty address input")]
    EmptyInput,

    /// Transport or decoding failure talking to the geocoding service
    #[error("Network error: {message}")]
    Network { message: String },

    /// The address geocoded fine but lies outside the serviceable region
    #[error("Address outside coverage region: {region}")]
    OutOfCoverage { region: String },

    /// Malformed date handed to the schedule logic
    #[error("Invalid date: {message}")]
    InvalidDate { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LavandaError {
    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new out-of-coverage error naming the serviceable region
    pub fn out_of_coverage<S: Into<String>>(region: S) -> Self {
        Self::OutOfCoverage {
            region: region.into(),
        }
    }

    /// Create a new invalid-date error
    pub fn invalid_date<S: Into<String>>(message: S) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True when retrying the same input can succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, LavandaError::Network { .. })
    }

    /// Get the user-facing inline message for this error
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LavandaError::EmptyInput => "Escribe una calle y número, por favor.".to_string(),
            LavandaError::Network { .. } => {
                "No se pudo verificar la dirección. Intenta de nuevo.".to_string()
            }
            LavandaError::OutOfCoverage { region } => {
                format!("Dirección fuera del área de cobertura de {region}.")
            }
            LavandaError::InvalidDate { .. } => "Fecha inválida.".to_string(),
            LavandaError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
