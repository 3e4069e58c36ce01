use thiserror::Error;

/// Message shown to the user when a search matches nothing.
pub const NOT_FOUND_MESSAGE: &str = "No country found with the given name";

/// Message shown to the user when a lookup fails in transport or parsing.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

#[derive(Debug, Error)]
pub enum LookupError {
    /// The host cannot (or may not) report its position.
    #[error("geolocation unavailable: {0}")]
    CapabilityUnavailable(String),

    /// The country-info service returned no match.
    #[error("{}", NOT_FOUND_MESSAGE)]
    UpstreamEmpty,

    /// Network, status or parse failure on either service.
    #[error("upstream request failed: {0:#}")]
    UpstreamError(#[from] anyhow::Error),
}

impl LookupError {
    /// Text for the user-visible alert raised by this error.
    pub fn alert_message(&self) -> &'static str {
        match self {
            LookupError::UpstreamEmpty => NOT_FOUND_MESSAGE,
            _ => FETCH_ERROR_MESSAGE,
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
