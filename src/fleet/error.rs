// ABOUTME: Fleet API error types with SNAFU pattern.
// ABOUTME: Exposes an error kind for programmatic handling; 404 on fleet lookup gets a clearer message.

use snafu::Snafu;

/// Errors from the fleet API client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FleetError {
    #[snafu(display(
        "fleet not found: {slug} (check the fleet slug and that your token can access it)"
    ))]
    FleetNotFound { slug: String },

    #[snafu(display("fleet API request failed: {source}"))]
    Request { source: reqwest::Error },

    #[snafu(display("fleet API returned {status}: {message}"))]
    Api { status: u16, message: String },

    #[snafu(display("unexpected fleet API response: {source}"))]
    Decode { source: reqwest::Error },

    #[snafu(display("invalid API base URL: {url}"))]
    BadUrl { url: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetErrorKind {
    /// The named fleet does not exist or is not visible to this token.
    NotFound,
    /// Transport-level failure reaching the API.
    Network,
    /// The API answered with a non-success status.
    Api,
    /// The API answered with a body we could not decode.
    Decode,
    /// Client misconfiguration.
    Config,
}

impl FleetError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> FleetErrorKind {
        match self {
            FleetError::FleetNotFound { .. } => FleetErrorKind::NotFound,
            FleetError::Request { .. } => FleetErrorKind::Network,
            FleetError::Api { .. } => FleetErrorKind::Api,
            FleetError::Decode { .. } => FleetErrorKind::Decode,
            FleetError::BadUrl { .. } => FleetErrorKind::Config,
        }
    }
}
