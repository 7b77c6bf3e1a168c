use thiserror::Error;

/// Failures at the external data source boundary.
///
/// These never cross the adapter: every operation that hits the source
/// recovers locally by substituting a structurally valid placeholder, and the
/// failure is only logged.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request to the data source failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to deserialize the data source response: {0}")]
    Deserialization(String),

    #[error("The data source returned an empty result")]
    Empty,

    #[error("Invalid data from the source: {0}")]
    InvalidData(String),
}
