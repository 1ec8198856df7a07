//! Error type for provider calls.

/// Failures talking to an external provider.
///
/// Handlers map every variant to a generic internal error; provider
/// detail stays in logs.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("provider transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{provider} returned status {status}")]
    Status {
        provider: &'static str,
        status: u16,
    },

    /// The provider answered 2xx but the payload was not the shape we expect.
    #[error("unexpected response from {provider}: {detail}")]
    UnexpectedResponse {
        provider: &'static str,
        detail: String,
    },
}
