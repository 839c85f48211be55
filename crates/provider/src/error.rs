//! Provider error classification.
//!
//! The transient/fatal split drives the coordinator's failure policy:
//! transient errors are absorbed (the caller retries by polling again),
//! fatal errors surface and, for chained submissions, force the task
//! into the failed stage.

/// Errors from the provider gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP round trip itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// No endpoint is configured for the requested operation.
    #[error("No endpoint configured for {0}")]
    MissingEndpoint(&'static str),

    /// The provider responded 2xx but the body was not in the expected
    /// shape.
    #[error("Unexpected provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Whether the failure is attributable to the remote service and
    /// worth retrying later (5xx, network, timeout), as opposed to a
    /// caller or configuration error (4xx, missing endpoint, malformed
    /// body).
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Request(_) => true,
            ProviderError::Api { status, .. } => (500..600).contains(status),
            ProviderError::MissingEndpoint(_) | ProviderError::Decode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = ProviderError::Api {
            status: 503,
            body: "overloaded".into(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn client_errors_are_fatal() {
        let err = ProviderError::Api {
            status: 422,
            body: "bad ratio".into(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn misconfiguration_is_fatal() {
        assert!(!ProviderError::MissingEndpoint("kling").is_transient());
        assert!(!ProviderError::Decode("missing data.task_id".into()).is_transient());
    }
}
