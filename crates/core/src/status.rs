//! Provider status vocabulary and the client-facing progress labels.
//!
//! Freepik reports task status as an upper-case string. The enumerated
//! tokens get a fixed progress label; anything else passes through
//! unchanged so new provider statuses do not break the status endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a provider-side generation task.
///
/// `Completed` and `Ready` both denote terminal success -- Freepik uses
/// `COMPLETED` where its documentation says `READY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderStatus {
    Created,
    InProgress,
    Processing,
    Finalizing,
    Ready,
    Completed,
    Failed,
    /// Any token we do not recognise, preserved verbatim.
    Other(String),
}

impl ProviderStatus {
    /// Wire representation of the status token.
    pub fn as_str(&self) -> &str {
        match self {
            ProviderStatus::Created => "CREATED",
            ProviderStatus::InProgress => "IN_PROGRESS",
            ProviderStatus::Processing => "PROCESSING",
            ProviderStatus::Finalizing => "FINALIZING",
            ProviderStatus::Ready => "READY",
            ProviderStatus::Completed => "COMPLETED",
            ProviderStatus::Failed => "FAILED",
            ProviderStatus::Other(s) => s,
        }
    }

    /// Human-facing progress label shown to clients.
    ///
    /// Total over the status vocabulary: unrecognised tokens are their
    /// own label.
    pub fn progress_label(&self) -> &str {
        match self {
            ProviderStatus::Created => "Uploaded",
            ProviderStatus::InProgress => "In Progress",
            ProviderStatus::Processing => "Processing",
            ProviderStatus::Finalizing => "Finalizing",
            ProviderStatus::Ready | ProviderStatus::Completed => "Ready",
            ProviderStatus::Failed => "Failed",
            ProviderStatus::Other(s) => s,
        }
    }

    /// The task finished and produced output.
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, ProviderStatus::Ready | ProviderStatus::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ProviderStatus::Failed)
    }
}

impl From<&str> for ProviderStatus {
    fn from(s: &str) -> Self {
        match s {
            "CREATED" => ProviderStatus::Created,
            "IN_PROGRESS" => ProviderStatus::InProgress,
            "PROCESSING" => ProviderStatus::Processing,
            "FINALIZING" => ProviderStatus::Finalizing,
            "READY" => ProviderStatus::Ready,
            "COMPLETED" => ProviderStatus::Completed,
            "FAILED" => ProviderStatus::Failed,
            other => ProviderStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ProviderStatus {
    fn from(s: String) -> Self {
        ProviderStatus::from(s.as_str())
    }
}

impl From<ProviderStatus> for String {
    fn from(status: ProviderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_round_trip() {
        for token in [
            "CREATED",
            "IN_PROGRESS",
            "PROCESSING",
            "FINALIZING",
            "READY",
            "COMPLETED",
            "FAILED",
        ] {
            assert_eq!(ProviderStatus::from(token).as_str(), token);
        }
    }

    #[test]
    fn unknown_token_passes_through() {
        let status = ProviderStatus::from("QUEUED_FOR_REVIEW");
        assert_eq!(status, ProviderStatus::Other("QUEUED_FOR_REVIEW".into()));
        assert_eq!(status.as_str(), "QUEUED_FOR_REVIEW");
        assert_eq!(status.progress_label(), "QUEUED_FOR_REVIEW");
    }

    #[test]
    fn completed_aliases_ready() {
        assert_eq!(ProviderStatus::Completed.progress_label(), "Ready");
        assert_eq!(ProviderStatus::Ready.progress_label(), "Ready");
        assert!(ProviderStatus::Completed.is_terminal_success());
        assert!(ProviderStatus::Ready.is_terminal_success());
    }

    #[test]
    fn progress_labels() {
        assert_eq!(ProviderStatus::Created.progress_label(), "Uploaded");
        assert_eq!(ProviderStatus::InProgress.progress_label(), "In Progress");
        assert_eq!(ProviderStatus::Processing.progress_label(), "Processing");
        assert_eq!(ProviderStatus::Finalizing.progress_label(), "Finalizing");
        assert_eq!(ProviderStatus::Failed.progress_label(), "Failed");
    }

    #[test]
    fn serde_uses_wire_tokens() {
        let json = serde_json::to_string(&ProviderStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let status: ProviderStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(status, ProviderStatus::Completed);
    }
}
