pub const STATUS_UPDATE_RETRY_TEXT: &str = "Error updating message status. Please try again.";
pub const REQUEST_FAILED_TOAST_TEXT: &str = "Request failed. Please try again.";
const UNKNOWN_ERROR_TEXT: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },
    #[error("network request failed: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("server rejected the update: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR_TEXT))]
    ServerRejected { message: Option<String> },
    #[error("required element is missing: {0}")]
    MissingElement(String),
    #[error("browser storage is unavailable: {0}")]
    Storage(String),
    #[error("invalid message id: {0:?}")]
    InvalidMessageId(String),
}

impl AdminError {
    /// Text for the blocking alert shown when a status update fails.
    ///
    /// Server-reported failures carry the server message (or a generic
    /// fallback); every other failure gets the retry hint.
    pub fn alert_text(&self) -> String {
        match self {
            Self::ServerRejected { message } => format!(
                "Error updating message status: {}",
                message
                    .as_deref()
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or(UNKNOWN_ERROR_TEXT)
            ),
            _ => STATUS_UPDATE_RETRY_TEXT.to_string(),
        }
    }

    pub fn toast_text(&self) -> &'static str {
        REQUEST_FAILED_TOAST_TEXT
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. } | Self::Network(_) | Self::Decode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_rejection_alert_carries_server_message() {
        let error = AdminError::ServerRejected {
            message: Some("not found".to_string()),
        };
        assert_eq!(error.alert_text(), "Error updating message status: not found");
    }

    #[test]
    fn server_rejection_without_message_uses_fallback() {
        let error = AdminError::ServerRejected { message: None };
        assert_eq!(
            error.alert_text(),
            "Error updating message status: Unknown error"
        );
        let blank = AdminError::ServerRejected {
            message: Some("   ".to_string()),
        };
        assert_eq!(blank.alert_text(), "Error updating message status: Unknown error");
    }

    #[test]
    fn transport_failures_use_retry_text() {
        for error in [
            AdminError::Network("offline".to_string()),
            AdminError::Decode("eof".to_string()),
            AdminError::HttpStatus { status: 502 },
        ] {
            assert!(error.is_transport());
            assert_eq!(error.alert_text(), STATUS_UPDATE_RETRY_TEXT);
            assert_eq!(error.toast_text(), REQUEST_FAILED_TOAST_TEXT);
        }
        assert_eq!(
            AdminError::HttpStatus { status: 404 }.to_string(),
            "HTTP error! status: 404"
        );
    }
}
