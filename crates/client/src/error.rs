use thiserror::Error;

use tradedesk_auth::AuthError;
use tradedesk_core::DomainError;

/// Failure of a data-access call.
///
/// Every variant is terminal for the attempt; nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("not signed in")]
    Unauthenticated,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Session(#[from] AuthError),
}

impl ApiError {
    /// Text for the inline notice: the server's `message` when it sent one,
    /// the validation reason for local failures, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Validation(DomainError::MissingField(_)) => {
                "Please fill all required fields.".to_string()
            }
            ApiError::Validation(DomainError::Validation(reason)) => reason.clone(),
            ApiError::Validation(e) => e.to_string(),
            ApiError::Unauthenticated => "Please log in first.".to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}
