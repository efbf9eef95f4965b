//! Service error types.

use storefront_commerce::CommerceError;
use thiserror::Error;

/// Errors returned by service collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// A read failed (network or service fault).
    #[error("{0}")]
    Fetch(String),

    /// The service refused a write.
    #[error("{0}")]
    Rejected(String),

    /// The requested record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The service could not be reached at all.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    /// Message for the user, or `fallback` when the error carries none.
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

impl From<CommerceError> for ServiceError {
    fn from(e: CommerceError) -> Self {
        ServiceError::Rejected(e.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Fetch(format!("Malformed response: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_or_falls_back_on_empty() {
        assert_eq!(
            ServiceError::Fetch(String::new()).message_or("Failed to load reviews"),
            "Failed to load reviews"
        );
        assert_eq!(
            ServiceError::Fetch("timeout".into()).message_or("Failed to load reviews"),
            "timeout"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = ServiceError::NotFound {
            kind: "Product",
            id: "p1".into(),
        };
        assert_eq!(err.to_string(), "Product not found: p1");
    }

    #[test]
    fn test_commerce_error_becomes_rejection() {
        let err: ServiceError = CommerceError::InvalidQuantity(0).into();
        assert_eq!(err, ServiceError::Rejected("Invalid quantity: 0".into()));
    }
}
