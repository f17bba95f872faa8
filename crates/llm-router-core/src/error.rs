//! Error taxonomy shared by every backend.
//!
//! Callers see exactly one of three kinds, whichever backend they target.

use thiserror::Error;

/// Boxed cause carried by [`RouterError::BackendCallFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum RouterError {
    /// Malformed model id, messages, or parameters. Raised before any
    /// vendor payload is built.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown backend name at construction time.
    #[error("unsupported provider '{name}'. Supported providers: {}", .supported.join(", "))]
    UnsupportedProvider { name: String, supported: Vec<String> },

    /// The vendor client failed during an otherwise valid call.
    #[error("{message}")]
    BackendCallFailed {
        provider: String,
        message: String,
        #[source]
        source: BoxError,
    },
}

impl RouterError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        RouterError::InvalidArgument(msg.into())
    }

    /// Wrap a vendor failure as `"<display_name> API error: <cause>"`.
    pub fn backend(
        provider: impl Into<String>,
        display_name: &str,
        source: impl Into<BoxError>,
    ) -> Self {
        let source = source.into();
        RouterError::BackendCallFailed {
            provider: provider.into(),
            message: format!("{display_name} API error: {source}"),
            source,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RouterError::InvalidArgument(_))
    }

    pub fn is_unsupported_provider(&self) -> bool {
        matches!(self, RouterError::UnsupportedProvider { .. })
    }

    pub fn is_backend_call_failed(&self) -> bool {
        matches!(self, RouterError::BackendCallFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unsupported_provider_lists_names() {
        let err = RouterError::UnsupportedProvider {
            name: "invalid".into(),
            supported: vec!["openai".into(), "anthropic".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid"));
        assert!(msg.contains("openai, anthropic"));
        assert!(err.is_unsupported_provider());
    }

    #[test]
    fn test_backend_error_keeps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RouterError::backend("openai", "OpenAI", cause);

        assert_eq!(err.to_string(), "OpenAI API error: refused");
        assert!(err.is_backend_call_failed());
        assert_eq!(err.source().unwrap().to_string(), "refused");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = RouterError::invalid("messages must not be empty");
        assert_eq!(err.to_string(), "invalid argument: messages must not be empty");
        assert!(err.is_invalid_argument());
    }
}
