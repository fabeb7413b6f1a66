//! Typed errors for page resolution.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Each external
//! collaborator has its own seam error (`StoreError`, `ExtractError`);
//! `ResolveError` is what the orchestrator hands back to callers.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Message shown to end users for every failed resolution.
///
/// The classified [`ErrorKind`] is kept for diagnostics only.
pub const GENERIC_USER_MESSAGE: &str = "An error occurred while analyzing the page";

/// Reasons a raw URL cannot be turned into a page identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No URL was supplied
    #[error("no URL was provided")]
    EmptyInput,

    /// The URL does not point at the page-hosting domain
    #[error("URL is not a facebook.com page URL")]
    InvalidDomain,

    /// Domain marker is present but nothing usable follows it
    #[error("could not extract a page identifier from the URL")]
    UnresolvableIdentifier,
}

/// Errors raised by a [`DocumentStore`](crate::traits::store::DocumentStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unreachable or the operation failed
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stored document could not be decoded
    #[error("corrupt document {collection}/{key}: {reason}")]
    Corrupt {
        collection: String,
        key: String,
        reason: String,
    },
}

/// Errors raised by an [`Extractor`](crate::traits::extractor::Extractor).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The extraction endpoint answered with a non-success status
    #[error("extraction endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response
    #[error("extraction request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body is not a page record
    #[error("extraction response is not a page record: {0}")]
    Malformed(String),
}

/// Errors returned from a resolution attempt.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid page URL: {0}")]
    Validation(#[from] ValidationError),

    #[error("extraction failed: {0}")]
    ExtractionFailed(#[source] ExtractError),

    #[error("malformed extraction response: {0}")]
    MalformedResponse(#[source] ExtractError),

    #[error("document store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl From<ExtractError> for ResolveError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Malformed(_) => ResolveError::MalformedResponse(err),
            ExtractError::Status { .. } | ExtractError::Transport(_) => {
                ResolveError::ExtractionFailed(err)
            }
        }
    }
}

/// Flat classification of a failed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    InvalidDomain,
    UnresolvableIdentifier,
    ExtractionFailed,
    MalformedResponse,
    StoreUnavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::InvalidDomain => "invalid_domain",
            ErrorKind::UnresolvableIdentifier => "unresolvable_identifier",
            ErrorKind::ExtractionFailed => "extraction_failed",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::StoreUnavailable => "store_unavailable",
        }
    }

    /// True for failures detected before any store or network access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyInput | ErrorKind::InvalidDomain | ErrorKind::UnresolvableIdentifier
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ValidationError> for ErrorKind {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyInput => ErrorKind::EmptyInput,
            ValidationError::InvalidDomain => ErrorKind::InvalidDomain,
            ValidationError::UnresolvableIdentifier => ErrorKind::UnresolvableIdentifier,
        }
    }
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::Validation(v) => ErrorKind::from(*v),
            ResolveError::ExtractionFailed(_) => ErrorKind::ExtractionFailed,
            ResolveError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            ResolveError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }

    /// The message to display to end users. Identical for every kind.
    pub fn user_message(&self) -> &'static str {
        GENERIC_USER_MESSAGE
    }
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_classification() {
        let status = ExtractError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(ResolveError::from(status).kind(), ErrorKind::ExtractionFailed);

        let transport = ExtractError::Transport("connection refused".into());
        assert_eq!(
            ResolveError::from(transport).kind(),
            ErrorKind::ExtractionFailed
        );

        let malformed = ExtractError::Malformed("expected object".into());
        assert_eq!(
            ResolveError::from(malformed).kind(),
            ErrorKind::MalformedResponse
        );
    }

    #[test]
    fn test_user_message_is_generic() {
        let errors = [
            ResolveError::from(ValidationError::EmptyInput),
            ResolveError::from(StoreError::Backend("down".into())),
            ResolveError::from(ExtractError::Malformed("x".into())),
        ];
        for err in &errors {
            assert_eq!(err.user_message(), GENERIC_USER_MESSAGE);
        }
    }

    #[test]
    fn test_validation_kinds() {
        assert!(ErrorKind::InvalidDomain.is_validation());
        assert!(!ErrorKind::StoreUnavailable.is_validation());
        assert_eq!(
            serde_json::to_string(&ErrorKind::UnresolvableIdentifier).unwrap(),
            "\"unresolvable_identifier\""
        );
    }
}
