//! Error types for remote search operations.
//!
//! Messages follow the What/Why/Fix pattern used across the project.

use thiserror::Error;

/// Errors that can occur while querying the literature database.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The HTTP client could not be constructed
    #[error("cannot build search client: {reason}")]
    Client {
        /// Why construction failed
        reason: String,
    },

    /// The request never produced a response (DNS, connect, TLS, body read)
    #[error(
        "search request failed: {message}\n  Suggestion: Check network connectivity and rerun; finished journals are kept"
    )]
    Transport {
        /// Underlying transport error text
        message: String,
    },

    /// The service answered with a non-success HTTP status
    #[error("search service returned HTTP {status} for '{term}': {body}\n  Suggestion: {suggestion}")]
    Status {
        /// Query term that was sent
        term: String,
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        body: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The service reported an error inside an otherwise valid response
    #[error("search service rejected '{term}': {message}")]
    Service {
        /// Query term that was sent
        term: String,
        /// Error text reported by the service
        message: String,
    },

    /// The response body could not be interpreted
    #[error("malformed search response for '{term}': {reason}")]
    Malformed {
        /// Query term that was sent
        term: String,
        /// What was wrong with the body
        reason: String,
    },
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

impl SearchError {
    /// Creates a `Status` error with a suggestion matched to the status code.
    #[must_use]
    pub fn status(term: &str, status: u16, body: &str) -> Self {
        let suggestion = match status {
            400 => "Check the journal name for characters the service cannot parse",
            401 | 403 => "Check `api_key` in the config file or set `use_api_key = false`",
            429 => "Request rate limit exceeded; configure an API key or rerun later",
            s if s >= 500 => "Search service unavailable; rerun later",
            _ => "Rerun later; finished journals are kept",
        };
        Self::Status {
            term: term.to_string(),
            status,
            body: body.chars().take(200).collect(),
            suggestion: suggestion.to_string(),
        }
    }

    #[must_use]
    pub fn malformed(term: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            term: term.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_suggestion_depends_on_code() {
        assert!(SearchError::status("t", 429, "").to_string().contains("rate limit"));
        assert!(SearchError::status("t", 403, "").to_string().contains("api_key"));
        assert!(SearchError::status("t", 503, "").to_string().contains("unavailable"));
    }

    #[test]
    fn test_status_truncates_long_bodies() {
        let body = "x".repeat(1000);
        let SearchError::Status { body, .. } = SearchError::status("t", 500, &body) else {
            panic!("expected Status variant");
        };
        assert_eq!(body.len(), 200);
    }
}
