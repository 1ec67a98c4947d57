use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not authenticated - log in first")]
    Unauthenticated,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Error entries inside the API's `{ data, errors? }` envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

impl ApiError {
    /// Classify a non-2xx response. The message comes from
    /// `errors[0].message` when the body carries the envelope, otherwise a
    /// generic status-based message. A 401 means the stored token is no
    /// longer accepted and gets the same log-in-again policy as missing
    /// credentials.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ApiError::Unauthenticated;
        }
        let message = envelope_message(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn envelope_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    envelope.errors.into_iter().next().map(|e| e.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_envelope_message_is_extracted() {
        let body = r#"{ "errors": [{ "message": "Not found" }], "status": "Not Found" }"#;
        let err = ApiError::from_status(StatusCode::NOT_FOUND, body);
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("Expected ApiError::Api, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_message_without_envelope() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("Expected ApiError::Api, got {:?}", other),
        }
    }

    #[test]
    fn test_401_maps_to_unauthenticated() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
