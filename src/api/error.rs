use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for raw response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error payload shape used by the backend: `detail` is either a plain
/// string or a list of field errors carrying a `msg` each.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: DetailPayload,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailPayload {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
struct FieldError {
    msg: String,
}

/// Extract a human-readable message from an error response body.
///
/// A list of field errors is concatenated into one string so the caller
/// sees every message, not just the first. Bodies that do not match the
/// backend's error shape fall back to the (truncated) raw text.
pub fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => match parsed.detail {
            DetailPayload::Message(msg) => msg,
            DetailPayload::Fields(fields) => fields
                .into_iter()
                .map(|f| f.msg)
                .collect::<Vec<_>>()
                .join(", "),
        },
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = extract_detail(body);
        match status.as_u16() {
            401 | 403 => ApiError::Unauthorized(detail),
            404 => ApiError::NotFound(detail),
            422 => ApiError::Validation(detail),
            500..=599 => ApiError::Server(detail),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, detail)),
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Unable to reach the server. Check your connection.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_string() {
        let body = r#"{"detail": "Incorrect email or password"}"#;
        assert_eq!(extract_detail(body), "Incorrect email or password");
    }

    #[test]
    fn test_extract_detail_field_list_concatenates_all() {
        let body = r#"{"detail": [
            {"loc": ["body", "title"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "class_date"], "msg": "invalid datetime format", "type": "value_error"}
        ]}"#;
        assert_eq!(
            extract_detail(body),
            "field required, invalid datetime format"
        );
    }

    #[test]
    fn test_extract_detail_falls_back_to_raw_body() {
        assert_eq!(extract_detail("gateway timed out"), "gateway timed out");
    }

    #[test]
    fn test_extract_detail_truncates_long_raw_body() {
        let body = "x".repeat(600);
        let msg = extract_detail(&body);
        assert!(msg.contains("truncated"));
        assert!(msg.contains("600 total bytes"));
    }

    #[test]
    fn test_from_status_maps_codes() {
        let err = ApiError::from_status(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"detail": "Incorrect email or password"}"#,
        );
        assert!(matches!(err, ApiError::Unauthorized(ref m) if m == "Incorrect email or password"));

        let err = ApiError::from_status(reqwest::StatusCode::NOT_FOUND, r#"{"detail": "Playlist not found"}"#);
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = ApiError::from_status(
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"msg": "field required"}]}"#,
        );
        assert!(matches!(err, ApiError::Validation(ref m) if m == "field required"));

        let err = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, ApiError::Server(_)));
    }
}
