use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated administrator record returned by `GET /api/auth/me`.
///
/// The session core only cares about presence/absence; the email is shown
/// in the status bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Response body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin() {
        let json = r#"{"id":1,"email":"coach@example.com","is_active":true,"created_at":"2024-03-01T12:00:00Z"}"#;
        let admin: Admin = serde_json::from_str(json).expect("parse admin");
        assert_eq!(admin.id, 1);
        assert_eq!(admin.email, "coach@example.com");
        assert!(admin.is_active);
    }

    #[test]
    fn test_parse_token_response() {
        let json = r#"{"access_token":"abc.def.ghi","token_type":"bearer"}"#;
        let token: TokenResponse = serde_json::from_str(json).expect("parse token");
        assert_eq!(token.access_token, "abc.def.ghi");
        assert_eq!(token.token_type.as_deref(), Some("bearer"));
    }

    #[test]
    fn test_parse_token_response_without_type() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"t"}"#).expect("parse token");
        assert!(token.token_type.is_none());
    }
}
