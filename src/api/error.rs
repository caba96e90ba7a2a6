use serde::Deserialize;
use thiserror::Error;

/// Everything that can go wrong between issuing a request and holding a
/// validated value. `Display` is what the views show the user.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid response: {0}")]
    Validation(String),
    #[error("sign in required")]
    Unauthenticated,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

impl ApiError {
    /// Builds a status error, preferring the backend's own `error`/`message`
    /// text over a generic one.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message).or(b.msg))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        ApiError::Status { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthenticated | ApiError::Status { status: 401 | 422, .. })
    }
}

impl From<gloo::net::Error> for ApiError {
    fn from(e: gloo::net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_backend_error_text() {
        let err = ApiError::from_status(409, r#"{"error":"Drop zone full"}"#);
        assert_eq!(
            err,
            ApiError::Status { status: 409, message: "Drop zone full".into() }
        );
        assert_eq!(err.to_string(), "Drop zone full");
    }

    #[test]
    fn status_error_accepts_message_and_msg_keys() {
        let err = ApiError::from_status(400, r#"{"message":"Team name required"}"#);
        assert_eq!(err.to_string(), "Team name required");
        let err = ApiError::from_status(401, r#"{"msg":"Token has expired"}"#);
        assert_eq!(err.to_string(), "Token has expired");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn status_error_falls_back_on_non_json_body() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "request failed with status 502");
        assert!(!err.is_unauthorized());
    }
}
