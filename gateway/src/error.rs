use serde::Deserialize;
use thiserror::Error;

/// Failures talking to the appointment gateway.
///
/// `Unauthorized` is split out because a 401 has its own contract: the
/// caller tears down the session and redirects to login.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("session expired")]
    Unauthorized,
    #[error("gateway returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl GatewayError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a non-success status plus its raw body to an error. The gateway
/// sends `{"message": "..."}` on 4xx; anything else falls back to the body
/// text or the canned reason.
pub(crate) fn classify(status: u16, body: &str) -> GatewayError {
    if status == 401 {
        return GatewayError::Unauthorized;
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                "no details".to_string()
            } else {
                body.trim().to_string()
            }
        });
    GatewayError::Status { status, message }
}
