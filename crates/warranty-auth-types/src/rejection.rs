//! Rejection returned by the identity extractors.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    /// `Authorization` header missing or not `Bearer <token>`.
    #[error("authorization header missing or malformed")]
    Unauthenticated,
    /// Signature invalid, token expired, or claims unreadable.
    #[error("invalid or expired token")]
    InvalidToken,
    /// Valid identity lacking the required capability.
    #[error("access denied: admins only")]
    Forbidden,
}

impl AuthRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::InvalidToken | Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
