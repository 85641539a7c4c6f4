//! Bearer-token (JWT) issuing and validation.

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "TOKEN_ISSUER", test))]
use serde::Serialize;
use uuid::Uuid;

use warranty_domain::user::UserRole;

use crate::identity::Identity;

/// Access-token lifetime in seconds (1 hour).
pub const ACCESS_TOKEN_EXP: u64 = 3600;

/// HS256 signing key shared by the issuer and every validator.
///
/// Handlers obtain it from application state through `axum::extract::FromRef`.
#[derive(Clone)]
pub struct TokenKey(Arc<str>);

impl TokenKey {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenKey(..)")
    }
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing,
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `id` | user id (UUID string) |
/// | `email` | user email as stored |
/// | `role` | `customer` / `employee` / `admin` |
/// | `exp` | expiration, seconds since UNIX epoch |
///
/// [`Serialize`] requires the **`TOKEN_ISSUER`** cargo feature; only the
/// service that logs users in (and test helpers) sign tokens.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "TOKEN_ISSUER", test), derive(Serialize))]
pub struct TokenClaims {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub exp: u64,
}

/// Decode and validate a JWT: HS256, `exp` required and checked (default 60s leeway).
fn decode_jwt(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token, returning the caller identity it embeds.
pub fn validate_access_token(token: &str, secret: &str) -> Result<Identity, TokenError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .id
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(Identity {
        user_id,
        email: claims.email,
        role: claims.role,
    })
}

/// Sign a one-hour access token for `identity`. Returns the token and its `exp`.
#[cfg(any(feature = "TOKEN_ISSUER", test))]
pub fn issue_access_token(identity: &Identity, secret: &str) -> Result<(String, u64), TokenError> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = TokenClaims {
        id: identity.user_id.to_string(),
        email: identity.email.clone(),
        role: identity.role,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Signing)?;
    Ok((token, exp))
}

#[cfg(any(feature = "TOKEN_ISSUER", test))]
fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
