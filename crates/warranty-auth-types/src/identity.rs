//! Caller identity and the bearer-token extractors.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::HeaderMap;
use http::request::Parts;
use uuid::Uuid;

use warranty_domain::user::{Capabilities, Capability, UserRole};

use crate::rejection::AuthRejection;
use crate::token::{TokenKey, validate_access_token};

/// Identity embedded in a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl Identity {
    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }

    pub fn is_admin(&self) -> bool {
        self.capabilities().is_admin
    }

    /// Fails with [`AuthRejection::Forbidden`] unless the identity holds `required`.
    pub fn authorize(&self, required: Capability) -> Result<(), AuthRejection> {
        if self.capabilities().grants(required) {
            Ok(())
        } else {
            Err(AuthRejection::Forbidden)
        }
    }

    /// Owner-or-admin check for data belonging to `owner_id`.
    pub fn may_access_user(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }

    /// Owner-or-admin check for data addressed by the owner's email.
    pub fn may_access_email(&self, owner_email: &str) -> bool {
        self.is_admin() || self.email == owner_email
    }
}

fn identity_from_headers(headers: &HeaderMap, key: &TokenKey) -> Result<Identity, AuthRejection> {
    let Authorization(bearer) = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthRejection::Unauthenticated)?;
    validate_access_token(bearer.token(), key.as_str()).map_err(|_| AuthRejection::InvalidToken)
}

/// Any authenticated caller.
///
/// Rejects with 401 when the `Authorization: Bearer` header is absent or
/// malformed and with 403 when the token fails validation.
#[derive(Debug, Clone)]
pub struct BearerIdentity(pub Identity);

impl<S> FromRequestParts<S> for BearerIdentity
where
    TokenKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    // Work is synchronous; the returned future owns its result so it stays `'static`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let key = TokenKey::from_ref(state);
        let result = identity_from_headers(&parts.headers, &key).map(Self);
        async move { result }
    }
}

/// An authenticated caller holding the admin capability.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

impl<S> FromRequestParts<S> for AdminIdentity
where
    TokenKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let key = TokenKey::from_ref(state);
        let result = identity_from_headers(&parts.headers, &key).and_then(|identity| {
            identity.authorize(Capability::Admin)?;
            Ok(Self(identity))
        });
        async move { result }
    }
}
