//! Bearer-token helpers for integration tests.
//!
//! `MockAuth` signs real tokens with the test secret so requests pass through
//! the same extractors production traffic does.

use axum::http::{HeaderMap, HeaderValue, header};
use uuid::Uuid;
use warranty_auth_types::identity::Identity;
use warranty_auth_types::token::issue_access_token;
use warranty_domain::user::UserRole;

/// Secret shared by test state and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "warranty-test-secret";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub identity: Identity,
}

impl MockAuth {
    pub fn new(user_id: Uuid, email: &str, role: UserRole) -> Self {
        Self {
            identity: Identity {
                user_id,
                email: email.to_owned(),
                role,
            },
        }
    }

    pub fn customer(email: &str) -> Self {
        Self::new(Uuid::now_v7(), email, UserRole::Customer)
    }

    pub fn admin() -> Self {
        Self::new(Uuid::now_v7(), "admin@example.com", UserRole::Admin)
    }

    /// Signed token for this identity.
    pub fn token(&self) -> String {
        issue_access_token(&self.identity, TEST_JWT_SECRET)
            .map(|(token, _)| token)
            .unwrap_or_else(|e| panic!("failed to sign test token: {e}"))
    }

    /// `Authorization: Bearer <token>` value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let value = HeaderValue::from_str(&self.bearer())
            .unwrap_or_else(|e| panic!("invalid bearer header: {e}"));
        map.insert(header::AUTHORIZATION, value);
        map
    }
}
