use anyhow::Context as _;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use warranty_auth_types::identity::Identity;
use warranty_auth_types::token::{TokenKey, issue_access_token};
use warranty_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::WarrantyServiceError;
use crate::infra::password::{generate_temp_password, hash_password, verify_password};

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub token_key: TokenKey,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, WarrantyServiceError> {
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(WarrantyServiceError::InvalidCredentials)?;

        if !verify_password(input.password, user.password_hash.clone()).await? {
            return Err(WarrantyServiceError::InvalidCredentials);
        }

        let identity = Identity {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        };
        let (token, _exp) = issue_access_token(&identity, self.token_key.as_str())
            .context("sign access token")?;
        Ok(LoginOutput { token, user })
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ChangePasswordUseCase<R> {
    /// The target account is always the token holder.
    pub async fn execute(
        &self,
        identity: &Identity,
        new_password: String,
    ) -> Result<(), WarrantyServiceError> {
        let user = self
            .repo
            .find_by_id(identity.user_id)
            .await?
            .ok_or(WarrantyServiceError::UserNotFound)?;
        let hash = hash_password(new_password).await?;
        self.repo.update_password(user.id, &hash).await?;
        info!(user_id = %user.id, "password changed");
        Ok(())
    }
}

// ── IssueTemporaryPassword ───────────────────────────────────────────────────

pub struct IssueTemporaryPasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> IssueTemporaryPasswordUseCase<R> {
    /// Returns the plaintext once; only the hash is stored.
    pub async fn execute(
        &self,
        identity: &Identity,
        email: &str,
    ) -> Result<String, WarrantyServiceError> {
        if !identity.may_access_email(email) {
            return Err(WarrantyServiceError::Forbidden);
        }
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(WarrantyServiceError::UserNotFound)?;

        let temp_password = generate_temp_password();
        let hash = hash_password(temp_password.clone()).await?;
        self.repo.update_password(user.id, &hash).await?;
        info!(user_id = %user.id, issued_by = %identity.user_id, "temporary password issued");
        Ok(temp_password)
    }
}

// ── SeedAdmin ────────────────────────────────────────────────────────────────

pub struct SeedAdminUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SeedAdminUseCase<R> {
    /// Idempotent; an existing account with the same email is left untouched.
    pub async fn execute(&self, email: &str, password: String) -> Result<bool, WarrantyServiceError> {
        let admin = User {
            id: Uuid::now_v7(),
            name: Some("Admin".to_owned()),
            email: email.to_owned(),
            mobile_number: None,
            password_hash: hash_password(password).await?,
            country_code: None,
            role: UserRole::Admin,
            registered_at: Utc::now(),
        };
        let inserted = self.repo.create_if_absent(&admin).await?;
        if inserted {
            info!(user_id = %admin.id, email, "seeded admin account");
        }
        Ok(inserted)
    }
}
