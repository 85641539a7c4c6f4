use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use warranty_auth_types::identity::Identity;
use warranty_domain::claim::ClaimStatus;

use crate::domain::repository::{ClaimRepository, RegistrationRepository, UserRepository};
use crate::domain::types::{ClaimView, WarrantyClaim};
use crate::error::WarrantyServiceError;

// ── FileClaim ────────────────────────────────────────────────────────────────

pub struct FileClaimInput {
    pub serial_number: String,
    pub customer_remarks: Option<String>,
}

pub struct FileClaimUseCase<U, R, C>
where
    U: UserRepository,
    R: RegistrationRepository,
    C: ClaimRepository,
{
    pub users: U,
    pub registrations: R,
    pub claims: C,
}

impl<U, R, C> FileClaimUseCase<U, R, C>
where
    U: UserRepository,
    R: RegistrationRepository,
    C: ClaimRepository,
{
    /// Returns the new claim id.
    pub async fn execute(
        &self,
        identity: &Identity,
        input: FileClaimInput,
    ) -> Result<Uuid, WarrantyServiceError> {
        let user = self
            .users
            .find_by_email(&identity.email)
            .await?
            .ok_or(WarrantyServiceError::UserNotFound)?;
        let registration = self
            .registrations
            .find_by_user_and_serial(user.id, &input.serial_number)
            .await?
            .ok_or(WarrantyServiceError::RegistrationNotFound)?;

        if self.claims.exists_for_registration(registration.id).await? {
            return Err(WarrantyServiceError::DuplicateClaim);
        }

        let claim = WarrantyClaim {
            id: Uuid::now_v7(),
            user_id: user.id,
            registration_id: registration.id,
            customer_remarks: input
                .customer_remarks
                .map(|r| r.trim().to_owned())
                .filter(|r| !r.is_empty()),
            claim_status: ClaimStatus::Pending,
            submitted_at: Utc::now(),
        };
        self.claims.create_and_flag(&claim).await?;
        info!(
            claim_id = %claim.id,
            registration_id = %registration.id,
            user_id = %user.id,
            "warranty claim filed"
        );
        Ok(claim.id)
    }
}

// ── UpdateClaimStatus ────────────────────────────────────────────────────────

pub struct UpdateClaimStatusUseCase<R: RegistrationRepository, C: ClaimRepository> {
    pub registrations: R,
    pub claims: C,
}

impl<R: RegistrationRepository, C: ClaimRepository> UpdateClaimStatusUseCase<R, C> {
    /// Re-applying the current status succeeds without writing.
    pub async fn execute(
        &self,
        serial_number: &str,
        claim_status: &str,
    ) -> Result<ClaimStatus, WarrantyServiceError> {
        let next: ClaimStatus = claim_status.parse()?;
        let registration = self
            .registrations
            .find_by_serial(serial_number)
            .await?
            .ok_or(WarrantyServiceError::RegistrationNotFound)?;
        let claim = self
            .claims
            .find_by_registration(registration.id)
            .await?
            .ok_or(WarrantyServiceError::ClaimNotFound)?;

        if claim.claim_status == next {
            return Ok(next);
        }
        if !claim.claim_status.can_transition_to(next) {
            return Err(WarrantyServiceError::InvalidStatusTransition {
                from: claim.claim_status,
                to: next,
            });
        }
        self.claims.update_status(claim.id, next).await?;
        info!(claim_id = %claim.id, from = %claim.claim_status, to = %next, "claim status changed");
        Ok(next)
    }
}

// ── GetClaim ─────────────────────────────────────────────────────────────────

pub struct GetClaimUseCase<C: ClaimRepository> {
    pub claims: C,
}

impl<C: ClaimRepository> GetClaimUseCase<C> {
    pub async fn execute(
        &self,
        identity: &Identity,
        serial_number: &str,
    ) -> Result<ClaimView, WarrantyServiceError> {
        let view = self
            .claims
            .find_view_by_serial(serial_number)
            .await?
            .ok_or(WarrantyServiceError::ClaimNotFound)?;
        if !identity.may_access_user(view.user_id) {
            return Err(WarrantyServiceError::Forbidden);
        }
        Ok(view)
    }
}

// ── ListClaims ───────────────────────────────────────────────────────────────

pub struct ListClaimsUseCase<C: ClaimRepository> {
    pub claims: C,
}

impl<C: ClaimRepository> ListClaimsUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<ClaimView>, WarrantyServiceError> {
        let claims = self.claims.list_all().await?;
        if claims.is_empty() {
            return Err(WarrantyServiceError::NotFound("no warranty claims available"));
        }
        Ok(claims)
    }
}
