use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use warranty_auth_types::identity::{AdminIdentity, BearerIdentity};
use warranty_domain::claim::{ClaimStatus, RegisteredForClaim};

use crate::domain::types::ClaimView;
use crate::error::WarrantyServiceError;
use crate::handlers::{JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::claim::{
    FileClaimInput, FileClaimUseCase, GetClaimUseCase, ListClaimsUseCase,
    UpdateClaimStatusUseCase,
};

#[derive(Serialize)]
pub struct ClaimViewResponse {
    pub claim_id: String,
    pub claim_status: ClaimStatus,
    pub customer_remarks: Option<String>,
    #[serde(serialize_with = "warranty_core::serde::to_rfc3339_ms")]
    pub submitted_at: DateTime<Utc>,
    pub registration_id: String,
    pub product_name: String,
    pub serial_number: String,
    pub invoice_receipt: Option<String>,
    pub registered_for_claim: RegisteredForClaim,
    #[serde(serialize_with = "warranty_core::serde::to_rfc3339_ms")]
    pub registered_at: DateTime<Utc>,
    pub user_id: String,
    pub name: Option<String>,
    pub email: String,
    pub mobile_number: Option<String>,
    pub country_code: Option<String>,
}

impl From<ClaimView> for ClaimViewResponse {
    fn from(view: ClaimView) -> Self {
        Self {
            claim_id: view.claim_id.to_string(),
            claim_status: view.claim_status,
            customer_remarks: view.customer_remarks,
            submitted_at: view.submitted_at,
            registration_id: view.registration_id.to_string(),
            product_name: view.product_name,
            serial_number: view.serial_number,
            invoice_receipt: view.invoice_receipt,
            registered_for_claim: view.registered_for_claim,
            registered_at: view.registered_at,
            user_id: view.user_id.to_string(),
            name: view.user_name,
            email: view.email,
            mobile_number: view.mobile_number,
            country_code: view.country_code,
        }
    }
}

// ── POST /warranty ───────────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct FileClaimRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub serial_number: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub customer_remarks: Option<String>,
}

#[derive(Serialize)]
pub struct FileClaimResponse {
    pub message: &'static str,
    pub id: String,
}

pub async fn file_claim(
    BearerIdentity(identity): BearerIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<FileClaimRequest>,
) -> Result<(StatusCode, Json<FileClaimResponse>), WarrantyServiceError> {
    body.validate()?;
    let usecase = FileClaimUseCase {
        users: state.user_repo(),
        registrations: state.registration_repo(),
        claims: state.claim_repo(),
    };
    let id = usecase
        .execute(
            &identity,
            FileClaimInput {
                serial_number: body.serial_number,
                customer_remarks: body.customer_remarks,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(FileClaimResponse {
            message: "Warranty claim submitted successfully.",
            id: id.to_string(),
        }),
    ))
}

// ── POST /warranty_status ────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct UpdateClaimStatusRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub serial_number: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub claim_status: String,
}

pub async fn update_claim_status(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateClaimStatusRequest>,
) -> Result<Json<MessageResponse>, WarrantyServiceError> {
    body.validate()?;
    let usecase = UpdateClaimStatusUseCase {
        registrations: state.registration_repo(),
        claims: state.claim_repo(),
    };
    usecase
        .execute(&body.serial_number, &body.claim_status)
        .await?;
    Ok(Json(MessageResponse::new("Claim status updated successfully.")))
}

// ── GET /get_warranty/{serial_number} ────────────────────────────────────────

pub async fn get_claim(
    BearerIdentity(identity): BearerIdentity,
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<Json<ClaimViewResponse>, WarrantyServiceError> {
    let usecase = GetClaimUseCase {
        claims: state.claim_repo(),
    };
    let view = usecase.execute(&identity, &serial_number).await?;
    Ok(Json(view.into()))
}

// ── GET /registered_warranty_claims ──────────────────────────────────────────

#[derive(Serialize)]
pub struct ClaimsResponse {
    pub registrations: Vec<ClaimViewResponse>,
}

pub async fn list_claims(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<ClaimsResponse>, WarrantyServiceError> {
    let usecase = ListClaimsUseCase {
        claims: state.claim_repo(),
    };
    let claims = usecase.execute().await?;
    Ok(Json(ClaimsResponse {
        registrations: claims.into_iter().map(Into::into).collect(),
    }))
}
