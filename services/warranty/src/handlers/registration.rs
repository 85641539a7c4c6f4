use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use warranty_auth_types::identity::{AdminIdentity, BearerIdentity};
use warranty_domain::claim::RegisteredForClaim;

use crate::domain::types::RegistrationListing;
use crate::error::WarrantyServiceError;
use crate::state::AppState;
use crate::usecase::registration::{
    InvoiceUpload, ListAllRegistrationsUseCase, ListUserRegistrationsUseCase,
    SubmitRegistrationInput, SubmitRegistrationUseCase,
};

/// Content type stored for invoices when the upload does not declare one.
const DEFAULT_INVOICE_CONTENT_TYPE: &str = "application/pdf";

// ── POST /product_registration ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct RegistrationResponse {
    pub message: &'static str,
    pub inserted: usize,
    pub receipt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_password: Option<String>,
}

fn multipart_error(err: MultipartError) -> WarrantyServiceError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        WarrantyServiceError::PayloadTooLarge
    } else {
        WarrantyServiceError::Validation(format!("invalid multipart body: {}", err.body_text()))
    }
}

/// Multipart form: repeated `product_name`, `serial_number`, `part_number` fields
/// (a `[]` suffix is accepted), owner details and an optional `invoice_receipt` file.
pub async fn submit_registration(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RegistrationResponse>, WarrantyServiceError> {
    let mut input = SubmitRegistrationInput {
        name: None,
        email: String::new(),
        mobile_number: None,
        country_code: None,
        product_names: Vec::new(),
        serial_numbers: Vec::new(),
        part_numbers: Vec::new(),
        invoice: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field
            .name()
            .unwrap_or_default()
            .trim_end_matches("[]")
            .to_owned();
        match name.as_str() {
            "invoice_receipt" => {
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_INVOICE_CONTENT_TYPE)
                    .to_owned();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if !bytes.is_empty() {
                    input.invoice = Some(InvoiceUpload {
                        bytes,
                        content_type,
                    });
                }
            }
            "product_name" => input
                .product_names
                .push(field.text().await.map_err(multipart_error)?),
            "serial_number" => input
                .serial_numbers
                .push(field.text().await.map_err(multipart_error)?),
            "part_number" => input
                .part_numbers
                .push(field.text().await.map_err(multipart_error)?),
            "name" => input.name = Some(field.text().await.map_err(multipart_error)?),
            "email" => input.email = field.text().await.map_err(multipart_error)?,
            "mobile_number" => {
                input.mobile_number = Some(field.text().await.map_err(multipart_error)?);
            }
            "country_code" => {
                input.country_code = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let usecase = SubmitRegistrationUseCase {
        users: state.user_repo(),
        catalog: state.catalog_repo(),
        registrations: state.registration_repo(),
        store: state.invoice_store(),
    };
    let output = usecase.execute(input).await?;
    Ok(Json(RegistrationResponse {
        message: "Product(s) registered successfully",
        inserted: output.inserted,
        receipt: output.receipt,
        temp_password: output.temp_password,
    }))
}

// ── Listings ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RegistrationListingResponse {
    pub registration_id: String,
    pub product_name: String,
    pub serial_number: String,
    pub part_number: String,
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

impl From<RegistrationListing> for RegistrationListingResponse {
    fn from(listing: RegistrationListing) -> Self {
        Self {
            registration_id: listing.registration_id.to_string(),
            product_name: listing.product_name,
            serial_number: listing.serial_number,
            part_number: listing.part_number,
            invoice_receipt: listing.invoice_receipt,
            registered_for_claim: listing.registered_for_claim,
            registered_at: listing.registered_at,
            user_id: listing.user_id.to_string(),
            name: listing.user_name,
            email: listing.email,
            mobile_number: listing.mobile_number,
            country_code: listing.country_code,
        }
    }
}

#[derive(Serialize)]
pub struct RegistrationsResponse {
    pub registrations: Vec<RegistrationListingResponse>,
}

impl From<Vec<RegistrationListing>> for RegistrationsResponse {
    fn from(listings: Vec<RegistrationListing>) -> Self {
        Self {
            registrations: listings.into_iter().map(Into::into).collect(),
        }
    }
}

// ── GET /user_registrations/{email} ──────────────────────────────────────────

pub async fn get_user_registrations(
    BearerIdentity(identity): BearerIdentity,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<RegistrationsResponse>, WarrantyServiceError> {
    let usecase = ListUserRegistrationsUseCase {
        users: state.user_repo(),
        registrations: state.registration_repo(),
    };
    let listings = usecase.execute(&identity, &email).await?;
    Ok(Json(listings.into()))
}

// ── GET /registered_users ────────────────────────────────────────────────────

pub async fn get_registered_users(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<RegistrationsResponse>, WarrantyServiceError> {
    let usecase = ListAllRegistrationsUseCase {
        registrations: state.registration_repo(),
    };
    let listings = usecase.execute().await?;
    Ok(Json(listings.into()))
}
