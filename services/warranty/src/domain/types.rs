use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidateEmail;

use warranty_domain::claim::{ClaimStatus, RegisteredForClaim};
use warranty_domain::survey::{BaseModelSize, InfraType, SurveyCategory, Workload, YesNo};
use warranty_domain::user::UserRole;

use crate::error::WarrantyServiceError;

/// Account record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub mobile_number: Option<String>,
    pub password_hash: String,
    pub country_code: Option<String>,
    pub role: UserRole,
    pub registered_at: DateTime<Utc>,
}

/// Shipped product eligible for registration.
#[derive(Debug, Clone, Default)]
pub struct CatalogProduct {
    pub id: Uuid,
    pub sales_order_number: String,
    pub product_name: String,
    pub part_number: Option<String>,
    pub serial_number: String,
    pub sold_to_party: Option<String>,
    pub shipped_to_customer_name: Option<String>,
    pub billing_date: Option<String>,
    pub billing_date_number: Option<String>,
    pub billing_type: Option<String>,
    pub net_quantity: Option<i32>,
    pub net_value_in_local_currency: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub net_tax: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub purchase_order_number: Option<String>,
    pub delivery_number: Option<String>,
    pub material_details: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's ownership record for one catalog item.
#[derive(Debug, Clone)]
pub struct Registration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_name: String,
    pub serial_number: String,
    pub part_number: String,
    pub invoice_receipt: Option<String>,
    pub registered_for_claim: RegisteredForClaim,
    pub registered_at: DateTime<Utc>,
}

/// Registration joined with its owner, as listed to users and admins.
#[derive(Debug, Clone)]
pub struct RegistrationListing {
    pub registration_id: Uuid,
    pub product_name: String,
    pub serial_number: String,
    pub part_number: String,
    pub invoice_receipt: Option<String>,
    pub registered_for_claim: RegisteredForClaim,
    pub registered_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub email: String,
    pub mobile_number: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WarrantyClaim {
    pub id: Uuid,
    pub user_id: Uuid,
    pub registration_id: Uuid,
    pub customer_remarks: Option<String>,
    pub claim_status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Claim joined with its registration and owner.
#[derive(Debug, Clone)]
pub struct ClaimView {
    pub claim_id: Uuid,
    pub claim_status: ClaimStatus,
    pub customer_remarks: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub registration_id: Uuid,
    pub product_name: String,
    pub serial_number: String,
    pub invoice_receipt: Option<String>,
    pub registered_for_claim: RegisteredForClaim,
    pub registered_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub email: String,
    pub mobile_number: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_location: String,
    pub category: SurveyCategory,
    pub participant_name: String,
    pub participant_email: String,
    pub base_model_size: BaseModelSize,
    pub is_custom: YesNo,
    pub on_hugging_face: YesNo,
    pub hf_link: String,
    pub architecture: String,
    pub workloads: Workload,
    pub infra_type: InfraType,
    pub motherboard: Option<String>,
    pub processor: Option<String>,
    pub dram: Option<String>,
    pub gpus: Option<String>,
    pub os: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// One product line of a registration batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    pub product_name: String,
    pub serial_number: String,
    pub part_number: String,
}

impl ProductEntry {
    /// Zip the three parallel multipart arrays into entries.
    pub fn zip_parallel(
        product_names: Vec<String>,
        serial_numbers: Vec<String>,
        part_numbers: Vec<String>,
    ) -> Result<Vec<Self>, WarrantyServiceError> {
        if product_names.is_empty() {
            return Err(WarrantyServiceError::Validation(
                "at least one product is required".to_owned(),
            ));
        }
        if product_names.len() != serial_numbers.len() {
            return Err(WarrantyServiceError::Validation(
                "mismatched product and serial number counts".to_owned(),
            ));
        }
        if product_names.len() != part_numbers.len() {
            return Err(WarrantyServiceError::Validation(
                "mismatched product and part number counts".to_owned(),
            ));
        }
        Ok(product_names
            .into_iter()
            .zip(serial_numbers)
            .zip(part_numbers)
            .map(|((product_name, serial_number), part_number)| Self {
                product_name,
                serial_number,
                part_number,
            })
            .collect())
    }
}

/// Object-store key of an invoice: `invoices/<epoch_ms>_<user_id>_<first_serial_number>`.
///
/// Characters outside `[A-Za-z0-9._-]` in the serial are replaced with `_` so the key
/// never escapes the `invoices/` prefix.
pub fn invoice_key(at: DateTime<Utc>, user_id: Uuid, first_serial: &str) -> String {
    let serial: String = first_serial
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("invoices/{}_{}_{}", at.timestamp_millis(), user_id, serial)
}

/// Download filename for an invoice key: basename plus `.pdf`.
pub fn invoice_filename(key: &str) -> String {
    let base = key.rsplit('/').next().unwrap_or(key);
    format!("{base}.pdf")
}

/// Split the first `;`-separated entry of a participants string (`"Name – email"`).
///
/// The first spaced dash separates name from email, so hyphens inside the
/// address survive. A bare dash is only used when no spaced one exists.
pub fn parse_participant(participants: &str) -> Result<(String, String), WarrantyServiceError> {
    let first = participants.split(';').next().unwrap_or_default().trim();
    let (name, email) = split_participant(first).unwrap_or((first, ""));
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || !is_deliverable_email(email) {
        return Err(WarrantyServiceError::Validation(
            "please use \"Name – valid@email.com\" in participants".to_owned(),
        ));
    }
    Ok((name.to_owned(), email.to_owned()))
}

fn split_participant(entry: &str) -> Option<(&str, &str)> {
    [" – ", " - "]
        .into_iter()
        .filter_map(|sep| entry.find(sep).map(|at| (at, sep.len())))
        .min_by_key(|&(at, _)| at)
        .map(|(at, len)| (&entry[..at], &entry[at + len..]))
        .or_else(|| entry.split_once(['-', '–']))
}

/// Syntactically valid with a dotted domain (`a@b` is rejected).
fn is_deliverable_email(email: &str) -> bool {
    email.validate_email()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.') && !domain.ends_with('.'))
}
