use std::collections::HashSet;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use warranty_auth_types::identity::Identity;
use warranty_domain::claim::RegisteredForClaim;
use warranty_domain::user::UserRole;

use crate::domain::repository::{
    CatalogRepository, InvoiceStorage, RegistrationRepository, UserRepository,
};
use crate::domain::types::{ProductEntry, Registration, RegistrationListing, User, invoice_key};
use crate::error::WarrantyServiceError;
use crate::infra::password::{generate_temp_password, hash_password};

// ── SubmitRegistration ───────────────────────────────────────────────────────

pub struct InvoiceUpload {
    pub bytes: Bytes,
    pub content_type: String,
}

pub struct SubmitRegistrationInput {
    pub name: Option<String>,
    pub email: String,
    pub mobile_number: Option<String>,
    pub country_code: Option<String>,
    pub product_names: Vec<String>,
    pub serial_numbers: Vec<String>,
    pub part_numbers: Vec<String>,
    pub invoice: Option<InvoiceUpload>,
}

#[derive(Debug)]
pub struct SubmitRegistrationOutput {
    pub inserted: usize,
    /// Storage key of the uploaded invoice.
    pub receipt: Option<String>,
    /// Present only when this submission created the account.
    pub temp_password: Option<String>,
}

pub struct SubmitRegistrationUseCase<U, C, R, S>
where
    U: UserRepository,
    C: CatalogRepository,
    R: RegistrationRepository,
    S: InvoiceStorage,
{
    pub users: U,
    pub catalog: C,
    pub registrations: R,
    pub store: S,
}

impl<U, C, R, S> SubmitRegistrationUseCase<U, C, R, S>
where
    U: UserRepository,
    C: CatalogRepository,
    R: RegistrationRepository,
    S: InvoiceStorage,
{
    pub async fn execute(
        &self,
        input: SubmitRegistrationInput,
    ) -> Result<SubmitRegistrationOutput, WarrantyServiceError> {
        let entries = ProductEntry::zip_parallel(
            input.product_names,
            input.serial_numbers,
            input.part_numbers,
        )?;
        let email = input.email.trim().to_owned();
        if !email.validate_email() {
            return Err(WarrantyServiceError::Validation(
                "a valid email is required".to_owned(),
            ));
        }

        for entry in &entries {
            if !self
                .catalog
                .exists(&entry.product_name, &entry.serial_number)
                .await?
            {
                return Err(WarrantyServiceError::ProductNotFound {
                    product_name: entry.product_name.clone(),
                    serial_number: entry.serial_number.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            let repeated = !seen.insert(entry.serial_number.as_str());
            if repeated
                || self
                    .registrations
                    .is_registered(&entry.product_name, &entry.serial_number)
                    .await?
            {
                return Err(WarrantyServiceError::AlreadyRegistered {
                    product_name: entry.product_name.clone(),
                    serial_number: entry.serial_number.clone(),
                });
            }
        }

        let now = Utc::now();
        let (user_id, new_user, temp_password) = match self.users.find_by_email(&email).await? {
            Some(existing) => (existing.id, None, None),
            None => {
                let temp_password = generate_temp_password();
                let user = User {
                    id: Uuid::now_v7(),
                    name: non_blank(input.name),
                    email: email.clone(),
                    mobile_number: non_blank(input.mobile_number),
                    password_hash: hash_password(temp_password.clone()).await?,
                    country_code: non_blank(input.country_code),
                    role: UserRole::Customer,
                    registered_at: now,
                };
                (user.id, Some(user), Some(temp_password))
            }
        };

        let receipt = match (input.invoice, entries.first()) {
            (Some(invoice), Some(first)) => {
                let key = invoice_key(now, user_id, &first.serial_number);
                self.store
                    .put(&key, invoice.bytes, &invoice.content_type)
                    .await?;
                Some(key)
            }
            _ => None,
        };

        let rows: Vec<Registration> = entries
            .into_iter()
            .map(|entry| Registration {
                id: Uuid::now_v7(),
                user_id,
                product_name: entry.product_name,
                serial_number: entry.serial_number,
                part_number: entry.part_number,
                invoice_receipt: receipt.clone(),
                registered_for_claim: RegisteredForClaim::No,
                registered_at: now,
            })
            .collect();
        let inserted = rows.len();

        let owner = match self.insert_batch(&email, new_user.as_ref(), rows).await {
            Ok(owner) => owner,
            Err(err) => {
                if let Some(key) = &receipt {
                    if let Err(cleanup) = self.store.delete(key).await {
                        warn!(key = %key, error = %cleanup, "failed to remove orphaned invoice");
                    }
                }
                return Err(err);
            }
        };
        let (user_id, temp_password) = match owner {
            Some(existing) => (existing, None),
            None => (user_id, temp_password),
        };

        if temp_password.is_some() {
            info!(user_id = %user_id, "provisioned customer account");
        }
        info!(user_id = %user_id, count = inserted, receipt = ?receipt, "registered products");

        Ok(SubmitRegistrationOutput {
            inserted,
            receipt,
            temp_password,
        })
    }

    /// Insert `rows`, provisioning `new_user` in the same transaction.
    ///
    /// When a concurrent submission created the account for `email` first, the rows are
    /// re-pointed at that account and inserted without provisioning. Returns its id then.
    async fn insert_batch(
        &self,
        email: &str,
        new_user: Option<&User>,
        mut rows: Vec<Registration>,
    ) -> Result<Option<Uuid>, WarrantyServiceError> {
        match self.registrations.create_batch(new_user, &rows).await {
            Err(WarrantyServiceError::UserAlreadyExists) if new_user.is_some() => {
                let existing = self
                    .users
                    .find_by_email(email)
                    .await?
                    .ok_or(WarrantyServiceError::UserAlreadyExists)?;
                for row in &mut rows {
                    row.user_id = existing.id;
                }
                self.registrations.create_batch(None, &rows).await?;
                info!(user_id = %existing.id, "account provisioned concurrently; reused it");
                Ok(Some(existing.id))
            }
            result => result.map(|()| None),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── ListUserRegistrations ────────────────────────────────────────────────────

pub struct ListUserRegistrationsUseCase<U: UserRepository, R: RegistrationRepository> {
    pub users: U,
    pub registrations: R,
}

impl<U: UserRepository, R: RegistrationRepository> ListUserRegistrationsUseCase<U, R> {
    pub async fn execute(
        &self,
        identity: &Identity,
        email: &str,
    ) -> Result<Vec<RegistrationListing>, WarrantyServiceError> {
        if !identity.may_access_email(email) {
            return Err(WarrantyServiceError::Forbidden);
        }
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(WarrantyServiceError::UserNotFound)?;
        let listings = self.registrations.list_for_user(user.id).await?;
        if listings.is_empty() {
            return Err(WarrantyServiceError::NotFound(
                "no registrations found for this user",
            ));
        }
        Ok(listings)
    }
}

// ── ListAllRegistrations ─────────────────────────────────────────────────────

pub struct ListAllRegistrationsUseCase<R: RegistrationRepository> {
    pub registrations: R,
}

impl<R: RegistrationRepository> ListAllRegistrationsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<RegistrationListing>, WarrantyServiceError> {
        let listings = self.registrations.list_all().await?;
        if listings.is_empty() {
            return Err(WarrantyServiceError::NotFound("no registered products found"));
        }
        Ok(listings)
    }
}
