#![allow(async_fn_in_trait)]

use bytes::Bytes;
use futures::stream::BoxStream;
use uuid::Uuid;

use warranty_domain::claim::ClaimStatus;

use crate::domain::types::{
    CatalogProduct, ClaimView, Registration, RegistrationListing, SurveyResponse, User,
    WarrantyClaim,
};
use crate::error::WarrantyServiceError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    /// Exact, case-sensitive match on the stored email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WarrantyServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WarrantyServiceError>;
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), WarrantyServiceError>;
    /// Insert unless a user with the same email exists. Returns `true` if inserted.
    async fn create_if_absent(&self, user: &User) -> Result<bool, WarrantyServiceError>;
}

/// Repository for the product catalog.
pub trait CatalogRepository: Send + Sync {
    async fn exists(
        &self,
        product_name: &str,
        serial_number: &str,
    ) -> Result<bool, WarrantyServiceError>;
    /// All entries in insertion order.
    async fn list(&self) -> Result<Vec<CatalogProduct>, WarrantyServiceError>;
    async fn create(&self, product: &CatalogProduct) -> Result<(), WarrantyServiceError>;
    /// Delete every entry with `serial_number`; returns the first one deleted.
    async fn delete_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<CatalogProduct>, WarrantyServiceError>;
}

/// Repository for product registrations.
pub trait RegistrationRepository: Send + Sync {
    async fn is_registered(
        &self,
        product_name: &str,
        serial_number: &str,
    ) -> Result<bool, WarrantyServiceError>;

    async fn find_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<Registration>, WarrantyServiceError>;

    async fn find_by_user_and_serial(
        &self,
        user_id: Uuid,
        serial_number: &str,
    ) -> Result<Option<Registration>, WarrantyServiceError>;

    /// Insert `new_user` (when provisioning) and every registration in one transaction.
    ///
    /// A serial-number unique violation surfaces as `AlreadyRegistered` for that row and
    /// an email unique violation as `UserAlreadyExists`; nothing is written in either case.
    async fn create_batch(
        &self,
        new_user: Option<&User>,
        registrations: &[Registration],
    ) -> Result<(), WarrantyServiceError>;

    /// A user's registrations, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RegistrationListing>, WarrantyServiceError>;

    /// Every registration, newest first.
    async fn list_all(&self) -> Result<Vec<RegistrationListing>, WarrantyServiceError>;
}

/// Repository for warranty claims.
pub trait ClaimRepository: Send + Sync {
    async fn exists_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<bool, WarrantyServiceError>;

    /// Insert the claim and mark its registration `registered_for_claim = yes` atomically.
    ///
    /// Losing a race against another claim for the same registration yields `DuplicateClaim`.
    async fn create_and_flag(&self, claim: &WarrantyClaim) -> Result<(), WarrantyServiceError>;

    async fn find_by_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Option<WarrantyClaim>, WarrantyServiceError>;

    async fn update_status(
        &self,
        claim_id: Uuid,
        status: ClaimStatus,
    ) -> Result<(), WarrantyServiceError>;

    async fn find_view_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<ClaimView>, WarrantyServiceError>;

    /// Every claim, most recently submitted first.
    async fn list_all(&self) -> Result<Vec<ClaimView>, WarrantyServiceError>;
}

/// Repository for survey responses.
pub trait SurveyRepository: Send + Sync {
    async fn create(&self, response: &SurveyResponse) -> Result<(), WarrantyServiceError>;
}

/// Stored invoice, streamed back to the caller.
pub struct InvoiceObject {
    pub body: BoxStream<'static, std::io::Result<Bytes>>,
    pub content_length: Option<u64>,
}

/// Port for the external object store holding invoice files.
pub trait InvoiceStorage: Send + Sync {
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), WarrantyServiceError>;

    /// `None` when no object exists under `key`.
    async fn get(&self, key: &str) -> Result<Option<InvoiceObject>, WarrantyServiceError>;

    async fn delete(&self, key: &str) -> Result<(), WarrantyServiceError>;
}
