use warranty_auth_types::identity::Identity;

use crate::domain::repository::{InvoiceObject, InvoiceStorage, RegistrationRepository};
use crate::domain::types::invoice_filename;
use crate::error::WarrantyServiceError;

pub struct InvoiceDownload {
    /// Suggested attachment filename.
    pub filename: String,
    pub object: InvoiceObject,
}

pub struct DownloadInvoiceUseCase<R: RegistrationRepository, S: InvoiceStorage> {
    pub registrations: R,
    pub store: S,
}

impl<R: RegistrationRepository, S: InvoiceStorage> DownloadInvoiceUseCase<R, S> {
    pub async fn execute(
        &self,
        identity: &Identity,
        serial_number: &str,
    ) -> Result<InvoiceDownload, WarrantyServiceError> {
        let registration = self
            .registrations
            .find_by_serial(serial_number)
            .await?
            .ok_or(WarrantyServiceError::InvoiceNotFound)?;
        if !identity.may_access_user(registration.user_id) {
            return Err(WarrantyServiceError::Forbidden);
        }
        let key = registration
            .invoice_receipt
            .ok_or(WarrantyServiceError::InvoiceNotFound)?;
        let object = self
            .store
            .get(&key)
            .await?
            .ok_or(WarrantyServiceError::InvoiceNotFound)?;
        Ok(InvoiceDownload {
            filename: invoice_filename(&key),
            object,
        })
    }
}
