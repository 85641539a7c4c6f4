use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use warranty_domain::UnknownVariant;
use warranty_domain::claim::ClaimStatus;

/// Warranty service error variants.
#[derive(Debug, thiserror::Error)]
pub enum WarrantyServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("access denied")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("product not found: \"{product_name}\" - \"{serial_number}\"")]
    ProductNotFound {
        product_name: String,
        serial_number: String,
    },
    #[error("warranty registration is already done for \"{product_name}\" - \"{serial_number}\"")]
    AlreadyRegistered {
        product_name: String,
        serial_number: String,
    },
    #[error("product registration not found")]
    RegistrationNotFound,
    #[error("warranty claim not found")]
    ClaimNotFound,
    #[error("warranty already claimed for this product")]
    DuplicateClaim,
    #[error("claim status cannot change from {from} to {to}")]
    InvalidStatusTransition { from: ClaimStatus, to: ClaimStatus },
    #[error("invoice not found")]
    InvoiceNotFound,
    #[error("catalog product not found")]
    CatalogProductNotFound,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("upload exceeds the size limit")]
    PayloadTooLarge,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WarrantyServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            Self::AlreadyRegistered { .. } => "ALREADY_REGISTERED",
            Self::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            Self::ClaimNotFound => "CLAIM_NOT_FOUND",
            Self::DuplicateClaim => "DUPLICATE_CLAIM",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::InvoiceNotFound => "INVOICE_NOT_FOUND",
            Self::CatalogProductNotFound => "CATALOG_PRODUCT_NOT_FOUND",
            Self::NotFound(_) => "NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::ProductNotFound { .. }
            | Self::RegistrationNotFound
            | Self::ClaimNotFound
            | Self::InvoiceNotFound
            | Self::CatalogProductNotFound
            | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyRegistered { .. }
            | Self::DuplicateClaim
            | Self::InvalidStatusTransition { .. }
            | Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UnknownVariant> for WarrantyServiceError {
    fn from(err: UnknownVariant) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Unreadable, mistyped or incomplete JSON bodies are client validation failures.
impl From<JsonRejection> for WarrantyServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for WarrantyServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_owned());
                format!("{field} {reason}")
            })
            .collect();
        fields.sort();
        Self::Validation(fields.join("; "))
    }
}

impl IntoResponse for WarrantyServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors; TraceLayer already records their status.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
