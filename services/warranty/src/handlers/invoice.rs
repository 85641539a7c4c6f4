use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};

use warranty_auth_types::identity::BearerIdentity;

use crate::error::WarrantyServiceError;
use crate::state::AppState;
use crate::usecase::invoice::DownloadInvoiceUseCase;

// ── GET /download/invoice/{serial_number} ────────────────────────────────────

/// Streams the stored invoice; the body is never buffered in full.
pub async fn download_invoice(
    BearerIdentity(identity): BearerIdentity,
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<Response, WarrantyServiceError> {
    let usecase = DownloadInvoiceUseCase {
        registrations: state.registration_repo(),
        store: state.invoice_store(),
    };
    let download = usecase.execute(&identity, &serial_number).await?;

    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", download.filename))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"invoice.pdf\""));

    let mut response = Body::from_stream(download.object.body).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    if let Some(length) = download.object.content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }
    Ok(response)
}
