use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use warranty_core::health::health;
use warranty_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, update_password, update_temp_password},
    catalog::{create_product, delete_product, list_products, list_shipped_products},
    claim::{file_claim, get_claim, list_claims, update_claim_status},
    invoice::download_invoice,
    readyz,
    registration::{get_registered_users, get_user_registrations, submit_registration},
    survey::submit_survey,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    Router::new()
        // Health
        .route("/health", get(health))
        .route("/readyz", get(readyz))
        // Auth
        .route("/login", post(login))
        .route("/update_password", post(update_password))
        .route("/update_temp_password", post(update_temp_password))
        // Registrations
        .route(
            "/product_registration",
            post(submit_registration).layer(upload_limit),
        )
        .route("/user_registrations/{email}", get(get_user_registrations))
        .route("/registered_users", get(get_registered_users))
        // Warranty claims
        .route("/warranty", post(file_claim))
        .route("/warranty_status", post(update_claim_status))
        .route("/get_warranty/{serial_number}", get(get_claim))
        .route("/registered_warranty_claims", get(list_claims))
        // Catalog
        .route("/shipped_products", get(list_shipped_products))
        .route("/products", get(list_products).post(create_product))
        .route("/products/{serial_number}", delete(delete_product))
        // Invoices
        .route("/download/invoice/{serial_number}", get(download_invoice))
        // Survey
        .route("/customers", post(submit_survey))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .layer(cors_layer())
        .with_state(state)
}
