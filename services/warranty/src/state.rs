use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use warranty_auth_types::token::TokenKey;

use crate::infra::db::{
    DbCatalogRepository, DbClaimRepository, DbRegistrationRepository, DbSurveyRepository,
    DbUserRepository,
};
use crate::infra::storage::InvoiceStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub store: InvoiceStore,
    pub token_key: TokenKey,
    pub max_upload_bytes: usize,
}

impl FromRef<AppState> for TokenKey {
    fn from_ref(state: &AppState) -> Self {
        state.token_key.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog_repo(&self) -> DbCatalogRepository {
        DbCatalogRepository {
            db: self.db.clone(),
        }
    }

    pub fn registration_repo(&self) -> DbRegistrationRepository {
        DbRegistrationRepository {
            db: self.db.clone(),
        }
    }

    pub fn claim_repo(&self) -> DbClaimRepository {
        DbClaimRepository {
            db: self.db.clone(),
        }
    }

    pub fn survey_repo(&self) -> DbSurveyRepository {
        DbSurveyRepository {
            db: self.db.clone(),
        }
    }

    pub fn invoice_store(&self) -> InvoiceStore {
        self.store.clone()
    }
}
