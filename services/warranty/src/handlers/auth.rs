use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use warranty_auth_types::identity::BearerIdentity;
use warranty_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::WarrantyServiceError;
use crate::handlers::{JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::auth::{
    ChangePasswordUseCase, IssueTemporaryPasswordUseCase, LoginInput, LoginUseCase,
};

/// Public view of an account; never carries the password hash.
#[derive(Serialize)]
pub struct UserView {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub role: UserRole,
    pub mobile_number: Option<String>,
    pub country_code: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
            mobile_number: user.mobile_number,
            country_code: user.country_code,
        }
    }
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserView,
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, WarrantyServiceError> {
    body.validate()?;
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        token_key: state.token_key.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        message: "Login successful",
        token: output.token,
        user: output.user.into(),
    }))
}

// ── POST /update_password ────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub new_password: String,
}

pub async fn update_password(
    BearerIdentity(identity): BearerIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, WarrantyServiceError> {
    body.validate()?;
    let usecase = ChangePasswordUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(&identity, body.new_password).await?;
    Ok(Json(MessageResponse::new("Password updated successfully.")))
}

// ── POST /update_temp_password ───────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct TempPasswordRequest {
    #[serde(default)]
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
}

#[derive(Serialize)]
pub struct TempPasswordResponse {
    pub message: &'static str,
    pub temp_password: String,
}

pub async fn update_temp_password(
    BearerIdentity(identity): BearerIdentity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TempPasswordRequest>,
) -> Result<Json<TempPasswordResponse>, WarrantyServiceError> {
    body.validate()?;
    let usecase = IssueTemporaryPasswordUseCase {
        repo: state.user_repo(),
    };
    let temp_password = usecase.execute(&identity, &body.email).await?;
    Ok(Json(TempPasswordResponse {
        message: "Temporary password updated successfully.",
        temp_password,
    }))
}
