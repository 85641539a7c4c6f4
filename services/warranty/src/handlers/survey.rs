use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::WarrantyServiceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::survey::{SubmitSurveyInput, SubmitSurveyUseCase};

// ── POST /customers ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRequest {
    pub customer_name: String,
    pub customer_location: String,
    pub category: String,
    pub participants: String,
    pub base_model_size: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub on_hugging_face: bool,
    #[serde(default)]
    pub hf_link: String,
    #[serde(default)]
    pub architecture: String,
    pub workloads: String,
    pub infra_type: String,
    pub motherboard: Option<String>,
    pub processor: Option<String>,
    pub dram: Option<String>,
    pub gpus: Option<String>,
    pub os: Option<String>,
}

#[derive(Serialize)]
pub struct SurveyResponseBody {
    pub message: &'static str,
    pub id: String,
}

pub async fn submit_survey(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SurveyRequest>,
) -> Result<Json<SurveyResponseBody>, WarrantyServiceError> {
    let usecase = SubmitSurveyUseCase {
        repo: state.survey_repo(),
    };
    let id = usecase
        .execute(SubmitSurveyInput {
            customer_name: body.customer_name,
            customer_location: body.customer_location,
            category: body.category,
            participants: body.participants,
            base_model_size: body.base_model_size,
            is_custom: body.is_custom,
            on_hugging_face: body.on_hugging_face,
            hf_link: body.hf_link,
            architecture: body.architecture,
            workloads: body.workloads,
            infra_type: body.infra_type,
            motherboard: body.motherboard,
            processor: body.processor,
            dram: body.dram,
            gpus: body.gpus,
            os: body.os,
        })
        .await?;
    Ok(Json(SurveyResponseBody {
        message: "Customer inserted successfully",
        id: id.to_string(),
    }))
}
