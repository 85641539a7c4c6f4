use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use warranty_domain::survey::YesNo;

use crate::domain::repository::SurveyRepository;
use crate::domain::types::{SurveyResponse, parse_participant};
use crate::error::WarrantyServiceError;

pub struct SubmitSurveyInput {
    pub customer_name: String,
    pub customer_location: String,
    pub category: String,
    /// `"Name – email; Name – email"`; only the first entry is kept.
    pub participants: String,
    pub base_model_size: String,
    pub is_custom: bool,
    pub on_hugging_face: bool,
    pub hf_link: String,
    pub architecture: String,
    pub workloads: String,
    pub infra_type: String,
    pub motherboard: Option<String>,
    pub processor: Option<String>,
    pub dram: Option<String>,
    pub gpus: Option<String>,
    pub os: Option<String>,
}

pub struct SubmitSurveyUseCase<R: SurveyRepository> {
    pub repo: R,
}

impl<R: SurveyRepository> SubmitSurveyUseCase<R> {
    pub async fn execute(&self, input: SubmitSurveyInput) -> Result<Uuid, WarrantyServiceError> {
        let (participant_name, participant_email) = parse_participant(&input.participants)?;
        let response = SurveyResponse {
            id: Uuid::now_v7(),
            customer_name: input.customer_name,
            customer_location: input.customer_location,
            category: input.category.parse()?,
            participant_name,
            participant_email,
            base_model_size: input.base_model_size.parse()?,
            is_custom: YesNo::from(input.is_custom),
            on_hugging_face: YesNo::from(input.on_hugging_face),
            hf_link: input.hf_link,
            architecture: input.architecture,
            workloads: input.workloads.parse()?,
            infra_type: input.infra_type.parse()?,
            motherboard: input.motherboard,
            processor: input.processor,
            dram: input.dram,
            gpus: input.gpus,
            os: input.os,
            submitted_at: Utc::now(),
        };
        self.repo.create(&response).await?;
        info!(response_id = %response.id, category = %response.category, "survey response stored");
        Ok(response.id)
    }
}
