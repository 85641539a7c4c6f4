use sea_orm::entity::prelude::*;

/// Infrastructure-interest survey answer. Enumerated answers are stored as their wire strings.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "survey_responses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_name: String,
    pub customer_location: String,
    pub category: String,
    pub participant_name: String,
    pub participant_email: String,
    pub base_model_size: String,
    pub is_custom: String,
    pub on_hugging_face: String,
    pub hf_link: String,
    pub architecture: String,
    pub workloads: String,
    pub infra_type: String,
    pub motherboard: Option<String>,
    pub processor: Option<String>,
    pub dram: Option<String>,
    pub gpus: Option<String>,
    pub os: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
