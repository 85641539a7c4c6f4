use sea_orm::entity::prelude::*;

/// Warranty claim; at most one per registration.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "warranty_claims")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub registration_id: Uuid,
    pub customer_remarks: Option<String>,
    /// `Pending`, `Approved` or `Rejected`.
    pub claim_status: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::product_registrations::Entity",
        from = "Column::RegistrationId",
        to = "super::product_registrations::Column::Id"
    )]
    ProductRegistration,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::product_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductRegistration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
