use sea_orm::entity::prelude::*;

/// A user's ownership record for one catalog item.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product_registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_name: String,
    #[sea_orm(unique)]
    pub serial_number: String,
    pub part_number: String,
    /// Object-store key of the invoice uploaded with the batch.
    #[sea_orm(column_type = "Text", nullable)]
    pub invoice_receipt: Option<String>,
    /// `yes` once a warranty claim has been filed.
    pub registered_for_claim: String,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_one = "super::warranty_claims::Entity")]
    WarrantyClaim,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::warranty_claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WarrantyClaim.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
