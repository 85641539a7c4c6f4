use sea_orm::entity::prelude::*;

/// Account record. `role` holds the lowercase role name.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub mobile_number: Option<String>,
    pub password_hash: String,
    pub country_code: Option<String>,
    pub role: String,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_registrations::Entity")]
    ProductRegistrations,
    #[sea_orm(has_many = "super::warranty_claims::Entity")]
    WarrantyClaims,
}

impl Related<super::product_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductRegistrations.def()
    }
}

impl Related<super::warranty_claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WarrantyClaims.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
