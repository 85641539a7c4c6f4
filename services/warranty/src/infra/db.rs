use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, SqlErr, Statement,
    TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use warranty_domain::claim::{ClaimStatus, RegisteredForClaim};
use warranty_schema::{
    product_registrations, products, survey_responses, users, warranty_claims,
};

use crate::domain::repository::{
    CatalogRepository, ClaimRepository, RegistrationRepository, SurveyRepository, UserRepository,
};
use crate::domain::types::{
    CatalogProduct, ClaimView, Registration, RegistrationListing, SurveyResponse, User,
    WarrantyClaim,
};
use crate::error::WarrantyServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Map a unique violation to `conflict`; anything else becomes `Internal`.
fn conflict_or(err: DbErr, conflict: WarrantyServiceError, context: &'static str) -> WarrantyServiceError {
    if is_unique_violation(&err) {
        conflict
    } else {
        anyhow::Error::new(err).context(context).into()
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WarrantyServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WarrantyServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), WarrantyServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            ..Default::default()
        }
        .update(&*self.db)
        .await
        .context("update user password")?;
        Ok(())
    }

    async fn create_if_absent(&self, user: &User) -> Result<bool, WarrantyServiceError> {
        let inserted = users::Entity::insert(user_active_model(user))
            .on_conflict(
                OnConflict::column(users::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await
            .context("insert user if absent")?;
        Ok(inserted > 0)
    }
}

fn user_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        mobile_number: Set(user.mobile_number.clone()),
        password_hash: Set(user.password_hash.clone()),
        country_code: Set(user.country_code.clone()),
        role: Set(user.role.as_str().to_owned()),
        registered_at: Set(user.registered_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, WarrantyServiceError> {
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        mobile_number: model.mobile_number,
        password_hash: model.password_hash,
        country_code: model.country_code,
        role: model.role.parse().context("stored user role")?,
        registered_at: model.registered_at,
    })
}

// ── Catalog repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatalogRepository {
    pub db: Arc<DatabaseConnection>,
}

impl CatalogRepository for DbCatalogRepository {
    async fn exists(
        &self,
        product_name: &str,
        serial_number: &str,
    ) -> Result<bool, WarrantyServiceError> {
        let count = products::Entity::find()
            .filter(products::Column::ProductName.eq(product_name))
            .filter(products::Column::SerialNumber.eq(serial_number))
            .count(&*self.db)
            .await
            .context("check catalog product")?;
        Ok(count > 0)
    }

    async fn list(&self) -> Result<Vec<CatalogProduct>, WarrantyServiceError> {
        let models = products::Entity::find()
            .order_by_asc(products::Column::CreatedAt)
            .order_by_asc(products::Column::Id)
            .all(&*self.db)
            .await
            .context("list catalog products")?;
        Ok(models.into_iter().map(catalog_from_model).collect())
    }

    async fn create(&self, product: &CatalogProduct) -> Result<(), WarrantyServiceError> {
        products::Entity::insert(catalog_active_model(product))
            .exec_without_returning(&*self.db)
            .await
            .context("insert catalog product")?;
        Ok(())
    }

    async fn delete_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<CatalogProduct>, WarrantyServiceError> {
        let txn = self.db.begin().await.context("begin catalog delete")?;
        let first = products::Entity::find()
            .filter(products::Column::SerialNumber.eq(serial_number))
            .order_by_asc(products::Column::CreatedAt)
            .one(&txn)
            .await
            .context("find catalog product by serial")?;
        let Some(first) = first else {
            return Ok(None);
        };
        products::Entity::delete_many()
            .filter(products::Column::SerialNumber.eq(serial_number))
            .exec(&txn)
            .await
            .context("delete catalog products by serial")?;
        txn.commit().await.context("commit catalog delete")?;
        Ok(Some(catalog_from_model(first)))
    }
}

fn catalog_active_model(p: &CatalogProduct) -> products::ActiveModel {
    products::ActiveModel {
        id: Set(p.id),
        sales_order_number: Set(p.sales_order_number.clone()),
        product_name: Set(p.product_name.clone()),
        part_number: Set(p.part_number.clone()),
        serial_number: Set(p.serial_number.clone()),
        sold_to_party: Set(p.sold_to_party.clone()),
        shipped_to_customer_name: Set(p.shipped_to_customer_name.clone()),
        billing_date: Set(p.billing_date.clone()),
        billing_date_number: Set(p.billing_date_number.clone()),
        billing_type: Set(p.billing_type.clone()),
        net_quantity: Set(p.net_quantity),
        net_value_in_local_currency: Set(p.net_value_in_local_currency),
        unit_price: Set(p.unit_price),
        net_tax: Set(p.net_tax),
        total_amount: Set(p.total_amount),
        purchase_order_number: Set(p.purchase_order_number.clone()),
        delivery_number: Set(p.delivery_number.clone()),
        material_details: Set(p.material_details.clone()),
        created_at: Set(p.created_at),
    }
}

fn catalog_from_model(m: products::Model) -> CatalogProduct {
    CatalogProduct {
        id: m.id,
        sales_order_number: m.sales_order_number,
        product_name: m.product_name,
        part_number: m.part_number,
        serial_number: m.serial_number,
        sold_to_party: m.sold_to_party,
        shipped_to_customer_name: m.shipped_to_customer_name,
        billing_date: m.billing_date,
        billing_date_number: m.billing_date_number,
        billing_type: m.billing_type,
        net_quantity: m.net_quantity,
        net_value_in_local_currency: m.net_value_in_local_currency,
        unit_price: m.unit_price,
        net_tax: m.net_tax,
        total_amount: m.total_amount,
        purchase_order_number: m.purchase_order_number,
        delivery_number: m.delivery_number,
        material_details: m.material_details,
        created_at: m.created_at,
    }
}

// ── Registration repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRegistrationRepository {
    pub db: Arc<DatabaseConnection>,
}

const REGISTRATION_LISTING_SQL: &str = r#"
    SELECT
        pr.id AS registration_id,
        pr.product_name,
        pr.serial_number,
        pr.part_number,
        pr.invoice_receipt,
        pr.registered_for_claim,
        pr.registered_at,
        u.id AS user_id,
        u.name AS user_name,
        u.email,
        u.mobile_number,
        u.country_code
    FROM product_registrations pr
    JOIN users u ON pr.user_id = u.id
"#;

#[derive(Debug, FromQueryResult)]
struct RegistrationListingRow {
    registration_id: Uuid,
    product_name: String,
    serial_number: String,
    part_number: String,
    invoice_receipt: Option<String>,
    registered_for_claim: String,
    registered_at: DateTime<Utc>,
    user_id: Uuid,
    user_name: Option<String>,
    email: String,
    mobile_number: Option<String>,
    country_code: Option<String>,
}

impl RegistrationRepository for DbRegistrationRepository {
    async fn is_registered(
        &self,
        product_name: &str,
        serial_number: &str,
    ) -> Result<bool, WarrantyServiceError> {
        let count = product_registrations::Entity::find()
            .filter(product_registrations::Column::ProductName.eq(product_name))
            .filter(product_registrations::Column::SerialNumber.eq(serial_number))
            .count(&*self.db)
            .await
            .context("check existing registration")?;
        Ok(count > 0)
    }

    async fn find_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<Registration>, WarrantyServiceError> {
        let model = product_registrations::Entity::find()
            .filter(product_registrations::Column::SerialNumber.eq(serial_number))
            .one(&*self.db)
            .await
            .context("find registration by serial")?;
        model.map(registration_from_model).transpose()
    }

    async fn find_by_user_and_serial(
        &self,
        user_id: Uuid,
        serial_number: &str,
    ) -> Result<Option<Registration>, WarrantyServiceError> {
        let model = product_registrations::Entity::find()
            .filter(product_registrations::Column::UserId.eq(user_id))
            .filter(product_registrations::Column::SerialNumber.eq(serial_number))
            .one(&*self.db)
            .await
            .context("find registration by user and serial")?;
        model.map(registration_from_model).transpose()
    }

    async fn create_batch(
        &self,
        new_user: Option<&User>,
        registrations: &[Registration],
    ) -> Result<(), WarrantyServiceError> {
        // Dropping `txn` on an early return rolls back everything written so far.
        let txn = self.db.begin().await.context("begin registration batch")?;

        if let Some(user) = new_user {
            users::Entity::insert(user_active_model(user))
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    conflict_or(e, WarrantyServiceError::UserAlreadyExists, "insert new user")
                })?;
        }

        for registration in registrations {
            product_registrations::Entity::insert(registration_active_model(registration))
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    conflict_or(
                        e,
                        WarrantyServiceError::AlreadyRegistered {
                            product_name: registration.product_name.clone(),
                            serial_number: registration.serial_number.clone(),
                        },
                        "insert registration",
                    )
                })?;
        }

        txn.commit().await.context("commit registration batch")?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RegistrationListing>, WarrantyServiceError> {
        let sql =
            format!("{REGISTRATION_LISTING_SQL} WHERE pr.user_id = $1 ORDER BY pr.registered_at DESC");
        let rows = RegistrationListingRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            &sql,
            [user_id.into()],
        ))
        .all(&*self.db)
        .await
        .context("list registrations for user")?;
        rows.into_iter().map(listing_from_row).collect()
    }

    async fn list_all(&self) -> Result<Vec<RegistrationListing>, WarrantyServiceError> {
        let sql = format!("{REGISTRATION_LISTING_SQL} ORDER BY pr.registered_at DESC");
        let rows = RegistrationListingRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            sql,
        ))
        .all(&*self.db)
        .await
        .context("list all registrations")?;
        rows.into_iter().map(listing_from_row).collect()
    }
}

fn registration_active_model(r: &Registration) -> product_registrations::ActiveModel {
    product_registrations::ActiveModel {
        id: Set(r.id),
        user_id: Set(r.user_id),
        product_name: Set(r.product_name.clone()),
        serial_number: Set(r.serial_number.clone()),
        part_number: Set(r.part_number.clone()),
        invoice_receipt: Set(r.invoice_receipt.clone()),
        registered_for_claim: Set(r.registered_for_claim.as_str().to_owned()),
        registered_at: Set(r.registered_at),
    }
}

fn registration_from_model(
    m: product_registrations::Model,
) -> Result<Registration, WarrantyServiceError> {
    Ok(Registration {
        id: m.id,
        user_id: m.user_id,
        product_name: m.product_name,
        serial_number: m.serial_number,
        part_number: m.part_number,
        invoice_receipt: m.invoice_receipt,
        registered_for_claim: m
            .registered_for_claim
            .parse()
            .context("stored registered_for_claim")?,
        registered_at: m.registered_at,
    })
}

fn listing_from_row(row: RegistrationListingRow) -> Result<RegistrationListing, WarrantyServiceError> {
    Ok(RegistrationListing {
        registration_id: row.registration_id,
        product_name: row.product_name,
        serial_number: row.serial_number,
        part_number: row.part_number,
        invoice_receipt: row.invoice_receipt,
        registered_for_claim: row
            .registered_for_claim
            .parse()
            .context("stored registered_for_claim")?,
        registered_at: row.registered_at,
        user_id: row.user_id,
        user_name: row.user_name,
        email: row.email,
        mobile_number: row.mobile_number,
        country_code: row.country_code,
    })
}

// ── Claim repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClaimRepository {
    pub db: Arc<DatabaseConnection>,
}

const CLAIM_VIEW_SQL: &str = r#"
    SELECT
        wc.id AS claim_id,
        wc.claim_status,
        wc.customer_remarks,
        wc.submitted_at,
        pr.id AS registration_id,
        pr.product_name,
        pr.serial_number,
        pr.invoice_receipt,
        pr.registered_for_claim,
        pr.registered_at,
        u.id AS user_id,
        u.name AS user_name,
        u.email,
        u.mobile_number,
        u.country_code
    FROM warranty_claims wc
    JOIN product_registrations pr ON wc.registration_id = pr.id
    JOIN users u ON pr.user_id = u.id
"#;

#[derive(Debug, FromQueryResult)]
struct ClaimViewRow {
    claim_id: Uuid,
    claim_status: String,
    customer_remarks: Option<String>,
    submitted_at: DateTime<Utc>,
    registration_id: Uuid,
    product_name: String,
    serial_number: String,
    invoice_receipt: Option<String>,
    registered_for_claim: String,
    registered_at: DateTime<Utc>,
    user_id: Uuid,
    user_name: Option<String>,
    email: String,
    mobile_number: Option<String>,
    country_code: Option<String>,
}

impl ClaimRepository for DbClaimRepository {
    async fn exists_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<bool, WarrantyServiceError> {
        let count = warranty_claims::Entity::find()
            .filter(warranty_claims::Column::RegistrationId.eq(registration_id))
            .count(&*self.db)
            .await
            .context("check existing claim")?;
        Ok(count > 0)
    }

    async fn create_and_flag(&self, claim: &WarrantyClaim) -> Result<(), WarrantyServiceError> {
        let claim = claim.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    warranty_claims::Entity::insert(claim_active_model(&claim))
                        .exec_without_returning(txn)
                        .await?;
                    product_registrations::Entity::update_many()
                        .col_expr(
                            product_registrations::Column::RegisteredForClaim,
                            Expr::value(RegisteredForClaim::Yes.as_str()),
                        )
                        .filter(product_registrations::Column::Id.eq(claim.registration_id))
                        .exec(txn)
                        .await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Transaction(err) if is_unique_violation(&err) => {
                    WarrantyServiceError::DuplicateClaim
                }
                other => anyhow::Error::new(other)
                    .context("create claim and flag registration")
                    .into(),
            })
    }

    async fn find_by_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Option<WarrantyClaim>, WarrantyServiceError> {
        let model = warranty_claims::Entity::find()
            .filter(warranty_claims::Column::RegistrationId.eq(registration_id))
            .one(&*self.db)
            .await
            .context("find claim by registration")?;
        model.map(claim_from_model).transpose()
    }

    async fn update_status(
        &self,
        claim_id: Uuid,
        status: ClaimStatus,
    ) -> Result<(), WarrantyServiceError> {
        warranty_claims::ActiveModel {
            id: Set(claim_id),
            claim_status: Set(status.as_str().to_owned()),
            ..Default::default()
        }
        .update(&*self.db)
        .await
        .context("update claim status")?;
        Ok(())
    }

    async fn find_view_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<ClaimView>, WarrantyServiceError> {
        let sql = format!("{CLAIM_VIEW_SQL} WHERE pr.serial_number = $1");
        let row = ClaimViewRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            &sql,
            [serial_number.into()],
        ))
        .one(&*self.db)
        .await
        .context("find claim view by serial")?;
        row.map(claim_view_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<ClaimView>, WarrantyServiceError> {
        let sql = format!("{CLAIM_VIEW_SQL} ORDER BY wc.submitted_at DESC");
        let rows = ClaimViewRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            sql,
        ))
        .all(&*self.db)
        .await
        .context("list all claims")?;
        rows.into_iter().map(claim_view_from_row).collect()
    }
}

fn claim_active_model(c: &WarrantyClaim) -> warranty_claims::ActiveModel {
    warranty_claims::ActiveModel {
        id: Set(c.id),
        user_id: Set(c.user_id),
        registration_id: Set(c.registration_id),
        customer_remarks: Set(c.customer_remarks.clone()),
        claim_status: Set(c.claim_status.as_str().to_owned()),
        submitted_at: Set(c.submitted_at),
    }
}

fn claim_from_model(m: warranty_claims::Model) -> Result<WarrantyClaim, WarrantyServiceError> {
    Ok(WarrantyClaim {
        id: m.id,
        user_id: m.user_id,
        registration_id: m.registration_id,
        customer_remarks: m.customer_remarks,
        claim_status: m.claim_status.parse().context("stored claim status")?,
        submitted_at: m.submitted_at,
    })
}

fn claim_view_from_row(row: ClaimViewRow) -> Result<ClaimView, WarrantyServiceError> {
    Ok(ClaimView {
        claim_id: row.claim_id,
        claim_status: row.claim_status.parse().context("stored claim status")?,
        customer_remarks: row.customer_remarks,
        submitted_at: row.submitted_at,
        registration_id: row.registration_id,
        product_name: row.product_name,
        serial_number: row.serial_number,
        invoice_receipt: row.invoice_receipt,
        registered_for_claim: row
            .registered_for_claim
            .parse()
            .context("stored registered_for_claim")?,
        registered_at: row.registered_at,
        user_id: row.user_id,
        user_name: row.user_name,
        email: row.email,
        mobile_number: row.mobile_number,
        country_code: row.country_code,
    })
}

// ── Survey repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSurveyRepository {
    pub db: Arc<DatabaseConnection>,
}

impl SurveyRepository for DbSurveyRepository {
    async fn create(&self, r: &SurveyResponse) -> Result<(), WarrantyServiceError> {
        let model = survey_responses::ActiveModel {
            id: Set(r.id),
            customer_name: Set(r.customer_name.clone()),
            customer_location: Set(r.customer_location.clone()),
            category: Set(r.category.as_str().to_owned()),
            participant_name: Set(r.participant_name.clone()),
            participant_email: Set(r.participant_email.clone()),
            base_model_size: Set(r.base_model_size.as_str().to_owned()),
            is_custom: Set(r.is_custom.as_str().to_owned()),
            on_hugging_face: Set(r.on_hugging_face.as_str().to_owned()),
            hf_link: Set(r.hf_link.clone()),
            architecture: Set(r.architecture.clone()),
            workloads: Set(r.workloads.as_str().to_owned()),
            infra_type: Set(r.infra_type.as_str().to_owned()),
            motherboard: Set(r.motherboard.clone()),
            processor: Set(r.processor.clone()),
            dram: Set(r.dram.clone()),
            gpus: Set(r.gpus.clone()),
            os: Set(r.os.clone()),
            submitted_at: Set(r.submitted_at),
        };
        survey_responses::Entity::insert(model)
            .exec_without_returning(&*self.db)
            .await
            .context("insert survey response")?;
        Ok(())
    }
}
