use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use warranty_auth_types::token::TokenKey;
use warranty_core::config::Config as _;
use warranty_core::tracing::init_tracing;
use warranty_migration::Migrator;
use warranty_service::config::WarrantyConfig;
use warranty_service::infra::storage::InvoiceStore;
use warranty_service::router::build_router;
use warranty_service::state::AppState;
use warranty_service::usecase::auth::SeedAdminUseCase;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WarrantyConfig::from_env().context("load configuration")?;
    init_tracing();
    info!(?config, "starting warranty service");

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    Migrator::up(&db, None).await.context("run migrations")?;

    let state = AppState {
        db: Arc::new(db),
        store: InvoiceStore::from_config(&config).context("configure invoice storage")?,
        token_key: TokenKey::new(config.jwt_secret.as_str()),
        max_upload_bytes: config.max_upload_bytes,
    };

    SeedAdminUseCase {
        repo: state.user_repo(),
    }
    .execute(&config.admin_email, config.admin_password.clone())
    .await
    .context("seed admin account")?;

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("warranty service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
