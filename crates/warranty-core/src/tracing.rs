use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset. Per-query sqlx and AWS SDK chatter stays at `warn`.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm_migration=warn,aws_config=warn,aws_smithy_runtime=warn";

/// Install the JSON stdout subscriber. Call once at service startup; repeated calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(false))
        .try_init();
}
