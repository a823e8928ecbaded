use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use partition_registrar::handler::handler;
use partition_registrar::{Config, GlueCatalog, PartitionRegistrar};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Missing DATABASE_NAME / TABLE_NAME is fatal
    let config = Config::load().context("Failed to load configuration")?;

    init_tracing(&config.service.log_level);

    info!(
        service = %config.service.name,
        database = %config.catalog.database_name,
        table = %config.catalog.table_name,
        "Starting partition registrar"
    );

    // Built once per process and reused across invocations
    let catalog = Arc::new(GlueCatalog::new(&config.catalog).await);
    let registrar = Arc::new(PartitionRegistrar::new(
        catalog,
        config.catalog.database_name.clone(),
        config.catalog.table_name.clone(),
    ));

    let func = service_fn(move |event: LambdaEvent<aws_lambda_events::s3::S3Event>| {
        let registrar = registrar.clone();

        async move { handler(&*registrar, event).await }
    });

    run(func).await
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().without_time())
        .init();
}
