use std::sync::Arc;

use depth_chart_app::{app::AppBus, config::Config};
use depth_chart_db::{establish_connection_pool, uow::PostgresUnitOfWorkProvider};
use depth_chart_types::{Result, errors::ApplicationError};
use depth_chart_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let (config, app_bus) = setup_app().await?;
    let state = AppState::new(app_bus);

    WebRouter::serve(state, config.http_port).await
}

async fn setup_app() -> Result<(Arc<Config>, Arc<AppBus>), ApplicationError> {
    let config = Arc::new(Config::from_env());
    tracing::info!(
        "Starting with lock policy {:?}, {} max db connections",
        config.lock_policy,
        config.db_max_connections
    );
    let db_pool = establish_connection_pool(config.db_max_connections).await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Unknown(e.to_string()))?;

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    let app_bus = Arc::new(AppBus::new(config.clone(), uow_provider));

    Ok((config, app_bus))
}
