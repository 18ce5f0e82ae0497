use std::sync::Arc;

use issue_tracker::configuration::get_configuration;
use issue_tracker::database::{get_connection_pool, migrate_database};
use issue_tracker::server::config::configure_app;
use issue_tracker::server::services::{
    issue_database::IssueDatabaseService, issue_store::IssueStore,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let configuration = get_configuration()?;

    let pool = get_connection_pool(&configuration).await?;
    migrate_database(&pool).await?;

    let store: Arc<dyn IssueStore> = Arc::new(IssueDatabaseService::new(pool));
    let app = configure_app(store);

    let addr = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
