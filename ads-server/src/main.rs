use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::ad_service::AdService;
use data::repositories::memory::InMemoryRepository;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;
    info!(
        http_addr = %settings.http_addr,
        grpc_addr = %settings.grpc_addr,
        "starting ads server"
    );

    let repo = InMemoryRepository::new();
    let ad_service = Arc::new(AdService::new(repo));
    let state = AppState::new(ad_service);

    server::run(&settings, state).await?;

    info!("server was shut down");
    Ok(())
}
