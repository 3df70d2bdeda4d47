use sandscan_rpc::HeliusClient;
use sandscan_server::{app, logging, AppConfig, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // o .env (RUST_LOG, LOG_FORMAT) precisa estar carregado antes do subscriber
    let config = AppConfig::load()?;
    logging::init_logging();

    let client = Arc::new(HeliusClient::new(config.helius_config())?);
    let state = Arc::new(AppState::new(client, &config));

    let router = app(state, Some(&config.file.frontend));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(
        port = config.port,
        dex_programs = config.file.dex_programs.len(),
        max_lookback_limit = config.file.max_lookback_limit,
        "servidor escutando"
    );

    axum::serve(listener, router).await?;
    Ok(())
}
