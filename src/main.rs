use contract_registry::app_state::AppState;
use contract_registry::args::Args;
use contract_registry::config::network_config::NetworkConfig;
use contract_registry::routes::create_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::from_env();
    let network_config = NetworkConfig::load(&args.config_path)?;
    let state = AppState::build(&network_config, args.signer()?).await?;

    let app = create_router(state, args.allowed_origins());

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    tracing::info!(bind = %args.bind, config = %args.config_path, "server started");

    axum::serve(listener, app).await?;

    Ok(())
}
