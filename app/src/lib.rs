//! Nation3 lock page backend

use anyhow::Context;
use nation_api::AppState;
use nation_core::AppConfig;

/// Initialise logging. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,nation3=debug")),
        )
        .init();
}

/// Run the API server until it fails
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(
        chain = %config.chain,
        nation = %config.contracts.nation_token,
        venation = %config.contracts.venation_token,
        "Starting Nation3 lock API"
    );

    let addr = config.listen_addr();
    let state = AppState::with_config(config);

    nation_api::start_server(state)
        .await
        .with_context(|| format!("serving API on {}", addr))
}
