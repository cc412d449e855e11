use std::sync::Arc;

use clap::Parser;
use proofs::api;
use proofs::config::Config;
use proofs::storage::driver::supabase::SupabaseStorage;
use proofs::utils::cli::Args;
use proofs::utils::state::AppState;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();
    let config = validate_config(&args);

    let storage = Arc::new(SupabaseStorage::from_config(&config));
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!(
        storage_url = %config.storage_url,
        bucket = %config.bucket,
        "using storage provider"
    );
    let state = Arc::new(AppState::new(storage));

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}

fn validate_config(args: &Args) -> Config {
    match Config::from_args(args) {
        Ok(config) => config,
        Err(validation_errors) => {
            eprintln!("{}", validation_errors.join("\n"));
            std::process::exit(1);
        }
    }
}
