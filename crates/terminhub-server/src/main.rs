//! terminhub server entry point.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;

use terminhub_airtable::{AirtableClient, AirtableConfig};
use terminhub_core::{TracingConfig, TracingOutputFormat, init_tracing};
use terminhub_server::{AppState, ServerConfig, StoreIdentity, app};

#[tokio::main]
async fn main() -> ExitCode {
    let format = if json_logs_requested() {
        TracingOutputFormat::Json
    } else {
        TracingOutputFormat::Pretty
    };

    if let Err(error) = init_tracing(TracingConfig::default().with_format(format)) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("server failed: {error}");
            ExitCode::FAILURE
        }
    }
}

fn json_logs_requested() -> bool {
    std::env::var("JSON_LOGS").is_ok_and(|value| value == "1" || value.eq_ignore_ascii_case("true"))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let server_config = ServerConfig::from_env()?;
    let store_config = AirtableConfig::from_env()?;

    let store_identity = StoreIdentity::from_config(&store_config);
    let store = AirtableClient::new(store_config);

    let state = AppState {
        store: Arc::new(store),
        store_identity,
    };
    let router = app(state, server_config.request_timeout);

    let listener = tokio::net::TcpListener::bind(server_config.bind_addr).await?;
    info!(addr = %server_config.bind_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
