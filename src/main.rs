#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use message_store_server::config::Config;
use message_store_server::{AppBuilder, adapters, api, telemetry};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    message_store_server::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app) = async {
        // Phase 1: Infrastructure
        let store = adapters::database::connect(&config.database).await?;
        tracing::info!(backend = ?config.database.store_backend, "Message store ready");

        // Phase 2: Wiring
        let app = AppBuilder::new(config.clone()).with_store(store).build()?;
        let app_router = api::app_router(app.state);
        let mgmt_app = api::mgmt_router(app.mgmt_state);

        // Phase 3: Listeners
        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        Ok::<_, anyhow::Error>((api_listener, mgmt_listener, app_router, mgmt_app))
    }
    .instrument(boot_span)
    .await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    message_store_server::spawn_signal_handler(shutdown_tx);

    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router).with_graceful_shutdown(async move {
        let _ = api_rx.wait_for(|&s| s).await;
    });

    let mut mgmt_rx = shutdown_rx.clone();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app).with_graceful_shutdown(async move {
        let _ = mgmt_rx.wait_for(|&s| s).await;
    });

    let servers = async { tokio::try_join!(api_server.into_future(), mgmt_server.into_future()) };
    tokio::pin!(servers);

    let mut drain_rx = shutdown_rx;
    tokio::select! {
        result = &mut servers => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
            }
        }
        _ = drain_rx.wait_for(|&s| s) => {
            // Give in-flight requests a bounded window to finish.
            match tokio::time::timeout(Duration::from_secs(config.server.shutdown_timeout_secs), &mut servers).await {
                Ok(Ok(_)) => tracing::info!("Servers drained"),
                Ok(Err(e)) => tracing::error!(error = %e, "Server error"),
                Err(_) => tracing::warn!("Timeout waiting for in-flight requests to finish."),
            }
        }
    }

    telemetry_guard.shutdown();
    Ok(())
}
