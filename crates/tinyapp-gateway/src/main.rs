use clap::Parser;
use std::net::SocketAddr;
use tinyapp_gateway::cli::CLI;
use tinyapp_gateway::telemetry::init_tracing;
use tinyapp_gateway::{App, Bootstrap};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    let session = config.session_accessor()?;
    let state = Bootstrap::builder()
        .public_base_url(config.public_base_url.clone())
        .session(session)
        .seed_demo(config.seed_demo)
        .build()
        .into_state();

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(
        listen_addr = %listener.local_addr()?,
        public_base_url = %config.public_base_url,
        session_mode = %config.session_mode,
        "starting gateway server"
    );

    axum::serve(
        listener,
        App::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
