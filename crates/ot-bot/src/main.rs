use anyhow::Context;
use ot_bot::{router, AppState, LineClient, Settings};
use ot_form::{FormRenderer, OutputDir};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env().context("Failed to load configuration")?;
    info!(
        bind_addr = %settings.bind_addr,
        output_dir = %settings.output_dir.display(),
        font = %settings.font_ttf_path.display(),
        "Starting ot-bot"
    );

    let renderer = FormRenderer::shared(&settings.font_ttf_path)
        .context("Failed to load form font")?
        .clone();
    let output =
        OutputDir::create(&settings.output_dir).context("Failed to create output directory")?;
    let messenger = Arc::new(LineClient::new(
        &settings.line_api_base,
        &settings.line_channel_access_token,
    )?);

    let state = AppState::new(&settings.line_channel_secret, renderer, output, messenger);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_addr))?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
