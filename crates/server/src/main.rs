use anyhow::Context;
use predictcare_config::Settings;
use predictcare_server::{serve, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    telemetry::init_tracing(&settings.observability)?;
    tracing::info!(
        service = %settings.service.name,
        host = %settings.server.host,
        port = settings.server.port,
        "Starting PredictCare"
    );
    telemetry::log_effective_settings(&settings);

    let metrics = if settings.observability.metrics_enabled {
        Some(telemetry::install_metrics_recorder()?)
    } else {
        None
    };

    serve(settings, metrics).await?;
    Ok(())
}
