use posture_watch::config::Configuration;
use posture_watch::coordinator::CoordinatorBuilder;
use posture_watch::error::AppError;
use posture_watch::report::PostureReport;
use posture_watch::source::PlaybackSource;
use std::time::Duration;
use tracing::Level;

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();

    let config_path = std::env::var("POSTURE_CONFIG").ok();
    let configuration = Configuration::load(config_path.as_deref())?;

    let Some(script_path) = std::env::args().nth(1) else {
        tracing::error!("Usage: posture-watch <landmark-script.jsonl>");
        return Ok(());
    };

    let source = PlaybackSource::from_path(&script_path)?
        .with_frame_interval(Duration::from_millis(configuration.frame_interval_ms));

    tracing::info!(script = %script_path, "starting posture analysis");

    let coordinator = CoordinatorBuilder::new(configuration)
        .source(Box::new(source))
        .build()?;

    let session = coordinator.wait().await?;
    let report = PostureReport::from_session(&session);
    tracing::info!(total_alerts = report.total_alerts, "analysis complete");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
