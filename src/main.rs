// Preview entry point - Dependency wiring and a single fetch of the default selection
use std::sync::Arc;
use std::time::Duration;

use sensor_dashboard::{Dashboard, HttpTransport, load_dashboard_config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create transport (infrastructure layer)
    let transport = Arc::new(HttpTransport::new(Duration::from_secs(config.api.timeout_secs))?);

    // Create dashboard (application layer)
    let mut dashboard = Dashboard::from_config(&config, transport)?;

    let chart = dashboard.on_refresh_requested().await;
    tracing::info!("{}", dashboard.status());

    if chart.is_empty() {
        tracing::info!("{}: nothing to show", chart.title);
        return Ok(());
    }

    tracing::info!(
        "{}: {} line(s), range {} .. {}",
        chart.title,
        chart.lines.len(),
        chart.min_text.as_deref().unwrap_or("-"),
        chart.max_text.as_deref().unwrap_or("-")
    );
    for line in &chart.lines {
        tracing::info!("  {} ({}): {} points", line.parameter, line.color, line.points.len());
    }
    let x_axis: Vec<&str> = chart.x_labels.iter().map(|l| l.text.as_str()).collect();
    tracing::info!("  x axis: {}", x_axis.join(" | "));

    Ok(())
}
