use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use quantdash::config::Config;
use quantdash::engine::DashboardEngine;
use quantdash::report::AnalysisReport;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let symbol = cfg.symbol.clone();
    let report_dir = cfg.report_dir.clone();

    let mut engine = DashboardEngine::new(cfg.shared()).await;
    engine.run_all(&symbol).await?;

    let report = AnalysisReport::from_state(engine.state());
    report.print_summary();

    let path = std::path::Path::new(&report_dir).join(format!(
        "analysis_{}_{}.json",
        report.symbol,
        report.generated_at.format("%Y%m%d%H%M%S"),
    ));
    report.save(&path)?;
    println!("\nReport saved to: {}", path.display());

    Ok(())
}
