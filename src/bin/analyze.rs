use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use quantdash::config::Config;
use quantdash::engine::DashboardEngine;
use quantdash::ingest;
use quantdash::report::AnalysisReport;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // Parse CLI args: file path, optional label
    let args: Vec<String> = std::env::args().collect();

    let path = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            println!("Usage: analyze <file.csv> [label]");
            return Ok(());
        }
    };
    let label = args.get(2).cloned().unwrap_or_else(|| "uploaded".to_string());

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║          QUANTDASH — CSV ANALYZER                        ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path))?;

    let rows = match ingest::parse_csv(&text) {
        Ok(rows) => rows,
        Err(err) => {
            // Ingestion failures are not fatal: report and exit cleanly with
            // an empty dataset, like the dashboard surfaces a notification.
            println!("ERROR: could not ingest {}: {}", path, err);
            return Ok(());
        }
    };
    println!("Ingested {} rows from {}", rows.len(), path);
    println!();

    let report_dir = cfg.report_dir.clone();
    let mut engine = DashboardEngine::new(cfg.shared()).await;
    engine.load_rows(&label, &rows).await;
    engine.run_derived().await?;

    let report = AnalysisReport::from_state(engine.state());
    report.print_summary();

    let out = std::path::Path::new(&report_dir).join(format!(
        "analysis_{}_{}.json",
        report.symbol,
        report.generated_at.format("%Y%m%d%H%M%S"),
    ));
    report.save(&out)?;
    println!("\nReport saved to: {}", out.display());

    Ok(())
}
