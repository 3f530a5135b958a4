use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{
    AllocationResult, CrossoverReport, OptionQuote, RiskSummary, SimulationResult,
};
use crate::session::SessionState;

/// The exported analysis bundle. Serialized as one JSON document; consumed
/// by whatever saves or downloads it. No schema versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    pub points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<OptionQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpe: Option<AllocationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blended: Option<AllocationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtest: Option<CrossoverReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskSummary>,
}

impl AnalysisReport {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            symbol: state.symbol.clone(),
            generated_at: state.generated_at.unwrap_or_else(Utc::now),
            points: state.series.len(),
            quote: state.quote,
            simulation: state.simulation.clone(),
            sharpe: state.sharpe.clone(),
            blended: state.blended.clone(),
            backtest: state.backtest.clone(),
            risk: state.risk,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing analysis report")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating report dir {}", dir.display()))?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("writing report to {}", path.display()))
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(70));
        println!("  ANALYSIS REPORT — {}", self.symbol);
        println!("{}", "=".repeat(70));
        println!(
            "  Generated:   {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("  Points:      {}", self.points);

        if let Some(q) = &self.quote {
            println!();
            println!("  OPTIONS");
            println!("  ───────────────────────────────────");
            println!("  Call:        ${:.2}", q.call);
            println!("  Put:         ${:.2}", q.put);
        }

        if let Some(sim) = &self.simulation {
            println!();
            println!("  MONTE CARLO (terminal prices)");
            println!("  ───────────────────────────────────");
            println!("  Expected:    ${:.2}", sim.expected_value);
            println!("  VaR 95:      ${:.2}", sim.var95);
            println!("  VaR 99:      ${:.2}", sim.var99);
        }

        if let Some(alloc) = &self.sharpe {
            println!();
            println!("  SHARPE ALLOCATION");
            println!("  ───────────────────────────────────");
            print_allocation(alloc);
            if let (Some(ret), Some(vol)) = (alloc.expected_return, alloc.expected_volatility) {
                println!("  Exp Return:  {:.2}%", ret * 100.0);
                println!("  Exp Vol:     {:.2}%", vol * 100.0);
            }
        }

        if let Some(alloc) = &self.blended {
            println!();
            println!("  BLENDED ALLOCATION");
            println!("  ───────────────────────────────────");
            print_allocation(alloc);
        }

        if let Some(bt) = &self.backtest {
            println!();
            println!("  MA CROSSOVER BACKTEST");
            println!("  ───────────────────────────────────");
            println!("  Initial:     ${:.2}", bt.initial_capital);
            println!("  Final:       ${:.2}", bt.final_value);
            println!("  Return:      {:+.1}%", bt.total_return_pct);
            println!("  Trades:      {}", bt.trades);
        }

        if let Some(risk) = &self.risk {
            println!();
            println!("  RISK (daily returns)");
            println!("  ───────────────────────────────────");
            println!("  Ann. Vol:    {:.2}%", risk.annualized_volatility * 100.0);
            println!("  VaR 95:      {:.2}%", risk.var95 * 100.0);
            println!("  VaR 99:      {:.2}%", risk.var99 * 100.0);
            println!("  Sharpe:      {:.2}", risk.sharpe);
            println!("  Max DD:      {:.1}%", risk.max_drawdown * 100.0);
        }

        println!("{}", "=".repeat(70));
    }
}

fn print_allocation(alloc: &AllocationResult) {
    if !alloc.is_finite() {
        println!("  (degenerate inputs — no finite weights)");
        return;
    }
    for (asset, weight) in alloc.assets.iter().zip(&alloc.weights) {
        println!("  {:>14}: {:>5.1}%", asset, weight * 100.0);
    }
}
