use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Call/put premium pair from the approximate pricer. Both legs are floored
/// at `analytics::options::MIN_PREMIUM` after the parity step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionQuote {
    pub call: f64,
    pub put: f64,
}

/// Monte Carlo outcome. `var95`/`var99` are terminal *price levels* at the
/// 5th/1st percentile of the sorted trials, not losses; the risk summary's
/// fields of the same name are return quantiles. The two deliberately do not
/// share a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub expected_value: f64,
    pub var95: f64,
    pub var99: f64,
    /// First `min(100, paths)` terminal values in trial order, for display.
    pub sample: Vec<f64>,
}

/// Parallel asset/weight arrays from either allocator. The aggregate fields
/// are populated by the Sharpe allocator only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    pub assets: Vec<String>,
    pub weights: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_volatility: Option<f64>,
}

impl AllocationResult {
    pub fn is_finite(&self) -> bool {
        self.weights.iter().all(|w| w.is_finite())
    }
}

/// One day of the crossover strategy's portfolio value trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestRecord {
    pub date: NaiveDate,
    pub value: f64,
    pub return_pct: f64,
}

/// Crossover backtest trace plus the derived summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossoverReport {
    pub initial_capital: f64,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub trades: usize,
    pub records: Vec<BacktestRecord>,
}

/// Returns-based risk summary. `var95`/`var99` here are empirical quantiles
/// of the daily *return* distribution (loss-like, usually negative).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskSummary {
    pub annualized_volatility: f64,
    pub var95: f64,
    pub var99: f64,
    pub sharpe: f64,
    pub max_drawdown: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_finiteness() {
        let ok = AllocationResult {
            assets: vec!["A".to_string(), "B".to_string()],
            weights: vec![0.6, 0.4],
            expected_return: None,
            expected_volatility: None,
        };
        assert!(ok.is_finite());

        let degenerate = AllocationResult {
            assets: vec!["A".to_string()],
            weights: vec![f64::NAN],
            expected_return: None,
            expected_volatility: None,
        };
        assert!(!degenerate.is_finite());
    }

    #[test]
    fn simulation_result_serializes() {
        let r = SimulationResult {
            expected_value: 105.2,
            var95: 80.1,
            var99: 70.5,
            sample: vec![101.0, 99.5],
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert!((back.expected_value - 105.2).abs() < 1e-9);
        assert_eq!(back.sample.len(), 2);
    }
}
