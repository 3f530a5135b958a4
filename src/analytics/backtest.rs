use crate::models::{BacktestRecord, CrossoverReport, PriceSeries};

/// The backtest needs both moving averages at i-1 and i, so it starts once
/// the 50-day window has filled.
const START_INDEX: usize = 50;

pub const DEFAULT_CAPITAL: f64 = 10_000.0;

/// MA20/MA50 crossover strategy over an annotated series. Golden cross buys
/// as many whole shares as capital allows; death cross liquidates fully. No
/// shorting, no fees, no partial fills. The trace covers every day from
/// index 50 onward; series shorter than that produce an empty trace.
pub fn run_crossover(series: &PriceSeries, initial_capital: f64) -> CrossoverReport {
    let mut capital = initial_capital;
    let mut shares: u64 = 0;
    let mut trades = 0usize;
    let mut records = Vec::new();

    for i in START_INDEX..series.len() {
        let prev = &series[i - 1];
        let point = &series[i];

        if let (Some(fast_prev), Some(slow_prev), Some(fast), Some(slow)) =
            (prev.ma20, prev.ma50, point.ma20, point.ma50)
        {
            if fast_prev <= slow_prev && fast > slow && shares == 0 {
                shares = (capital / point.close).floor() as u64;
                if shares > 0 {
                    capital -= shares as f64 * point.close;
                    trades += 1;
                }
            } else if fast_prev >= slow_prev && fast < slow && shares > 0 {
                capital += shares as f64 * point.close;
                shares = 0;
                trades += 1;
            }
        }

        let value = capital + shares as f64 * point.close;
        records.push(BacktestRecord {
            date: point.date,
            value,
            return_pct: (value - initial_capital) / initial_capital * 100.0,
        });
    }

    let final_value = records
        .last()
        .map(|r| r.value)
        .unwrap_or(initial_capital);

    CrossoverReport {
        initial_capital,
        final_value,
        total_return_pct: (final_value - initial_capital) / initial_capital * 100.0,
        trades,
        records,
    }
}
