use crate::models::{PriceSeries, RiskSummary};

const TRADING_DAYS: f64 = 252.0;
const RISK_FREE_RATE: f64 = 0.02;

/// Returns-based risk summary over a close series: population-variance
/// annualized volatility, empirical 5%/1% return quantiles, annualized
/// Sharpe against a 2% risk-free rate, and running-peak max drawdown.
/// Fewer than two points yields the zero summary.
pub fn compute(series: &PriceSeries) -> RiskSummary {
    let closes = series.closes();
    if closes.len() < 2 {
        return RiskSummary {
            annualized_volatility: 0.0,
            var95: 0.0,
            var99: 0.0,
            sharpe: 0.0,
            max_drawdown: 0.0,
        };
    }

    let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let annualized_volatility = (variance * TRADING_DAYS).sqrt();

    let mut sorted = returns;
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let var95 = sorted[(sorted.len() as f64 * 0.05).floor() as usize];
    let var99 = sorted[(sorted.len() as f64 * 0.01).floor() as usize];

    let sharpe = if annualized_volatility > 0.0 {
        (mean * TRADING_DAYS - RISK_FREE_RATE) / annualized_volatility
    } else {
        0.0
    };

    let mut peak = closes[0];
    let mut max_drawdown = 0.0f64;
    for &close in &closes {
        if close > peak {
            peak = close;
        }
        let drawdown = (peak - close) / peak;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    RiskSummary {
        annualized_volatility,
        var95,
        var99,
        sharpe,
        max_drawdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::generator;
    use crate::test_helpers::{make_closes, seeded_rng};

    #[test]
    fn degenerate_series_yields_zero_summary() {
        let s = make_closes(&[100.0]);
        let r = compute(&s);
        assert_eq!(r.annualized_volatility, 0.0);
        assert_eq!(r.sharpe, 0.0);
        assert_eq!(r.max_drawdown, 0.0);
    }

    #[test]
    fn flat_series_has_no_vol_or_drawdown() {
        let s = make_closes(&[100.0; 30]);
        let r = compute(&s);
        assert!((r.annualized_volatility - 0.0).abs() < 1e-12);
        assert_eq!(r.sharpe, 0.0);
        assert!((r.max_drawdown - 0.0).abs() < 1e-12);
    }

    #[test]
    fn return_quantiles_ordered() {
        let mut rng = seeded_rng();
        let s = generator::generate("AAPL", 250, &mut rng);
        let r = compute(&s);
        assert!(r.var99 <= r.var95);
        assert!(r.annualized_volatility > 0.0);
    }

    #[test]
    fn known_drawdown() {
        // Peak 120, trough 90: drawdown 25%.
        let s = make_closes(&[100.0, 120.0, 110.0, 90.0, 115.0]);
        let r = compute(&s);
        assert!((r.max_drawdown - 0.25).abs() < 1e-9);
    }

    #[test]
    fn drawdown_tracks_running_peak_not_global_max() {
        // The later higher peak must not erase the earlier decline.
        let s = make_closes(&[100.0, 80.0, 150.0, 140.0]);
        let r = compute(&s);
        assert!((r.max_drawdown - 0.2).abs() < 1e-9);
    }

    #[test]
    fn volatility_matches_population_formula() {
        let closes = [100.0, 102.0, 101.0, 104.0, 103.0];
        let s = make_closes(&closes);
        let r = compute(&s);

        let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let variance =
            returns.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / returns.len() as f64;
        let expected = (variance * TRADING_DAYS).sqrt();
        assert!((r.annualized_volatility - expected).abs() < 1e-12);
    }
}
