use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, OptionDefaults};
use crate::models::{PricePoint, PriceSeries};

/// Create points from (open, high, low, close) tuples with sequential daily
/// dates and a fixed volume.
pub fn make_points(data: &[(f64, f64, f64, f64)]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

    let points: Vec<PricePoint> = data
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| {
            PricePoint::new(base + Duration::days(i as i64), o, h, l, c, 100.0)
        })
        .collect();

    PriceSeries::new(points)
}

/// Create a flat-bodied series from closes only (open = close, 1% range).
pub fn make_closes(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

    let points: Vec<PricePoint> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            PricePoint::new(
                base + Duration::days(i as i64),
                c,
                c * 1.01,
                c * 0.99,
                c,
                100.0,
            )
        })
        .collect();

    PriceSeries::new(points)
}

/// A fixed-seed RNG so generator/simulator tests are reproducible.
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A Config suitable for testing — small Monte Carlo, fixed seed, temp
/// report dir.
pub fn default_test_config() -> Config {
    Config {
        symbol: "AAPL".to_string(),
        days: 120,
        option: OptionDefaults {
            days_to_expiry: 30.0,
            rate_pct: 5.0,
            vol_pct: 25.0,
        },
        mc_paths: 500,
        mc_horizon_days: 60,
        initial_capital: 10_000.0,
        seed: Some(42),
        report_dir: std::env::temp_dir()
            .join("quantdash_test")
            .to_string_lossy()
            .to_string(),
        log_level: "error".to_string(),
    }
}
