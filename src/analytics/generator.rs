use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::Rng;

use crate::analytics::indicators;
use crate::models::{PricePoint, PriceSeries};

/// Constant daily drift applied before the uniform shock.
const DAILY_DRIFT: f64 = 0.0002;
/// Half-width of the uniform daily shock.
const DAILY_VOLATILITY: f64 = 0.02;
/// High/low are drawn within this fraction of the walked price.
const INTRADAY_RANGE: f64 = 0.02;

pub const DEFAULT_BASE_PRICE: f64 = 100.0;
pub const VOLUME_MIN: u64 = 1_000_000;
pub const VOLUME_MAX: u64 = 11_000_000;

/// Base price per symbol. Anything not listed starts at 100.
fn base_price(symbol: &str) -> f64 {
    match symbol {
        "AAPL" => 178.5,
        "GOOGL" => 141.2,
        "MSFT" => 378.9,
        "AMZN" => 151.3,
        "TSLA" => 242.8,
        "NVDA" => 495.2,
        "META" => 354.7,
        "NFLX" => 445.6,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// Generate a synthetic OHLCV series of exactly `days` points, one calendar
/// day apart, ending yesterday. The walked price bounds high/low; open and
/// close are drawn independently inside [low, high], so their ordering
/// relative to each other is not fixed. The returned series is already
/// annotated with indicators.
pub fn generate(symbol: &str, days: usize, rng: &mut StdRng) -> PriceSeries {
    let start = Utc::now().date_naive() - Duration::days(days as i64);
    let mut price = base_price(symbol);
    let mut points = Vec::with_capacity(days);

    for i in 0..days {
        let noise = rng.gen_range(-DAILY_VOLATILITY..DAILY_VOLATILITY);
        price *= 1.0 + DAILY_DRIFT + noise;

        let high = price * (1.0 + rng.gen::<f64>() * INTRADAY_RANGE);
        let low = price * (1.0 - rng.gen::<f64>() * INTRADAY_RANGE);
        let open = rng.gen_range(low..=high);
        let close = rng.gen_range(low..=high);
        let volume = rng.gen_range(VOLUME_MIN..VOLUME_MAX) as f64;

        points.push(PricePoint::new(
            start + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        ));
    }

    indicators::annotate(PriceSeries::new(points), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::seeded_rng;

    #[test]
    fn exact_length_and_ascending_dates() {
        let mut rng = seeded_rng();
        for days in [1usize, 5, 60] {
            let s = generate("AAPL", days, &mut rng);
            assert_eq!(s.len(), days);
            for w in s.as_slice().windows(2) {
                assert_eq!(w[1].date - w[0].date, Duration::days(1));
            }
        }
    }

    #[test]
    fn high_bounds_low_and_prices_positive() {
        let mut rng = seeded_rng();
        let s = generate("TSLA", 120, &mut rng);
        for p in &s {
            assert!(p.high >= p.low);
            assert!(p.low > 0.0);
            assert!(p.open >= p.low && p.open <= p.high);
            assert!(p.close >= p.low && p.close <= p.high);
            assert!(p.volume >= VOLUME_MIN as f64);
            assert!(p.volume < VOLUME_MAX as f64);
        }
    }

    #[test]
    fn unknown_symbol_starts_near_default_base() {
        let mut rng = seeded_rng();
        let s = generate("ZZZZ", 1, &mut rng);
        // One step away from the base price, shock bounded by 2%.
        let p = &s[0];
        assert!(p.close > DEFAULT_BASE_PRICE * 0.95);
        assert!(p.close < DEFAULT_BASE_PRICE * 1.05);
    }

    #[test]
    fn generated_series_is_annotated() {
        let mut rng = seeded_rng();
        let s = generate("AAPL", 60, &mut rng);
        assert!(s[18].ma20.is_none());
        let expected: f64 = s.closes()[..20].iter().sum::<f64>() / 20.0;
        assert!((s[19].ma20.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn fixed_seed_reproduces_series() {
        let a = generate("MSFT", 40, &mut seeded_rng());
        let b = generate("MSFT", 40, &mut seeded_rng());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.close, y.close);
            assert_eq!(x.volume, y.volume);
        }
    }
}
