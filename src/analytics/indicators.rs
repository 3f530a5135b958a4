use rand::rngs::StdRng;
use rand::Rng;

use crate::models::PriceSeries;

const MA_SHORT: usize = 20;
const MA_LONG: usize = 50;
const RSI_PERIOD: usize = 14;
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;
const BOLLINGER_PERIOD: usize = 20;
const BOLLINGER_WIDTH: f64 = 2.0;

/// Annotate every point with the trailing-window indicators plus the
/// cosmetic portfolio/benchmark/prediction overlays. Length, order and
/// dates are unchanged; fields whose window has not filled stay `None`.
pub fn annotate(mut series: PriceSeries, rng: &mut StdRng) -> PriceSeries {
    let closes = series.closes();
    let n = closes.len();

    // MACD line per index, kept around for the signal average.
    let mut macd_line: Vec<Option<f64>> = vec![None; n];

    for (i, point) in series.iter_mut().enumerate() {
        let close = closes[i];

        if i + 1 >= MA_SHORT {
            point.ma20 = Some(mean(&closes[i + 1 - MA_SHORT..=i]));
        }
        if i + 1 >= MA_LONG {
            point.ma50 = Some(mean(&closes[i + 1 - MA_LONG..=i]));
        }
        if i >= RSI_PERIOD {
            point.rsi = Some(rsi(&closes[i - RSI_PERIOD..=i]));
        }
        if i >= MACD_SLOW {
            // Both EMAs are recomputed over the whole prefix each bar,
            // seeded with the first close of the series.
            let macd = ema(&closes[..=i], MACD_FAST) - ema(&closes[..=i], MACD_SLOW);
            macd_line[i] = Some(macd);
            point.macd = Some(macd);
        }
        if i >= MACD_SLOW + MACD_SIGNAL - 1 {
            let trailing: Vec<f64> = macd_line[i + 1 - MACD_SIGNAL..=i]
                .iter()
                .map(|m| m.unwrap_or(0.0))
                .collect();
            point.macd_signal = Some(mean(&trailing));
        }
        if i + 1 >= BOLLINGER_PERIOD {
            let window = &closes[i + 1 - BOLLINGER_PERIOD..=i];
            let sma = mean(window);
            let sd = population_stddev(window, sma);
            point.upper_band = Some(sma + BOLLINGER_WIDTH * sd);
            point.lower_band = Some(sma - BOLLINGER_WIDTH * sd);
        }

        // Display-only overlays; random by design.
        point.portfolio = Some(close * (1.0 + rng.gen::<f64>() * 0.1));
        point.benchmark = Some(close * (1.0 + rng.gen::<f64>() * 0.05));
        point.prediction = if rng.gen::<f64>() < 0.5 {
            Some(close * (1.0 + rng.gen_range(-0.05..0.05)))
        } else {
            None
        };
    }

    series
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_stddev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// EMA over the full slice, seeded with its first element.
fn ema(values: &[f64], period: usize) -> f64 {
    let mult = 2.0 / (period as f64 + 1.0);
    let mut ema = values[0];
    for &v in &values[1..] {
        ema = v * mult + ema * (1.0 - mult);
    }
    ema
}

/// Classic RSI over a window of `RSI_PERIOD + 1` closes (14 deltas).
/// A zero average loss counts as 1 so the ratio stays finite.
fn rsi(window: &[f64]) -> f64 {
    let mut gains = 0.0;
    let mut losses = 0.0;
    for w in window.windows(2) {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            gains += delta;
        } else {
            losses += -delta;
        }
    }
    let avg_gain = gains / RSI_PERIOD as f64;
    let avg_loss = losses / RSI_PERIOD as f64;
    let rs = if avg_loss == 0.0 {
        avg_gain
    } else {
        avg_gain / avg_loss
    };
    100.0 - 100.0 / (1.0 + rs)
}
