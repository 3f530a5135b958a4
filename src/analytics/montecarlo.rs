use rand::rngs::StdRng;
use rand::Rng;

use crate::models::SimulationResult;

/// Fixed daily drift applied on every step of every path.
const DAILY_DRIFT: f64 = 0.0008;
/// Half-width of the uniform per-step shock.
const DAILY_SHOCK: f64 = 0.02;
/// How many raw terminal values are kept for display.
const SAMPLE_LIMIT: usize = 100;

/// Walk `paths` independent price paths `horizon_days` steps forward from
/// `start_price` and summarize the terminal distribution. `var95`/`var99`
/// are the sorted terminal prices at the 5%/1% index — price levels, not
/// losses. Runs to completion synchronously; offloading is the caller's
/// concern.
pub fn simulate(
    start_price: f64,
    paths: usize,
    horizon_days: usize,
    rng: &mut StdRng,
) -> SimulationResult {
    let mut terminals = Vec::with_capacity(paths);
    for _ in 0..paths {
        let mut price = start_price;
        for _ in 0..horizon_days {
            price *= 1.0 + DAILY_DRIFT + rng.gen_range(-DAILY_SHOCK..DAILY_SHOCK);
        }
        terminals.push(price);
    }

    let sample: Vec<f64> = terminals.iter().take(SAMPLE_LIMIT).copied().collect();
    let expected_value = terminals.iter().sum::<f64>() / terminals.len() as f64;

    let mut sorted = terminals;
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let var95 = sorted[(paths as f64 * 0.05).floor() as usize];
    let var99 = sorted[(paths as f64 * 0.01).floor() as usize];

    SimulationResult {
        expected_value,
        var95,
        var99,
        sample,
    }
}
