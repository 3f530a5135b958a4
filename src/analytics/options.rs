use crate::models::OptionQuote;

/// Smallest premium either leg can quote at.
pub const MIN_PREMIUM: f64 = 0.01;

const DAYS_PER_YEAR: f64 = 365.0;

/// Price a call/put pair from spot, strike, days to expiry, and
/// percentage-denominated rate and volatility.
///
/// The normal CDF uses a closed-form approximation rather than the exact
/// integral, and the base price gets an in-the-money bump or an
/// out-of-the-money floor before the minimum-tick clamp. The put comes from
/// parity against the adjusted call. The numbers are illustrative, not a
/// finance-grade surface.
pub fn price(
    spot: f64,
    strike: f64,
    days_to_expiry: f64,
    rate_pct: f64,
    vol_pct: f64,
) -> OptionQuote {
    let t = days_to_expiry / DAYS_PER_YEAR;
    let r = rate_pct / 100.0;
    let sigma = vol_pct / 100.0;

    let sqrt_t = t.sqrt();
    let d1 = ((spot / strike).ln() + (r + sigma * sigma / 2.0) * t) / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;

    let discounted_strike = strike * (-r * t).exp();
    let mut call = spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2);

    if spot > strike {
        call += sigma * spot * 0.1 * (1.0 + (spot - strike).abs() / strike);
    } else {
        call = call.max(t.max(0.1) * sigma * spot * 0.05);
    }
    let call = call.max(MIN_PREMIUM);

    let put = (call + discounted_strike - spot).max(MIN_PREMIUM);

    OptionQuote { call, put }
}

/// Closed-form standard normal CDF approximation:
/// 0.5 * (1 + sign(x) * sqrt(1 - exp(-2x^2/pi))).
fn norm_cdf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    0.5 * (1.0 + sign * (1.0 - (-2.0 * x * x / std::f64::consts::PI).exp()).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdf_approximation_shape() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!(norm_cdf(3.0) > 0.99);
        assert!(norm_cdf(-3.0) < 0.01);
        // Symmetry of the approximation.
        let x = 0.7;
        assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn both_legs_floored() {
        // Deep out of the money, near-zero time: both legs clamp small.
        let q = price(10.0, 500.0, 1.0, 5.0, 25.0);
        assert!(q.call >= MIN_PREMIUM);
        assert!(q.put >= MIN_PREMIUM);
    }

    #[test]
    fn at_the_money_reference_inputs() {
        let q = price(100.0, 100.0, 30.0, 5.0, 25.0);
        assert!(q.call >= MIN_PREMIUM && q.call <= 100.0);
        assert!(q.put >= MIN_PREMIUM && q.put <= 100.0);
        // Positive rates favor the call at the money.
        assert!(q.put < q.call);
    }

    #[test]
    fn parity_holds_when_unclamped() {
        let spot = 105.0;
        let strike = 100.0;
        let days = 60.0;
        let rate = 5.0;
        let q = price(spot, strike, days, rate, 25.0);

        let t = days / DAYS_PER_YEAR;
        let r = rate / 100.0;
        let parity_gap = strike * (-r * t).exp() - spot;
        if q.call > MIN_PREMIUM && q.put > MIN_PREMIUM {
            assert!((q.put - q.call - parity_gap).abs() < 1e-9);
        }
    }

    #[test]
    fn in_the_money_bump_raises_call() {
        // Same inputs except moneyness; the ITM adjustment adds premium on
        // top of the intrinsic gain.
        let itm = price(120.0, 100.0, 30.0, 5.0, 25.0);
        let atm = price(100.0, 100.0, 30.0, 5.0, 25.0);
        assert!(itm.call > atm.call + (120.0 - 100.0) * 0.5);
    }

    #[test]
    fn otm_floor_scales_with_spot_and_vol() {
        let q = price(90.0, 100.0, 5.0, 5.0, 25.0);
        // t = 5/365 < 0.1, so the floor uses 0.1.
        let floor = 0.1 * 0.25 * 90.0 * 0.05;
        assert!(q.call >= floor - 1e-12);
    }
}
