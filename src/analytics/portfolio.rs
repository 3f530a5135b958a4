use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::AllocationResult;

/// One asset of the illustrative allocation universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetProfile {
    pub name: String,
    pub expected_return: f64,
    pub volatility: f64,
}

/// Prior used by the view-blending allocator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPrior {
    pub name: String,
    pub market_weight: f64,
    pub prior_return: f64,
}

/// The fixed universe behind the Sharpe-proportional allocator. Not derived
/// from any price series.
pub fn default_universe() -> Vec<AssetProfile> {
    [
        ("US Equities", 0.095, 0.16),
        ("Intl Equities", 0.082, 0.18),
        ("Bonds", 0.042, 0.06),
        ("Real Estate", 0.071, 0.14),
        ("Commodities", 0.058, 0.20),
    ]
    .into_iter()
    .map(|(name, expected_return, volatility)| AssetProfile {
        name: name.to_string(),
        expected_return,
        volatility,
    })
    .collect()
}

/// Market priors for the blended allocator.
pub fn default_priors() -> Vec<MarketPrior> {
    [
        ("US Equities", 0.45, 0.085),
        ("Intl Equities", 0.25, 0.078),
        ("Bonds", 0.20, 0.040),
        ("Real Estate", 0.06, 0.065),
        ("Commodities", 0.04, 0.050),
    ]
    .into_iter()
    .map(|(name, market_weight, prior_return)| MarketPrior {
        name: name.to_string(),
        market_weight,
        prior_return,
    })
    .collect()
}

/// Illustrative manual views layered onto the priors.
pub fn default_views() -> HashMap<String, f64> {
    let mut views = HashMap::new();
    views.insert("US Equities".to_string(), 0.105);
    views.insert("Bonds".to_string(), 0.030);
    views
}

/// Weight each asset proportionally to its return/volatility ratio and
/// normalize to sum 1. The aggregate volatility treats assets as
/// uncorrelated. A degenerate universe (zero ratios) propagates NaN; the
/// caller is expected to check `AllocationResult::is_finite`.
pub fn sharpe_weights(universe: &[AssetProfile]) -> AllocationResult {
    let ratios: Vec<f64> = universe
        .iter()
        .map(|a| a.expected_return / a.volatility)
        .collect();
    let total: f64 = ratios.iter().sum();
    let weights: Vec<f64> = ratios.iter().map(|r| r / total).collect();

    let expected_return = universe
        .iter()
        .zip(&weights)
        .map(|(a, w)| w * a.expected_return)
        .sum::<f64>();
    let expected_volatility = universe
        .iter()
        .zip(&weights)
        .map(|(a, w)| (w * a.volatility).powi(2))
        .sum::<f64>()
        .sqrt();

    AllocationResult {
        assets: universe.iter().map(|a| a.name.clone()).collect(),
        weights,
        expected_return: Some(expected_return),
        expected_volatility: Some(expected_volatility),
    }
}

/// Blend market priors with manual views: an asset with a view takes the
/// arithmetic mean of prior and view, others keep the prior. Weights are the
/// blended returns normalized proportionally — no covariance step. All-zero
/// blended returns yield NaN weights.
pub fn blend_views(priors: &[MarketPrior], views: &HashMap<String, f64>) -> AllocationResult {
    let blended: Vec<f64> = priors
        .iter()
        .map(|p| match views.get(&p.name) {
            Some(view) => (p.prior_return + view) / 2.0,
            None => p.prior_return,
        })
        .collect();
    let total: f64 = blended.iter().sum();
    let weights: Vec<f64> = blended.iter().map(|b| b / total).collect();

    AllocationResult {
        assets: priors.iter().map(|p| p.name.clone()).collect(),
        weights,
        expected_return: None,
        expected_volatility: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharpe_weights_sum_to_one() {
        let result = sharpe_weights(&default_universe());
        let sum: f64 = result.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(result.is_finite());
        assert_eq!(result.assets.len(), result.weights.len());
    }

    #[test]
    fn sharpe_aggregates_match_definition() {
        let universe = default_universe();
        let result = sharpe_weights(&universe);

        let expected: f64 = universe
            .iter()
            .zip(&result.weights)
            .map(|(a, w)| w * a.expected_return)
            .sum();
        assert!((result.expected_return.unwrap() - expected).abs() < 1e-12);

        let vol: f64 = universe
            .iter()
            .zip(&result.weights)
            .map(|(a, w)| (w * a.volatility).powi(2))
            .sum::<f64>()
            .sqrt();
        assert!((result.expected_volatility.unwrap() - vol).abs() < 1e-12);
    }

    #[test]
    fn better_ratio_gets_more_weight() {
        let universe = vec![
            AssetProfile {
                name: "steady".to_string(),
                expected_return: 0.08,
                volatility: 0.05,
            },
            AssetProfile {
                name: "choppy".to_string(),
                expected_return: 0.08,
                volatility: 0.20,
            },
        ];
        let result = sharpe_weights(&universe);
        assert!(result.weights[0] > result.weights[1]);
    }

    #[test]
    fn zero_returns_propagate_nan() {
        let universe = vec![
            AssetProfile {
                name: "a".to_string(),
                expected_return: 0.0,
                volatility: 0.1,
            },
            AssetProfile {
                name: "b".to_string(),
                expected_return: 0.0,
                volatility: 0.2,
            },
        ];
        let result = sharpe_weights(&universe);
        assert!(!result.is_finite());
    }

    #[test]
    fn blended_weights_sum_to_one() {
        let result = blend_views(&default_priors(), &default_views());
        let sum: f64 = result.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(result.expected_return.is_none());
    }

    #[test]
    fn view_moves_asset_toward_view() {
        let priors = default_priors();
        let no_views = blend_views(&priors, &HashMap::new());
        let with_views = blend_views(&priors, &default_views());

        // US Equities has an upward view (0.085 -> blend with 0.105), so its
        // share of the normalized weights rises.
        let idx = priors
            .iter()
            .position(|p| p.name == "US Equities")
            .unwrap();
        assert!(with_views.weights[idx] > no_views.weights[idx]);

        // Bonds carries a downward view and loses weight.
        let bonds = priors.iter().position(|p| p.name == "Bonds").unwrap();
        assert!(with_views.weights[bonds] < no_views.weights[bonds]);
    }

    #[test]
    fn asset_without_view_keeps_prior_ratio() {
        let priors = vec![
            MarketPrior {
                name: "a".to_string(),
                market_weight: 0.5,
                prior_return: 0.06,
            },
            MarketPrior {
                name: "b".to_string(),
                market_weight: 0.5,
                prior_return: 0.03,
            },
        ];
        let result = blend_views(&priors, &HashMap::new());
        // With no views the weights are simply priors normalized: 2/3, 1/3.
        assert!((result.weights[0] - 2.0 / 3.0).abs() < 1e-9);
        assert!((result.weights[1] - 1.0 / 3.0).abs() < 1e-9);
    }
}
