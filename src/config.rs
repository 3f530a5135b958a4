use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedConfig = Arc<RwLock<Config>>;

/// Default inputs for the option pricer panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionDefaults {
    pub days_to_expiry: f64,
    pub rate_pct: f64,
    pub vol_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Series
    pub symbol: String,
    pub days: usize,

    // Option pricer
    pub option: OptionDefaults,

    // Monte Carlo
    pub mc_paths: usize,
    pub mc_horizon_days: usize,

    // Backtest
    pub initial_capital: f64,

    // Randomness; None seeds from entropy
    pub seed: Option<u64>,

    // Output
    pub report_dir: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            symbol: env("SYMBOL", "AAPL"),
            days: env("DAYS", "180").parse().unwrap_or(180),
            option: OptionDefaults {
                days_to_expiry: env("OPTION_DAYS", "30").parse().unwrap_or(30.0),
                rate_pct: env("OPTION_RATE_PCT", "5").parse().unwrap_or(5.0),
                vol_pct: env("OPTION_VOL_PCT", "25").parse().unwrap_or(25.0),
            },
            mc_paths: env("MC_PATHS", "10000").parse().unwrap_or(10_000),
            mc_horizon_days: env("MC_HORIZON_DAYS", "252").parse().unwrap_or(252),
            initial_capital: env("INITIAL_CAPITAL", "10000").parse().unwrap_or(10_000.0),
            seed: std::env::var("SEED").ok().and_then(|s| s.parse().ok()),
            report_dir: env("REPORT_DIR", "reports"),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    pub fn shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}
