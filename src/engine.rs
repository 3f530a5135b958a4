use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::SharedConfig;
use crate::ingest::RawRow;
use crate::session::{self, OptionInputs, SessionState};

/// Owns the session state and drives the command functions in response to
/// user triggers. All analytics run to completion before a result is stored;
/// the Monte Carlo run, the one user-perceptible computation, is offloaded
/// to a blocking thread. Re-triggering a computation replaces its slot; a
/// superseded run finishes and its output is dropped.
pub struct DashboardEngine {
    config: SharedConfig,
    state: SessionState,
    rng: StdRng,
    sim_epoch: u64,
}

impl DashboardEngine {
    pub async fn new(config: SharedConfig) -> Self {
        let cfg = config.read().await;

        info!("{}", "=".repeat(60));
        info!("quantdash analytics engine starting");
        info!("Symbol: {} ({} days)", cfg.symbol, cfg.days);
        info!(
            "Monte Carlo: {} paths x {} days",
            cfg.mc_paths, cfg.mc_horizon_days
        );
        match cfg.seed {
            Some(seed) => info!("Seed: {}", seed),
            None => info!("Seed: entropy"),
        }
        info!("{}", "=".repeat(60));

        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        drop(cfg);

        Self {
            config,
            state: SessionState::default(),
            rng,
            sim_epoch: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Regenerate the series for a symbol and clear derived results.
    pub async fn change_symbol(&mut self, symbol: &str) {
        let cfg = self.config.read().await.clone();
        let state = std::mem::take(&mut self.state);
        self.state = session::change_symbol(state, symbol, &cfg, &mut self.rng);
        debug!("series rebuilt for {}", symbol);
    }

    /// Replace the series with ingested rows (file upload path).
    pub async fn load_rows(&mut self, label: &str, rows: &[RawRow]) {
        let state = std::mem::take(&mut self.state);
        self.state = session::load_rows(state, label, rows, &mut self.rng);
        debug!("series loaded from {} ingested rows", self.state.series.len());
    }

    pub fn price_option(&mut self, inputs: OptionInputs) {
        let state = std::mem::take(&mut self.state);
        self.state = session::price_option(state, inputs);
    }

    /// Run the Monte Carlo on a blocking thread. The epoch guard keeps a
    /// superseded run from overwriting a newer trigger's result; the stale
    /// run still completes and is discarded.
    pub async fn run_simulation(&mut self) -> Result<()> {
        let cfg = self.config.read().await.clone();
        let start = self
            .state
            .series
            .last_close()
            .unwrap_or(crate::analytics::generator::DEFAULT_BASE_PRICE);
        let derived_seed = self.rng.gen::<u64>();

        self.sim_epoch += 1;
        let epoch = self.sim_epoch;

        let result = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::seed_from_u64(derived_seed);
            crate::analytics::montecarlo::simulate(
                start,
                cfg.mc_paths,
                cfg.mc_horizon_days,
                &mut rng,
            )
        })
        .await?;

        if epoch == self.sim_epoch {
            self.state.simulation = Some(result);
        } else {
            debug!("discarding superseded simulation (epoch {})", epoch);
        }
        Ok(())
    }

    pub fn refresh_allocations(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.state = session::refresh_allocations(state);
    }

    pub async fn run_backtest(&mut self) {
        let cfg = self.config.read().await.clone();
        let state = std::mem::take(&mut self.state);
        self.state = session::run_backtest(state, &cfg);
    }

    pub fn refresh_risk(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.state = session::refresh_risk(state);
    }

    /// Full dashboard refresh for a symbol: series plus every derived panel.
    pub async fn run_all(&mut self, symbol: &str) -> Result<()> {
        let cfg = self.config.read().await.clone();
        self.change_symbol(symbol).await;

        let spot = self
            .state
            .series
            .last_close()
            .unwrap_or(crate::analytics::generator::DEFAULT_BASE_PRICE);
        self.price_option(OptionInputs {
            spot,
            strike: spot,
            days_to_expiry: cfg.option.days_to_expiry,
            rate_pct: cfg.option.rate_pct,
            vol_pct: cfg.option.vol_pct,
        });
        self.run_simulation().await?;
        self.refresh_allocations();
        self.run_backtest().await;
        self.refresh_risk();

        info!("analysis complete for {}", symbol);
        Ok(())
    }

    /// Derived panels over an already-loaded series (upload path).
    pub async fn run_derived(&mut self) -> Result<()> {
        let cfg = self.config.read().await.clone();
        let spot = self
            .state
            .series
            .last_close()
            .unwrap_or(crate::analytics::generator::DEFAULT_BASE_PRICE);
        self.price_option(OptionInputs {
            spot,
            strike: spot,
            days_to_expiry: cfg.option.days_to_expiry,
            rate_pct: cfg.option.rate_pct,
            vol_pct: cfg.option.vol_pct,
        });
        self.run_simulation().await?;
        self.refresh_allocations();
        self.run_backtest().await;
        self.refresh_risk();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::default_test_config;

    #[tokio::test]
    async fn run_all_populates_state() {
        let cfg = default_test_config();
        let days = cfg.days;
        let mut engine = DashboardEngine::new(cfg.shared()).await;
        engine.run_all("AAPL").await.unwrap();

        let state = engine.state();
        assert_eq!(state.series.len(), days);
        assert!(state.quote.is_some());
        assert!(state.simulation.is_some());
        assert!(state.backtest.is_some());
        assert!(state.risk.is_some());
    }

    #[tokio::test]
    async fn seeded_engines_agree() {
        let cfg = default_test_config();
        let mut a = DashboardEngine::new(cfg.clone().shared()).await;
        let mut b = DashboardEngine::new(cfg.shared()).await;
        a.run_all("NVDA").await.unwrap();
        b.run_all("NVDA").await.unwrap();

        let sim_a = a.state().simulation.as_ref().unwrap();
        let sim_b = b.state().simulation.as_ref().unwrap();
        assert_eq!(sim_a.expected_value, sim_b.expected_value);
        assert_eq!(sim_a.var95, sim_b.var95);
    }

    #[tokio::test]
    async fn retrigger_replaces_simulation() {
        let cfg = default_test_config();
        let mut engine = DashboardEngine::new(cfg.shared()).await;
        engine.change_symbol("AAPL").await;

        engine.run_simulation().await.unwrap();
        let first = engine.state().simulation.as_ref().unwrap().expected_value;
        engine.run_simulation().await.unwrap();
        let second = engine.state().simulation.as_ref().unwrap().expected_value;
        // Different derived seeds, one stored result at a time.
        assert!(first != second);
    }
}
