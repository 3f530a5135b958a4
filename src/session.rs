use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::analytics::{backtest, generator, indicators, metrics, montecarlo, options, portfolio};
use crate::config::Config;
use crate::ingest::{adapter, RawRow};
use crate::models::{
    AllocationResult, CrossoverReport, OptionQuote, PriceSeries, RiskSummary, SimulationResult,
};

/// Inputs of one pricer invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionInputs {
    pub spot: f64,
    pub strike: f64,
    pub days_to_expiry: f64,
    pub rate_pct: f64,
    pub vol_pct: f64,
}

/// Everything one analysis session holds. The original dashboard kept these
/// scattered across UI component state; here they live in one struct that
/// commands consume and return, so the whole thing is testable without an
/// event loop. Each command replaces its own slot wholesale; nothing is
/// mutated incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub symbol: String,
    pub series: PriceSeries,
    pub quote: Option<OptionQuote>,
    pub simulation: Option<SimulationResult>,
    pub sharpe: Option<AllocationResult>,
    pub blended: Option<AllocationResult>,
    pub backtest: Option<CrossoverReport>,
    pub risk: Option<RiskSummary>,
    pub generated_at: Option<DateTime<Utc>>,
}

/// Rebuild the session around a freshly generated series for `symbol`.
/// Derived results are cleared; they refer to the old series.
pub fn change_symbol(state: SessionState, symbol: &str, cfg: &Config, rng: &mut StdRng) -> SessionState {
    let series = generator::generate(symbol, cfg.days, rng);
    SessionState {
        symbol: symbol.to_string(),
        series,
        generated_at: Some(Utc::now()),
        ..clear_results(state)
    }
}

/// Rebuild the session around ingested rows (file upload path). The adapted
/// series goes through the same annotation pass as generated data.
pub fn load_rows(state: SessionState, label: &str, rows: &[RawRow], rng: &mut StdRng) -> SessionState {
    let series = indicators::annotate(adapter::to_series(rows, rng), rng);
    SessionState {
        symbol: label.to_string(),
        series,
        generated_at: Some(Utc::now()),
        ..clear_results(state)
    }
}

pub fn price_option(mut state: SessionState, inputs: OptionInputs) -> SessionState {
    state.quote = Some(options::price(
        inputs.spot,
        inputs.strike,
        inputs.days_to_expiry,
        inputs.rate_pct,
        inputs.vol_pct,
    ));
    state
}

/// Run the Monte Carlo forward from the latest close. An empty series falls
/// back to the default base price so the command never fails.
pub fn run_simulation(mut state: SessionState, cfg: &Config, rng: &mut StdRng) -> SessionState {
    let start = state
        .series
        .last_close()
        .unwrap_or(generator::DEFAULT_BASE_PRICE);
    state.simulation = Some(montecarlo::simulate(
        start,
        cfg.mc_paths,
        cfg.mc_horizon_days,
        rng,
    ));
    state
}

pub fn refresh_allocations(mut state: SessionState) -> SessionState {
    state.sharpe = Some(portfolio::sharpe_weights(&portfolio::default_universe()));
    state.blended = Some(portfolio::blend_views(
        &portfolio::default_priors(),
        &portfolio::default_views(),
    ));
    state
}

pub fn run_backtest(mut state: SessionState, cfg: &Config) -> SessionState {
    state.backtest = Some(backtest::run_crossover(&state.series, cfg.initial_capital));
    state
}

pub fn refresh_risk(mut state: SessionState) -> SessionState {
    state.risk = Some(metrics::compute(&state.series));
    state
}

/// The whole dashboard refresh: series, at-the-money quote, simulation,
/// allocations, backtest and risk summary in one pass.
pub fn run_all(state: SessionState, symbol: &str, cfg: &Config, rng: &mut StdRng) -> SessionState {
    let state = change_symbol(state, symbol, cfg, rng);
    run_derived(state, cfg, rng)
}

/// Every derived computation over whatever series the state currently holds.
pub fn run_derived(state: SessionState, cfg: &Config, rng: &mut StdRng) -> SessionState {
    let spot = state
        .series
        .last_close()
        .unwrap_or(generator::DEFAULT_BASE_PRICE);
    let state = price_option(
        state,
        OptionInputs {
            spot,
            strike: spot,
            days_to_expiry: cfg.option.days_to_expiry,
            rate_pct: cfg.option.rate_pct,
            vol_pct: cfg.option.vol_pct,
        },
    );
    let state = run_simulation(state, cfg, rng);
    let state = refresh_allocations(state);
    let state = run_backtest(state, cfg);
    refresh_risk(state)
}

fn clear_results(state: SessionState) -> SessionState {
    SessionState {
        quote: None,
        simulation: None,
        backtest: None,
        risk: None,
        ..state
    }
}
