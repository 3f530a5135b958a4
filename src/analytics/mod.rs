pub mod backtest;
pub mod generator;
pub mod indicators;
pub mod metrics;
pub mod montecarlo;
pub mod options;
pub mod portfolio;
