pub mod point;
pub mod results;

pub use point::{PricePoint, PriceSeries};
pub use results::{
    AllocationResult, BacktestRecord, CrossoverReport, OptionQuote, RiskSummary, SimulationResult,
};
