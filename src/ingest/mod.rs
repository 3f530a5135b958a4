pub mod adapter;
pub mod loader;

pub use adapter::to_series;
pub use loader::{parse_csv, Field, IngestError, RawRow};
