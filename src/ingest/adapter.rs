use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::Rng;

use crate::analytics::generator::{DEFAULT_BASE_PRICE, VOLUME_MAX, VOLUME_MIN};
use crate::ingest::loader::{synthetic_date, RawRow};
use crate::models::{PricePoint, PriceSeries};

/// Map ingested rows onto price points via case-insensitive field aliases.
/// `close` falls back through `price` and then to 100; open/high/low default
/// to the resolved close; a missing volume gets a random filler in the
/// generator's range. Unparseable dates fall back to sequential synthetic
/// dates.
pub fn to_series(rows: &[RawRow], rng: &mut StdRng) -> PriceSeries {
    let points = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let close = number(row, &["close", "price"]).unwrap_or(DEFAULT_BASE_PRICE);
            let open = number(row, &["open"]).unwrap_or(close);
            let high = number(row, &["high"]).unwrap_or(close);
            let low = number(row, &["low"]).unwrap_or(close);
            let volume = number(row, &["volume"])
                .unwrap_or_else(|| rng.gen_range(VOLUME_MIN..VOLUME_MAX) as f64);
            let date = row
                .find("date")
                .and_then(|f| f.as_text())
                .and_then(parse_date)
                .unwrap_or_else(|| synthetic_date(index));

            PricePoint::new(date, open, high, low, close, volume)
        })
        .collect();

    PriceSeries::new(points)
}

fn number(row: &RawRow, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|alias| row.find(alias).and_then(|f| f.as_number()))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%m/%d/%Y"))
        .ok()
}
