use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One parsed cell: dates and unparseable text stay strings, everything
/// recognized as numeric becomes a number at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Number(f64),
    Text(String),
}

impl Field {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(n) => Some(*n),
            Field::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            Field::Number(_) => None,
        }
    }
}

/// One ingested row: header/value pairs in column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    pub fields: Vec<(String, Field)>,
}

impl RawRow {
    /// First value whose header contains `needle`, case-insensitive.
    pub fn find(&self, needle: &str) -> Option<&Field> {
        let needle = needle.to_lowercase();
        self.fields
            .iter()
            .find(|(header, _)| header.to_lowercase().contains(&needle))
            .map(|(_, value)| value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("uploaded file is empty")]
    Empty,
    #[error("uploaded file has no header row")]
    MissingHeader,
    #[error("failed to parse CSV: {0}")]
    Malformed(#[from] csv::Error),
}

/// Headers parsed as numbers with a 0.0 fallback instead of text.
const NUMERIC_HINTS: [&str; 6] = ["price", "close", "open", "high", "low", "volume"];

/// Synthetic dates start here when a file carries no date column.
const SYNTHETIC_EPOCH: (i32, u32, u32) = (2020, 1, 1);

fn is_date_header(header: &str) -> bool {
    header.to_lowercase().contains("date")
}

fn is_numeric_header(header: &str) -> bool {
    let lower = header.to_lowercase();
    NUMERIC_HINTS.iter().any(|hint| lower.contains(hint))
}

pub fn synthetic_date(index: usize) -> NaiveDate {
    let (y, m, d) = SYNTHETIC_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d).unwrap() + Duration::days(index as i64)
}

/// Parse delimited text into typed rows. Date-named columns keep their text;
/// price-like columns parse as f64 defaulting to 0.0; everything else
/// becomes a number when it parses and text otherwise. Rows without a date
/// column are stamped with sequential synthetic dates. Empty input and a
/// missing header are ingestion failures the caller reports and recovers
/// from.
pub fn parse_csv(text: &str) -> Result<Vec<RawRow>, IngestError> {
    if text.trim().is_empty() {
        return Err(IngestError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(IngestError::Malformed)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::MissingHeader);
    }

    let has_date_column = headers.iter().any(|h| is_date_header(h));

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(IngestError::Malformed)?;
        let mut fields = Vec::with_capacity(headers.len() + 1);

        for (header, raw) in headers.iter().zip(record.iter()) {
            let raw = raw.trim();
            let value = if is_date_header(header) {
                Field::Text(raw.to_string())
            } else if is_numeric_header(header) {
                Field::Number(raw.parse::<f64>().unwrap_or(0.0))
            } else {
                match raw.parse::<f64>() {
                    Ok(n) => Field::Number(n),
                    Err(_) => Field::Text(raw.to_string()),
                }
            };
            fields.push((header.clone(), value));
        }

        if !has_date_column {
            fields.push((
                "date".to_string(),
                Field::Text(synthetic_date(index).format("%Y-%m-%d").to_string()),
            ));
        }

        rows.push(RawRow { fields });
    }

    Ok(rows)
}
