use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day, plus the indicator annotations attached by
/// `analytics::indicators::annotate`. Annotation fields stay `None` until
/// their trailing window is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma20: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_band: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_band: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<f64>,
}

impl PricePoint {
    /// A bare point with no annotations.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            ma20: None,
            ma50: None,
            rsi: None,
            macd: None,
            macd_signal: None,
            upper_band: None,
            lower_band: None,
            portfolio: None,
            benchmark: None,
            prediction: None,
        }
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_up_day(&self) -> bool {
        self.close > self.open
    }
}

/// Wraps Vec<PricePoint> with the helpers the analytics layer needs.
/// Points are chronologically ascending with no duplicate dates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PricePoint> {
        self.points.get_mut(index)
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PricePoint> {
        self.points.iter_mut()
    }

    pub fn as_slice(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn tail(&self, n: usize) -> PriceSeries {
        let start = self.points.len().saturating_sub(n);
        PriceSeries::new(self.points[start..].to_vec())
    }

    pub fn slice(&self, start: usize, end: usize) -> PriceSeries {
        let s = start.min(self.points.len());
        let e = end.min(self.points.len());
        PriceSeries::new(self.points[s..e].to_vec())
    }

    pub fn push(&mut self, point: PricePoint) {
        self.points.push(point);
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }
}

impl std::ops::Index<usize> for PriceSeries {
    type Output = PricePoint;
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IntoIterator for PriceSeries {
    type Item = PricePoint;
    type IntoIter = std::vec::IntoIter<PricePoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
