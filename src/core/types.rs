use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::VizResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Key identifying one datum inside a series.
///
/// Ordinal labels suit categorical charts (pie, flow, chord); numeric keys
/// carry sample positions or unix-second timestamps for time axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatumKey {
    Label(String),
    Number(f64),
}

impl DatumKey {
    /// Numeric position of the key along an x-domain, if it has one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Label(_) => None,
            Self::Number(value) => Some(*value),
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Label(label) => label.clone(),
            Self::Number(value) => format!("{value}"),
        }
    }
}

/// One observed value with its key and optional category tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    pub key: DatumKey,
    pub value: f64,
    pub category: Option<String>,
}

impl Datum {
    #[must_use]
    pub fn labeled(label: impl Into<String>, value: f64) -> Self {
        Self {
            key: DatumKey::Label(label.into()),
            value,
            category: None,
        }
    }

    #[must_use]
    pub fn numbered(key: f64, value: f64) -> Self {
        Self {
            key: DatumKey::Number(key),
            value,
            category: None,
        }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> VizResult<Self> {
        Ok(Self {
            key: DatumKey::Number(datetime_to_unix_seconds(time)),
            value: decimal_to_f64(value, "value")?,
            category: None,
        })
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Named ordered sequence of data points. Insertion order is meaningful:
/// layout tie-breaks always fall back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    pub name: String,
    pub points: Vec<Datum>,
}

impl DataSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<Datum>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Numeric value range over the series, `None` when empty or when no key
    /// carries a finite value.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for point in &self.points {
            if !point.value.is_finite() {
                continue;
            }
            range = Some(match range {
                None => (point.value, point.value),
                Some((min, max)) => (min.min(point.value), max.max(point.value)),
            });
        }
        range
    }
}
