use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::error::{VizError, VizResult};

/// Affine mapping from a numeric domain onto a pixel (or angle) range.
///
/// A degenerate domain (`min == max`) maps every value to the range midpoint
/// instead of failing, so flat datasets still produce stable geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> VizResult<Self> {
        for (name, value) in [
            ("domain start", domain.0),
            ("domain end", domain.1),
            ("range start", range.0),
            ("range end", range.1),
        ] {
            if !value.is_finite() {
                return Err(VizError::InvalidData(format!("{name} must be finite")));
            }
        }
        if domain.0 > domain.1 {
            return Err(VizError::InvalidData(
                "scale domain start must not exceed domain end".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Derives the domain from observed values, falling back to `(0, 1)` for
    /// empty input.
    pub fn from_values(values: &[f64], range: (f64, f64)) -> VizResult<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &value in values {
            if value.is_finite() {
                min = min.min(value);
                max = max.max(value);
            }
        }
        if min > max {
            return Self::new((0.0, 1.0), range);
        }
        Self::new((min, max), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    /// Rounds the domain outward to multiples of a "nice" step
    /// (1, 2, or 5 times a power of ten), targeting roughly `tick_count`
    /// intervals. Degenerate domains are left unchanged.
    #[must_use]
    pub fn nice(mut self, tick_count: usize) -> Self {
        if self.is_degenerate() {
            return self;
        }
        let step = nice_step(self.domain_end - self.domain_start, tick_count.max(1));
        self.domain_start = (self.domain_start / step).floor() * step;
        self.domain_end = (self.domain_end / step).ceil() * step;
        self
    }

    pub fn scale(self, value: f64) -> VizResult<f64> {
        if !value.is_finite() {
            return Err(VizError::InvalidData("value must be finite".to_owned()));
        }
        if self.is_degenerate() {
            return Ok((self.range_start + self.range_end) * 0.5);
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, position: f64) -> VizResult<f64> {
        if !position.is_finite() {
            return Err(VizError::InvalidData("position must be finite".to_owned()));
        }
        if self.is_degenerate() {
            return Ok(self.domain_start);
        }

        let extent = self.range_end - self.range_start;
        if extent == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (position - self.range_start) / extent;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

/// Nearest step of the form 1, 2, or 5 times a power of ten for roughly
/// `tick_count` intervals over `span`.
fn nice_step(span: f64, tick_count: usize) -> f64 {
    let raw = span / tick_count as f64;
    let magnitude = 10f64.powf(raw.abs().log10().floor());
    let residual = raw / magnitude;
    let factor = if residual >= 7.5 {
        10.0
    } else if residual >= 3.5 {
        5.0
    } else if residual >= 1.5 {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// Linear mapping over UTC instants expressed as unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, range: (f64, f64)) -> VizResult<Self> {
        let start_s = datetime_to_unix_seconds(start);
        let end_s = datetime_to_unix_seconds(end);
        if start_s > end_s {
            return Err(VizError::InvalidData(
                "time domain start must not be after end".to_owned(),
            ));
        }
        Ok(Self {
            inner: LinearScale::new((start_s, end_s), range)?,
        })
    }

    pub fn from_unix_seconds(domain: (f64, f64), range: (f64, f64)) -> VizResult<Self> {
        Ok(Self {
            inner: LinearScale::new(domain, range)?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.inner.domain()
    }

    pub fn scale_datetime(self, time: DateTime<Utc>) -> VizResult<f64> {
        self.inner.scale(datetime_to_unix_seconds(time))
    }

    pub fn scale(self, unix_seconds: f64) -> VizResult<f64> {
        self.inner.scale(unix_seconds)
    }

    pub fn invert(self, position: f64) -> VizResult<f64> {
        self.inner.invert(position)
    }
}

/// Divides a range into one equal slot per category with symmetric
/// fractional padding between and around slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    categories: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
}

impl BandScale {
    pub fn new(categories: Vec<String>, range: (f64, f64), padding: f64) -> VizResult<Self> {
        if categories.is_empty() {
            return Err(VizError::InvalidData(
                "band scale requires at least one category".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(VizError::InvalidData("range must be finite".to_owned()));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(VizError::InvalidConfig(
                "band padding must be in [0, 1)".to_owned(),
            ));
        }

        Ok(Self {
            categories,
            range_start: range.0,
            range_end: range.1,
            padding,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distance between consecutive slot starts.
    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.categories.len() as f64;
        (self.range_end - self.range_start) / (n + self.padding)
    }

    /// Width of one band after padding is removed.
    #[must_use]
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Start position of band `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<f64> {
        if index >= self.categories.len() {
            return None;
        }
        let step = self.step();
        Some(self.range_start + step * (index as f64 + self.padding))
    }

    /// Center position of band `index`.
    #[must_use]
    pub fn center(&self, index: usize) -> Option<f64> {
        Some(self.position(index)? + self.band_width() * 0.5)
    }

    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }
}
