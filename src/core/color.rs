use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> VizResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidConfig(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Per-channel linear interpolation toward `other` at `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            red: self.red + (other.red - self.red) * t,
            green: self.green + (other.green - self.green) * t,
            blue: self.blue + (other.blue - self.blue) * t,
            alpha: self.alpha + (other.alpha - self.alpha) * t,
        }
    }
}

/// Explicit category-to-color mapping.
///
/// Lookups for categories absent from the mapping are configuration errors,
/// never silent fallbacks to a default color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScale {
    entries: IndexMap<String, Color>,
}

impl OrdinalScale {
    pub fn new(entries: IndexMap<String, Color>) -> VizResult<Self> {
        if entries.is_empty() {
            return Err(VizError::InvalidConfig(
                "ordinal color scale requires at least one entry".to_owned(),
            ));
        }
        for color in entries.values() {
            color.validate()?;
        }
        Ok(Self { entries })
    }

    pub fn from_pairs(pairs: Vec<(String, Color)>) -> VizResult<Self> {
        Self::new(pairs.into_iter().collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn color_of(&self, category: &str) -> VizResult<Color> {
        self.entries
            .get(category)
            .copied()
            .ok_or_else(|| VizError::UnknownCategory {
                category: category.to_owned(),
            })
    }

    /// Color at insertion position `index`, wrapping around the palette.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        let wrapped = index % self.entries.len();
        self.entries
            .get_index(wrapped)
            .map(|(_, color)| *color)
            .unwrap_or(Color::rgb(0.0, 0.0, 0.0))
    }

    #[must_use]
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Linear two-color ramp over a numeric domain, clamped outside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SequentialScale {
    domain_start: f64,
    domain_end: f64,
    start_color: Color,
    end_color: Color,
}

impl SequentialScale {
    pub fn new(domain: (f64, f64), start_color: Color, end_color: Color) -> VizResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(VizError::InvalidData(
                "sequential scale domain must be finite".to_owned(),
            ));
        }
        start_color.validate()?;
        end_color.validate()?;
        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            start_color,
            end_color,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Color for `value`; degenerate domains yield the ramp midpoint.
    #[must_use]
    pub fn color_for(self, value: f64) -> Color {
        let span = self.domain_end - self.domain_start;
        let t = if span == 0.0 {
            0.5
        } else {
            ((value - self.domain_start) / span).clamp(0.0, 1.0)
        };
        self.start_color.lerp(self.end_color, t)
    }
}
