use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// One magnitude tier of a horizon chart.
///
/// `values[t]` is the signed contribution of this band at timestamp `t`,
/// always within `[-band_width, band_width]`. Summing a timestamp across all
/// bands reconstructs the clamped deviation with its sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonBand {
    pub band_index: usize,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonLayout {
    /// Width of one band, `max_abs_deviation / band_count`.
    pub band_width: f64,
    pub bands: Vec<HorizonBand>,
}

impl HorizonLayout {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            band_width: 0.0,
            bands: Vec::new(),
        }
    }
}

/// Re-encodes deviations from a baseline into `band_count` equal-width tiers.
///
/// Band `i` holds `sign(d) · clamp(|d| − i·w, 0, w)` with
/// `w = max|d| / band_count`. All-zero input yields the empty layout.
pub fn horizon_layout(deviations: &[f64], band_count: usize) -> VizResult<HorizonLayout> {
    if band_count < 1 {
        return Err(VizError::InvalidConfig(
            "horizon band count must be at least 1".to_owned(),
        ));
    }
    for &d in deviations {
        if !d.is_finite() {
            return Err(VizError::InvalidData(
                "horizon deviations must be finite".to_owned(),
            ));
        }
    }
    if deviations.is_empty() {
        return Ok(HorizonLayout::empty());
    }

    let max_abs = deviations.iter().fold(0.0f64, |acc, d| acc.max(d.abs()));
    if max_abs == 0.0 {
        return Ok(HorizonLayout::empty());
    }

    let band_width = max_abs / band_count as f64;
    let bands = (0..band_count)
        .map(|band_index| {
            let floor = band_index as f64 * band_width;
            let values = deviations
                .iter()
                .map(|&d| d.signum() * (d.abs() - floor).clamp(0.0, band_width))
                .collect();
            HorizonBand { band_index, values }
        })
        .collect();

    Ok(HorizonLayout { band_width, bands })
}
