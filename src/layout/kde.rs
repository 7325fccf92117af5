use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-kde")]
use rayon::prelude::*;

use crate::error::{VizError, VizResult};

/// One evaluated density point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Evenly spaced evaluation grid over `[min, max]`, inclusive of both ends.
pub fn evaluation_grid(min: f64, max: f64, size: usize) -> VizResult<Vec<f64>> {
    if size < 2 {
        return Err(VizError::InvalidConfig(
            "KDE grid size must be at least 2".to_owned(),
        ));
    }
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(VizError::InvalidData(
            "KDE grid bounds must be finite with min < max".to_owned(),
        ));
    }
    let step = (max - min) / (size - 1) as f64;
    Ok((0..size).map(|i| min + step * i as f64).collect())
}

/// Epanechnikov kernel density estimate over an evaluation grid.
///
/// `density(x) = 1/(n·h) Σ K((x − v)/h)` with `K(u) = 0.75(1 − u²)` for
/// `|u| ≤ 1`, so the trapezoidal integral over a grid covering the sample
/// support approximates 1. Empty or zero-variance samples produce an empty
/// layout; bandwidth and grid are caller-supplied, never inferred.
pub fn kde_layout(samples: &[f64], bandwidth: f64, grid: &[f64]) -> VizResult<Vec<DensityPoint>> {
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Err(VizError::InvalidConfig(
            "KDE bandwidth must be finite and > 0".to_owned(),
        ));
    }
    for &sample in samples {
        if !sample.is_finite() {
            return Err(VizError::InvalidData(
                "KDE samples must be finite".to_owned(),
            ));
        }
    }
    if samples.is_empty() || zero_variance(samples) {
        return Ok(Vec::new());
    }

    #[cfg(feature = "parallel-kde")]
    {
        Ok(grid
            .par_iter()
            .map(|&x| DensityPoint {
                x,
                density: density_at(samples, bandwidth, x),
            })
            .collect())
    }

    #[cfg(not(feature = "parallel-kde"))]
    {
        Ok(grid
            .iter()
            .map(|&x| DensityPoint {
                x,
                density: density_at(samples, bandwidth, x),
            })
            .collect())
    }
}

fn density_at(samples: &[f64], bandwidth: f64, x: f64) -> f64 {
    let mut sum = 0.0;
    for &sample in samples {
        let u = (x - sample) / bandwidth;
        if u.abs() <= 1.0 {
            sum += 0.75 * (1.0 - u * u);
        }
    }
    sum / (samples.len() as f64 * bandwidth)
}

fn zero_variance(samples: &[f64]) -> bool {
    samples.windows(2).all(|w| w[0] == w[1])
}

/// Trapezoidal-rule integral of a density curve.
///
/// A valid estimate over a grid covering the sample support integrates to
/// approximately 1.
#[must_use]
pub fn trapezoid_integral(points: &[DensityPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1].x - w[0].x) * (w[0].density + w[1].density) * 0.5)
        .sum()
}
