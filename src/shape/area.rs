use crate::shape::curve::{CurveType, append_curve, line_path};
use crate::shape::path::Path;

/// Closed region between an upper and a lower boundary.
///
/// The upper boundary is traversed forward, the lower one in reverse, and
/// the outline is explicitly closed so consumers can fill it without
/// implicit closure rules.
#[must_use]
pub fn area_path(upper: &[(f64, f64)], lower: &[(f64, f64)], curve: CurveType) -> Path {
    if upper.is_empty() || lower.is_empty() {
        return Path::new();
    }

    let mut path = Path::with_capacity(upper.len() + lower.len() + 2);
    append_curve(&mut path, upper, curve, true);

    let reversed: Vec<(f64, f64)> = lower.iter().rev().copied().collect();
    append_curve(&mut path, &reversed, curve, false);
    path.close();
    path
}

/// Area against a constant baseline, the single-series fill shape.
#[must_use]
pub fn area_to_baseline(points: &[(f64, f64)], baseline_y: f64, curve: CurveType) -> Path {
    if points.is_empty() {
        return Path::new();
    }

    let mut path = Path::with_capacity(points.len() + 4);
    append_curve(&mut path, points, curve, true);
    let last_x = points[points.len() - 1].0;
    let first_x = points[0].0;
    path.line_to(last_x, baseline_y);
    path.line_to(first_x, baseline_y);
    path.close();
    path
}

/// Open stroke through the points.
#[must_use]
pub fn stroke_path(points: &[(f64, f64)], curve: CurveType) -> Path {
    line_path(points, curve)
}
