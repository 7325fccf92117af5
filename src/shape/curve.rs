use serde::{Deserialize, Serialize};

use crate::shape::path::Path;

/// Interpolation family used when connecting scaled points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveType {
    /// Straight segments between points.
    Linear,
    /// Fritsch-Carlson monotone cubic: never overshoots past neighboring
    /// values, so local extrema stay where they were measured.
    Monotone,
    /// Piecewise-constant, switching value at segment midpoints.
    Step,
    /// Clamped uniform cubic B-spline through the end points.
    Basis,
}

/// Builds a line path through `points` under the given curve type.
#[must_use]
pub fn line_path(points: &[(f64, f64)], curve: CurveType) -> Path {
    let mut path = Path::with_capacity(points.len() + 1);
    append_curve(&mut path, points, curve, true);
    path
}

/// Appends curve commands for `points` to an existing path.
///
/// With `initial_move` the first point opens a new subpath; otherwise the
/// first point is joined from the current position with a straight segment,
/// which is what area outlines need for their return boundary.
pub fn append_curve(path: &mut Path, points: &[(f64, f64)], curve: CurveType, initial_move: bool) {
    if points.is_empty() {
        return;
    }
    let (x0, y0) = points[0];
    if initial_move {
        path.move_to(x0, y0);
    } else {
        path.line_to(x0, y0);
    }
    if points.len() == 1 {
        return;
    }

    match curve {
        CurveType::Linear => {
            for &(x, y) in &points[1..] {
                path.line_to(x, y);
            }
        }
        CurveType::Step => append_step(path, points),
        CurveType::Basis => append_basis(path, points),
        CurveType::Monotone => append_monotone(path, points),
    }
}

fn append_step(path: &mut Path, points: &[(f64, f64)]) {
    for window in points.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        let mid_x = (x0 + x1) * 0.5;
        path.line_to(mid_x, y0);
        path.line_to(mid_x, y1);
        path.line_to(x1, y1);
    }
}

fn append_basis(path: &mut Path, points: &[(f64, f64)]) {
    if points.len() == 2 {
        let (x1, y1) = points[1];
        path.line_to(x1, y1);
        return;
    }

    // Triple the end points so the spline is clamped through them.
    let first = points[0];
    let last = points[points.len() - 1];
    let mut control: Vec<(f64, f64)> = Vec::with_capacity(points.len() + 4);
    control.push(first);
    control.push(first);
    control.extend_from_slice(points);
    control.push(last);
    control.push(last);

    for window in control.windows(4) {
        let (c1, c2, c3) = (window[1], window[2], window[3]);
        path.cubic_to(
            (2.0 * c1.0 + c2.0) / 3.0,
            (2.0 * c1.1 + c2.1) / 3.0,
            (c1.0 + 2.0 * c2.0) / 3.0,
            (c1.1 + 2.0 * c2.1) / 3.0,
            (c1.0 + 4.0 * c2.0 + c3.0) / 6.0,
            (c1.1 + 4.0 * c2.1 + c3.1) / 6.0,
        );
    }
}

fn append_monotone(path: &mut Path, points: &[(f64, f64)]) {
    let n = points.len();
    if n == 2 {
        let (x1, y1) = points[1];
        path.line_to(x1, y1);
        return;
    }

    let tangents = monotone_tangents(points);
    for i in 0..n - 1 {
        let (x0, y0) = points[i];
        let (x1, y1) = points[i + 1];
        let h = x1 - x0;
        path.cubic_to(
            x0 + h / 3.0,
            y0 + tangents[i] * h / 3.0,
            x1 - h / 3.0,
            y1 - tangents[i + 1] * h / 3.0,
            x1,
            y1,
        );
    }
}

/// Fritsch-Carlson tangents.
///
/// Interior tangents vanish across sign changes and are otherwise the
/// interval-weighted slope average limited to twice the smaller adjacent
/// secant; end tangents use the one-sided three-point estimate clamped
/// against the interior neighbor.
fn monotone_tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut tangents = vec![0.0; n];

    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = endpoint_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = endpoint_tangent(points[n - 2], points[n - 1], tangents[n - 2]);
    tangents
}

fn interior_tangent(left: (f64, f64), mid: (f64, f64), right: (f64, f64)) -> f64 {
    let h0 = mid.0 - left.0;
    let h1 = right.0 - mid.0;
    let s0 = secant(left, mid);
    let s1 = secant(mid, right);
    if s0 == 0.0 || s1 == 0.0 || (s0 > 0.0) != (s1 > 0.0) {
        return 0.0;
    }

    let weighted = if h0 + h1 != 0.0 {
        (s0 * h1 + s1 * h0) / (h0 + h1)
    } else {
        0.0
    };
    let limit = 2.0 * s0.abs().min(s1.abs());
    weighted.signum() * weighted.abs().min(limit)
}

fn endpoint_tangent(p0: (f64, f64), p1: (f64, f64), neighbor_tangent: f64) -> f64 {
    let s = secant(p0, p1);
    if p1.0 == p0.0 {
        return neighbor_tangent;
    }
    let one_sided = (3.0 * s - neighbor_tangent) / 2.0;
    // Keep the end segment monotone as well.
    if s == 0.0 || (one_sided > 0.0) != (s > 0.0) {
        return 0.0;
    }
    one_sided.abs().min(3.0 * s.abs()) * one_sided.signum()
}

fn secant(p0: (f64, f64), p1: (f64, f64)) -> f64 {
    let h = p1.0 - p0.0;
    if h == 0.0 { 0.0 } else { (p1.1 - p0.1) / h }
}
