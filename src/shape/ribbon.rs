use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};
use crate::shape::path::{Path, polar_point};

/// One angular span on the chord circle reserved for a ribbon end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcSegment {
    #[must_use]
    pub fn new(start_angle: f64, end_angle: f64) -> Self {
        Self {
            start_angle,
            end_angle,
        }
    }
}

/// Chord-layout ribbon: both end spans lie on the same circle and the two
/// connecting curves bow through the circle center. The filled thickness is
/// the area enclosed between the paired curves.
pub fn chord_ribbon(
    center_x: f64,
    center_y: f64,
    radius: f64,
    source: ArcSegment,
    target: ArcSegment,
) -> VizResult<Path> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(VizError::InvalidData(
            "ribbon radius must be finite and > 0".to_owned(),
        ));
    }

    let mut path = Path::with_capacity(6);
    let (sx, sy) = polar_point(center_x, center_y, radius, source.start_angle);
    path.move_to(sx, sy);
    path.arc_to(
        center_x,
        center_y,
        radius,
        source.start_angle,
        source.end_angle,
    );
    let (tx, ty) = polar_point(center_x, center_y, radius, target.start_angle);
    path.quad_to(center_x, center_y, tx, ty);
    path.arc_to(
        center_x,
        center_y,
        radius,
        target.start_angle,
        target.end_angle,
    );
    path.quad_to(center_x, center_y, sx, sy);
    path.close();
    Ok(path)
}

/// Flow-layout ribbon between two vertical node edge segments.
///
/// Both long sides are horizontal-tangent cubics with control points at the
/// horizontal midpoint, so links leave and enter nodes flat.
pub fn flow_ribbon(
    left_x: f64,
    left_top: f64,
    left_bottom: f64,
    right_x: f64,
    right_top: f64,
    right_bottom: f64,
) -> VizResult<Path> {
    for (name, value) in [
        ("left x", left_x),
        ("left top", left_top),
        ("left bottom", left_bottom),
        ("right x", right_x),
        ("right top", right_top),
        ("right bottom", right_bottom),
    ] {
        if !value.is_finite() {
            return Err(VizError::InvalidData(format!(
                "ribbon {name} must be finite"
            )));
        }
    }
    if left_bottom < left_top || right_bottom < right_top {
        return Err(VizError::InvalidData(
            "ribbon edge bottoms must not be above their tops".to_owned(),
        ));
    }

    let mid_x = (left_x + right_x) * 0.5;
    let mut path = Path::with_capacity(6);
    path.move_to(left_x, left_top);
    path.cubic_to(mid_x, left_top, mid_x, right_top, right_x, right_top);
    path.line_to(right_x, right_bottom);
    path.cubic_to(
        mid_x,
        right_bottom,
        mid_x,
        left_bottom,
        left_x,
        left_bottom,
    );
    path.close();
    Ok(path)
}
