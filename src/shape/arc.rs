use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};
use crate::shape::path::{Path, polar_point};

/// Annular wedge between two radii and two angles.
///
/// Angles are radians clockwise from 12 o'clock. `pad_angle` is consumed
/// symmetrically from both angular edges before the path is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub center_x: f64,
    pub center_y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub corner_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
}

impl ArcShape {
    pub fn validate(self) -> VizResult<()> {
        for (name, value) in [
            ("center x", self.center_x),
            ("center y", self.center_y),
            ("inner radius", self.inner_radius),
            ("outer radius", self.outer_radius),
            ("corner radius", self.corner_radius),
            ("start angle", self.start_angle),
            ("end angle", self.end_angle),
            ("pad angle", self.pad_angle),
        ] {
            if !value.is_finite() {
                return Err(VizError::InvalidData(format!("arc {name} must be finite")));
            }
        }
        if self.inner_radius < 0.0 || self.outer_radius < self.inner_radius {
            return Err(VizError::InvalidData(
                "arc radii must satisfy 0 <= inner <= outer".to_owned(),
            ));
        }
        if self.corner_radius < 0.0 || self.pad_angle < 0.0 {
            return Err(VizError::InvalidData(
                "arc corner radius and pad angle must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Copy with both angles scaled by `t`, the grow-from-zero reveal tween.
    ///
    /// `t = 0` collapses the wedge onto the zero-angle seed; `t = 1` restores
    /// the final geometry.
    #[must_use]
    pub fn tweened(self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            start_angle: self.start_angle * t,
            end_angle: self.end_angle * t,
            ..self
        }
    }

    /// Mid-angle/mid-radius anchor, used for labels and tooltip positions.
    #[must_use]
    pub fn centroid(self) -> (f64, f64) {
        let mid_angle = (self.start_angle + self.end_angle) * 0.5;
        let mid_radius = (self.inner_radius + self.outer_radius) * 0.5;
        polar_point(self.center_x, self.center_y, mid_radius, mid_angle)
    }

    /// Builds the closed wedge path.
    ///
    /// A non-positive angular span after pad consumption yields an empty
    /// path. Corner rounding uses quadratic corner joins with the sharp
    /// corner vertex as control point; the corner radius is clamped to half
    /// the ring thickness and dropped entirely when the span cannot fit the
    /// rounded corners.
    pub fn to_path(self) -> VizResult<Path> {
        self.validate()?;

        let half_pad = self.pad_angle * 0.5;
        let a0 = self.start_angle + half_pad;
        let a1 = self.end_angle - half_pad;
        if a1 <= a0 || self.outer_radius == 0.0 {
            return Ok(Path::new());
        }
        let span = a1 - a0;

        let mut rc = self
            .corner_radius
            .min((self.outer_radius - self.inner_radius) * 0.5);
        if rc > 0.0 {
            let outer_inset = rc / self.outer_radius;
            let inner_inset = if self.inner_radius > 0.0 {
                rc / self.inner_radius
            } else {
                0.0
            };
            if span <= 2.0 * outer_inset.max(inner_inset) {
                rc = 0.0;
            }
        }

        let mut path = Path::with_capacity(10);
        if rc <= 0.0 {
            self.append_sharp(&mut path, a0, a1);
        } else {
            self.append_rounded(&mut path, a0, a1, rc);
        }
        path.close();
        Ok(path)
    }

    fn append_sharp(self, path: &mut Path, a0: f64, a1: f64) {
        let (sx, sy) = polar_point(self.center_x, self.center_y, self.outer_radius, a0);
        path.move_to(sx, sy);
        path.arc_to(self.center_x, self.center_y, self.outer_radius, a0, a1);
        if self.inner_radius > 0.0 {
            let (ix, iy) = polar_point(self.center_x, self.center_y, self.inner_radius, a1);
            path.line_to(ix, iy);
            path.arc_to(self.center_x, self.center_y, self.inner_radius, a1, a0);
        } else {
            path.line_to(self.center_x, self.center_y);
        }
    }

    fn append_rounded(self, path: &mut Path, a0: f64, a1: f64, rc: f64) {
        let outer = self.outer_radius;
        let inner = self.inner_radius;
        let io = rc / outer;

        let (sx, sy) = polar_point(self.center_x, self.center_y, outer - rc, a0);
        path.move_to(sx, sy);

        let (c0x, c0y) = polar_point(self.center_x, self.center_y, outer, a0);
        let (e0x, e0y) = polar_point(self.center_x, self.center_y, outer, a0 + io);
        path.quad_to(c0x, c0y, e0x, e0y);
        path.arc_to(self.center_x, self.center_y, outer, a0 + io, a1 - io);
        let (c1x, c1y) = polar_point(self.center_x, self.center_y, outer, a1);
        let (e1x, e1y) = polar_point(self.center_x, self.center_y, outer - rc, a1);
        path.quad_to(c1x, c1y, e1x, e1y);

        if inner > 0.0 {
            let ii = rc / inner;
            let (f0x, f0y) = polar_point(self.center_x, self.center_y, inner + rc, a1);
            path.line_to(f0x, f0y);
            let (d0x, d0y) = polar_point(self.center_x, self.center_y, inner, a1);
            let (g0x, g0y) = polar_point(self.center_x, self.center_y, inner, a1 - ii);
            path.quad_to(d0x, d0y, g0x, g0y);
            path.arc_to(self.center_x, self.center_y, inner, a1 - ii, a0 + ii);
            let (d1x, d1y) = polar_point(self.center_x, self.center_y, inner, a0);
            let (g1x, g1y) = polar_point(self.center_x, self.center_y, inner + rc, a0);
            path.quad_to(d1x, d1y, g1x, g1y);
        } else {
            path.line_to(self.center_x, self.center_y);
        }
    }
}
