use crate::shape::path::{Path, polar_point};

/// Closed polygon through `(angle, radius)` vertices around a center.
///
/// Angles are radians clockwise from 12 o'clock. The outline connects the
/// last vertex back to the first.
#[must_use]
pub fn radial_polygon(center_x: f64, center_y: f64, vertices: &[(f64, f64)]) -> Path {
    if vertices.is_empty() {
        return Path::new();
    }

    let mut path = Path::with_capacity(vertices.len() + 2);
    let (angle0, radius0) = vertices[0];
    let (x0, y0) = polar_point(center_x, center_y, radius0, angle0);
    path.move_to(x0, y0);
    for &(angle, radius) in &vertices[1..] {
        let (x, y) = polar_point(center_x, center_y, radius, angle);
        path.line_to(x, y);
    }
    path.close();
    path
}
