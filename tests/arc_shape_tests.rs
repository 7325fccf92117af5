use std::f64::consts::{PI, TAU};

use vizkit::error::VizError;
use vizkit::shape::{ArcShape, PathCommand};

fn quarter_ring() -> ArcShape {
    ArcShape {
        center_x: 100.0,
        center_y: 100.0,
        inner_radius: 40.0,
        outer_radius: 80.0,
        corner_radius: 0.0,
        start_angle: 0.0,
        end_angle: PI / 2.0,
        pad_angle: 0.0,
    }
}

#[test]
fn ring_wedge_path_traces_outer_then_inner_arc() {
    let path = quarter_ring().to_path().expect("valid arc");
    assert!(!path.is_empty());

    let arcs: Vec<_> = path
        .commands
        .iter()
        .filter_map(|c| match c {
            PathCommand::ArcTo {
                radius,
                start_angle,
                end_angle,
                ..
            } => Some((*radius, *start_angle, *end_angle)),
            _ => None,
        })
        .collect();
    assert_eq!(arcs.len(), 2);
    // Outer arc sweeps forward, inner arc returns backward.
    assert_eq!(arcs[0], (80.0, 0.0, PI / 2.0));
    assert_eq!(arcs[1], (40.0, PI / 2.0, 0.0));
    assert!(matches!(path.commands.last(), Some(PathCommand::Close)));
}

#[test]
fn full_pie_wedge_closes_through_center() {
    let mut shape = quarter_ring();
    shape.inner_radius = 0.0;
    let path = shape.to_path().expect("valid arc");

    let touches_center = path.commands.iter().any(|c| {
        matches!(c, PathCommand::LineTo { x, y } if (*x - 100.0).abs() <= 1e-9 && (*y - 100.0).abs() <= 1e-9)
    });
    assert!(touches_center);
}

#[test]
fn zero_span_produces_empty_path() {
    let mut shape = quarter_ring();
    shape.end_angle = shape.start_angle;
    let path = shape.to_path().expect("valid arc");
    assert!(path.is_empty());
}

#[test]
fn pad_angle_insets_both_edges() {
    let mut shape = quarter_ring();
    shape.pad_angle = 0.2;
    let path = shape.to_path().expect("valid arc");

    let outer_arc = path.commands.iter().find_map(|c| match c {
        PathCommand::ArcTo {
            start_angle,
            end_angle,
            ..
        } => Some((*start_angle, *end_angle)),
        _ => None,
    });
    let (start, end) = outer_arc.expect("outer arc present");
    assert!((start - 0.1).abs() <= 1e-9);
    assert!((end - (PI / 2.0 - 0.1)).abs() <= 1e-9);
}

#[test]
fn tween_scales_both_angles_from_zero() {
    let shape = ArcShape {
        start_angle: 1.0,
        end_angle: 2.0,
        ..quarter_ring()
    };

    let seed = shape.tweened(0.0);
    assert_eq!(seed.start_angle, 0.0);
    assert_eq!(seed.end_angle, 0.0);

    let halfway = shape.tweened(0.5);
    assert!((halfway.start_angle - 0.5).abs() <= 1e-9);
    assert!((halfway.end_angle - 1.0).abs() <= 1e-9);

    let done = shape.tweened(1.0);
    assert_eq!(done.start_angle, 1.0);
    assert_eq!(done.end_angle, 2.0);

    // Seed and final radii are untouched by the tween.
    assert_eq!(seed.outer_radius, shape.outer_radius);
}

#[test]
fn corner_radius_adds_quadratic_joins() {
    let mut shape = quarter_ring();
    shape.corner_radius = 6.0;
    let path = shape.to_path().expect("valid arc");

    let quad_count = path
        .commands
        .iter()
        .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
        .count();
    assert_eq!(quad_count, 4);
}

#[test]
fn corner_radius_is_dropped_when_span_cannot_fit_it() {
    let mut shape = quarter_ring();
    shape.corner_radius = 6.0;
    shape.end_angle = 0.05;
    let path = shape.to_path().expect("valid arc");

    let quad_count = path
        .commands
        .iter()
        .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
        .count();
    assert_eq!(quad_count, 0);
    assert!(!path.is_empty());
}

#[test]
fn centroid_sits_between_radii() {
    let shape = ArcShape {
        start_angle: 0.0,
        end_angle: TAU,
        ..quarter_ring()
    };
    // Mid angle of a full turn points straight down from the center.
    let (x, y) = shape.centroid();
    assert!((x - 100.0).abs() <= 1e-9);
    assert!((y - 160.0).abs() <= 1e-9);
}

#[test]
fn invalid_radii_are_rejected() {
    let mut shape = quarter_ring();
    shape.inner_radius = 90.0;
    let err = shape.to_path().expect_err("inner > outer must fail");
    assert!(matches!(err, VizError::InvalidData(_)));
}
