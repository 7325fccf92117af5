use vizkit::shape::{CurveType, PathCommand, line_path};

fn endpoint(path_command: &PathCommand) -> Option<(f64, f64)> {
    match path_command {
        PathCommand::MoveTo { x, y }
        | PathCommand::LineTo { x, y }
        | PathCommand::QuadTo { x, y, .. }
        | PathCommand::CubicTo { x, y, .. } => Some((*x, *y)),
        _ => None,
    }
}

#[test]
fn linear_curve_emits_straight_segments() {
    let points = vec![(0.0, 0.0), (10.0, 5.0), (20.0, 3.0)];
    let path = line_path(&points, CurveType::Linear);

    assert_eq!(path.commands.len(), 3);
    assert!(matches!(path.commands[0], PathCommand::MoveTo { x, y } if x == 0.0 && y == 0.0));
    assert!(matches!(path.commands[1], PathCommand::LineTo { x, y } if x == 10.0 && y == 5.0));
    assert!(matches!(path.commands[2], PathCommand::LineTo { x, y } if x == 20.0 && y == 3.0));
}

#[test]
fn empty_and_single_point_inputs_stay_degenerate() {
    assert!(line_path(&[], CurveType::Monotone).is_empty());

    let single = line_path(&[(5.0, 5.0)], CurveType::Basis);
    assert_eq!(single.commands.len(), 1);
    assert!(matches!(single.commands[0], PathCommand::MoveTo { .. }));
}

#[test]
fn step_curve_switches_at_segment_midpoints() {
    let points = vec![(0.0, 0.0), (10.0, 8.0)];
    let path = line_path(&points, CurveType::Step);

    assert_eq!(path.commands.len(), 4);
    assert!(matches!(path.commands[1], PathCommand::LineTo { x, y } if x == 5.0 && y == 0.0));
    assert!(matches!(path.commands[2], PathCommand::LineTo { x, y } if x == 5.0 && y == 8.0));
    assert!(matches!(path.commands[3], PathCommand::LineTo { x, y } if x == 10.0 && y == 8.0));
}

#[test]
fn basis_curve_is_clamped_through_end_points() {
    let points = vec![(0.0, 0.0), (10.0, 20.0), (20.0, 5.0), (30.0, 12.0)];
    let path = line_path(&points, CurveType::Basis);

    let first = endpoint(&path.commands[0]).expect("move");
    assert_eq!(first, (0.0, 0.0));
    let last = path.current_point().expect("end point");
    assert!((last.0 - 30.0).abs() <= 1e-9);
    assert!((last.1 - 12.0).abs() <= 1e-9);
}

#[test]
fn monotone_curve_passes_through_every_input_point() {
    let points = vec![(0.0, 1.0), (1.0, 4.0), (2.0, 4.0), (3.0, 0.5)];
    let path = line_path(&points, CurveType::Monotone);

    let mut visited = vec![endpoint(&path.commands[0]).expect("move")];
    for command in &path.commands[1..] {
        visited.push(endpoint(command).expect("segment end"));
    }
    for point in &points {
        assert!(
            visited
                .iter()
                .any(|v| (v.0 - point.0).abs() <= 1e-9 && (v.1 - point.1).abs() <= 1e-9),
            "missing input point {point:?}"
        );
    }
}

#[test]
fn monotone_control_points_never_overshoot_segment_range() {
    // A sharp local maximum: overshoot here would imply values that were
    // never measured.
    let points = vec![(0.0, 0.0), (1.0, 10.0), (2.0, 0.0), (3.0, 10.0), (4.0, 0.0)];
    let path = line_path(&points, CurveType::Monotone);

    let mut previous = endpoint(&path.commands[0]).expect("move");
    for command in &path.commands[1..] {
        if let PathCommand::CubicTo {
            cy1, cy2, x, y, ..
        } = command
        {
            let lo = previous.1.min(*y);
            let hi = previous.1.max(*y);
            assert!(*cy1 >= lo - 1e-9 && *cy1 <= hi + 1e-9, "cy1 {cy1} outside [{lo}, {hi}]");
            assert!(*cy2 >= lo - 1e-9 && *cy2 <= hi + 1e-9, "cy2 {cy2} outside [{lo}, {hi}]");
            previous = (*x, *y);
        }
    }
}

#[test]
fn two_point_curves_degrade_to_a_segment() {
    for curve in [CurveType::Monotone, CurveType::Basis] {
        let path = line_path(&[(0.0, 0.0), (10.0, 10.0)], curve);
        assert_eq!(path.commands.len(), 2);
        assert!(matches!(path.commands[1], PathCommand::LineTo { x, y } if x == 10.0 && y == 10.0));
    }
}
