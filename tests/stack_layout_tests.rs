use vizkit::core::{DataSeries, Datum};
use vizkit::error::VizError;
use vizkit::layout::{StackOffset, StackOrder, stack_layout};

fn series(name: &str, values: &[f64]) -> DataSeries {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| Datum::numbered(i as f64, *v))
        .collect();
    DataSeries::new(name, points)
}

fn sample_stack() -> Vec<DataSeries> {
    vec![
        series("food", &[3.0, 5.0, 2.0, 4.0]),
        series("shelter", &[1.0, 2.0, 6.0, 1.0]),
        series("health", &[2.0, 1.0, 1.0, 3.0]),
    ]
}

#[test]
fn band_thicknesses_always_sum_to_the_column_total() {
    let input = sample_stack();
    for offset in [StackOffset::Zero, StackOffset::Silhouette, StackOffset::Wiggle] {
        for order in [StackOrder::InputOrder, StackOrder::InsideOut] {
            let bands = stack_layout(&input, order, offset).expect("valid layout");
            for t in 0..4 {
                let thickness: f64 = bands.iter().map(|b| b.upper[t] - b.lower[t]).sum();
                let total: f64 = input.iter().map(|s| s.points[t].value).sum();
                assert!(
                    (thickness - total).abs() <= 1e-9,
                    "column {t} under {offset:?}/{order:?}"
                );
            }
        }
    }
}

#[test]
fn zero_offset_stacks_from_the_zero_baseline() {
    let bands = stack_layout(&sample_stack(), StackOrder::InputOrder, StackOffset::Zero)
        .expect("valid layout");
    assert!(bands[0].lower.iter().all(|&v| v == 0.0));
    // Bands tile without gaps.
    for pair in bands.windows(2) {
        assert_eq!(pair[0].upper, pair[1].lower);
    }
}

#[test]
fn silhouette_offset_centers_the_stream() {
    let bands = stack_layout(&sample_stack(), StackOrder::InputOrder, StackOffset::Silhouette)
        .expect("valid layout");
    for t in 0..4 {
        let bottom = bands.first().expect("bands").lower[t];
        let top = bands.last().expect("bands").upper[t];
        assert!((bottom + top).abs() <= 1e-9, "column {t} not centered");
    }
}

#[test]
fn wiggle_offset_starts_at_zero_and_stays_finite() {
    let bands = stack_layout(&sample_stack(), StackOrder::InputOrder, StackOffset::Wiggle)
        .expect("valid layout");
    assert_eq!(bands[0].lower[0], 0.0);
    for band in &bands {
        assert!(band.lower.iter().chain(band.upper.iter()).all(|v| v.is_finite()));
    }
}

#[test]
fn inside_out_places_largest_total_nearest_the_center() {
    let input = vec![
        series("small", &[1.0, 1.0]),
        series("large", &[10.0, 10.0]),
        series("medium", &[4.0, 4.0]),
    ];
    let bands = stack_layout(&input, StackOrder::InsideOut, StackOffset::Silhouette)
        .expect("valid layout");

    // Under the centered offset, the band whose midline sits closest to the
    // stream center must be the largest series.
    let nearest = bands
        .iter()
        .min_by(|a, b| {
            let mid_a = (a.lower[0] + a.upper[0]) * 0.5;
            let mid_b = (b.lower[0] + b.upper[0]) * 0.5;
            mid_a.abs().partial_cmp(&mid_b.abs()).expect("finite midlines")
        })
        .expect("bands present");
    assert_eq!(nearest.input_index, 1);
}

#[test]
fn inside_out_ties_break_by_input_index() {
    let input = vec![
        series("a", &[2.0]),
        series("b", &[2.0]),
        series("c", &[2.0]),
    ];
    let first = stack_layout(&input, StackOrder::InsideOut, StackOffset::Zero).expect("layout");
    let second = stack_layout(&input, StackOrder::InsideOut, StackOffset::Zero).expect("layout");
    let order: Vec<usize> = first.iter().map(|b| b.input_index).collect();
    let order_again: Vec<usize> = second.iter().map(|b| b.input_index).collect();
    assert_eq!(order, order_again);
}

#[test]
fn bands_carry_input_indices_and_names() {
    let bands = stack_layout(&sample_stack(), StackOrder::InputOrder, StackOffset::Zero)
        .expect("valid layout");
    assert_eq!(bands[0].input_index, 0);
    assert_eq!(bands[0].name, "food");
    assert_eq!(bands[2].name, "health");
}

#[test]
fn mismatched_lengths_are_rejected() {
    let input = vec![series("a", &[1.0, 2.0]), series("b", &[1.0])];
    let err = stack_layout(&input, StackOrder::InputOrder, StackOffset::Zero)
        .expect_err("length mismatch must fail");
    assert!(matches!(err, VizError::InvalidData(_)));
}

#[test]
fn negative_values_are_rejected() {
    let input = vec![series("a", &[1.0, -2.0])];
    let err = stack_layout(&input, StackOrder::InputOrder, StackOffset::Zero)
        .expect_err("negative value must fail");
    assert!(matches!(err, VizError::InvalidData(_)));
}

#[test]
fn empty_inputs_produce_empty_layouts() {
    assert!(stack_layout(&[], StackOrder::InputOrder, StackOffset::Zero)
        .expect("no series")
        .is_empty());
    let empty_series = vec![DataSeries::new("a", Vec::new())];
    assert!(stack_layout(&empty_series, StackOrder::InputOrder, StackOffset::Zero)
        .expect("no points")
        .is_empty());
}
