use std::f64::consts::TAU;

use proptest::prelude::*;
use vizkit::core::{DataSeries, Datum};
use vizkit::layout::{
    SortOrder, StackOffset, StackOrder, evaluation_grid, horizon_layout, kde_layout, pie_layout,
    stack_layout, trapezoid_integral,
};

fn offset_strategy() -> impl Strategy<Value = StackOffset> {
    prop_oneof![
        Just(StackOffset::Zero),
        Just(StackOffset::Silhouette),
        Just(StackOffset::Wiggle),
    ]
}

fn order_strategy() -> impl Strategy<Value = StackOrder> {
    prop_oneof![Just(StackOrder::InputOrder), Just(StackOrder::InsideOut)]
}

proptest! {
    #[test]
    fn pie_sweeps_partition_the_usable_circle(
        values in prop::collection::vec(0.1f64..1_000.0, 1..12),
        pad in 0.0f64..0.05
    ) {
        let data: Vec<Datum> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Datum::labeled(format!("v{i}"), *v))
            .collect();
        let slices = pie_layout(&data, pad, SortOrder::None).expect("layout");

        let usable = TAU - values.len() as f64 * pad;
        let sweep_sum: f64 = slices.iter().map(|s| s.sweep()).sum();
        prop_assert!((sweep_sum - usable).abs() <= 1e-6);

        let total: f64 = values.iter().sum();
        for slice in &slices {
            prop_assert!((slice.sweep() - slice.value / total * usable).abs() <= 1e-6);
        }
    }

    #[test]
    fn pie_slices_tile_without_gaps(
        values in prop::collection::vec(0.1f64..100.0, 2..8),
    ) {
        let data: Vec<Datum> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Datum::labeled(format!("v{i}"), *v))
            .collect();
        let slices = pie_layout(&data, 0.0, SortOrder::None).expect("layout");
        for pair in slices.windows(2) {
            prop_assert!((pair[1].start_angle - pair[0].end_angle).abs() <= 1e-9);
        }
    }

    #[test]
    fn stack_columns_always_sum_to_their_totals(
        rows in prop::collection::vec(
            prop::collection::vec(0.0f64..100.0, 4),
            1..6
        ),
        offset in offset_strategy(),
        order in order_strategy()
    ) {
        let series: Vec<DataSeries> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let points = row
                    .iter()
                    .enumerate()
                    .map(|(t, v)| Datum::numbered(t as f64, *v))
                    .collect();
                DataSeries::new(format!("s{i}"), points)
            })
            .collect();

        let bands = stack_layout(&series, order, offset).expect("layout");
        for t in 0..4 {
            let thickness: f64 = bands.iter().map(|b| b.upper[t] - b.lower[t]).sum();
            let total: f64 = rows.iter().map(|row| row[t]).sum();
            prop_assert!((thickness - total).abs() <= 1e-6);
        }
    }

    #[test]
    fn stack_reordering_is_a_permutation_of_the_input(
        rows in prop::collection::vec(
            prop::collection::vec(0.0f64..100.0, 3),
            1..6
        ),
    ) {
        let series: Vec<DataSeries> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let points = row
                    .iter()
                    .enumerate()
                    .map(|(t, v)| Datum::numbered(t as f64, *v))
                    .collect();
                DataSeries::new(format!("s{i}"), points)
            })
            .collect();

        let bands = stack_layout(&series, StackOrder::InsideOut, StackOffset::Zero)
            .expect("layout");
        let mut indices: Vec<usize> = bands.iter().map(|b| b.input_index).collect();
        indices.sort_unstable();
        let expected: Vec<usize> = (0..rows.len()).collect();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn horizon_bands_reconstruct_the_clamped_deviation(
        deviations in prop::collection::vec(-50.0f64..50.0, 1..40),
        band_count in 1usize..8
    ) {
        let layout = horizon_layout(&deviations, band_count).expect("layout");
        if layout.bands.is_empty() {
            // All-zero input legitimately yields the empty layout.
            prop_assert!(deviations.iter().all(|&d| d == 0.0));
            return Ok(());
        }

        let max_abs = deviations.iter().fold(0.0f64, |acc, d| acc.max(d.abs()));
        for (t, &d) in deviations.iter().enumerate() {
            let reconstructed: f64 = layout.bands.iter().map(|b| b.values[t]).sum();
            let expected = d.signum() * d.abs().min(max_abs);
            prop_assert!((reconstructed - expected).abs() <= 1e-6);
        }
    }

    #[test]
    fn kde_integral_stays_close_to_one(
        samples in prop::collection::vec(-10.0f64..10.0, 2..64),
        bandwidth in 0.5f64..3.0
    ) {
        prop_assume!(samples.windows(2).any(|w| w[0] != w[1]));

        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let grid = evaluation_grid(min - bandwidth, max + bandwidth, 1024).expect("grid");
        let density = kde_layout(&samples, bandwidth, &grid).expect("estimate");

        let integral = trapezoid_integral(&density);
        prop_assert!((integral - 1.0).abs() <= 0.02, "integral {}", integral);
    }
}
