use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::types::{DataSeries, Datum};
use crate::layout::flow::FlowLink;

/// Seeded demo-data source.
///
/// Workbenches and tests inject a fixed seed so generated geometry is
/// reproducible run to run.
#[derive(Debug)]
pub struct SampleDataGenerator {
    rng: StdRng,
}

impl SampleDataGenerator {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random-walk series with numeric keys `0..len`.
    pub fn walk_series(
        &mut self,
        name: impl Into<String>,
        len: usize,
        base: f64,
        spread: f64,
    ) -> DataSeries {
        let mut value = base;
        let points = (0..len)
            .map(|i| {
                value = (value + self.rng.random_range(-spread..=spread)).max(0.0);
                Datum::numbered(i as f64, value)
            })
            .collect();
        DataSeries::new(name, points)
    }

    /// Labeled category values for proportional charts.
    pub fn category_series(
        &mut self,
        name: impl Into<String>,
        labels: &[&str],
        max_value: f64,
    ) -> DataSeries {
        let points = labels
            .iter()
            .map(|label| Datum::labeled(*label, self.rng.random_range(1.0..=max_value)))
            .collect();
        DataSeries::new(name, points)
    }

    /// Clustered samples for density estimation.
    pub fn samples(&mut self, len: usize, center: f64, spread: f64) -> Vec<f64> {
        (0..len)
            .map(|_| {
                // Sum of three uniforms approximates a bell around the center.
                let noise: f64 = (0..3)
                    .map(|_| self.rng.random_range(-spread..=spread))
                    .sum::<f64>()
                    / 3.0;
                center + noise
            })
            .collect()
    }

    /// Square flow matrix with an empty diagonal.
    pub fn matrix(&mut self, size: usize, max_value: f64) -> Vec<Vec<f64>> {
        (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| {
                        if i == j {
                            0.0
                        } else {
                            self.rng.random_range(0.0..=max_value)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Links from every source to every target with random weights.
    pub fn links(&mut self, sources: usize, targets: usize, max_value: f64) -> Vec<FlowLink> {
        let mut links = Vec::with_capacity(sources * targets);
        for source in 0..sources {
            for target in 0..targets {
                links.push(FlowLink::new(
                    source,
                    target,
                    self.rng.random_range(0.5..=max_value),
                ));
            }
        }
        links
    }
}
