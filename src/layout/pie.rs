use std::cmp::Ordering;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::types::Datum;
use crate::error::{VizError, VizResult};

/// Slice ordering rule. Sorting is stable: equal values keep input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    None,
    Ascending,
    Descending,
}

/// One allocated wedge.
///
/// `start_angle..end_angle` includes the slice's `pad_angle` allotment; the
/// arc shape insets half the pad from each edge when building the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    /// Position of the datum in the input, stable across sorting.
    pub input_index: usize,
    pub label: String,
    pub value: f64,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
}

impl PieSlice {
    /// Angular span net of the pad allotment.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle - self.pad_angle
    }
}

/// Proportional angle allocation for pie and donut charts.
///
/// `angle(i) = value(i)/Σvalue × (2π − N·pad_angle)`; slices are placed in
/// input order unless a sort rule is given. A zero total yields an empty
/// layout rather than failing.
pub fn pie_layout(data: &[Datum], pad_angle: f64, sort: SortOrder) -> VizResult<Vec<PieSlice>> {
    if !pad_angle.is_finite() || pad_angle < 0.0 {
        return Err(VizError::InvalidConfig(
            "pad angle must be finite and >= 0".to_owned(),
        ));
    }
    for datum in data {
        if !datum.value.is_finite() || datum.value < 0.0 {
            return Err(VizError::InvalidData(
                "pie values must be finite and >= 0".to_owned(),
            ));
        }
    }
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let total: f64 = data.iter().map(|d| d.value).sum();
    if total == 0.0 {
        return Ok(Vec::new());
    }

    let n = data.len() as f64;
    let usable = TAU - n * pad_angle;
    if usable < 0.0 {
        return Err(VizError::InvalidConfig(
            "pad angle leaves no usable angular space".to_owned(),
        ));
    }

    let mut order: Vec<usize> = (0..data.len()).collect();
    match sort {
        SortOrder::None => {}
        SortOrder::Ascending => order.sort_by(|&a, &b| compare_values(data[a].value, data[b].value)),
        SortOrder::Descending => {
            order.sort_by(|&a, &b| compare_values(data[b].value, data[a].value));
        }
    }

    let mut slices = Vec::with_capacity(data.len());
    let mut cursor = 0.0;
    for input_index in order {
        let datum = &data[input_index];
        let fraction = datum.value / total;
        let sweep = fraction * usable;
        let span = sweep + pad_angle;
        slices.push(PieSlice {
            input_index,
            label: datum.key.display(),
            value: datum.value,
            fraction,
            start_angle: cursor,
            end_angle: cursor + span,
            pad_angle,
        });
        cursor += span;
    }
    Ok(slices)
}

fn compare_values(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
