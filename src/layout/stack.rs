use serde::{Deserialize, Serialize};

use crate::core::types::DataSeries;
use crate::error::{VizError, VizResult};

/// Baseline strategy for stacked and stream layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackOffset {
    /// Baseline fixed at zero.
    Zero,
    /// Baseline at minus half the column total, centering the stream.
    Silhouette,
    /// Weighted-wiggle baseline minimizing envelope curvature
    /// (Byron-Wattenberg streamgraph recurrence).
    Wiggle,
}

/// Vertical ordering strategy for stacked series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackOrder {
    /// Series stack in input order.
    InputOrder,
    /// Largest-total series nearest the vertical center, halves balanced by
    /// cumulative total; ties break by input index.
    InsideOut,
}

/// One stacked series band in value space.
///
/// `lower[t]..upper[t]` is the band's extent at timestamp `t`;
/// `upper[t] - lower[t]` always equals the series value there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBand {
    /// Position of the series in the input, stable across reordering.
    pub input_index: usize,
    pub name: String,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Decomposes series into stacked bands under the given order and offset.
///
/// All series must share one timestamp grid (equal lengths). Bands are
/// returned bottom-to-top in stacking order, each tagged with its input
/// index.
pub fn stack_layout(
    series: &[DataSeries],
    order: StackOrder,
    offset: StackOffset,
) -> VizResult<Vec<StackedBand>> {
    if series.is_empty() {
        return Ok(Vec::new());
    }
    let len = series[0].points.len();
    for s in series {
        if s.points.len() != len {
            return Err(VizError::InvalidData(format!(
                "stacked series `{}` has {} points, expected {len}",
                s.name,
                s.points.len()
            )));
        }
        for point in &s.points {
            if !point.value.is_finite() || point.value < 0.0 {
                return Err(VizError::InvalidData(format!(
                    "stacked series `{}` contains a negative or non-finite value",
                    s.name
                )));
            }
        }
    }
    if len == 0 {
        return Ok(Vec::new());
    }

    let stack_order = resolve_order(series, order);
    let baseline = resolve_baseline(series, &stack_order, offset, len);

    let mut bands = Vec::with_capacity(series.len());
    let mut cumulative = baseline;
    for &index in &stack_order {
        let s = &series[index];
        let lower = cumulative.clone();
        for (t, point) in s.points.iter().enumerate() {
            cumulative[t] += point.value;
        }
        bands.push(StackedBand {
            input_index: index,
            name: s.name.clone(),
            lower,
            upper: cumulative.clone(),
        });
    }
    Ok(bands)
}

fn resolve_order(series: &[DataSeries], order: StackOrder) -> Vec<usize> {
    match order {
        StackOrder::InputOrder => (0..series.len()).collect(),
        StackOrder::InsideOut => inside_out_order(series),
    }
}

/// Largest totals nearest the center: visit series by descending total
/// (ties by input index) and append each to whichever half currently holds
/// the smaller cumulative total. The bottom half is reversed so the first
/// (largest) series ends adjacent to the center.
fn inside_out_order(series: &[DataSeries]) -> Vec<usize> {
    let mut by_total: Vec<usize> = (0..series.len()).collect();
    by_total.sort_by(|&a, &b| {
        series[b]
            .total()
            .partial_cmp(&series[a].total())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut bottoms: Vec<usize> = Vec::new();
    let mut tops: Vec<usize> = Vec::new();
    let (mut bottom_sum, mut top_sum) = (0.0, 0.0);
    for index in by_total {
        let total = series[index].total();
        if bottom_sum <= top_sum {
            bottoms.push(index);
            bottom_sum += total;
        } else {
            tops.push(index);
            top_sum += total;
        }
    }

    bottoms.reverse();
    bottoms.extend(tops);
    bottoms
}

fn resolve_baseline(
    series: &[DataSeries],
    stack_order: &[usize],
    offset: StackOffset,
    len: usize,
) -> Vec<f64> {
    match offset {
        StackOffset::Zero => vec![0.0; len],
        StackOffset::Silhouette => (0..len)
            .map(|t| -0.5 * series.iter().map(|s| s.points[t].value).sum::<f64>())
            .collect(),
        StackOffset::Wiggle => wiggle_baseline(series, stack_order, len),
    }
}

/// Weighted-wiggle recurrence: at each step the baseline moves by the
/// value-weighted mean of the mid-band slopes,
/// `b(j) = b(j-1) - Σ_i v_i(j)·(Σ_{k<i} Δv_k(j) + Δv_i(j)/2) / Σ_i v_i(j)`,
/// where `Δv(j) = v(j) - v(j-1)` and `i`, `k` run in stacking order.
fn wiggle_baseline(series: &[DataSeries], stack_order: &[usize], len: usize) -> Vec<f64> {
    let mut baseline = vec![0.0; len];
    let mut y = 0.0;
    for j in 1..len {
        let mut weighted_slope = 0.0;
        let mut column_total = 0.0;
        let mut below_delta = 0.0;
        for &index in stack_order {
            let points = &series[index].points;
            let value = points[j].value;
            let delta = value - points[j - 1].value;
            weighted_slope += value * (below_delta + delta * 0.5);
            below_delta += delta;
            column_total += value;
        }
        if column_total != 0.0 {
            y -= weighted_slope / column_total;
        }
        baseline[j] = y;
    }
    baseline
}
