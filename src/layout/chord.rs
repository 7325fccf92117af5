use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};
use crate::shape::ribbon::ArcSegment;

/// One node's reserved arc on the chord circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordNodeArc {
    pub index: usize,
    /// Row sum plus column sum, diagonal excluded.
    pub weight: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// One ribbon with its reserved sub-arcs on both nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordRibbon {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub source_arc: ArcSegment,
    pub target_arc: ArcSegment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordLayout {
    pub nodes: Vec<ChordNodeArc>,
    pub ribbons: Vec<ChordRibbon>,
}

impl ChordLayout {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            ribbons: Vec::new(),
        }
    }
}

/// Lays out an N×N flow matrix on the circle.
///
/// Node arc length is proportional to row sum + column sum with `pad_angle`
/// between nodes. Each node arc is partitioned into an outgoing side
/// (flows `i→j` by ascending `j`) followed by an incoming side (flows `j→i`
/// by ascending `j`); ribbon `i→j` spans its reserved sub-arcs on both
/// sides, sized proportional to `matrix[i][j]`. Diagonal entries are
/// excluded. An all-zero matrix yields the empty layout.
pub fn chord_layout(matrix: &[Vec<f64>], pad_angle: f64) -> VizResult<ChordLayout> {
    let n = matrix.len();
    for row in matrix {
        if row.len() != n {
            return Err(VizError::InvalidData(
                "chord matrix must be square".to_owned(),
            ));
        }
        for &value in row {
            if !value.is_finite() || value < 0.0 {
                return Err(VizError::InvalidData(
                    "chord matrix entries must be finite and >= 0".to_owned(),
                ));
            }
        }
    }
    if !pad_angle.is_finite() || pad_angle < 0.0 {
        return Err(VizError::InvalidConfig(
            "pad angle must be finite and >= 0".to_owned(),
        ));
    }
    if n == 0 {
        return Ok(ChordLayout::empty());
    }

    let usable = TAU - n as f64 * pad_angle;
    if usable < 0.0 {
        return Err(VizError::InvalidConfig(
            "pad angle leaves no usable angular space".to_owned(),
        ));
    }

    let weights: Vec<f64> = (0..n).map(|i| node_weight(matrix, i)).collect();
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return Ok(ChordLayout::empty());
    }
    let angle_per_unit = usable / total;

    let mut nodes = Vec::with_capacity(n);
    let mut cursor = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        let span = weight * angle_per_unit;
        nodes.push(ChordNodeArc {
            index,
            weight,
            start_angle: cursor,
            end_angle: cursor + span,
        });
        cursor += span + pad_angle;
    }

    // Sub-arc cursors advance through each node's outgoing then incoming side.
    let mut sub_cursor: Vec<f64> = nodes.iter().map(|node| node.start_angle).collect();
    let mut outgoing: Vec<Vec<ArcSegment>> = vec![Vec::new(); n];
    let mut incoming: Vec<Vec<ArcSegment>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in 0..n {
            let segment = if i == j {
                ArcSegment::new(sub_cursor[i], sub_cursor[i])
            } else {
                let span = matrix[i][j] * angle_per_unit;
                let segment = ArcSegment::new(sub_cursor[i], sub_cursor[i] + span);
                sub_cursor[i] += span;
                segment
            };
            outgoing[i].push(segment);
        }
    }
    for i in 0..n {
        for j in 0..n {
            let segment = if i == j {
                ArcSegment::new(sub_cursor[i], sub_cursor[i])
            } else {
                let span = matrix[j][i] * angle_per_unit;
                let segment = ArcSegment::new(sub_cursor[i], sub_cursor[i] + span);
                sub_cursor[i] += span;
                segment
            };
            incoming[i].push(segment);
        }
    }

    let mut ribbons = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i == j || matrix[i][j] == 0.0 {
                continue;
            }
            ribbons.push(ChordRibbon {
                source: i,
                target: j,
                value: matrix[i][j],
                source_arc: outgoing[i][j],
                target_arc: incoming[j][i],
            });
        }
    }

    Ok(ChordLayout { nodes, ribbons })
}

fn node_weight(matrix: &[Vec<f64>], index: usize) -> f64 {
    let row: f64 = matrix[index]
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, v)| *v)
        .sum();
    let column: f64 = matrix
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, r)| r[index])
        .sum();
    row + column
}
