use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// One weighted source→target edge of a two-column flow chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

impl FlowLink {
    #[must_use]
    pub fn new(source: usize, target: usize, value: f64) -> Self {
        Self {
            source,
            target,
            value,
        }
    }
}

/// Placed node rectangle in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub index: usize,
    pub name: String,
    /// Sum of the values of the links touching this node.
    pub value: f64,
    pub x: f64,
    pub top: f64,
    pub height: f64,
}

/// Placed link with its consumed edge segments on both node sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedFlowLink {
    pub link_index: usize,
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub source_x: f64,
    pub source_top: f64,
    pub source_bottom: f64,
    pub target_x: f64,
    pub target_top: f64,
    pub target_bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
    pub sources: Vec<FlowNode>,
    pub targets: Vec<FlowNode>,
    pub links: Vec<PlacedFlowLink>,
}

impl FlowLayout {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
            targets: Vec::new(),
            links: Vec::new(),
        }
    }
}

/// Geometry parameters for the two columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub width: f64,
    pub height: f64,
    pub node_width: f64,
    pub node_gap: f64,
}

impl FlowConfig {
    pub fn validate(self) -> VizResult<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("node width", self.node_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(VizError::InvalidConfig(format!(
                    "flow {name} must be finite and > 0"
                )));
            }
        }
        if !self.node_gap.is_finite() || self.node_gap < 0.0 {
            return Err(VizError::InvalidConfig(
                "flow node gap must be finite and >= 0".to_owned(),
            ));
        }
        if self.node_width * 2.0 >= self.width {
            return Err(VizError::InvalidConfig(
                "flow node width must leave room between the columns".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Simplified two-column sankey placement.
///
/// Source nodes stack in the left column and target nodes in the right, with
/// heights proportional to node value and a fixed gap between nodes. Link
/// endpoints consume each node edge top-down in link input order, so links
/// touching the same node never overlap. Empty input yields the empty
/// layout.
pub fn flow_layout(
    source_names: &[String],
    target_names: &[String],
    links: &[FlowLink],
    config: FlowConfig,
) -> VizResult<FlowLayout> {
    config.validate()?;
    for link in links {
        if link.source >= source_names.len() || link.target >= target_names.len() {
            return Err(VizError::InvalidData(format!(
                "flow link {}→{} references a missing node",
                link.source, link.target
            )));
        }
        if !link.value.is_finite() || link.value < 0.0 {
            return Err(VizError::InvalidData(
                "flow link values must be finite and >= 0".to_owned(),
            ));
        }
    }
    if links.is_empty() || source_names.is_empty() || target_names.is_empty() {
        return Ok(FlowLayout::empty());
    }

    let mut source_values = vec![0.0; source_names.len()];
    let mut target_values = vec![0.0; target_names.len()];
    for link in links {
        source_values[link.source] += link.value;
        target_values[link.target] += link.value;
    }

    let source_total: f64 = source_values.iter().sum();
    let target_total: f64 = target_values.iter().sum();
    if source_total == 0.0 {
        return Ok(FlowLayout::empty());
    }

    // One shared value→pixel factor keeps link heights equal on both sides.
    let scale = value_scale(config, source_names.len(), source_total)
        .min(value_scale(config, target_names.len(), target_total));

    let source_x = 0.0;
    let target_x = config.width - config.node_width;
    let sources = place_column(source_names, &source_values, source_x, scale, config);
    let targets = place_column(target_names, &target_values, target_x, scale, config);

    // Cursor per node edge: links consume offsets cumulatively in input order.
    let mut source_cursor: Vec<f64> = sources.iter().map(|n| n.top).collect();
    let mut target_cursor: Vec<f64> = targets.iter().map(|n| n.top).collect();

    let mut placed = Vec::with_capacity(links.len());
    for (link_index, link) in links.iter().enumerate() {
        let link_height = link.value * scale;
        let s_top = source_cursor[link.source];
        let t_top = target_cursor[link.target];
        source_cursor[link.source] += link_height;
        target_cursor[link.target] += link_height;
        placed.push(PlacedFlowLink {
            link_index,
            source: link.source,
            target: link.target,
            value: link.value,
            source_x: source_x + config.node_width,
            source_top: s_top,
            source_bottom: s_top + link_height,
            target_x,
            target_top: t_top,
            target_bottom: t_top + link_height,
        });
    }

    Ok(FlowLayout {
        sources,
        targets,
        links: placed,
    })
}

fn value_scale(config: FlowConfig, node_count: usize, total: f64) -> f64 {
    if total == 0.0 {
        return f64::INFINITY;
    }
    let gaps = config.node_gap * node_count.saturating_sub(1) as f64;
    ((config.height - gaps).max(0.0)) / total
}

fn place_column(
    names: &[String],
    values: &[f64],
    x: f64,
    scale: f64,
    config: FlowConfig,
) -> Vec<FlowNode> {
    let mut nodes = Vec::with_capacity(names.len());
    let mut top = 0.0;
    for (index, name) in names.iter().enumerate() {
        let height = values[index] * scale;
        nodes.push(FlowNode {
            index,
            name: name.clone(),
            value: values[index],
            x,
            top,
            height,
        });
        top += height + config.node_gap;
    }
    nodes
}
