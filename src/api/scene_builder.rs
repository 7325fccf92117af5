use std::f64::consts::TAU;

use crate::core::color::{Color, SequentialScale};
use crate::core::scale::{BandScale, LinearScale};
use crate::core::types::{DataSeries, Datum};
use crate::error::{VizError, VizResult};
use crate::layout::chord::chord_layout;
use crate::layout::flow::{FlowConfig, FlowLink, flow_layout};
use crate::layout::horizon::horizon_layout;
use crate::layout::kde::{evaluation_grid, kde_layout};
use crate::layout::pie::pie_layout;
use crate::layout::stack::stack_layout;
use crate::shape::arc::ArcShape;
use crate::shape::area::{area_path, area_to_baseline};
use crate::shape::path::{Path, polar_point};
use crate::shape::radial::radial_polygon;
use crate::shape::ribbon::{chord_ribbon, flow_ribbon};

use super::engine_config::{ChartKind, EngineConfig};
use super::scene::{ElementGeometry, SceneElement};

/// Fraction of the smaller viewport edge used as the outer radius of
/// radial charts.
const RADIAL_EXTENT: f64 = 0.45;
/// Ring thickness fraction for chord node arcs.
const CHORD_RING_RATIO: f64 = 0.92;
/// Half-width of a violin at its densest point, as a viewport fraction.
const VIOLIN_EXTENT: f64 = 0.35;

pub(super) fn build_series_elements(
    config: &EngineConfig,
    series: &[DataSeries],
) -> VizResult<Vec<SceneElement>> {
    match config.kind {
        ChartKind::Pie | ChartKind::Donut => build_pie(config, series),
        ChartKind::StackedArea | ChartKind::Stream => build_stack(config, series),
        ChartKind::Violin => build_violin(config, series),
        ChartKind::Horizon => build_horizon(config, series),
        ChartKind::Radar => build_radar(config, series),
        ChartKind::Flow | ChartKind::Chord => Err(VizError::InvalidData(
            "flow and chord charts take their data through set_flow/set_matrix".to_owned(),
        )),
    }
}

fn datum_color(config: &EngineConfig, datum: &Datum, fallback_index: usize) -> VizResult<Color> {
    match &datum.category {
        Some(category) => config.palette.color_of(category),
        None => Ok(config.palette.color_at(fallback_index)),
    }
}

fn center_of(config: &EngineConfig) -> (f64, f64) {
    (
        f64::from(config.viewport.width) * 0.5,
        f64::from(config.viewport.height) * 0.5,
    )
}

fn outer_radius_of(config: &EngineConfig) -> f64 {
    f64::from(config.viewport.width.min(config.viewport.height)) * RADIAL_EXTENT
}

/// Numeric x positions for a series: numeric keys where present, the point
/// index otherwise.
fn x_positions(series: &DataSeries) -> Vec<f64> {
    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| p.key.as_number().unwrap_or(i as f64))
        .collect()
}

fn build_pie(config: &EngineConfig, series: &[DataSeries]) -> VizResult<Vec<SceneElement>> {
    let Some(first) = series.first() else {
        return Ok(Vec::new());
    };

    let slices = pie_layout(&first.points, config.pad_angle, config.sort_order)?;
    let (cx, cy) = center_of(config);
    let outer = outer_radius_of(config);
    let inner = match config.kind {
        ChartKind::Donut => outer * config.inner_radius_ratio,
        _ => 0.0,
    };

    let mut elements = Vec::with_capacity(slices.len());
    for slice in &slices {
        let shape = ArcShape {
            center_x: cx,
            center_y: cy,
            inner_radius: inner,
            outer_radius: outer,
            corner_radius: config.corner_radius,
            start_angle: slice.start_angle,
            end_angle: slice.end_angle,
            pad_angle: slice.pad_angle,
        };
        shape.validate()?;
        let (ax, ay) = shape.centroid();
        let datum = &first.points[slice.input_index];
        elements.push(SceneElement {
            id: format!("slice-{}", slice.input_index),
            geometry: ElementGeometry::Arc(shape),
            color: datum_color(config, datum, slice.input_index)?,
            label: slice.label.clone(),
            value: slice.value,
            anchor_x: ax,
            anchor_y: ay,
            hoverable: true,
        });
    }
    Ok(elements)
}

fn build_stack(config: &EngineConfig, series: &[DataSeries]) -> VizResult<Vec<SceneElement>> {
    let bands = stack_layout(series, config.stack_order, config.stack_offset)?;
    if bands.is_empty() {
        return Ok(Vec::new());
    }

    let xs = x_positions(&series[bands[0].input_index]);
    let width = f64::from(config.viewport.width);
    let height = f64::from(config.viewport.height);
    let x_scale = LinearScale::from_values(&xs, (0.0, width))?;

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for band in &bands {
        for t in 0..band.lower.len() {
            y_min = y_min.min(band.lower[t]);
            y_max = y_max.max(band.upper[t]);
        }
    }
    let y_scale = LinearScale::new((y_min, y_max), (height, 0.0))?;

    let mut elements = Vec::with_capacity(bands.len());
    for band in &bands {
        let mut upper = Vec::with_capacity(xs.len());
        let mut lower = Vec::with_capacity(xs.len());
        for t in 0..xs.len() {
            let x = x_scale.scale(xs[t])?;
            upper.push((x, y_scale.scale(band.upper[t])?));
            lower.push((x, y_scale.scale(band.lower[t])?));
        }
        let path = area_path(&upper, &lower, config.curve_type);

        let mid = xs.len() / 2;
        let anchor_y = (upper[mid].1 + lower[mid].1) * 0.5;
        let source = &series[band.input_index];
        let color = match source.points.first().and_then(|p| p.category.as_ref()) {
            Some(category) => config.palette.color_of(category)?,
            None => config.palette.color_at(band.input_index),
        };
        elements.push(SceneElement {
            id: format!("band-{}", band.input_index),
            geometry: ElementGeometry::Static(path),
            color,
            label: band.name.clone(),
            value: source.total(),
            anchor_x: upper[mid].0,
            anchor_y,
            hoverable: true,
        });
    }
    Ok(elements)
}

fn build_violin(config: &EngineConfig, series: &[DataSeries]) -> VizResult<Vec<SceneElement>> {
    let Some(first) = series.first() else {
        return Ok(Vec::new());
    };
    let samples: Vec<f64> = first.points.iter().map(|p| p.value).collect();
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let (min, max) = match first.value_range() {
        Some(range) => range,
        None => return Ok(Vec::new()),
    };
    if min == max {
        // Zero variance renders the defined empty geometry.
        return Ok(Vec::new());
    }

    let grid = evaluation_grid(min - config.bandwidth, max + config.bandwidth, config.grid_size)?;
    let density = kde_layout(&samples, config.bandwidth, &grid)?;
    if density.is_empty() {
        return Ok(Vec::new());
    }

    let height = f64::from(config.viewport.height);
    let width = f64::from(config.viewport.width);
    let y_scale = LinearScale::new((grid[0], grid[grid.len() - 1]), (height, 0.0))?;
    let max_density = density.iter().fold(0.0f64, |acc, p| acc.max(p.density));
    if max_density == 0.0 {
        return Ok(Vec::new());
    }
    let half_width = width * VIOLIN_EXTENT / max_density;
    let cx = width * 0.5;

    let mut right = Vec::with_capacity(density.len());
    let mut left = Vec::with_capacity(density.len());
    for point in &density {
        let y = y_scale.scale(point.x)?;
        right.push((cx + point.density * half_width, y));
        left.push((cx - point.density * half_width, y));
    }
    let path = area_path(&right, &left, config.curve_type);

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    Ok(vec![SceneElement {
        id: "violin-0".to_owned(),
        geometry: ElementGeometry::Static(path),
        color: config.palette.color_at(0),
        label: first.name.clone(),
        value: mean,
        anchor_x: cx,
        anchor_y: y_scale.scale(mean)?,
        hoverable: true,
    }])
}

fn build_horizon(config: &EngineConfig, series: &[DataSeries]) -> VizResult<Vec<SceneElement>> {
    let Some(first) = series.first() else {
        return Ok(Vec::new());
    };
    let deviations: Vec<f64> = first.points.iter().map(|p| p.value).collect();
    let layout = horizon_layout(&deviations, config.band_count)?;
    if layout.bands.is_empty() {
        return Ok(Vec::new());
    }

    let xs = x_positions(first);
    let width = f64::from(config.viewport.width);
    let height = f64::from(config.viewport.height);
    let x_scale = LinearScale::from_values(&xs, (0.0, width))?;
    let band_count = layout.bands.len() as f64;

    // Deeper tiers render more saturated, one ramp per sign.
    let positive_base = config.palette.color_at(0);
    let negative_base = config.palette.color_at(1);
    let positive_ramp = SequentialScale::new(
        (1.0, band_count),
        positive_base.with_alpha(0.35),
        positive_base,
    )?;
    let negative_ramp = SequentialScale::new(
        (1.0, band_count),
        negative_base.with_alpha(0.35),
        negative_base,
    )?;

    let mut elements = Vec::new();
    for band in &layout.bands {
        let tier = (band.band_index + 1) as f64;
        for (sign_label, sign) in [("pos", 1.0), ("neg", -1.0)] {
            let mut points = Vec::with_capacity(xs.len());
            let mut occupied = false;
            for t in 0..xs.len() {
                let magnitude = (band.values[t] * sign).max(0.0);
                if magnitude > 0.0 {
                    occupied = true;
                }
                let x = x_scale.scale(xs[t])?;
                let y = height * (1.0 - magnitude / layout.band_width);
                points.push((x, y));
            }
            if !occupied {
                continue;
            }
            let path = area_to_baseline(&points, height, config.curve_type);
            let ramp = if sign > 0.0 {
                positive_ramp
            } else {
                negative_ramp
            };
            let mid = xs.len() / 2;
            elements.push(SceneElement {
                id: format!("hband-{sign_label}-{}", band.band_index),
                geometry: ElementGeometry::Static(path),
                color: ramp.color_for(tier),
                label: format!("{} tier {}", first.name, band.band_index + 1),
                value: layout.band_width * (band.band_index + 1) as f64 * sign,
                anchor_x: points[mid].0,
                anchor_y: points[mid].1,
                hoverable: true,
            });
        }
    }
    Ok(elements)
}

fn build_radar(config: &EngineConfig, series: &[DataSeries]) -> VizResult<Vec<SceneElement>> {
    let Some(first) = series.first() else {
        return Ok(Vec::new());
    };
    if first.points.is_empty() {
        return Ok(Vec::new());
    }

    let categories: Vec<String> = first.points.iter().map(|p| p.key.display()).collect();
    let angles = BandScale::new(categories, (0.0, TAU), 0.0)?;

    let mut max_value = 0.0f64;
    for s in series {
        if s.points.len() != first.points.len() {
            return Err(VizError::InvalidData(format!(
                "radar series `{}` has {} points, expected {}",
                s.name,
                s.points.len(),
                first.points.len()
            )));
        }
        for point in &s.points {
            if !point.value.is_finite() || point.value < 0.0 {
                return Err(VizError::InvalidData(
                    "radar values must be finite and >= 0".to_owned(),
                ));
            }
            max_value = max_value.max(point.value);
        }
    }
    if max_value == 0.0 {
        return Ok(Vec::new());
    }

    let (cx, cy) = center_of(config);
    let radius = outer_radius_of(config);
    let r_scale = LinearScale::new((0.0, max_value), (0.0, radius))?;

    let mut elements = Vec::with_capacity(series.len());
    for (index, s) in series.iter().enumerate() {
        let mut vertices = Vec::with_capacity(s.points.len());
        for (axis, point) in s.points.iter().enumerate() {
            let angle = angles
                .position(axis)
                .ok_or_else(|| VizError::InvalidData("radar axis out of range".to_owned()))?;
            vertices.push((angle, r_scale.scale(point.value)?));
        }
        let path = radial_polygon(cx, cy, &vertices);
        let (ax, ay) = polar_point(cx, cy, vertices[0].1, vertices[0].0);
        let color = match s.points.first().and_then(|p| p.category.as_ref()) {
            Some(category) => config.palette.color_of(category)?,
            None => config.palette.color_at(index),
        };
        elements.push(SceneElement {
            id: format!("poly-{index}"),
            geometry: ElementGeometry::Static(path),
            color,
            label: s.name.clone(),
            value: s.total(),
            anchor_x: ax,
            anchor_y: ay,
            hoverable: true,
        });
    }
    Ok(elements)
}

pub(super) fn build_flow_elements(
    config: &EngineConfig,
    source_names: &[String],
    target_names: &[String],
    links: &[FlowLink],
) -> VizResult<Vec<SceneElement>> {
    let layout = flow_layout(
        source_names,
        target_names,
        links,
        FlowConfig {
            width: f64::from(config.viewport.width),
            height: f64::from(config.viewport.height),
            node_width: config.flow_node_width,
            node_gap: config.flow_node_gap,
        },
    )?;

    let mut elements = Vec::new();
    for (prefix, nodes, palette_offset) in [
        ("src", &layout.sources, 0usize),
        ("dst", &layout.targets, layout.sources.len()),
    ] {
        for node in nodes {
            let mut path = Path::with_capacity(5);
            path.move_to(node.x, node.top);
            path.line_to(node.x + config.flow_node_width, node.top);
            path.line_to(node.x + config.flow_node_width, node.top + node.height);
            path.line_to(node.x, node.top + node.height);
            path.close();
            elements.push(SceneElement {
                id: format!("{prefix}-{}", node.index),
                geometry: ElementGeometry::Static(path),
                color: config.palette.color_at(palette_offset + node.index),
                label: node.name.clone(),
                value: node.value,
                anchor_x: node.x + config.flow_node_width * 0.5,
                anchor_y: node.top + node.height * 0.5,
                hoverable: true,
            });
        }
    }

    for link in &layout.links {
        let path = flow_ribbon(
            link.source_x,
            link.source_top,
            link.source_bottom,
            link.target_x,
            link.target_top,
            link.target_bottom,
        )?;
        let source_name = &layout.sources[link.source].name;
        let target_name = &layout.targets[link.target].name;
        elements.push(SceneElement {
            id: format!("link-{}", link.link_index),
            geometry: ElementGeometry::Static(path),
            color: config.palette.color_at(link.source).with_alpha(0.45),
            label: format!("{source_name} → {target_name}"),
            value: link.value,
            anchor_x: (link.source_x + link.target_x) * 0.5,
            anchor_y: (link.source_top + link.target_top) * 0.5
                + (link.source_bottom - link.source_top) * 0.5,
            hoverable: true,
        });
    }
    Ok(elements)
}

pub(super) fn build_chord_elements(
    config: &EngineConfig,
    names: &[String],
    matrix: &[Vec<f64>],
) -> VizResult<Vec<SceneElement>> {
    if names.len() != matrix.len() {
        return Err(VizError::InvalidData(format!(
            "chord names count {} does not match matrix size {}",
            names.len(),
            matrix.len()
        )));
    }

    let layout = chord_layout(matrix, config.pad_angle)?;
    let (cx, cy) = center_of(config);
    let outer = outer_radius_of(config);
    let ring_inner = outer * CHORD_RING_RATIO;

    let mut elements = Vec::new();
    for node in &layout.nodes {
        let shape = ArcShape {
            center_x: cx,
            center_y: cy,
            inner_radius: ring_inner,
            outer_radius: outer,
            corner_radius: 0.0,
            start_angle: node.start_angle,
            end_angle: node.end_angle,
            pad_angle: 0.0,
        };
        shape.validate()?;
        let (ax, ay) = shape.centroid();
        elements.push(SceneElement {
            id: format!("node-{}", node.index),
            geometry: ElementGeometry::Arc(shape),
            color: config.palette.color_at(node.index),
            label: names[node.index].clone(),
            value: node.weight,
            anchor_x: ax,
            anchor_y: ay,
            hoverable: true,
        });
    }

    for ribbon in &layout.ribbons {
        let path = chord_ribbon(cx, cy, ring_inner, ribbon.source_arc, ribbon.target_arc)?;
        let mid_angle = (ribbon.source_arc.start_angle + ribbon.source_arc.end_angle) * 0.5;
        let (ax, ay) = polar_point(cx, cy, ring_inner * 0.5, mid_angle);
        elements.push(SceneElement {
            id: format!("ribbon-{}-{}", ribbon.source, ribbon.target),
            geometry: ElementGeometry::Static(path),
            color: config.palette.color_at(ribbon.source).with_alpha(0.45),
            label: format!("{} → {}", names[ribbon.source], names[ribbon.target]),
            value: ribbon.value,
            anchor_x: ax,
            anchor_y: ay,
            hoverable: true,
        });
    }
    Ok(elements)
}
