use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::anim::Easing;
use crate::core::color::{Color, OrdinalScale};
use crate::core::types::Viewport;
use crate::error::{VizError, VizResult};
use crate::layout::pie::SortOrder;
use crate::layout::stack::{StackOffset, StackOrder};
use crate::shape::curve::CurveType;

/// Chart family rendered by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Pie,
    Donut,
    StackedArea,
    Stream,
    Violin,
    Horizon,
    Flow,
    Chord,
    Radar,
}

/// Enumerated tooltip content rule evaluated against the hovered datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipFormat {
    Label,
    Value,
    LabelValue,
    /// `label: 12.3%` of the rendered total.
    PercentOfTotal,
}

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist/load chart setup without
/// inventing their own format. Every option is validated once at engine
/// construction, never mid-animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub viewport: Viewport,
    pub kind: ChartKind,
    #[serde(default = "default_palette")]
    pub palette: OrdinalScale,
    #[serde(default = "default_curve_type")]
    pub curve_type: CurveType,
    #[serde(default = "default_band_count")]
    pub band_count: usize,
    #[serde(default = "default_bandwidth")]
    pub bandwidth: f64,
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default = "default_sort_order")]
    pub sort_order: SortOrder,
    #[serde(default = "default_stack_order")]
    pub stack_order: StackOrder,
    #[serde(default = "default_stack_offset")]
    pub stack_offset: StackOffset,
    #[serde(default)]
    pub pad_angle: f64,
    #[serde(default = "default_inner_radius_ratio")]
    pub inner_radius_ratio: f64,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: f64,
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: f64,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default = "default_dim_opacity")]
    pub dim_opacity: f64,
    #[serde(default = "default_hover_grace_ms")]
    pub hover_grace_ms: f64,
    #[serde(default = "default_hover_min_interval_ms")]
    pub hover_min_interval_ms: f64,
    #[serde(default = "default_tooltip_offset")]
    pub tooltip_offset: (f64, f64),
    #[serde(default = "default_tooltip_format")]
    pub tooltip_format: TooltipFormat,
    #[serde(default = "default_flow_node_width")]
    pub flow_node_width: f64,
    #[serde(default = "default_flow_node_gap")]
    pub flow_node_gap: f64,
}

impl EngineConfig {
    /// Creates a config with defaults for everything but geometry and kind.
    #[must_use]
    pub fn new(viewport: Viewport, kind: ChartKind) -> Self {
        Self {
            viewport,
            kind,
            palette: default_palette(),
            curve_type: default_curve_type(),
            band_count: default_band_count(),
            bandwidth: default_bandwidth(),
            grid_size: default_grid_size(),
            sort_order: default_sort_order(),
            stack_order: default_stack_order(),
            stack_offset: default_stack_offset(),
            pad_angle: 0.0,
            inner_radius_ratio: default_inner_radius_ratio(),
            corner_radius: 0.0,
            animation_duration_ms: default_animation_duration_ms(),
            stagger_ms: default_stagger_ms(),
            easing: Easing::default(),
            dim_opacity: default_dim_opacity(),
            hover_grace_ms: default_hover_grace_ms(),
            hover_min_interval_ms: default_hover_min_interval_ms(),
            tooltip_offset: default_tooltip_offset(),
            tooltip_format: default_tooltip_format(),
            flow_node_width: default_flow_node_width(),
            flow_node_gap: default_flow_node_gap(),
        }
    }

    #[must_use]
    pub fn with_palette(mut self, palette: OrdinalScale) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_curve_type(mut self, curve_type: CurveType) -> Self {
        self.curve_type = curve_type;
        self
    }

    #[must_use]
    pub fn with_band_count(mut self, band_count: usize) -> Self {
        self.band_count = band_count;
        self
    }

    #[must_use]
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    #[must_use]
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    #[must_use]
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn with_stack_order(mut self, stack_order: StackOrder) -> Self {
        self.stack_order = stack_order;
        self
    }

    #[must_use]
    pub fn with_stack_offset(mut self, stack_offset: StackOffset) -> Self {
        self.stack_offset = stack_offset;
        self
    }

    #[must_use]
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    #[must_use]
    pub fn with_inner_radius_ratio(mut self, ratio: f64) -> Self {
        self.inner_radius_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, duration_ms: f64, stagger_ms: f64, easing: Easing) -> Self {
        self.animation_duration_ms = duration_ms;
        self.stagger_ms = stagger_ms;
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn with_dim_opacity(mut self, dim_opacity: f64) -> Self {
        self.dim_opacity = dim_opacity;
        self
    }

    #[must_use]
    pub fn with_hover_grace_ms(mut self, grace_ms: f64) -> Self {
        self.hover_grace_ms = grace_ms;
        self
    }

    #[must_use]
    pub fn with_hover_min_interval_ms(mut self, min_interval_ms: f64) -> Self {
        self.hover_min_interval_ms = min_interval_ms;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, offset: (f64, f64), format: TooltipFormat) -> Self {
        self.tooltip_offset = offset;
        self.tooltip_format = format;
        self
    }

    #[must_use]
    pub fn with_flow_geometry(mut self, node_width: f64, node_gap: f64) -> Self {
        self.flow_node_width = node_width;
        self.flow_node_gap = node_gap;
        self
    }

    /// Fails fast on any out-of-range option.
    pub fn validate(&self) -> VizResult<()> {
        if !self.viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.band_count < 1 {
            return Err(VizError::InvalidConfig(
                "band count must be at least 1".to_owned(),
            ));
        }
        if !self.bandwidth.is_finite() || self.bandwidth <= 0.0 {
            return Err(VizError::InvalidConfig(
                "bandwidth must be finite and > 0".to_owned(),
            ));
        }
        if self.grid_size < 2 {
            return Err(VizError::InvalidConfig(
                "grid size must be at least 2".to_owned(),
            ));
        }
        if !self.pad_angle.is_finite() || self.pad_angle < 0.0 {
            return Err(VizError::InvalidConfig(
                "pad angle must be finite and >= 0".to_owned(),
            ));
        }
        if !self.inner_radius_ratio.is_finite() || !(0.0..1.0).contains(&self.inner_radius_ratio) {
            return Err(VizError::InvalidConfig(
                "inner radius ratio must be in [0, 1)".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(VizError::InvalidConfig(
                "corner radius must be finite and >= 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("animation duration", self.animation_duration_ms),
            ("stagger", self.stagger_ms),
            ("hover grace", self.hover_grace_ms),
            ("hover min interval", self.hover_min_interval_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(VizError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.dim_opacity.is_finite() || !(0.0..=1.0).contains(&self.dim_opacity) {
            return Err(VizError::InvalidConfig(
                "dim opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !self.tooltip_offset.0.is_finite() || !self.tooltip_offset.1.is_finite() {
            return Err(VizError::InvalidConfig(
                "tooltip offset must be finite".to_owned(),
            ));
        }
        if !self.flow_node_width.is_finite() || self.flow_node_width <= 0.0 {
            return Err(VizError::InvalidConfig(
                "flow node width must be finite and > 0".to_owned(),
            ));
        }
        if !self.flow_node_gap.is_finite() || self.flow_node_gap < 0.0 {
            return Err(VizError::InvalidConfig(
                "flow node gap must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VizError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> VizResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| VizError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_palette() -> OrdinalScale {
    let mut entries = IndexMap::new();
    entries.insert("indigo".to_owned(), Color::rgb(0.27, 0.32, 0.80));
    entries.insert("teal".to_owned(), Color::rgb(0.10, 0.62, 0.60));
    entries.insert("amber".to_owned(), Color::rgb(0.93, 0.69, 0.17));
    entries.insert("rose".to_owned(), Color::rgb(0.86, 0.30, 0.42));
    entries.insert("slate".to_owned(), Color::rgb(0.42, 0.47, 0.56));
    entries.insert("moss".to_owned(), Color::rgb(0.45, 0.61, 0.33));
    OrdinalScale::new(entries).unwrap_or_else(|_| {
        // The built-in palette is statically valid.
        unreachable!("default palette entries are valid")
    })
}

fn default_curve_type() -> CurveType {
    CurveType::Monotone
}

fn default_band_count() -> usize {
    4
}

fn default_bandwidth() -> f64 {
    1.0
}

fn default_grid_size() -> usize {
    64
}

fn default_sort_order() -> SortOrder {
    SortOrder::None
}

fn default_stack_order() -> StackOrder {
    StackOrder::InputOrder
}

fn default_stack_offset() -> StackOffset {
    StackOffset::Zero
}

fn default_inner_radius_ratio() -> f64 {
    0.6
}

fn default_animation_duration_ms() -> f64 {
    750.0
}

fn default_stagger_ms() -> f64 {
    50.0
}

fn default_dim_opacity() -> f64 {
    0.2
}

fn default_hover_grace_ms() -> f64 {
    100.0
}

fn default_hover_min_interval_ms() -> f64 {
    50.0
}

fn default_tooltip_offset() -> (f64, f64) {
    (12.0, -24.0)
}

fn default_tooltip_format() -> TooltipFormat {
    TooltipFormat::LabelValue
}

fn default_flow_node_width() -> f64 {
    24.0
}

fn default_flow_node_gap() -> f64 {
    8.0
}
