use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::anim::AnimProperty;
use crate::core::color::Color;
use crate::shape::arc::ArcShape;
use crate::shape::path::Path;

/// Mutable per-element draw state, the single animation/interaction target.
///
/// The renderer-facing snapshot is a pure function of the element base
/// geometry and this state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawState {
    /// Animated opacity in [0, 1].
    pub opacity: f64,
    /// Animated reveal fraction for non-arc shapes.
    pub progress: f64,
    /// Animated wedge angles, only meaningful for arc elements.
    pub start_angle: f64,
    pub end_angle: f64,
    /// Hover dim multiplier applied on top of `opacity`.
    pub dim_factor: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            progress: 1.0,
            start_angle: 0.0,
            end_angle: 0.0,
            dim_factor: 1.0,
        }
    }
}

impl DrawState {
    pub fn apply(&mut self, property: AnimProperty, value: f64) {
        match property {
            AnimProperty::Opacity => self.opacity = value,
            AnimProperty::Progress => self.progress = value,
            AnimProperty::StartAngle => self.start_angle = value,
            AnimProperty::EndAngle => self.end_angle = value,
        }
    }
}

/// Scene state map: element id → draw state, deterministic iteration order.
pub type SceneMap = IndexMap<String, DrawState>;

/// Base geometry of one element before draw state is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementGeometry {
    /// Wedge whose angles are owned by the draw state tween.
    Arc(ArcShape),
    /// Finished path revealed through opacity/progress.
    Static(Path),
}

/// One laid-out scene element with its datum context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    pub id: String,
    pub geometry: ElementGeometry,
    pub color: Color,
    pub label: String,
    pub value: f64,
    /// Screen position used for hit testing and tooltip placement.
    pub anchor_x: f64,
    pub anchor_y: f64,
    /// Whether the element participates in pointer resolution.
    pub hoverable: bool,
}

/// Renderer-facing view of one element at the current draw state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: String,
    pub path: Path,
    pub fill: Color,
    pub opacity: f64,
    pub progress: f64,
    pub label: String,
    pub value: f64,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Full geometry snapshot for one frame, keyed by element id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub elements: IndexMap<String, ElementSnapshot>,
}

impl SceneSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ElementSnapshot> {
        self.elements.get(id)
    }
}
