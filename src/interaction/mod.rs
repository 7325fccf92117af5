pub mod tooltip;

pub use tooltip::{TooltipState, TooltipStateMachine};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{VizError, VizResult};

/// Hover behavior tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverConfig {
    /// Opacity applied to non-active siblings while something is hovered.
    pub dim_opacity: f64,
    /// Pointer-leave grace window before the active element is cleared.
    pub grace_ms: f64,
    /// Minimum interval between nearest-datum resolutions.
    pub min_interval_ms: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            dim_opacity: 0.2,
            grace_ms: 100.0,
            min_interval_ms: 50.0,
        }
    }
}

/// Screen anchor of one hoverable element, resolved along the x-domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementAnchor {
    pub element_id: String,
    pub x: f64,
    pub y: f64,
}

/// Public hover state. Written only by `InteractionController`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverState {
    pub active_id: Option<String>,
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub pending_clear_at_ms: Option<f64>,
}

impl Default for HoverState {
    fn default() -> Self {
        Self {
            active_id: None,
            pointer_x: 0.0,
            pointer_y: 0.0,
            pending_clear_at_ms: None,
        }
    }
}

/// Hover transition produced by a pointer update.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    Entered { element_id: String },
    Moved { element_id: String },
    Left { element_id: String },
}

/// Resolves pointer positions to the nearest element anchor and owns the
/// single-writer hover state.
#[derive(Debug, Default)]
pub struct InteractionController {
    config: HoverConfig,
    anchors: Vec<ElementAnchor>,
    state: HoverState,
    last_resolution_at_ms: Option<f64>,
}

impl InteractionController {
    pub fn new(config: HoverConfig) -> VizResult<Self> {
        if !config.dim_opacity.is_finite() || !(0.0..=1.0).contains(&config.dim_opacity) {
            return Err(VizError::InvalidConfig(
                "dim opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !config.grace_ms.is_finite() || config.grace_ms < 0.0 {
            return Err(VizError::InvalidConfig(
                "hover grace must be finite and >= 0".to_owned(),
            ));
        }
        if !config.min_interval_ms.is_finite() || config.min_interval_ms < 0.0 {
            return Err(VizError::InvalidConfig(
                "hover min interval must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            config,
            anchors: Vec::new(),
            state: HoverState::default(),
            last_resolution_at_ms: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> HoverConfig {
        self.config
    }

    #[must_use]
    pub fn state(&self) -> &HoverState {
        &self.state
    }

    /// Replaces the anchor set, sorted by x. Equal positions keep input
    /// order, which is what makes tie-breaks deterministic.
    pub fn set_anchors(&mut self, mut anchors: Vec<ElementAnchor>) -> VizResult<()> {
        for anchor in &anchors {
            if !anchor.x.is_finite() || !anchor.y.is_finite() {
                return Err(VizError::InvalidData(
                    "element anchors must be finite".to_owned(),
                ));
            }
        }
        anchors.sort_by_key(|anchor| OrderedFloat(anchor.x));
        self.anchors = anchors;
        Ok(())
    }

    /// Clears hover state and anchors, used on data replacement.
    pub fn reset(&mut self) {
        self.anchors.clear();
        self.state = HoverState::default();
        self.last_resolution_at_ms = None;
    }

    /// Nearest anchor along x via bisection over the sorted positions.
    ///
    /// The two bracketing candidates are compared; an exact distance tie
    /// resolves to the lower-index candidate. Empty anchor sets resolve to
    /// no match.
    #[must_use]
    pub fn nearest_anchor(&self, x: f64) -> Option<&ElementAnchor> {
        if self.anchors.is_empty() || !x.is_finite() {
            return None;
        }
        let insertion = self.anchors.partition_point(|anchor| anchor.x < x);

        let mut candidates: SmallVec<[(OrderedFloat<f64>, usize); 2]> = SmallVec::new();
        if insertion > 0 {
            let index = insertion - 1;
            candidates.push((OrderedFloat((x - self.anchors[index].x).abs()), index));
        }
        if insertion < self.anchors.len() {
            candidates.push((OrderedFloat((x - self.anchors[insertion].x).abs()), insertion));
        }

        candidates
            .into_iter()
            .min_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, index)| &self.anchors[index])
    }

    /// Pointer update. Resolution is rate-limited; the raw pointer position
    /// is always recorded. Returns the hover transitions this update caused.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> SmallVec<[HoverEvent; 2]> {
        self.state.pointer_x = x;
        self.state.pointer_y = y;

        let mut events = SmallVec::new();
        if let Some(last) = self.last_resolution_at_ms {
            if now_ms - last < self.config.min_interval_ms {
                return events;
            }
        }

        let resolved = self.nearest_anchor(x).map(|a| a.element_id.clone());
        let Some(element_id) = resolved else {
            return events;
        };
        self.last_resolution_at_ms = Some(now_ms);

        // Re-entry within the grace window cancels the pending clear.
        self.state.pending_clear_at_ms = None;

        match self.state.active_id.take() {
            Some(previous) if previous == element_id => {
                self.state.active_id = Some(previous.clone());
                events.push(HoverEvent::Moved {
                    element_id: previous,
                });
            }
            Some(previous) => {
                self.state.active_id = Some(element_id.clone());
                events.push(HoverEvent::Left {
                    element_id: previous,
                });
                events.push(HoverEvent::Entered { element_id });
            }
            None => {
                self.state.active_id = Some(element_id.clone());
                events.push(HoverEvent::Entered { element_id });
            }
        }
        events
    }

    /// Arms the grace-window clear. The active element stays hovered until
    /// a later `tick` past the deadline, unless the pointer re-enters first.
    pub fn pointer_leave(&mut self, now_ms: f64) {
        if self.state.active_id.is_some() {
            self.state.pending_clear_at_ms = Some(now_ms + self.config.grace_ms);
        }
    }

    /// Processes a due grace-window clear, returning the element left.
    pub fn tick(&mut self, now_ms: f64) -> Option<HoverEvent> {
        let deadline = self.state.pending_clear_at_ms?;
        if now_ms < deadline {
            return None;
        }
        self.state.pending_clear_at_ms = None;
        self.state
            .active_id
            .take()
            .map(|element_id| HoverEvent::Left { element_id })
    }
}
