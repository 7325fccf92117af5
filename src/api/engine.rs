use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::anim::{AnimProperty, AnimationTask, TransitionScheduler};
use crate::core::types::DataSeries;
use crate::error::{VizError, VizResult};
use crate::interaction::tooltip::{TooltipPayload, TooltipState, TooltipStateMachine};
use crate::interaction::{ElementAnchor, HoverConfig, HoverEvent, HoverState, InteractionController};
use crate::layout::flow::FlowLink;

use super::engine_config::{ChartKind, EngineConfig, TooltipFormat};
use super::events::{EngineEvent, EngineEventKind};
use super::scene::{
    DrawState, ElementGeometry, ElementSnapshot, SceneElement, SceneMap, SceneSnapshot,
};
use super::scene_builder::{build_chord_elements, build_flow_elements, build_series_elements};

/// Main orchestration facade consumed by host applications.
///
/// `VizEngine` coordinates layout, the scene state map, the transition
/// scheduler, and pointer interaction. All timestamps are supplied by the
/// caller; the engine never reads a clock and performs no I/O.
#[derive(Debug)]
pub struct VizEngine {
    config: EngineConfig,
    elements: IndexMap<String, SceneElement>,
    scene: SceneMap,
    scheduler: TransitionScheduler,
    interaction: InteractionController,
    tooltip: TooltipStateMachine,
    /// Sum of hoverable element values, the percent-format denominator.
    render_total: f64,
    /// Serialized form of the last installed input, for idempotent rebuilds.
    fingerprint: Option<String>,
}

impl VizEngine {
    pub fn new(config: EngineConfig) -> VizResult<Self> {
        config.validate()?;
        let interaction = InteractionController::new(HoverConfig {
            dim_opacity: config.dim_opacity,
            grace_ms: config.hover_grace_ms,
            min_interval_ms: config.hover_min_interval_ms,
        })?;
        Ok(Self {
            config,
            elements: IndexMap::new(),
            scene: SceneMap::new(),
            scheduler: TransitionScheduler::new(),
            interaction,
            tooltip: TooltipStateMachine::new(),
            render_total: 0.0,
            fingerprint: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn hover_state(&self) -> &HoverState {
        self.interaction.state()
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        self.tooltip.state()
    }

    #[must_use]
    pub fn pending_animations(&self) -> usize {
        self.scheduler.pending()
    }

    /// Installs series data for the series-driven chart kinds.
    ///
    /// Re-installing identical data is a no-op: nothing is re-scheduled.
    pub fn set_series(&mut self, series: &[DataSeries], now_ms: f64) -> VizResult<()> {
        let fingerprint = serde_json::to_string(&series)
            .map_err(|e| VizError::InvalidData(format!("failed to fingerprint series: {e}")))?;
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            trace!("identical series input, skipping re-render");
            return Ok(());
        }

        let elements = build_series_elements(&self.config, series)?;
        self.install(elements, fingerprint, now_ms)
    }

    /// Installs a two-column flow dataset. Only valid for `ChartKind::Flow`.
    pub fn set_flow(
        &mut self,
        source_names: &[String],
        target_names: &[String],
        links: &[FlowLink],
        now_ms: f64,
    ) -> VizResult<()> {
        if self.config.kind != ChartKind::Flow {
            return Err(VizError::InvalidData(
                "set_flow requires a flow chart".to_owned(),
            ));
        }
        let fingerprint = serde_json::to_string(&(source_names, target_names, links))
            .map_err(|e| VizError::InvalidData(format!("failed to fingerprint flow: {e}")))?;
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            trace!("identical flow input, skipping re-render");
            return Ok(());
        }

        let elements = build_flow_elements(&self.config, source_names, target_names, links)?;
        self.install(elements, fingerprint, now_ms)
    }

    /// Installs an N×N flow matrix. Only valid for `ChartKind::Chord`.
    pub fn set_matrix(
        &mut self,
        names: &[String],
        matrix: &[Vec<f64>],
        now_ms: f64,
    ) -> VizResult<()> {
        if self.config.kind != ChartKind::Chord {
            return Err(VizError::InvalidData(
                "set_matrix requires a chord chart".to_owned(),
            ));
        }
        let fingerprint = serde_json::to_string(&(names, matrix))
            .map_err(|e| VizError::InvalidData(format!("failed to fingerprint matrix: {e}")))?;
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            trace!("identical matrix input, skipping re-render");
            return Ok(());
        }

        let elements = build_chord_elements(&self.config, names, matrix)?;
        self.install(elements, fingerprint, now_ms)
    }

    /// Replaces the scene: cancels every in-flight task for superseded
    /// elements, resets hover/tooltip, installs draw states at their reveal
    /// seeds, and schedules the staggered reveal.
    fn install(
        &mut self,
        elements: Vec<SceneElement>,
        fingerprint: String,
        now_ms: f64,
    ) -> VizResult<()> {
        self.scheduler.cancel_all();
        self.interaction.reset();
        self.tooltip.reset();

        debug!(elements = elements.len(), "installing scene");
        self.elements = elements
            .into_iter()
            .map(|element| (element.id.clone(), element))
            .collect();

        self.scene = self
            .elements
            .values()
            .map(|element| (element.id.clone(), seed_state(element)))
            .collect();

        for (index, element) in self.elements.values().enumerate() {
            let delay_ms = index as f64 * self.config.stagger_ms;
            for (property, from, to) in reveal_tracks(element) {
                self.scheduler.schedule(
                    AnimationTask {
                        element_id: element.id.clone(),
                        property,
                        from,
                        to,
                        delay_ms,
                        duration_ms: self.config.animation_duration_ms,
                        easing: self.config.easing,
                    },
                    now_ms,
                )?;
            }
        }

        let anchors: Vec<ElementAnchor> = self
            .elements
            .values()
            .filter(|element| element.hoverable)
            .map(|element| ElementAnchor {
                element_id: element.id.clone(),
                x: element.anchor_x,
                y: element.anchor_y,
            })
            .collect();
        self.interaction.set_anchors(anchors)?;

        self.render_total = self
            .elements
            .values()
            .filter(|element| element.hoverable)
            .map(|element| element.value)
            .sum();
        self.fingerprint = Some(fingerprint);
        Ok(())
    }

    /// Tears the scene down: no tasks, no elements, hover and tooltip reset.
    pub fn clear(&mut self) {
        self.scheduler.cancel_all();
        self.interaction.reset();
        self.tooltip.reset();
        self.elements.clear();
        self.scene.clear();
        self.render_total = 0.0;
        self.fingerprint = None;
    }

    /// Advances animations and due hover clears to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> VizResult<Vec<EngineEvent>> {
        if !now_ms.is_finite() {
            return Err(VizError::InvalidData(
                "timestamp must be finite".to_owned(),
            ));
        }

        let scene = &mut self.scene;
        self.scheduler.tick(now_ms, |element_id, property, value| {
            if let Some(state) = scene.get_mut(element_id) {
                state.apply(property, value);
            }
        });

        let mut events = Vec::new();
        if let Some(HoverEvent::Left { element_id }) = self.interaction.tick(now_ms) {
            self.apply_dim(None);
            self.tooltip.on_leave();
            if let Some(event) = self.datum_event(EngineEventKind::HoverLeave, &element_id) {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Pointer update; returns the events it caused.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> VizResult<Vec<EngineEvent>> {
        if !x.is_finite() || !y.is_finite() || !now_ms.is_finite() {
            return Err(VizError::InvalidData(
                "pointer coordinates and timestamp must be finite".to_owned(),
            ));
        }

        let hover_events = self.interaction.pointer_move(x, y, now_ms);
        let mut events = Vec::with_capacity(hover_events.len());
        for hover_event in hover_events {
            match hover_event {
                HoverEvent::Entered { element_id } => {
                    self.apply_dim(Some(&element_id));
                    if let Some(payload) = self.tooltip_payload(&element_id) {
                        self.tooltip.on_enter(payload);
                    }
                    if let Some(event) = self.datum_event(EngineEventKind::HoverEnter, &element_id)
                    {
                        events.push(event);
                    }
                }
                HoverEvent::Moved { element_id } => {
                    if let Some(payload) = self.tooltip_payload(&element_id) {
                        self.tooltip.on_move(payload);
                    }
                    if let Some(event) = self.datum_event(EngineEventKind::HoverMove, &element_id) {
                        events.push(event);
                    }
                }
                HoverEvent::Left { element_id } => {
                    if let Some(event) = self.datum_event(EngineEventKind::HoverLeave, &element_id)
                    {
                        events.push(event);
                    }
                }
            }
        }
        Ok(events)
    }

    /// Arms the grace-window clear; the actual leave fires on a later tick
    /// unless the pointer re-enters first.
    pub fn pointer_leave(&mut self, now_ms: f64) -> VizResult<()> {
        if !now_ms.is_finite() {
            return Err(VizError::InvalidData(
                "timestamp must be finite".to_owned(),
            ));
        }
        self.interaction.pointer_leave(now_ms);
        Ok(())
    }

    /// Resolves a click through the same nearest-datum path as hover.
    pub fn click(&mut self, x: f64, y: f64, now_ms: f64) -> VizResult<Vec<EngineEvent>> {
        if !x.is_finite() || !y.is_finite() || !now_ms.is_finite() {
            return Err(VizError::InvalidData(
                "pointer coordinates and timestamp must be finite".to_owned(),
            ));
        }
        let resolved = self
            .interaction
            .nearest_anchor(x)
            .map(|anchor| anchor.element_id.clone());
        Ok(resolved
            .and_then(|element_id| self.datum_event(EngineEventKind::Click, &element_id))
            .into_iter()
            .collect())
    }

    /// Renderer-facing geometry snapshot, a pure function of scene state.
    pub fn snapshot(&self) -> VizResult<SceneSnapshot> {
        let mut snapshot = IndexMap::with_capacity(self.elements.len());
        for element in self.elements.values() {
            let state = self
                .scene
                .get(&element.id)
                .copied()
                .unwrap_or_default();
            let path = match &element.geometry {
                ElementGeometry::Arc(shape) => {
                    let mut animated = *shape;
                    animated.start_angle = state.start_angle;
                    animated.end_angle = state.end_angle;
                    animated.to_path()?
                }
                ElementGeometry::Static(path) => path.clone(),
            };
            snapshot.insert(
                element.id.clone(),
                ElementSnapshot {
                    id: element.id.clone(),
                    path,
                    fill: element.color,
                    opacity: state.opacity * state.dim_factor,
                    progress: state.progress,
                    label: element.label.clone(),
                    value: element.value,
                    anchor_x: element.anchor_x,
                    anchor_y: element.anchor_y,
                },
            );
        }
        Ok(SceneSnapshot { elements: snapshot })
    }

    /// Pretty JSON form of the snapshot, for golden and determinism tests.
    pub fn snapshot_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(&self.snapshot()?)
            .map_err(|e| VizError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    fn apply_dim(&mut self, active_id: Option<&str>) {
        for (id, state) in &mut self.scene {
            state.dim_factor = match active_id {
                Some(active) if id != active => self.config.dim_opacity,
                _ => 1.0,
            };
        }
    }

    fn datum_event(&self, kind: EngineEventKind, element_id: &str) -> Option<EngineEvent> {
        let element = self.elements.get(element_id)?;
        Some(EngineEvent {
            kind,
            element_id: element.id.clone(),
            label: element.label.clone(),
            value: element.value,
            x: element.anchor_x,
            y: element.anchor_y,
        })
    }

    fn tooltip_payload(&self, element_id: &str) -> Option<TooltipPayload> {
        let element = self.elements.get(element_id)?;
        let content = match self.config.tooltip_format {
            TooltipFormat::Label => element.label.clone(),
            TooltipFormat::Value => format!("{}", element.value),
            TooltipFormat::LabelValue => format!("{}: {}", element.label, element.value),
            TooltipFormat::PercentOfTotal => {
                if self.render_total > 0.0 {
                    format!(
                        "{}: {:.1}%",
                        element.label,
                        element.value / self.render_total * 100.0
                    )
                } else {
                    element.label.clone()
                }
            }
        };
        Some(TooltipPayload {
            content,
            x: element.anchor_x + self.config.tooltip_offset.0,
            y: element.anchor_y + self.config.tooltip_offset.1,
        })
    }
}

/// Draw state before the reveal: arcs start collapsed at the zero-angle
/// seed, static shapes start invisible.
fn seed_state(element: &SceneElement) -> DrawState {
    match element.geometry {
        ElementGeometry::Arc(_) => DrawState {
            opacity: 1.0,
            progress: 1.0,
            start_angle: 0.0,
            end_angle: 0.0,
            dim_factor: 1.0,
        },
        ElementGeometry::Static(_) => DrawState {
            opacity: 0.0,
            progress: 0.0,
            start_angle: 0.0,
            end_angle: 0.0,
            dim_factor: 1.0,
        },
    }
}

fn reveal_tracks(element: &SceneElement) -> Vec<(AnimProperty, f64, f64)> {
    match &element.geometry {
        ElementGeometry::Arc(shape) => vec![
            (AnimProperty::StartAngle, 0.0, shape.start_angle),
            (AnimProperty::EndAngle, 0.0, shape.end_angle),
        ],
        ElementGeometry::Static(_) => vec![
            (AnimProperty::Opacity, 0.0, 1.0),
            (AnimProperty::Progress, 0.0, 1.0),
        ],
    }
}
