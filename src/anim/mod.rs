pub mod easing;

pub use easing::Easing;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{VizError, VizResult};

/// Scene property a task interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimProperty {
    Opacity,
    /// Reveal fraction for non-arc shapes.
    Progress,
    StartAngle,
    EndAngle,
}

/// One pending interpolation of a scene property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTask {
    pub element_id: String,
    pub property: AnimProperty,
    pub from: f64,
    pub to: f64,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl AnimationTask {
    pub fn validate(&self) -> VizResult<()> {
        for (name, value) in [
            ("from", self.from),
            ("to", self.to),
            ("delay", self.delay_ms),
            ("duration", self.duration_ms),
        ] {
            if !value.is_finite() {
                return Err(VizError::InvalidConfig(format!(
                    "animation {name} must be finite"
                )));
            }
        }
        if self.delay_ms < 0.0 || self.duration_ms < 0.0 {
            return Err(VizError::InvalidConfig(
                "animation delay and duration must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ScheduledTask {
    task: AnimationTask,
    scheduled_at_ms: f64,
}

/// Cooperative frame-driven interpolator.
///
/// The caller supplies every timestamp; the scheduler never reads a clock.
/// At most one task is live per `(element, property)` pair: scheduling over
/// a live pair replaces it without another value application. A finished
/// task applies its final value exactly once and is then removed.
#[derive(Debug, Default)]
pub struct TransitionScheduler {
    tasks: Vec<ScheduledTask>,
}

impl TransitionScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Schedules `task`, replacing any live task for the same
    /// `(element, property)` pair.
    pub fn schedule(&mut self, task: AnimationTask, now_ms: f64) -> VizResult<()> {
        task.validate()?;
        if !now_ms.is_finite() {
            return Err(VizError::InvalidData(
                "timestamp must be finite".to_owned(),
            ));
        }

        self.tasks.retain(|entry| {
            entry.task.element_id != task.element_id || entry.task.property != task.property
        });
        trace!(element = %task.element_id, "scheduling animation task");
        self.tasks.push(ScheduledTask {
            task,
            scheduled_at_ms: now_ms,
        });
        Ok(())
    }

    /// Drops every task for `element_id` without applying anything.
    pub fn cancel_element(&mut self, element_id: &str) {
        self.tasks.retain(|entry| entry.task.element_id != element_id);
    }

    /// Drops all tasks without applying anything.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Advances to `now_ms`, invoking `apply` with the eased, interpolated
    /// value of every task past its delay window. Returns the number of
    /// tasks completed on this tick.
    pub fn tick(
        &mut self,
        now_ms: f64,
        mut apply: impl FnMut(&str, AnimProperty, f64),
    ) -> usize {
        let mut completed = 0;
        let mut remaining = Vec::with_capacity(self.tasks.len());
        for entry in self.tasks.drain(..) {
            let elapsed = now_ms - entry.scheduled_at_ms;
            if elapsed < entry.task.delay_ms {
                remaining.push(entry);
                continue;
            }

            let t = if entry.task.duration_ms <= 0.0 {
                1.0
            } else {
                ((elapsed - entry.task.delay_ms) / entry.task.duration_ms).clamp(0.0, 1.0)
            };
            let eased = entry.task.easing.eval(t);
            let value = entry.task.from + (entry.task.to - entry.task.from) * eased;
            apply(&entry.task.element_id, entry.task.property, value);

            if t >= 1.0 {
                completed += 1;
            } else {
                remaining.push(entry);
            }
        }
        self.tasks = remaining;
        completed
    }
}
