use serde::{Deserialize, Serialize};

/// Tooltip content and placement payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipPayload {
    pub content: String,
    pub x: f64,
    pub y: f64,
}

/// Two-state tooltip: `Hidden` or `Visible` with current payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TooltipState {
    Hidden,
    Visible(TooltipPayload),
}

impl TooltipState {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }
}

/// State machine driven by hover events.
///
/// `Hidden --enter--> Visible`; `Visible --move--> Visible` with payload
/// updated in place; `Visible --leave--> Hidden`. A move while hidden is
/// ignored: visibility only ever changes through enter and leave.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipStateMachine {
    state: TooltipState,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self::Hidden
    }
}

impl TooltipStateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn on_enter(&mut self, payload: TooltipPayload) {
        self.state = TooltipState::Visible(payload);
    }

    pub fn on_move(&mut self, payload: TooltipPayload) {
        if let TooltipState::Visible(current) = &mut self.state {
            *current = payload;
        }
    }

    pub fn on_leave(&mut self) {
        self.state = TooltipState::Hidden;
    }

    /// Resets to `Hidden`, used on data replacement and teardown.
    pub fn reset(&mut self) {
        self.state = TooltipState::Hidden;
    }
}
