use serde::{Deserialize, Serialize};

/// Pointer-derived event emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEventKind {
    HoverEnter,
    HoverMove,
    HoverLeave,
    Click,
}

/// One event with the resolved datum and its screen position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub kind: EngineEventKind,
    pub element_id: String,
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}
