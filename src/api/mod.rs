mod engine;
mod engine_config;
mod events;
mod sample_data;
mod scene;
mod scene_builder;

pub use engine::VizEngine;
pub use engine_config::{ChartKind, EngineConfig, TooltipFormat};
pub use events::{EngineEvent, EngineEventKind};
pub use sample_data::SampleDataGenerator;
pub use scene::{
    DrawState, ElementGeometry, ElementSnapshot, SceneElement, SceneMap, SceneSnapshot,
};
