pub mod arc;
pub mod area;
pub mod curve;
pub mod path;
pub mod radial;
pub mod ribbon;

pub use arc::ArcShape;
pub use area::{area_path, area_to_baseline, stroke_path};
pub use curve::{CurveType, append_curve, line_path};
pub use path::{Path, PathCommand, polar_point};
pub use radial::radial_polygon;
pub use ribbon::{ArcSegment, chord_ribbon, flow_ribbon};
