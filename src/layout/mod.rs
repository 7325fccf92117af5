pub mod chord;
pub mod flow;
pub mod horizon;
pub mod kde;
pub mod pie;
pub mod stack;

pub use chord::{ChordLayout, ChordNodeArc, ChordRibbon, chord_layout};
pub use flow::{FlowConfig, FlowLayout, FlowLink, FlowNode, PlacedFlowLink, flow_layout};
pub use horizon::{HorizonBand, HorizonLayout, horizon_layout};
pub use kde::{DensityPoint, evaluation_grid, kde_layout, trapezoid_integral};
pub use pie::{PieSlice, SortOrder, pie_layout};
pub use stack::{StackOffset, StackOrder, StackedBand, stack_layout};
