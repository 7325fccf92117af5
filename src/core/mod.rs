pub mod color;
pub mod primitives;
pub mod scale;
pub mod types;

pub use color::{Color, OrdinalScale, SequentialScale};
pub use scale::{BandScale, LinearScale, TimeScale};
pub use types::{DataSeries, Datum, DatumKey, Viewport};
