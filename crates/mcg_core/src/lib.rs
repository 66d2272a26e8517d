pub mod geometry;
pub mod input;
pub mod mode;
pub mod time;

pub use geometry::{clamp_dimension, Rect, Size};
pub use input::{InputEvent, InputKind};
pub use mode::RunMode;
