//! f64 world positions, split-precision encoding, and transform scale helpers for Aether.

mod scale;
mod split;
mod world_position;

pub use scale::max_axis_scale;
pub use split::{SplitPosition, encode_split, split_f64};
pub use world_position::WorldPosition;
