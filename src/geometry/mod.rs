//! Grid geometry: island falloff and cell neighborhoods.

mod falloff;
pub mod neighbors;

pub use falloff::Falloff;
pub use neighbors::{neighbor_4, CARDINAL};
