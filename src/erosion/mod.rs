//! Coast erosion and underside relaxation.
//!
//! Rounds the island silhouette after the surface is generated, then shapes
//! the floor each column hangs down to.

mod bottom;
mod config;
mod edges;

pub use bottom::{relax_bottom, RelaxationReport};
pub use config::BottomConfig;
pub use edges::{interior_mask, is_interior, lower_coast, round_edges, soften_coast, EdgeReport};
