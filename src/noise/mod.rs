//! Noise generation module for terrain synthesis.
//!
//! Wraps the `noise` crate's simplex implementation as layered octave noise.

mod fractal;

pub use fractal::{OctaveNoise, OctaveNoiseConfig};
