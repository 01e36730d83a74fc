//! Heat-map colouring by share of the report's total time.

pub mod scale;

pub use scale::{Boundary, HeatScale, Rgb};
