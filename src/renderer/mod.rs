//! WebGPU rendering module
//!
//! Flat-shaded triangles for the court, paddles and ball. Text (scores,
//! countdown, banners) lives in the DOM HUD.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, board_to_ndc};
pub use vertex::Vertex;
