//! WebGPU rendering module
//!
//! One pipeline draws everything: textured quads sampled from a procedural
//! atlas, tinted per vertex. Text lives in the DOM, not here.

pub mod atlas;
pub mod pipeline;
pub mod sprites;
pub mod vertex;

pub use pipeline::RenderState;
pub use sprites::build_scene;
pub use vertex::Vertex;
