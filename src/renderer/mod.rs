//! WebGPU rendering for the 3D scene
//!
//! Boxes only: the player cube, the moving platforms, the start and goal
//! pads. Meshes are tessellated on the CPU each frame and drawn with a single
//! depth-tested lambert pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
