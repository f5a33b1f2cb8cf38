//! Water surface: sphere geometry and the shader material driving it.

mod material;
mod mesh;

// Re-export public types
pub use material::{AudioTexture, WaterMaterial};
pub use mesh::{SphereMesh, Vertex};
