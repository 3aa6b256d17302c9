pub mod backend;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod shaders;

#[cfg(test)]
mod mock_backend;

pub use backend::{GraphicsApi, NativeGl, PolygonMode};
pub use mesh::{Mesh, MeshData, Vertex};
pub use pipeline::{RenderPipeline, WireframeSchedule};
pub use scene::Scene;
pub use shaders::{Shader, ShaderError, ShaderProgram, ShaderSource, ShaderStage};
