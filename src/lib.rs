pub mod app;
pub mod config;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use app::launch;
pub use config::{AppConfig, RenderConfig, WireframeMode};
pub use render::{RenderPipeline, Scene, ShaderError, ShaderProgram, ShaderSource, ShaderStage};
pub use utils::error::Error;
