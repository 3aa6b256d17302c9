pub mod core;
pub mod rendering;

pub use self::core::AppConfig;
pub use rendering::{RenderConfig, WireframeMode};
