use thiserror::Error;

use crate::render::shaders::ShaderError;

/// Startup and runtime failures. Every variant ends the process with status 1.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Initialization failed: {0:#}")]
    Init(anyhow::Error),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to present frame: {0}")]
    Present(#[from] glutin::error::Error),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Init(err)
    }
}
