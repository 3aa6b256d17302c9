// shaders.rs - shader compilation and program linking

use log::debug;
use std::ffi::CString;
use std::fmt;
use thiserror::Error;

use super::backend::GraphicsApi;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShaderError {
    #[error("Error compiling {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("Error linking the shaders: {log}")]
    Link { log: String },
}

impl ShaderError {
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            ShaderError::Compile { stage, .. } => Some(*stage),
            ShaderError::Link { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// GLSL text for one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource<'a> {
    pub stage: ShaderStage,
    pub text: &'a str,
}

impl<'a> ShaderSource<'a> {
    pub const fn vertex(text: &'a str) -> Self {
        Self {
            stage: ShaderStage::Vertex,
            text,
        }
    }

    pub const fn fragment(text: &'a str) -> Self {
        Self {
            stage: ShaderStage::Fragment,
            text,
        }
    }
}

/// A compiled shader object, deleted on drop.
pub struct Shader<G: GraphicsApi> {
    api: G,
    id: u32,
    stage: ShaderStage,
}

impl<G: GraphicsApi> Shader<G> {
    pub fn compile(api: &G, source: &ShaderSource<'_>) -> Result<Self, ShaderError> {
        let stage = source.stage;
        let c_str = CString::new(source.text).map_err(|err| ShaderError::Compile {
            stage,
            log: format!("source contains a NUL byte at offset {}", err.nul_position()),
        })?;

        let id = api.create_shader(stage);
        if id == 0 {
            return Err(ShaderError::Compile {
                stage,
                log: "could not create shader object".into(),
            });
        }
        // Owned from here on, so every early return below deletes the object.
        let shader = Self {
            api: api.clone(),
            id,
            stage,
        };

        api.shader_source(id, &c_str);
        api.compile_shader(id);

        if !api.compile_status(id) {
            return Err(ShaderError::Compile {
                stage,
                log: api.shader_info_log(id),
            });
        }

        debug!("Compiled {} shader {}", stage, id);
        Ok(shader)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<G: GraphicsApi> Drop for Shader<G> {
    fn drop(&mut self) {
        self.api.delete_shader(self.id);
    }
}

/// A linked vertex + fragment program, deleted on drop.
pub struct ShaderProgram<G: GraphicsApi> {
    api: G,
    id: u32,
}

impl<G: GraphicsApi> ShaderProgram<G> {
    /// Compiles both sources and links them. A vertex failure returns before
    /// the fragment stage is compiled.
    pub fn build(
        api: &G,
        vertex: &ShaderSource<'_>,
        fragment: &ShaderSource<'_>,
    ) -> Result<Self, ShaderError> {
        let vertex_shader = Shader::compile(api, vertex)?;
        let fragment_shader = Shader::compile(api, fragment)?;
        Self::link(api, &vertex_shader, &fragment_shader)
    }

    pub fn link(api: &G, vertex: &Shader<G>, fragment: &Shader<G>) -> Result<Self, ShaderError> {
        for (shader, expected) in [(vertex, ShaderStage::Vertex), (fragment, ShaderStage::Fragment)] {
            // Unreachable through `Shader::compile`, which never yields a zero name.
            if shader.id == 0 {
                return Err(ShaderError::Link {
                    log: format!("{} shader handle is invalid", expected),
                });
            }
            if shader.stage != expected {
                return Err(ShaderError::Link {
                    log: format!("expected a {} shader, got a {} shader", expected, shader.stage),
                });
            }
        }

        let id = api.create_program();
        if id == 0 {
            return Err(ShaderError::Link {
                log: "could not create program object".into(),
            });
        }
        let program = Self {
            api: api.clone(),
            id,
        };

        api.attach_shader(id, vertex.id);
        api.attach_shader(id, fragment.id);
        api.link_program(id);

        if !api.link_status(id) {
            return Err(ShaderError::Link {
                log: api.program_info_log(id),
            });
        }

        api.detach_shader(id, vertex.id);
        api.detach_shader(id, fragment.id);

        debug!("Linked program {} from shaders {} and {}", id, vertex.id, fragment.id);
        Ok(program)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn set_used(&self) {
        self.api.use_program(self.id);
    }
}

impl<G: GraphicsApi> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.api.delete_program(self.id);
    }
}

// Sources embedded in the three programs
pub mod sources {
    use super::ShaderSource;

    pub const POSITION_VERTEX: ShaderSource<'static> = ShaderSource::vertex(
        "#version 460 core
layout (location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0f);
}
",
    );

    /// Dark rose fill used by the rectangle and single triangle.
    pub const ROSE_FRAGMENT: ShaderSource<'static> = ShaderSource::fragment(
        "#version 460 core
out vec4 FragColor;
void main() {
    FragColor = vec4(0.5f, 0.2f, 0.3f, 1.0f);
}
",
    );

    pub const ORANGE_FRAGMENT: ShaderSource<'static> = ShaderSource::fragment(
        "#version 460 core
out vec4 fragColor;
void main() {
    fragColor = vec4(1.0f, 0.5f, 0.0f, 1.0f);
}
",
    );
}
