use log::debug;

use super::backend::{GraphicsApi, PolygonMode};
use super::mesh::Mesh;
use super::scene::Scene;
use super::shaders::{ShaderError, ShaderProgram};
use crate::config::rendering::WireframeMode;

/// Decides, frame by frame, which polygon mode should be active.
#[derive(Debug, Clone)]
pub struct WireframeSchedule {
    mode: WireframeMode,
    frame: u64,
    current: PolygonMode,
}

impl WireframeSchedule {
    pub fn new(mode: WireframeMode) -> Self {
        Self {
            mode,
            frame: 0,
            current: PolygonMode::Fill,
        }
    }

    /// Mode to apply before the first frame, if it differs from the GL default.
    pub fn initial(&self) -> Option<PolygonMode> {
        match self.mode {
            WireframeMode::Line => Some(PolygonMode::Line),
            WireframeMode::Fill | WireframeMode::Toggle { .. } => None,
        }
    }

    pub fn current(&self) -> PolygonMode {
        match self.mode {
            WireframeMode::Line => PolygonMode::Line,
            _ => self.current,
        }
    }

    /// Advances one frame and returns the mode to switch to, if any.
    pub fn advance(&mut self) -> Option<PolygonMode> {
        let frame = self.frame;
        self.frame += 1;

        let WireframeMode::Toggle { period } = self.mode else {
            return None;
        };
        if period == 0 || frame == 0 || frame % u64::from(period) != 0 {
            return None;
        }

        self.current = match self.current {
            PolygonMode::Fill => PolygonMode::Line,
            PolygonMode::Line => PolygonMode::Fill,
        };
        Some(self.current)
    }
}

pub struct RenderPipeline<G: GraphicsApi> {
    api: G,
    // Field order is drop order: the mesh goes before the program.
    mesh: Mesh<G>,
    program: ShaderProgram<G>,
    clear_color: [f32; 4],
    wireframe: WireframeSchedule,
}

impl<G: GraphicsApi> RenderPipeline<G> {
    pub fn new(api: &G, scene: &Scene) -> Result<Self, ShaderError> {
        let program = ShaderProgram::build(api, &scene.vertex_shader, &scene.fragment_shader)?;
        let mesh = Mesh::upload(api, &scene.mesh);
        let wireframe = WireframeSchedule::new(scene.render.wireframe);

        if let Some(mode) = wireframe.initial() {
            api.polygon_mode(mode);
        }

        let pipeline = Self {
            api: api.clone(),
            mesh,
            program,
            clear_color: scene.render.clear_color,
            wireframe,
        };
        pipeline.resize(scene.app.width, scene.app.height);
        Ok(pipeline)
    }

    /// Framebuffer-resize callback.
    pub fn resize(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.api.viewport(width as i32, height as i32);
    }

    pub fn render_frame(&mut self) {
        if let Some(mode) = self.wireframe.advance() {
            debug!("Switching polygon mode to {:?}", mode);
            self.api.polygon_mode(mode);
        }

        self.api.clear_color(self.clear_color);
        self.api.clear();

        self.program.set_used();
        self.mesh.draw();
    }

    pub fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.wireframe.current()
    }
}
