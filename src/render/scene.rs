use super::mesh::{MeshData, Vertex};
use super::shaders::{sources, ShaderSource};
use crate::config::{AppConfig, RenderConfig, WireframeMode};

/// Everything one program needs: window settings, shaders, geometry.
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: &'static str,
    pub app: AppConfig,
    pub render: RenderConfig,
    pub vertex_shader: ShaderSource<'static>,
    pub fragment_shader: ShaderSource<'static>,
    pub mesh: MeshData,
}

const RECTANGLE_VERTICES: [Vertex; 4] = [
    Vertex::new(0.5, 0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(-0.5, 0.5, 0.0),
];

const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex::new(0.0, 0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(-0.5, -0.5, 0.0),
];

const TWO_TRIANGLES_VERTICES: [Vertex; 6] = [
    Vertex::new(-0.7, -0.3, 0.0),
    Vertex::new(-0.3, -0.3, 0.0),
    Vertex::new(-0.5, 0.3, 0.0),
    Vertex::new(0.2, -0.3, 0.0),
    Vertex::new(0.6, -0.3, 0.0),
    Vertex::new(0.4, 0.3, 0.0),
];

impl Scene {
    /// Indexed quad drawn as wireframe.
    pub fn rectangle() -> Self {
        Self {
            name: "rectangle",
            app: AppConfig::default(),
            render: RenderConfig {
                clear_color: [0.3, 0.5, 0.7, 1.0],
                wireframe: WireframeMode::Line,
            },
            vertex_shader: sources::POSITION_VERTEX,
            fragment_shader: sources::ROSE_FRAGMENT,
            mesh: MeshData::indexed(&RECTANGLE_VERTICES, &RECTANGLE_INDICES),
        }
    }

    pub fn triangle() -> Self {
        Self {
            name: "triangle",
            app: AppConfig::default(),
            render: RenderConfig::default(),
            vertex_shader: sources::POSITION_VERTEX,
            fragment_shader: sources::ROSE_FRAGMENT,
            mesh: MeshData::new(&TRIANGLE_VERTICES),
        }
    }

    /// Two separate triangles, switching between fill and wireframe every 100 frames.
    pub fn two_triangles() -> Self {
        Self {
            name: "two_triangles",
            app: AppConfig::default().with_title("Two-Triangles"),
            render: RenderConfig {
                clear_color: [0.0, 0.5, 1.0, 1.0],
                wireframe: WireframeMode::Toggle { period: 100 },
            },
            vertex_shader: sources::POSITION_VERTEX,
            fragment_shader: sources::ORANGE_FRAGMENT,
            mesh: MeshData::new(&TWO_TRIANGLES_VERTICES),
        }
    }
}
