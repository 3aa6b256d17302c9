use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::mem;

use super::backend::{BufferTarget, GraphicsApi};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: &[Vertex]) -> Self {
        Self {
            vertices: vertices.to_vec(),
            indices: Vec::new(),
        }
    }

    pub fn indexed(vertices: &[Vertex], indices: &[u32]) -> Self {
        Self {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        }
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

/// GPU copy of a [`MeshData`]: vertex array, vertex buffer and optional element buffer.
pub struct Mesh<G: GraphicsApi> {
    api: G,
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    count: i32,
}

impl<G: GraphicsApi> Mesh<G> {
    pub fn upload(api: &G, data: &MeshData) -> Self {
        let vao = api.create_vertex_array();
        let vbo = api.create_buffer();
        let ebo = data.is_indexed().then(|| api.create_buffer());

        api.bind_vertex_array(vao);

        api.bind_buffer(BufferTarget::Array, vbo);
        api.buffer_data(BufferTarget::Array, bytemuck::cast_slice(&data.vertices));

        // The element binding is recorded in the vertex array, so it stays bound.
        if let Some(ebo) = ebo {
            api.bind_buffer(BufferTarget::ElementArray, ebo);
            api.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(&data.indices));
        }

        api.float_attribute(0, 3, mem::size_of::<Vertex>() as i32, 0);

        api.bind_vertex_array(0);
        api.bind_buffer(BufferTarget::Array, 0);

        let count = if ebo.is_some() {
            data.indices.len()
        } else {
            data.vertices.len()
        };

        Self {
            api: api.clone(),
            vao,
            vbo,
            ebo,
            count: count as i32,
        }
    }

    pub fn draw(&self) {
        self.api.bind_vertex_array(self.vao);
        if self.ebo.is_some() {
            self.api.draw_elements(self.count);
        } else {
            self.api.draw_arrays(0, self.count);
        }
        self.api.bind_vertex_array(0);
    }
}

impl<G: GraphicsApi> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.api.delete_vertex_array(self.vao);
        self.api.delete_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            self.api.delete_buffer(ebo);
        }
    }
}
