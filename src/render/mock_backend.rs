//! Recording GraphicsApi for unit tests (no GPU required)
//!
//! Shader "compilation" is a light syntax check: a source must begin with a
//! `#version` directive and have balanced braces and parentheses. Linking
//! fails when an attached shader has no `void main`.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;
use std::rc::Rc;

use super::backend::{BufferTarget, GraphicsApi, PolygonMode};
use super::shaders::ShaderStage;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(u32),
    DeleteProgram(u32),
    CreateVertexArray,
    BindVertexArray(u32),
    DeleteVertexArray(u32),
    CreateBuffer,
    BindBuffer(BufferTarget, u32),
    BufferData(BufferTarget, usize),
    DeleteBuffer(u32),
    FloatAttribute { location: u32, components: i32, stride: i32 },
    DrawArrays { first: i32, count: i32 },
    DrawElements { count: i32 },
    Viewport(i32, i32),
    ClearColor([f32; 4]),
    Clear,
    PolygonMode(PolygonMode),
}

#[derive(Debug)]
struct MockShader {
    stage: ShaderStage,
    source: String,
    log: Option<String>,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: u32,
    fail_creation: bool,
    calls: Vec<Call>,
    shaders: HashMap<u32, MockShader>,
    programs: HashMap<u32, Vec<u32>>,
    linked: HashMap<u32, Result<(), String>>,
    vertex_arrays: HashSet<u32>,
    buffers: HashSet<u32>,
}

impl MockState {
    fn next_id(&mut self) -> u32 {
        if self.fail_creation {
            return 0;
        }
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockGl {
    state: Rc<RefCell<MockState>>,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later create call return the zero name.
    pub fn fail_object_creation(&self) {
        self.state.borrow_mut().fail_creation = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_objects(&self) -> usize {
        let state = self.state.borrow();
        state.shaders.len() + state.programs.len() + state.vertex_arrays.len() + state.buffers.len()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn check_syntax(source: &str) -> Result<(), String> {
        if !source.trim_start().starts_with("#version") {
            return Err("0:1(1): error: missing #version directive".into());
        }

        let mut depth = [0i32; 2];
        for (line_no, line) in source.lines().enumerate() {
            for ch in line.chars() {
                match ch {
                    '{' => depth[0] += 1,
                    '}' => depth[0] -= 1,
                    '(' => depth[1] += 1,
                    ')' => depth[1] -= 1,
                    _ => {}
                }
                if depth.iter().any(|d| *d < 0) {
                    return Err(format!("0:{}(1): error: syntax error, unexpected '{}'", line_no + 1, ch));
                }
            }
        }

        if depth != [0, 0] {
            return Err("0:0(0): error: syntax error, unexpected end of file".into());
        }
        Ok(())
    }
}

impl GraphicsApi for MockGl {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        self.record(Call::CreateShader(stage));
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        if id != 0 {
            state.shaders.insert(
                id,
                MockShader {
                    stage,
                    source: String::new(),
                    log: None,
                },
            );
        }
        id
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.source = source.to_string_lossy().into_owned();
        }
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.log = Some(Self::check_syntax(&entry.source).err().unwrap_or_default());
        }
    }

    fn compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .and_then(|entry| entry.log.as_ref())
            .is_some_and(|log| log.is_empty())
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .and_then(|entry| entry.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> u32 {
        self.record(Call::CreateProgram);
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        if id != 0 {
            state.programs.insert(id, Vec::new());
        }
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
        if let Some(attached) = self.state.borrow_mut().programs.get_mut(&program) {
            attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
        if let Some(attached) = self.state.borrow_mut().programs.get_mut(&program) {
            attached.retain(|id| *id != shader);
        }
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
        let mut state = self.state.borrow_mut();
        let attached = state.programs.get(&program).cloned().unwrap_or_default();

        let mut stages = Vec::new();
        let mut result = Ok(());
        for id in attached {
            match state.shaders.get(&id) {
                Some(shader) if shader.log.as_deref() == Some("") => {
                    if !shader.source.contains("void main") {
                        result = Err(format!("error: {} shader lacks `main'", shader.stage));
                    }
                    stages.push(shader.stage);
                }
                _ => result = Err(format!("error: shader {} is not compiled", id)),
            }
        }
        if result.is_ok()
            && !(stages.contains(&ShaderStage::Vertex) && stages.contains(&ShaderStage::Fragment))
        {
            result = Err("error: program needs a vertex and a fragment shader".into());
        }
        state.linked.insert(program, result);
    }

    fn link_status(&self, program: u32) -> bool {
        matches!(self.state.borrow().linked.get(&program), Some(Ok(())))
    }

    fn program_info_log(&self, program: u32) -> String {
        match self.state.borrow().linked.get(&program) {
            Some(Err(log)) => log.clone(),
            _ => String::new(),
        }
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        state.linked.remove(&program);
    }

    fn create_vertex_array(&self) -> u32 {
        self.record(Call::CreateVertexArray);
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        if id != 0 {
            state.vertex_arrays.insert(id);
        }
        id
    }

    fn bind_vertex_array(&self, vao: u32) {
        self.record(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.record(Call::DeleteVertexArray(vao));
        self.state.borrow_mut().vertex_arrays.remove(&vao);
    }

    fn create_buffer(&self) -> u32 {
        self.record(Call::CreateBuffer);
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        if id != 0 {
            state.buffers.insert(id);
        }
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.state.borrow_mut().buffers.remove(&buffer);
    }

    fn float_attribute(&self, location: u32, components: i32, stride: i32, _offset: usize) {
        self.record(Call::FloatAttribute {
            location,
            components,
            stride,
        });
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        self.record(Call::DrawArrays { first, count });
    }

    fn draw_elements(&self, count: i32) {
        self.record(Call::DrawElements { count });
    }

    fn viewport(&self, width: i32, height: i32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear_color(&self, color: [f32; 4]) {
        self.record(Call::ClearColor(color));
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn polygon_mode(&self, mode: PolygonMode) {
        self.record(Call::PolygonMode(mode));
    }
}
