use gl::types::*;
use std::ffi::{c_void, CStr};
use std::ptr;

use super::shaders::ShaderStage;

/// Rasterisation mode for front and back faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// The slice of the OpenGL API this crate calls.
///
/// Object names are plain `u32`s as in GL itself, `0` meaning "no object".
/// Every method assumes a context is current on the calling thread.
pub trait GraphicsApi: Clone {
    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn shader_source(&self, shader: u32, source: &CStr);
    fn compile_shader(&self, shader: u32);
    fn compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);

    fn create_vertex_array(&self) -> u32;
    fn bind_vertex_array(&self, vao: u32);
    fn delete_vertex_array(&self, vao: u32);
    fn create_buffer(&self) -> u32;
    fn bind_buffer(&self, target: BufferTarget, buffer: u32);
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: u32);
    /// Describes a float attribute read from the bound array buffer and enables it.
    fn float_attribute(&self, location: u32, components: i32, stride: i32, offset: usize);

    fn draw_arrays(&self, first: i32, count: i32);
    fn draw_elements(&self, count: i32);
    fn viewport(&self, width: i32, height: i32);
    fn clear_color(&self, color: [f32; 4]);
    fn clear(&self);
    fn polygon_mode(&self, mode: PolygonMode);
}

/// [`GraphicsApi`] backed by the global function pointers of the `gl` crate.
#[derive(Debug, Clone, Copy)]
pub struct NativeGl {
    _loaded: (),
}

impl NativeGl {
    /// Loads every GL entry point through `loader`. The context the loader
    /// belongs to must be current for as long as this value is used.
    ///
    /// Returns `None` when the entry points this crate needs are missing.
    pub fn load<F>(loader: F) -> Option<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let loaded = gl::CreateShader::is_loaded()
            && gl::LinkProgram::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::PolygonMode::is_loaded()
            && gl::DrawElements::is_loaded();
        loaded.then_some(Self { _loaded: () })
    }

    pub fn version_string(&self) -> String {
        Self::get_string(gl::VERSION)
    }

    pub fn renderer_string(&self) -> String {
        Self::get_string(gl::RENDERER)
    }

    fn get_string(name: GLenum) -> String {
        unsafe {
            let raw = gl::GetString(name);
            if raw.is_null() {
                return String::from("unknown");
            }
            CStr::from_ptr(raw as *const _).to_string_lossy().into_owned()
        }
    }

    fn buffer_target(target: BufferTarget) -> GLenum {
        match target {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }

    fn log_to_string(mut buffer: Vec<u8>, written: GLsizei) -> String {
        buffer.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&buffer).trim_end().to_owned()
    }
}

impl GraphicsApi for NativeGl {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let kind = match stage {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        };
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
        }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe {
            gl::CompileShader(shader);
        }
    }

    fn compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }

        let mut buffer = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                buffer.len() as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        Self::log_to_string(buffer, written)
    }

    fn delete_shader(&self, shader: u32) {
        unsafe {
            gl::DeleteShader(shader);
        }
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe {
            gl::AttachShader(program, shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        unsafe {
            gl::DetachShader(program, shader);
        }
    }

    fn link_program(&self, program: u32) {
        unsafe {
            gl::LinkProgram(program);
        }
    }

    fn link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }

        let mut buffer = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                buffer.len() as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        Self::log_to_string(buffer, written)
    }

    fn use_program(&self, program: u32) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn delete_program(&self, program: u32) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }

    fn create_vertex_array(&self) -> u32 {
        let mut vao = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
        }
        vao
    }

    fn bind_vertex_array(&self, vao: u32) {
        unsafe {
            gl::BindVertexArray(vao);
        }
    }

    fn delete_vertex_array(&self, vao: u32) {
        unsafe {
            gl::DeleteVertexArrays(1, &vao);
        }
    }

    fn create_buffer(&self) -> u32 {
        let mut buffer = 0;
        unsafe {
            gl::GenBuffers(1, &mut buffer);
        }
        buffer
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        unsafe {
            gl::BindBuffer(Self::buffer_target(target), buffer);
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            gl::BufferData(
                Self::buffer_target(target),
                data.len() as GLsizeiptr,
                data.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        unsafe {
            gl::DeleteBuffers(1, &buffer);
        }
    }

    fn float_attribute(&self, location: u32, components: i32, stride: i32, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                location,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const _,
            );
            gl::EnableVertexAttribArray(location);
        }
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        unsafe {
            gl::DrawArrays(gl::TRIANGLES, first, count);
        }
    }

    fn draw_elements(&self, count: i32) {
        unsafe {
            gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, ptr::null());
        }
    }

    fn viewport(&self, width: i32, height: i32) {
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            gl::ClearColor(r, g, b, a);
        }
    }

    fn clear(&self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn polygon_mode(&self, mode: PolygonMode) {
        let mode = match mode {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
        };
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, mode);
        }
    }
}
