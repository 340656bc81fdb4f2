use gl::types::*;
use glam::{Mat4, Vec3, Vec4};
use thiserror::Error;

use std::collections::HashMap;
use std::ffi::CString;

use crate::gl_check;

#[derive(Debug, Error)]
pub enum GLShaderError {
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: &'static str, log: String },
    #[error("failed to link shader program: {log}")]
    Link { log: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GLShaderType {
    Vertex,
    Fragment,
}

impl GLShaderType {
    fn to_gl(self) -> GLenum {
        match self {
            GLShaderType::Vertex => gl::VERTEX_SHADER,
            GLShaderType::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    fn name(self) -> &'static str {
        match self {
            GLShaderType::Vertex => "vertex",
            GLShaderType::Fragment => "fragment",
        }
    }
}

pub struct GLShader {
    id: GLuint,
}

impl GLShader {
    pub fn new(shader_type: GLShaderType, source: &str) -> Result<Self, GLShaderError> {
        let id = unsafe { gl::CreateShader(shader_type.to_gl()) };
        let c_source = CString::new(source).expect("Shader source contains a NUL byte.");

        unsafe {
            gl::ShaderSource(id, 1, &c_source.as_ptr(), std::ptr::null());
            gl::CompileShader(id);
        }

        let mut status: GLint = 0;
        unsafe {
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
        }
        if status != gl::TRUE as GLint {
            let log = shader_info_log(id);
            unsafe {
                gl::DeleteShader(id);
            }
            return Err(GLShaderError::Compile {
                stage: shader_type.name(),
                log,
            });
        }
        gl_check();

        Ok(GLShader { id })
    }
}

impl Drop for GLShader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

pub struct GLShaderProgram {
    id: GLuint,
    uniform_locations: HashMap<String, GLint>,
}

impl GLShaderProgram {
    pub fn new(vertex: &GLShader, fragment: &GLShader) -> Result<Self, GLShaderError> {
        let id = unsafe { gl::CreateProgram() };

        unsafe {
            gl::AttachShader(id, vertex.id);
            gl::AttachShader(id, fragment.id);
            gl::LinkProgram(id);
            gl::DetachShader(id, vertex.id);
            gl::DetachShader(id, fragment.id);
        }

        let mut status: GLint = 0;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut status);
        }
        if status != gl::TRUE as GLint {
            let log = program_info_log(id);
            unsafe {
                gl::DeleteProgram(id);
            }
            return Err(GLShaderError::Link { log });
        }
        gl_check();

        Ok(GLShaderProgram {
            id,
            uniform_locations: HashMap::new(),
        })
    }

    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
            gl_check();
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::UseProgram(0);
            gl_check();
        }
    }

    fn location(&mut self, name: &str) -> GLint {
        if let Some(&location) = self.uniform_locations.get(name) {
            return location;
        }

        let c_name = CString::new(name).expect("Uniform name contains a NUL byte.");
        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };
        gl_check();

        self.uniform_locations.insert(name.to_owned(), location);
        location
    }

    pub fn set_mat4(&mut self, name: &str, value: &Mat4) {
        let location = self.location(name);
        let columns = value.to_cols_array();
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, columns.as_ptr());
            gl_check();
        }
    }

    pub fn set_vec3(&mut self, name: &str, value: &Vec3) {
        let location = self.location(name);
        unsafe {
            gl::Uniform3f(location, value.x, value.y, value.z);
            gl_check();
        }
    }

    pub fn set_vec4(&mut self, name: &str, value: &Vec4) {
        let location = self.location(name);
        unsafe {
            gl::Uniform4f(location, value.x, value.y, value.z, value.w);
            gl_check();
        }
    }

    pub fn set_f32(&mut self, name: &str, value: f32) {
        let location = self.location(name);
        unsafe {
            gl::Uniform1f(location, value);
            gl_check();
        }
    }

    pub fn set_sampler_slot(&mut self, name: &str, slot: i32) {
        let location = self.location(name);
        unsafe {
            gl::Uniform1i(location, slot);
            gl_check();
        }
    }
}

impl Drop for GLShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn shader_info_log(id: GLuint) -> String {
    let mut length: GLint = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut length);
    }

    let mut buffer = vec![0u8; length.max(1) as usize];
    unsafe {
        gl::GetShaderInfoLog(
            id,
            length,
            std::ptr::null_mut(),
            buffer.as_mut_ptr() as *mut GLchar,
        );
    }

    String::from_utf8_lossy(&buffer)
        .trim_end_matches('\0')
        .trim_end()
        .to_owned()
}

fn program_info_log(id: GLuint) -> String {
    let mut length: GLint = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut length);
    }

    let mut buffer = vec![0u8; length.max(1) as usize];
    unsafe {
        gl::GetProgramInfoLog(
            id,
            length,
            std::ptr::null_mut(),
            buffer.as_mut_ptr() as *mut GLchar,
        );
    }

    String::from_utf8_lossy(&buffer)
        .trim_end_matches('\0')
        .trim_end()
        .to_owned()
}
