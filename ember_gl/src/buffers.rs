use gl::types::*;

use std::ffi::c_void;

use crate::gl_check;

pub struct GLVAO {
    id: GLuint,
}

impl GLVAO {
    pub fn new() -> Self {
        let mut id: GLuint = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
            gl_check();
        }

        GLVAO { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
            gl_check();
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindVertexArray(0);
            gl_check();
        }
    }
}

impl Default for GLVAO {
    fn default() -> Self {
        GLVAO::new()
    }
}

impl Drop for GLVAO {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

pub struct GLBuffer {
    id: GLuint,
    target: GLenum,
}

impl GLBuffer {
    pub fn new(target: GLenum) -> Self {
        let mut id: GLuint = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl_check();
        }

        GLBuffer { id, target }
    }

    pub fn vertex() -> Self {
        GLBuffer::new(gl::ARRAY_BUFFER)
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(self.target, self.id);
            gl_check();
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindBuffer(self.target, 0);
            gl_check();
        }
    }

    /// Upload `data`, sizing the buffer to fit. Expects the buffer to be bound.
    pub fn data<T>(&self, data: &[T], usage: GLenum) {
        unsafe {
            gl::BufferData(
                self.target,
                std::mem::size_of_val(data) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                usage,
            );
            gl_check();
        }
    }

    /// Size the buffer to `size` bytes without writing. Expects the buffer to be bound.
    pub fn allocate(&self, size: usize, usage: GLenum) {
        unsafe {
            gl::BufferData(self.target, size as GLsizeiptr, std::ptr::null(), usage);
            gl_check();
        }
    }

    /// Write `data` at `offset` bytes. Expects the buffer to be bound.
    pub fn sub_data<T>(&self, offset: usize, data: &[T]) {
        unsafe {
            gl::BufferSubData(
                self.target,
                offset as GLintptr,
                std::mem::size_of_val(data) as GLsizeiptr,
                data.as_ptr() as *const c_void,
            );
            gl_check();
        }
    }
}

impl Drop for GLBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

/// Enable a float attribute on the bound VAO, sourced from the bound vertex buffer.
pub fn gl_vertex_attrib(index: GLuint, components: GLint, stride: usize, offset: usize) {
    unsafe {
        gl::EnableVertexAttribArray(index);
        gl::VertexAttribPointer(
            index,
            components,
            gl::FLOAT,
            gl::FALSE,
            stride as GLsizei,
            offset as *const c_void,
        );
        gl_check();
    }
}

/// Advance an attribute once per `divisor` instances instead of per vertex.
pub fn gl_vertex_attrib_divisor(index: GLuint, divisor: GLuint) {
    unsafe {
        gl::VertexAttribDivisor(index, divisor);
        gl_check();
    }
}
