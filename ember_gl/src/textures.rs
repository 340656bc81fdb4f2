use gl::types::*;

use std::ffi::c_void;

use crate::gl_check;

pub struct GLTexture {
    id: GLuint,
    target: GLenum,
}

impl GLTexture {
    pub fn new(target: GLenum) -> Self {
        let mut id: GLuint = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl_check();
        }

        GLTexture { id, target }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindTexture(self.target, self.id);
            gl_check();
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindTexture(self.target, 0);
            gl_check();
        }
    }
}

impl Drop for GLTexture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

pub fn gl_tex_parami(target: GLenum, pname: GLenum, value: GLenum) {
    unsafe {
        gl::TexParameteri(target, pname, value as GLint);
        gl_check();
    }
}

pub fn gl_tex_image_2d(
    internal_format: GLenum,
    width: i32,
    height: i32,
    format: GLenum,
    pixel_type: GLenum,
    pixels: *const c_void,
) {
    unsafe {
        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            internal_format as GLint,
            width,
            height,
            0,
            format,
            pixel_type,
            pixels,
        );
        gl_check();
    }
}

pub fn gl_generate_mipmap(target: GLenum) {
    unsafe {
        gl::GenerateMipmap(target);
        gl_check();
    }
}
