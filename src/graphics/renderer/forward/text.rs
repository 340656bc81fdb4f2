use ember_gl::*;
use glam::*;

use std::ffi::c_void;

pub(crate) static TEXT_SRC_VERT: &str = "
#version 330 core
layout(location = 0) in vec2 position;
layout(location = 1) in vec2 uv;

uniform mat4 projection;

out vec2 fragment_uv;

void main() {
    gl_Position = projection * vec4(position, 0.0, 1.0);
    fragment_uv = uv;
}
";

pub(crate) static TEXT_SRC_FRAG: &str = "
#version 330 core
uniform sampler2D atlas;

in vec2 fragment_uv;
out vec4 out_color;

void main() {
    out_color = texture(atlas, fragment_uv);
}
";

const GLYPH_SIZE: usize = 8;

// 8x8 bitmap font, one byte per row, least significant bit leftmost.
// Subset of the public domain font8x8 set: uppercase, digits, punctuation.
const FONT: &[(char, [u8; 8])] = &[
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('-', [0x00, 0x00, 0x00, 0x3F, 0x00, 0x00, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00]),
    ('/', [0x60, 0x30, 0x18, 0x0C, 0x06, 0x03, 0x01, 0x00]),
    ('0', [0x3E, 0x63, 0x73, 0x7B, 0x6F, 0x67, 0x3E, 0x00]),
    ('1', [0x0C, 0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x3F, 0x00]),
    ('2', [0x1E, 0x33, 0x30, 0x1C, 0x06, 0x33, 0x3F, 0x00]),
    ('3', [0x1E, 0x33, 0x30, 0x1C, 0x30, 0x33, 0x1E, 0x00]),
    ('4', [0x38, 0x3C, 0x36, 0x33, 0x7F, 0x30, 0x78, 0x00]),
    ('5', [0x3F, 0x03, 0x1F, 0x30, 0x30, 0x33, 0x1E, 0x00]),
    ('6', [0x1C, 0x06, 0x03, 0x1F, 0x33, 0x33, 0x1E, 0x00]),
    ('7', [0x3F, 0x33, 0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x00]),
    ('8', [0x1E, 0x33, 0x33, 0x1E, 0x33, 0x33, 0x1E, 0x00]),
    ('9', [0x1E, 0x33, 0x33, 0x3E, 0x30, 0x18, 0x0E, 0x00]),
    (':', [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x00]),
    ('A', [0x0C, 0x1E, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x00]),
    ('B', [0x3F, 0x66, 0x66, 0x3E, 0x66, 0x66, 0x3F, 0x00]),
    ('C', [0x3C, 0x66, 0x03, 0x03, 0x03, 0x66, 0x3C, 0x00]),
    ('D', [0x1F, 0x36, 0x66, 0x66, 0x66, 0x36, 0x1F, 0x00]),
    ('E', [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x46, 0x7F, 0x00]),
    ('F', [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x06, 0x0F, 0x00]),
    ('G', [0x3C, 0x66, 0x03, 0x03, 0x73, 0x66, 0x7C, 0x00]),
    ('H', [0x33, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x33, 0x00]),
    ('I', [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00]),
    ('J', [0x78, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E, 0x00]),
    ('K', [0x67, 0x66, 0x36, 0x1E, 0x36, 0x66, 0x67, 0x00]),
    ('L', [0x0F, 0x06, 0x06, 0x06, 0x46, 0x66, 0x7F, 0x00]),
    ('M', [0x63, 0x77, 0x7F, 0x7F, 0x6B, 0x63, 0x63, 0x00]),
    ('N', [0x63, 0x67, 0x6F, 0x7B, 0x73, 0x63, 0x63, 0x00]),
    ('O', [0x1C, 0x36, 0x63, 0x63, 0x63, 0x36, 0x1C, 0x00]),
    ('P', [0x3F, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x0F, 0x00]),
    ('Q', [0x1E, 0x33, 0x33, 0x33, 0x3B, 0x1E, 0x38, 0x00]),
    ('R', [0x3F, 0x66, 0x66, 0x3E, 0x36, 0x66, 0x67, 0x00]),
    ('S', [0x1E, 0x33, 0x07, 0x0E, 0x38, 0x33, 0x1E, 0x00]),
    ('T', [0x3F, 0x2D, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00]),
    ('U', [0x33, 0x33, 0x33, 0x33, 0x33, 0x33, 0x3F, 0x00]),
    ('V', [0x33, 0x33, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00]),
    ('W', [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00]),
    ('X', [0x63, 0x63, 0x36, 0x1C, 0x1C, 0x36, 0x63, 0x00]),
    ('Y', [0x33, 0x33, 0x33, 0x1E, 0x0C, 0x0C, 0x1E, 0x00]),
    ('Z', [0x7F, 0x63, 0x31, 0x18, 0x4C, 0x66, 0x7F, 0x00]),
];

fn glyph_index(character: char) -> Option<usize> {
    let character = character.to_ascii_uppercase();
    FONT.iter().position(|(glyph, _)| *glyph == character)
}

struct QueuedText {
    text: String,
    position: Vec2,
    size: f32
}

/// Screen-space text drawn last each frame from a strip atlas built out of
/// the embedded font at startup.
pub(crate) struct TextOverlay {
    program: GLShaderProgram,
    atlas: GLTexture,
    vao: GLVAO,
    vertex_buffer: GLBuffer,
    queue: Vec<QueuedText>,
    staging: Vec<f32>
}

impl TextOverlay {
    pub(crate) fn new() -> Result<Self, GLShaderError> {
        let program = GLShaderProgram::new(
            &GLShader::new(GLShaderType::Vertex, TEXT_SRC_VERT)?,
            &GLShader::new(GLShaderType::Fragment, TEXT_SRC_FRAG)?
        )?;

        let atlas = build_atlas();

        let vao = GLVAO::new();
        vao.bind();

        let vertex_buffer = GLBuffer::vertex();
        vertex_buffer.bind();
        let stride = 4 * std::mem::size_of::<f32>();
        gl_vertex_attrib(0, 2, stride, 0);
        gl_vertex_attrib(1, 2, stride, 2 * std::mem::size_of::<f32>());

        vao.unbind();

        Ok(TextOverlay {
            program,
            atlas,
            vao,
            vertex_buffer,
            queue: Vec::new(),
            staging: Vec::new()
        })
    }

    pub(crate) fn queue(&mut self, text: &str, position: &Vec2, size: f32) {
        self.queue.push(QueuedText {
            text: text.to_owned(),
            position: *position,
            size
        });
    }

    pub(crate) fn flush(&mut self, width: u32, height: u32) {
        if self.queue.is_empty() {
            return;
        }

        self.staging.clear();
        let glyph_count = FONT.len() as f32;
        for item in self.queue.drain(..) {
            let mut pen_x = item.position.x;
            let y0 = item.position.y;
            let y1 = item.position.y + item.size;

            for character in item.text.chars() {
                let index = match glyph_index(character) {
                    Some(index) => index,
                    None => {
                        pen_x += item.size;
                        continue;
                    }
                };

                let x0 = pen_x;
                let x1 = pen_x + item.size;
                let u0 = index as f32 / glyph_count;
                let u1 = (index + 1) as f32 / glyph_count;

                // Atlas row 0 is the glyph top: v = 0 maps to y1.
                let quad = [
                    [x0, y0, u0, 1.0],
                    [x1, y0, u1, 1.0],
                    [x1, y1, u1, 0.0],
                    [x0, y0, u0, 1.0],
                    [x1, y1, u1, 0.0],
                    [x0, y1, u0, 0.0]
                ];
                for vertex in quad {
                    self.staging.extend_from_slice(&vertex);
                }

                pen_x += item.size;
            }
        }

        if self.staging.is_empty() {
            return;
        }

        self.vertex_buffer.bind();
        self.vertex_buffer.data(&self.staging, gl::STREAM_DRAW);
        self.vertex_buffer.unbind();

        let projection = Mat4::orthographic_rh(0.0, width as f32, 0.0, height as f32, -1.0, 1.0);

        gl_disable_depth();
        gl_depth_mask(false);
        self.program.bind(); {
            self.program.set_mat4("projection", &projection);

            gl_active_texture(0);
            self.atlas.bind();
            self.program.set_sampler_slot("atlas", 0);

            self.vao.bind();
            gl_draw_arrays(gl::TRIANGLES, 0, self.staging.len() / 4);
            self.vao.unbind();

            self.atlas.unbind();
        } self.program.unbind();
        gl_depth_mask(true);
        gl_enable_depth();
    }
}

/// One row of glyphs, white with the bitmap in the alpha channel.
fn build_atlas() -> GLTexture {
    let width = FONT.len() * GLYPH_SIZE;
    let height = GLYPH_SIZE;
    let mut pixels = vec![0u8; width * height * 4];

    for (index, (_, rows)) in FONT.iter().enumerate() {
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..GLYPH_SIZE {
                if bits & (1 << column) == 0 {
                    continue;
                }

                let x = index * GLYPH_SIZE + column;
                let offset = (row * width + x) * 4;
                pixels[offset..offset + 4].copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
            }
        }
    }

    let atlas = GLTexture::new(gl::TEXTURE_2D);
    atlas.bind(); {
        gl_tex_parami(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE);
        gl_tex_parami(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE);
        gl_tex_parami(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST);
        gl_tex_parami(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST);

        gl_tex_image_2d(
            gl::RGBA,
            width as i32,
            height as i32,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixels.as_ptr() as *const c_void
        );
    } atlas.unbind();

    atlas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_lookup_is_case_insensitive() {
        assert_eq!(glyph_index('a'), glyph_index('A'));
        assert!(glyph_index('A').is_some());
        assert!(glyph_index('#').is_none());
    }

    #[test]
    fn every_hud_character_has_a_glyph() {
        for character in "FPS: 60.0 ENEMIES: 12 FIREBALLS: 3".chars() {
            assert!(glyph_index(character).is_some(), "missing glyph {:?}", character);
        }
    }
}
