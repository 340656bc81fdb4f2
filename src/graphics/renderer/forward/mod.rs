use super::*;
use crate::{Window, Camera, Mesh, Image};

use ember_gl::*;
use glam::*;

use std::ffi::c_void;
use std::rc::Rc;

mod text;
use text::TextOverlay;

pub(crate) static MESH_SRC_VERT: &str = "
#version 330 core
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 color;

uniform mat4 mvp;

out vec3 fragment_color;

void main() {
    gl_Position = mvp * vec4(position, 1.0);
    fragment_color = color;
}
";

pub(crate) static MESH_SRC_FRAG: &str = "
#version 330 core
uniform float alpha;

in vec3 fragment_color;
out vec4 out_color;

void main() {
    out_color = vec4(fragment_color, alpha);
}
";

pub(crate) static INSTANCED_SRC_VERT: &str = "
#version 330 core
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 color;
layout(location = 2) in vec3 instance_position;
layout(location = 3) in vec4 instance_rotation;

uniform mat4 vp;

out vec3 fragment_color;

vec3 rotate_by_quat(vec3 v, vec4 q) {
    return v + 2.0 * cross(q.xyz, cross(q.xyz, v) + q.w * v);
}

void main() {
    vec3 world = rotate_by_quat(position, instance_rotation) + instance_position;
    gl_Position = vp * vec4(world, 1.0);
    fragment_color = color;
}
";

pub(crate) static TEXTURED_INSTANCED_SRC_VERT: &str = "
#version 330 core
layout(location = 0) in vec3 position;
layout(location = 1) in vec2 uv;
layout(location = 2) in vec3 instance_position;

uniform mat4 vp;

out vec2 fragment_uv;

void main() {
    gl_Position = vp * vec4(position + instance_position, 1.0);
    fragment_uv = uv;
}
";

pub(crate) static TEXTURED_SRC_FRAG: &str = "
#version 330 core
uniform sampler2D tex;
uniform float alpha;

in vec2 fragment_uv;
out vec4 out_color;

void main() {
    vec4 texel = texture(tex, fragment_uv);
    out_color = vec4(texel.rgb, texel.a * alpha);
}
";

const MAX_MESHES: usize = 256;
const MAX_BATCHES: usize = 16;

struct MeshEntry {
    renderer: MeshRenderer,
    handle: Rc<MeshID>,
    vao: GLVAO,
    _vertex_buffer: GLBuffer,
    _color_buffer: GLBuffer,
    vertex_count: usize
}

/// One instanced draw call: a shared mesh plus per-instance streams that are
/// re-uploaded every frame through [`InstancedBatch::upload_instances`].
pub struct InstancedBatch {
    pub enabled: bool,
    pub alpha: f32,

    handle: Rc<BatchID>,
    vao: GLVAO,
    _static_buffers: Vec<GLBuffer>,
    texture: Option<GLTexture>,
    position_buffer: GLBuffer,
    rotation_buffer: Option<GLBuffer>,
    staging: Vec<f32>,
    vertex_count: usize,
    capacity: usize,
    count: usize
}

impl InstancedBatch {
    /// Replace this batch's per-instance data for the coming frame. The old
    /// GPU storage is orphaned before the write, matching the stream usage.
    pub fn upload_instances(&mut self, positions: &[Vec3], rotations: Option<&[Quat]>) {
        if positions.len() > self.capacity {
            log::warn!(
                "instance upload truncated to {} of {} instances",
                self.capacity, positions.len()
            );
        }
        let count = positions.len().min(self.capacity);

        self.staging.clear();
        for position in &positions[..count] {
            self.staging.extend_from_slice(&position.to_array());
        }
        self.position_buffer.bind();
        self.position_buffer.allocate(self.capacity * 3 * std::mem::size_of::<f32>(), gl::STREAM_DRAW);
        self.position_buffer.sub_data(0, &self.staging);
        self.position_buffer.unbind();

        if let (Some(buffer), Some(rotations)) = (&self.rotation_buffer, rotations) {
            let count = count.min(rotations.len());

            self.staging.clear();
            for rotation in &rotations[..count] {
                self.staging.extend_from_slice(&rotation.to_array());
            }
            buffer.bind();
            buffer.allocate(self.capacity * 4 * std::mem::size_of::<f32>(), gl::STREAM_DRAW);
            buffer.sub_data(0, &self.staging);
            buffer.unbind();
        }

        self.count = count;
    }

    pub fn instance_count(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

pub struct Renderer {
    mesh_program: GLShaderProgram,
    instanced_program: GLShaderProgram,
    textured_instanced_program: GLShaderProgram,
    text: TextOverlay,

    meshes: Vec<Option<MeshEntry>>,
    mesh_handles: HandleQueue<MeshID>,
    batches: Vec<Option<InstancedBatch>>,
    batch_handles: HandleQueue<BatchID>,

    clear_color: Vec3,
    width: u32,
    height: u32
}

impl Renderer {
    pub(crate) fn new(window: &Window) -> Result<Self, GLShaderError> {
        gl_init(window.internal_context());
        gl_enable_depth();
        gl_enable_blend();

        let mesh_program = GLShaderProgram::new(
            &GLShader::new(GLShaderType::Vertex, MESH_SRC_VERT)?,
            &GLShader::new(GLShaderType::Fragment, MESH_SRC_FRAG)?
        )?;
        let instanced_program = GLShaderProgram::new(
            &GLShader::new(GLShaderType::Vertex, INSTANCED_SRC_VERT)?,
            &GLShader::new(GLShaderType::Fragment, MESH_SRC_FRAG)?
        )?;
        let textured_instanced_program = GLShaderProgram::new(
            &GLShader::new(GLShaderType::Vertex, TEXTURED_INSTANCED_SRC_VERT)?,
            &GLShader::new(GLShaderType::Fragment, TEXTURED_SRC_FRAG)?
        )?;
        let text = TextOverlay::new()?;

        let width = window.get_width();
        let height = window.get_height();
        gl_viewport(width, height);

        log::info!("forward renderer ready ({}x{})", width, height);

        Ok(Renderer {
            mesh_program,
            instanced_program,
            textured_instanced_program,
            text,
            meshes: Vec::new(),
            mesh_handles: HandleQueue::new(MAX_MESHES),
            batches: Vec::new(),
            batch_handles: HandleQueue::new(MAX_BATCHES),
            // Dark blue, as every tutorial scene ever.
            clear_color: Vec3::new(0.0, 0.0, 0.4),
            width,
            height
        })
    }

    pub fn set_clear_color(&mut self, color: &Vec3) {
        self.clear_color = *color;
    }

    /// Add a static mesh. Dropping every clone of the returned handle removes
    /// the mesh on the next frame.
    pub fn add_mesh(&mut self, mesh: &Mesh, transform: Option<Transform>) -> Rc<MeshID> {
        let vao = GLVAO::new();
        vao.bind();

        let vertex_buffer = GLBuffer::vertex();
        vertex_buffer.bind();
        vertex_buffer.data(&flatten_vec3(&mesh.positions), gl::STATIC_DRAW);
        gl_vertex_attrib(0, 3, 0, 0);

        let color_buffer = GLBuffer::vertex();
        color_buffer.bind();
        color_buffer.data(&flatten_vec3(&vertex_colors(mesh)), gl::STATIC_DRAW);
        gl_vertex_attrib(1, 3, 0, 0);

        vao.unbind();

        let mut renderer = MeshRenderer::new(uuid::Uuid::new_v4());
        if let Some(transform) = transform {
            renderer.transform = transform;
        }
        log::debug!("added mesh {} ({} vertices)", renderer.get_id(), mesh.vertex_count());

        let id = self.mesh_handles.pop();
        let handle = Rc::new(id);
        let entry = MeshEntry {
            renderer,
            handle: handle.clone(),
            vao,
            _vertex_buffer: vertex_buffer,
            _color_buffer: color_buffer,
            vertex_count: mesh.vertex_count()
        };

        let slot = id.0 as usize;
        if slot >= self.meshes.len() {
            self.meshes.resize_with(slot + 1, || None);
        }
        self.meshes[slot] = Some(entry);

        handle
    }

    pub fn mesh_renderer(&mut self, id: &Rc<MeshID>) -> &mut MeshRenderer {
        &mut self.meshes[id.0 as usize]
            .as_mut()
            .expect("Mesh was removed.")
            .renderer
    }

    /// Add an instanced batch around a shared mesh. With a texture the mesh is
    /// drawn with its UVs and a per-instance position stream; without one it
    /// is drawn with its vertex colors plus a per-instance orientation stream.
    pub fn add_instanced_mesh(&mut self, mesh: &Mesh, capacity: usize, texture: Option<&Image>) -> Rc<BatchID> {
        let vao = GLVAO::new();
        vao.bind();

        let mut static_buffers = Vec::new();

        let vertex_buffer = GLBuffer::vertex();
        vertex_buffer.bind();
        vertex_buffer.data(&flatten_vec3(&mesh.positions), gl::STATIC_DRAW);
        gl_vertex_attrib(0, 3, 0, 0);
        static_buffers.push(vertex_buffer);

        let gl_texture = match texture {
            Some(image) => {
                let uv_buffer = GLBuffer::vertex();
                uv_buffer.bind();
                uv_buffer.data(&flatten_vec2(&vertex_uvs(mesh)), gl::STATIC_DRAW);
                gl_vertex_attrib(1, 2, 0, 0);
                static_buffers.push(uv_buffer);

                Some(create_texture(image))
            },
            None => {
                let color_buffer = GLBuffer::vertex();
                color_buffer.bind();
                color_buffer.data(&flatten_vec3(&vertex_colors(mesh)), gl::STATIC_DRAW);
                gl_vertex_attrib(1, 3, 0, 0);
                static_buffers.push(color_buffer);

                None
            }
        };

        let position_buffer = GLBuffer::vertex();
        position_buffer.bind();
        position_buffer.allocate(capacity * 3 * std::mem::size_of::<f32>(), gl::STREAM_DRAW);
        gl_vertex_attrib(2, 3, 0, 0);
        gl_vertex_attrib_divisor(2, 1);

        let rotation_buffer = if gl_texture.is_none() {
            let buffer = GLBuffer::vertex();
            buffer.bind();
            buffer.allocate(capacity * 4 * std::mem::size_of::<f32>(), gl::STREAM_DRAW);
            gl_vertex_attrib(3, 4, 0, 0);
            gl_vertex_attrib_divisor(3, 1);
            Some(buffer)
        } else {
            None
        };

        vao.unbind();

        let id = self.batch_handles.pop();
        let handle = Rc::new(id);
        let batch = InstancedBatch {
            enabled: true,
            alpha: 1.0,
            handle: handle.clone(),
            vao,
            _static_buffers: static_buffers,
            texture: gl_texture,
            position_buffer,
            rotation_buffer,
            staging: Vec::new(),
            vertex_count: mesh.vertex_count(),
            capacity,
            count: 0
        };
        log::debug!("added instanced batch (capacity {capacity})");

        let slot = id.0 as usize;
        if slot >= self.batches.len() {
            self.batches.resize_with(slot + 1, || None);
        }
        self.batches[slot] = Some(batch);

        handle
    }

    pub fn instanced_batch(&mut self, id: &Rc<BatchID>) -> &mut InstancedBatch {
        self.batches[id.0 as usize]
            .as_mut()
            .expect("Batch was removed.")
    }

    /// Queue a line of text, in pixels from the bottom-left of the window.
    pub fn draw_text(&mut self, text: &str, position: &Vec2, size: f32) {
        self.text.queue(text, position, size);
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        gl_viewport(width, height);
    }

    pub(crate) fn render(&mut self, window: &Window, camera: &mut Camera) {
        self.collect_garbage();

        gl_clear_color(&self.clear_color);
        gl_clear();

        let proj = *camera.proj_matrix();
        let view = *camera.view_matrix();
        let vp = proj * view;

        self.mesh_program.bind(); {
            for entry in self.meshes.iter_mut().flatten() {
                if !entry.renderer.enabled {
                    continue;
                }

                let mvp = vp * *entry.renderer.transform.get_model_matrix();
                self.mesh_program.set_mat4("mvp", &mvp);
                self.mesh_program.set_f32("alpha", entry.renderer.alpha);

                entry.vao.bind();
                gl_draw_arrays(gl::TRIANGLES, 0, entry.vertex_count);
                entry.vao.unbind();
            }
        } self.mesh_program.unbind();

        self.instanced_program.bind(); {
            self.instanced_program.set_mat4("vp", &vp);

            for batch in self.batches.iter().flatten() {
                if !batch.enabled || batch.count == 0 || batch.texture.is_some() {
                    continue;
                }

                self.instanced_program.set_f32("alpha", batch.alpha);
                batch.vao.bind();
                gl_draw_arrays_instanced(gl::TRIANGLES, 0, batch.vertex_count, batch.count);
                batch.vao.unbind();
            }
        } self.instanced_program.unbind();

        self.textured_instanced_program.bind(); {
            self.textured_instanced_program.set_mat4("vp", &vp);
            self.textured_instanced_program.set_sampler_slot("tex", 0);

            for batch in self.batches.iter().flatten() {
                if !batch.enabled || batch.count == 0 {
                    continue;
                }
                let texture = match &batch.texture {
                    Some(texture) => texture,
                    None => continue
                };

                self.textured_instanced_program.set_f32("alpha", batch.alpha);
                gl_active_texture(0);
                texture.bind();

                batch.vao.bind();
                gl_draw_arrays_instanced(gl::TRIANGLES, 0, batch.vertex_count, batch.count);
                batch.vao.unbind();

                texture.unbind();
            }
        } self.textured_instanced_program.unbind();

        self.text.flush(self.width, self.height);

        window.swap_buffers();
    }

    /// Free meshes and batches whose handles were dropped by the caller.
    fn collect_garbage(&mut self) {
        for slot in 0..self.meshes.len() {
            let expired = match &self.meshes[slot] {
                Some(entry) => Rc::strong_count(&entry.handle) == 1,
                None => false
            };
            if expired {
                let entry = self.meshes[slot].take().unwrap();
                self.mesh_handles.push(*entry.handle);
            }
        }

        for slot in 0..self.batches.len() {
            let expired = match &self.batches[slot] {
                Some(batch) => Rc::strong_count(&batch.handle) == 1,
                None => false
            };
            if expired {
                let batch = self.batches[slot].take().unwrap();
                self.batch_handles.push(*batch.handle);
            }
        }
    }
}

fn flatten_vec3(values: &[Vec3]) -> Vec<f32> {
    values.iter().flat_map(|value| value.to_array()).collect()
}

fn flatten_vec2(values: &[Vec2]) -> Vec<f32> {
    values.iter().flat_map(|value| value.to_array()).collect()
}

fn vertex_colors(mesh: &Mesh) -> Vec<Vec3> {
    if mesh.colors.len() == mesh.positions.len() {
        mesh.colors.clone()
    } else {
        vec![Vec3::ONE; mesh.positions.len()]
    }
}

fn vertex_uvs(mesh: &Mesh) -> Vec<Vec2> {
    if mesh.tex_coords.len() == mesh.positions.len() {
        mesh.tex_coords.clone()
    } else {
        log::warn!("mesh has no texture coordinates, sampling at (0, 0)");
        vec![Vec2::ZERO; mesh.positions.len()]
    }
}

fn create_texture(image: &Image) -> GLTexture {
    let texture = GLTexture::new(gl::TEXTURE_2D);
    texture.bind(); {
        gl_tex_parami(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT);
        gl_tex_parami(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT);
        gl_tex_parami(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR);
        gl_tex_parami(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR);

        let rgba = image.to_rgba8();
        gl_tex_image_2d(
            gl::RGBA,
            image.dimensions.x,
            image.dimensions.y,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            rgba.as_ptr() as *const c_void
        );
        gl_generate_mipmap(gl::TEXTURE_2D);
    } texture.unbind();

    texture
}
