use glam::*;
use crate::{RIGHT, UP, FORWARD};

pub struct Camera {
    position: Vec3,
    rotation: Quat,

    fov: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,

    view_matrix: Mat4,
    proj_matrix: Mat4,
    view_inv_matrix: Mat4,
    dirty_view: bool,
    dirty_proj: bool
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new()
    }
}

impl Camera {
    pub fn new() -> Camera {
        Camera {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov: 45.0,
            aspect_ratio: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
            view_matrix: Mat4::IDENTITY,
            proj_matrix: Mat4::IDENTITY,
            view_inv_matrix: Mat4::IDENTITY,
            dirty_view: true,
            dirty_proj: true
        }
    }

    pub fn right(&mut self) -> Vec3 {
        (*self.view_inv_matrix() * Vec4::from((RIGHT, 0.0))).xyz()
    }

    pub fn up(&mut self) -> Vec3 {
        (*self.view_inv_matrix() * Vec4::from((UP, 0.0))).xyz()
    }

    pub fn forward(&mut self) -> Vec3 {
        (*self.view_inv_matrix() * Vec4::from((FORWARD, 0.0))).xyz()
    }

    pub fn get_position(&self) -> &Vec3 {
        &self.position
    }

    pub fn get_rotation(&self) -> &Quat {
        &self.rotation
    }

    pub fn set_position(&mut self, position: &Vec3) {
        self.position = *position;
        self.dirty_view = true;
    }

    pub fn set_rotation(&mut self, rotation: &Quat) {
        self.rotation = *rotation;
        self.dirty_view = true;
    }

    /// Orient the camera so it faces `target` from its current position.
    pub fn look_at(&mut self, target: &Vec3, up: &Vec3) {
        let view = Mat4::look_at_rh(self.position, *target, *up);
        self.rotation = Quat::from_mat4(&view.inverse());
        self.dirty_view = true;
    }

    pub fn get_fov(&self) -> f32 {
        self.fov
    }

    pub fn get_aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn get_near(&self) -> f32 {
        self.near
    }

    pub fn get_far(&self) -> f32 {
        self.far
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.dirty_proj = true;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.dirty_proj = true;
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
        self.dirty_proj = true;
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
        self.dirty_proj = true;
    }

    fn recalculate_view(&mut self) {
        if self.dirty_view {
            self.dirty_view = false;
            // World transform of the camera; the view matrix is its inverse.
            self.view_inv_matrix = Mat4::from_translation(self.position) * Mat4::from_quat(self.rotation);
            self.view_matrix = self.view_inv_matrix.inverse();
        }
    }

    fn recalculate_proj(&mut self) {
        if self.dirty_proj {
            self.dirty_proj = false;
            self.proj_matrix = Mat4::perspective_rh(
                self.fov.to_radians(),
                self.aspect_ratio,
                self.near,
                self.far
            );
        }
    }

    pub fn view_matrix(&mut self) -> &Mat4 {
        self.recalculate_view();
        &self.view_matrix
    }

    pub fn view_inv_matrix(&mut self) -> &Mat4 {
        self.recalculate_view();
        &self.view_inv_matrix
    }

    pub fn proj_matrix(&mut self) -> &Mat4 {
        self.recalculate_proj();
        &self.proj_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn default_camera_faces_negative_z() {
        let mut camera = Camera::new();
        assert_close(camera.forward(), FORWARD);
        assert_close(camera.right(), RIGHT);
        assert_close(camera.up(), UP);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut camera = Camera::new();
        camera.set_position(&Vec3::new(5.0, 0.0, 0.0));
        camera.look_at(&Vec3::ZERO, &UP);

        assert_close(camera.forward(), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn view_matrix_inverts_world_transform() {
        let mut camera = Camera::new();
        camera.set_position(&Vec3::new(1.0, 2.0, 3.0));
        camera.set_rotation(&Quat::from_rotation_y(0.5));

        let product = *camera.view_matrix() * *camera.view_inv_matrix();
        for (a, b) in product.to_cols_array().iter().zip(Mat4::IDENTITY.to_cols_array()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn view_moves_world_opposite_to_camera() {
        let mut camera = Camera::new();
        camera.set_position(&Vec3::new(0.0, 0.0, 5.0));

        let origin = *camera.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_close(origin.xyz(), Vec3::new(0.0, 0.0, -5.0));
    }
}
