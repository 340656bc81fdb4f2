use glam::*;

use crate::{Camera, Input, VirtualKeyCode, UP};

/// Free-flight camera: mouse look, WASD movement along the camera basis,
/// scroll wheel zooms the field of view.
pub struct FlyController {
    yaw: f32,
    pitch: f32,

    pub move_speed: f32,
    pub look_speed: f32,
    pub zoom_speed: f32
}

impl Default for FlyController {
    fn default() -> Self {
        FlyController::new()
    }
}

impl FlyController {
    pub fn new() -> Self {
        FlyController {
            yaw: 0.0,
            pitch: 0.0,
            move_speed: 6.0,
            look_speed: 0.005,
            zoom_speed: 5.0
        }
    }

    pub fn update(&mut self, camera: &mut Camera, input: &Input, dt: f32) {
        let look = input.mouse_delta() * self.look_speed;
        self.yaw -= look.x;
        self.pitch = (self.pitch - look.y).clamp(-89f32.to_radians(), 89f32.to_radians());
        camera.set_rotation(&Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0));

        let mut dir = Vec3::ZERO;
        if input.key(VirtualKeyCode::W) {
            dir += camera.forward();
        }
        if input.key(VirtualKeyCode::S) {
            dir += -camera.forward();
        }
        if input.key(VirtualKeyCode::A) {
            dir += -camera.right();
        }
        if input.key(VirtualKeyCode::D) {
            dir += camera.right();
        }
        if input.key(VirtualKeyCode::Q) {
            dir += -camera.up();
        }
        if input.key(VirtualKeyCode::E) {
            dir += camera.up();
        }
        let position = *camera.get_position() + dir * dt * self.move_speed;
        camera.set_position(&position);

        let scroll = input.scroll();
        if scroll != 0.0 {
            let fov = (camera.get_fov() - scroll * self.zoom_speed).clamp(20.0, 80.0);
            camera.set_fov(fov);
        }
    }
}

/// Circles a target point at fixed radius and constant angular speed,
/// always facing the target.
pub struct OrbitController {
    pub target: Vec3,
    pub radius: f32,
    pub speed: f32,

    angle: f32
}

impl OrbitController {
    pub fn new(target: Vec3, radius: f32, speed: f32) -> Self {
        OrbitController {
            target,
            radius,
            speed,
            angle: 0.0
        }
    }

    pub fn update(&mut self, camera: &mut Camera, dt: f32) {
        self.angle += dt * self.speed;

        let offset = Vec3::new(self.radius * self.angle.cos(), 0.0, self.radius * self.angle.sin());
        camera.set_position(&(self.target + offset));
        camera.look_at(&self.target, &UP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut camera = Camera::new();
        let mut orbit = OrbitController::new(Vec3::ZERO, 5.0, 1.0);

        for _ in 0..10 {
            orbit.update(&mut camera, 0.16);
            let distance = camera.get_position().length();
            assert!((distance - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn orbit_faces_the_target() {
        let mut camera = Camera::new();
        let mut orbit = OrbitController::new(Vec3::ZERO, 5.0, 1.0);
        orbit.update(&mut camera, 0.5);

        let to_target = (Vec3::ZERO - *camera.get_position()).normalize();
        assert!((camera.forward() - to_target).length() < 1e-4);
    }
}
