use glam::*;

#[derive(Clone, Copy, Debug)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,

    dirty: bool,
    model_matrix: Mat4
}

impl Default for Transform {
    fn default() -> Self {
        Transform::new()
    }
}

impl Transform {
    pub fn new() -> Self {
        Transform {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            dirty: true,
            model_matrix: Mat4::IDENTITY
        }
    }

    pub fn from_position(position: &Vec3) -> Self {
        let mut transform = Transform::new();
        transform.set_position(position);
        transform
    }

    pub fn get_position(&self) -> &Vec3 {
        &self.position
    }

    pub fn get_rotation(&self) -> &Quat {
        &self.rotation
    }

    pub fn get_scale(&self) -> &Vec3 {
        &self.scale
    }

    pub fn set_position(&mut self, position: &Vec3) {
        self.position = *position;
        self.dirty = true;
    }

    pub fn set_rotation(&mut self, rotation: &Quat) {
        self.rotation = *rotation;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: &Vec3) {
        self.scale = *scale;
        self.dirty = true;
    }

    pub fn get_model_matrix(&mut self) -> &Mat4 {
        if self.dirty {
            self.dirty = false;
            self.model_matrix = Mat4::from_translation(self.position)
                * Mat4::from_quat(self.rotation)
                * Mat4::from_scale(self.scale);
        }

        &self.model_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_matrix_applies_translation() {
        let mut transform = Transform::from_position(&Vec3::new(1.0, 2.0, 3.0));
        let origin = *transform.get_model_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin.xyz(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn model_matrix_recalculates_after_set() {
        let mut transform = Transform::new();
        let _ = transform.get_model_matrix();

        transform.set_position(&Vec3::new(4.0, 0.0, 0.0));
        let origin = *transform.get_model_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin.x, 4.0);
    }
}
