use glam::*;

use super::config;

/// A projectile travelling along the camera's facing direction until it
/// expires or collides.
#[derive(Clone, Debug)]
pub struct Fireball {
    pub position: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub size: f32,
    pub alive: bool
}

impl Fireball {
    /// Spawn one unit ahead of the camera so the projectile does not clip
    /// through the near plane on its first frame.
    pub fn new(camera_position: &Vec3, camera_forward: &Vec3) -> Self {
        let direction = camera_forward.normalize();

        Fireball {
            position: *camera_position + direction,
            direction,
            speed: config::FIREBALL_SPEED,
            size: config::FIREBALL_SIZE,
            alive: true
        }
    }

    pub(crate) fn integrate(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_one_unit_ahead_with_unit_direction() {
        let fireball = Fireball::new(&Vec3::ZERO, &Vec3::new(0.0, 0.0, -2.0));

        assert_eq!(fireball.position, Vec3::new(0.0, 0.0, -1.0));
        assert!((fireball.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn integrates_at_fixed_speed() {
        let mut fireball = Fireball::new(&Vec3::ZERO, &Vec3::new(1.0, 0.0, 0.0));
        fireball.integrate(0.5);

        let travelled = fireball.position.x - 1.0;
        assert!((travelled - config::FIREBALL_SPEED * 0.5).abs() < 1e-5);
    }
}
