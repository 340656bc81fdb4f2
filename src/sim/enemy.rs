use glam::*;
use rand::Rng;

use super::config;

/// A hostile sphere. Spawned around the camera, inert until something hits it.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub position: Vec3,
    pub size: f32,
    pub orientation: Quat,
    pub camera_distance: f32,
    pub alive: bool
}

impl Enemy {
    pub fn new(position: Vec3, orientation: Quat, camera_position: &Vec3) -> Self {
        Enemy {
            position,
            size: config::ENEMY_SIZE,
            orientation,
            camera_distance: position.distance(*camera_position),
            alive: true
        }
    }
}

/// Uniformly distributed random unit quaternion (Shoemake's method).
pub fn random_orientation(rng: &mut impl Rng) -> Quat {
    let seed: f32 = rng.gen();
    let r1 = (1.0 - seed).sqrt();
    let r2 = seed.sqrt();
    let t1 = std::f32::consts::TAU * rng.gen::<f32>();
    let t2 = std::f32::consts::TAU * rng.gen::<f32>();

    Quat::from_xyzw(t1.sin() * r1, t1.cos() * r1, t2.sin() * r2, t2.cos() * r2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_orientations_are_unit_quaternions() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let orientation = random_orientation(&mut rng);
            assert!((orientation.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn new_enemy_measures_distance_to_camera() {
        let camera = Vec3::new(0.0, 0.0, 5.0);
        let enemy = Enemy::new(Vec3::new(0.0, 0.0, -5.0), Quat::IDENTITY, &camera);

        assert!(enemy.alive);
        assert_eq!(enemy.size, config::ENEMY_SIZE);
        assert!((enemy.camera_distance - 10.0).abs() < 1e-5);
    }
}
