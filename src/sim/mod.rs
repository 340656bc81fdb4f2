pub mod config;
mod enemy;
pub use enemy::*;
mod fireball;
pub use fireball::*;

use glam::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What happened during one simulation step, for the HUD and logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub enemies_spawned: u32,
    pub fireballs_fired: u32,
    pub enemies_destroyed: u32,
    pub fireballs_expired: u32
}

/// The game state behind the fireball demo: two bounded entity containers
/// advanced once per rendered frame. Spawning is driven by a seeded RNG so
/// identical seeds replay identical worlds.
pub struct SimWorld {
    enemies: Vec<Enemy>,
    fireballs: Vec<Fireball>,
    spawn_timer: f32,
    shoot_timer: f32,
    rng: ChaCha8Rng
}

impl SimWorld {
    pub fn new(seed: u64) -> Self {
        SimWorld {
            enemies: Vec::with_capacity(config::MAX_ENEMIES),
            fireballs: Vec::with_capacity(config::MAX_FIREBALLS),
            // Start partway into the interval so the first enemy shows up a
            // second in, not three seconds in.
            spawn_timer: config::SPAWN_INTERVAL - 1.0,
            shoot_timer: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed)
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn fireballs(&self) -> &[Fireball] {
        &self.fireballs
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn fireball_count(&self) -> usize {
        self.fireballs.len()
    }

    /// Advance the world by `dt` seconds. The camera position and facing
    /// direction drive expiry, spawn placement, aiming and the depth sort.
    pub fn update(&mut self, dt: f32, camera_position: &Vec3, camera_forward: &Vec3) -> FrameReport {
        let mut report = FrameReport::default();

        report.fireballs_expired = self.expire_far_fireballs(camera_position);
        report.enemies_destroyed = self.check_collisions();

        self.spawn_timer += dt;
        self.shoot_timer += dt;

        if self.spawn_timer >= config::SPAWN_INTERVAL && self.enemies.len() < config::MAX_ENEMIES {
            self.spawn_enemy(camera_position);
            self.spawn_timer = 0.0;
            report.enemies_spawned = 1;
        }

        self.refresh_camera_distances(camera_position);
        self.sort_enemies();

        if self.shoot_timer >= config::SHOOT_INTERVAL && self.fireballs.len() < config::MAX_FIREBALLS {
            self.fireballs.push(Fireball::new(camera_position, camera_forward));
            self.shoot_timer = 0.0;
            report.fireballs_fired = 1;
            log::debug!("fireball fired ({} in flight)", self.fireballs.len());
        }

        for fireball in &mut self.fireballs {
            fireball.integrate(dt);
        }

        report
    }

    /// Fill the per-instance streams consumed by the renderer, in draw order
    /// (enemies back-to-front from the last update).
    pub fn enemy_instances(&self, positions: &mut Vec<Vec3>, orientations: &mut Vec<Quat>) {
        positions.clear();
        orientations.clear();
        for enemy in &self.enemies {
            positions.push(enemy.position);
            orientations.push(enemy.orientation);
        }
    }

    pub fn fireball_instances(&self, positions: &mut Vec<Vec3>) {
        positions.clear();
        for fireball in &self.fireballs {
            positions.push(fireball.position);
        }
    }

    fn spawn_enemy(&mut self, camera_position: &Vec3) {
        let x = self.rng.gen_range(-config::SPAWN_RANGE..=config::SPAWN_RANGE) as f32;
        let z = self.rng.gen_range(-config::SPAWN_RANGE..=config::SPAWN_RANGE) as f32;
        let position = *camera_position + Vec3::new(x, 0.0, z);
        let orientation = random_orientation(&mut self.rng);

        self.enemies.push(Enemy::new(position, orientation, camera_position));
        log::debug!("enemy spawned at {} ({} alive)", position, self.enemies.len());
    }

    /// Brute-force pairwise sphere test. Both parties of a hit die; one
    /// fireball can take several overlapping enemies with it in one frame.
    fn check_collisions(&mut self) -> u32 {
        for fireball in &mut self.fireballs {
            for enemy in &mut self.enemies {
                let distance = enemy.position.distance(fireball.position);
                if distance <= enemy.size + fireball.size {
                    fireball.alive = false;
                    enemy.alive = false;
                }
            }
        }

        let before = self.enemies.len();
        self.fireballs.retain(|fireball| fireball.alive);
        self.enemies.retain(|enemy| enemy.alive);

        (before - self.enemies.len()) as u32
    }

    fn expire_far_fireballs(&mut self, camera_position: &Vec3) -> u32 {
        let before = self.fireballs.len();
        self.fireballs
            .retain(|fireball| fireball.position.distance(*camera_position) < config::FIREBALL_MAX_RANGE);

        (before - self.fireballs.len()) as u32
    }

    /// The sort key decays as the camera moves, so recompute it every frame.
    fn refresh_camera_distances(&mut self, camera_position: &Vec3) {
        for enemy in &mut self.enemies {
            enemy.camera_distance = enemy.position.distance(*camera_position);
        }
    }

    /// Back-to-front, so alpha blending composites correctly.
    fn sort_enemies(&mut self) {
        self.enemies
            .sort_by(|a, b| b.camera_distance.total_cmp(&a.camera_distance));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ORIGIN: Vec3 = Vec3::ZERO;
    static FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    #[test]
    fn first_enemy_spawns_after_one_second() {
        let mut world = SimWorld::new(1);

        let report = world.update(0.5, &ORIGIN, &FORWARD);
        assert_eq!(report.enemies_spawned, 0);
        assert_eq!(world.enemy_count(), 0);

        let report = world.update(0.5, &ORIGIN, &FORWARD);
        assert_eq!(report.enemies_spawned, 1);
        assert_eq!(world.enemy_count(), 1);
    }

    #[test]
    fn first_fireball_fires_after_two_seconds() {
        let mut world = SimWorld::new(1);

        world.update(1.9, &ORIGIN, &FORWARD);
        assert_eq!(world.fireball_count(), 0);

        let report = world.update(0.1, &ORIGIN, &FORWARD);
        assert_eq!(report.fireballs_fired, 1);
        assert_eq!(world.fireball_count(), 1);
    }

    #[test]
    fn collision_kills_both_parties() {
        let mut world = SimWorld::new(1);
        world.enemies.push(Enemy::new(Vec3::new(0.0, 0.0, -2.0), Quat::IDENTITY, &ORIGIN));
        world.fireballs.push(Fireball::new(&ORIGIN, &FORWARD));

        let report = world.update(0.0, &ORIGIN, &FORWARD);
        assert_eq!(report.enemies_destroyed, 1);
        assert_eq!(world.enemy_count(), 0);
        assert_eq!(world.fireball_count(), 0);
    }

    #[test]
    fn one_fireball_takes_all_overlapping_enemies() {
        let mut world = SimWorld::new(1);
        world.enemies.push(Enemy::new(Vec3::new(0.5, 0.0, -2.0), Quat::IDENTITY, &ORIGIN));
        world.enemies.push(Enemy::new(Vec3::new(-0.5, 0.0, -2.0), Quat::IDENTITY, &ORIGIN));
        world.fireballs.push(Fireball::new(&ORIGIN, &FORWARD));

        let report = world.update(0.0, &ORIGIN, &FORWARD);
        assert_eq!(report.enemies_destroyed, 2);
        assert_eq!(world.fireball_count(), 0);
    }

    #[test]
    fn near_miss_leaves_both_alive() {
        let mut world = SimWorld::new(1);
        // Radii sum to 3, so 3.1 apart is a miss.
        world.enemies.push(Enemy::new(Vec3::new(3.1, 0.0, -1.0), Quat::IDENTITY, &ORIGIN));
        world.fireballs.push(Fireball::new(&ORIGIN, &FORWARD));

        let report = world.update(0.0, &ORIGIN, &FORWARD);
        assert_eq!(report.enemies_destroyed, 0);
        assert_eq!(world.enemy_count(), 1);
        assert_eq!(world.fireball_count(), 1);
    }

    #[test]
    fn enemies_sort_back_to_front() {
        let mut world = SimWorld::new(1);
        world.enemies.push(Enemy::new(Vec3::new(0.0, 0.0, -5.0), Quat::IDENTITY, &ORIGIN));
        world.enemies.push(Enemy::new(Vec3::new(0.0, 0.0, -20.0), Quat::IDENTITY, &ORIGIN));
        world.enemies.push(Enemy::new(Vec3::new(0.0, 0.0, -10.0), Quat::IDENTITY, &ORIGIN));

        world.update(0.0, &ORIGIN, &FORWARD);

        let distances: Vec<f32> = world.enemies().iter().map(|e| e.camera_distance).collect();
        assert_eq!(distances, vec![20.0, 10.0, 5.0]);
    }

    #[test]
    fn sort_follows_the_camera() {
        let mut world = SimWorld::new(1);
        world.enemies.push(Enemy::new(Vec3::new(0.0, 0.0, -5.0), Quat::IDENTITY, &ORIGIN));
        world.enemies.push(Enemy::new(Vec3::new(0.0, 0.0, -20.0), Quat::IDENTITY, &ORIGIN));

        // From behind the far enemy the order flips.
        let camera = Vec3::new(0.0, 0.0, -25.0);
        world.update(0.0, &camera, &FORWARD);

        assert_eq!(world.enemies()[0].camera_distance, 20.0);
        assert_eq!(world.enemies()[0].position.z, -5.0);
    }

    #[test]
    fn distant_fireballs_expire() {
        let mut world = SimWorld::new(1);
        // Push the cadence far away so nothing else spawns into the flight path.
        world.spawn_timer = f32::MIN;
        world.shoot_timer = f32::MIN;
        world.fireballs.push(Fireball::new(&ORIGIN, &FORWARD));

        // 10 units/s: past the 40 unit range within 4 seconds of flight.
        let mut expired = 0;
        for _ in 0..50 {
            expired += world.update(0.1, &ORIGIN, &FORWARD).fireballs_expired;
        }
        assert_eq!(expired, 1);
        assert!(world
            .fireballs()
            .iter()
            .all(|f| f.position.distance(ORIGIN) < config::FIREBALL_MAX_RANGE + config::FIREBALL_SPEED * 0.1));
    }

    #[test]
    fn identical_seeds_replay_identical_worlds() {
        let mut a = SimWorld::new(42);
        let mut b = SimWorld::new(42);

        for _ in 0..300 {
            a.update(1.0 / 60.0, &ORIGIN, &FORWARD);
            b.update(1.0 / 60.0, &ORIGIN, &FORWARD);
        }

        assert_eq!(a.enemy_count(), b.enemy_count());
        for (x, y) in a.enemies().iter().zip(b.enemies()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.orientation, y.orientation);
        }
    }

    #[test]
    fn instance_streams_match_entity_state() {
        let mut world = SimWorld::new(9);
        for _ in 0..600 {
            world.update(1.0 / 60.0, &ORIGIN, &FORWARD);
        }

        let mut positions = Vec::new();
        let mut orientations = Vec::new();
        world.enemy_instances(&mut positions, &mut orientations);
        assert_eq!(positions.len(), world.enemy_count());
        assert_eq!(orientations.len(), world.enemy_count());

        let mut fireball_positions = Vec::new();
        world.fireball_instances(&mut fireball_positions);
        assert_eq!(fireball_positions.len(), world.fireball_count());
    }
}
