use emberfall::sim::{config, SimWorld};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

/// Step `world` at 60 Hz for `seconds`, camera fixed at `position` looking
/// along `forward`, summing the per-frame reports.
fn run_for(
    world: &mut SimWorld,
    seconds: f32,
    position: &Vec3,
    forward: &Vec3,
) -> (u32, u32, u32, u32) {
    let frames = (seconds / DT).round() as usize;
    let mut totals = (0, 0, 0, 0);

    for _ in 0..frames {
        let report = world.update(DT, position, forward);
        totals.0 += report.enemies_spawned;
        totals.1 += report.fireballs_fired;
        totals.2 += report.enemies_destroyed;
        totals.3 += report.fireballs_expired;
    }

    totals
}

#[test]
fn spawn_cadence_over_a_minute() {
    let mut world = SimWorld::new(3);
    let origin = Vec3::ZERO;
    let up = Vec3::new(0.0, 1.0, 0.0);

    // Shoot straight up so fireballs leave the spawn plane immediately.
    let (spawned, fired, _, _) = run_for(&mut world, 60.0, &origin, &up);

    // First enemy after ~1s, then every 3s; first shot after 2s, then every 2s.
    assert!((19..=21).contains(&spawned), "spawned {}", spawned);
    assert!((28..=30).contains(&fired), "fired {}", fired);
}

#[test]
fn enemies_spawn_on_the_camera_plane_within_range() {
    let mut world = SimWorld::new(5);
    let camera = Vec3::new(10.0, 3.0, -7.0);
    let up = Vec3::new(0.0, 1.0, 0.0);

    run_for(&mut world, 120.0, &camera, &up);
    assert!(world.enemy_count() > 10);

    let range = config::SPAWN_RANGE as f32;
    for enemy in world.enemies() {
        let offset = enemy.position - camera;
        assert_eq!(offset.y, 0.0);
        assert!(offset.x.abs() <= range && offset.z.abs() <= range);
    }
}

#[test]
fn enemy_population_is_capped() {
    let mut world = SimWorld::new(11);
    let origin = Vec3::ZERO;
    let up = Vec3::new(0.0, 1.0, 0.0);

    // One spawn attempt per update; enough attempts to hit the cap twice over.
    for _ in 0..(config::MAX_ENEMIES * 3) {
        world.update(config::SPAWN_INTERVAL, &origin, &up);
        assert!(world.enemy_count() <= config::MAX_ENEMIES);
        assert!(world.fireball_count() <= config::MAX_FIREBALLS);
    }

    // The odd fireball clips a freshly spawned enemy, so allow a small dip.
    assert!(world.enemy_count() >= config::MAX_ENEMIES - 5);
}

#[test]
fn aimed_fireballs_destroy_their_target() {
    let mut world = SimWorld::new(7);
    let origin = Vec3::ZERO;
    let up = Vec3::new(0.0, 1.0, 0.0);

    // Wait for a comfortably in-range target.
    let mut target = None;
    for _ in 0..36_000 {
        world.update(DT, &origin, &up);
        if let Some(enemy) = world.enemies().iter().find(|e| e.camera_distance < 30.0) {
            target = Some(enemy.position);
            break;
        }
    }
    let target = target.expect("no enemy spawned in range");

    let forward = target.normalize();
    let (_, _, destroyed, _) = run_for(&mut world, 10.0, &origin, &forward);

    assert!(destroyed >= 1, "no enemy destroyed");
    assert!(
        !world.enemies().iter().any(|e| e.position == target),
        "aimed enemy survived"
    );
}

#[test]
fn fireballs_do_not_outlive_their_range() {
    let mut world = SimWorld::new(13);
    let origin = Vec3::ZERO;
    let up = Vec3::new(0.0, 1.0, 0.0);

    let (_, fired, destroyed, expired) = run_for(&mut world, 60.0, &origin, &up);

    // 4s of flight per fireball at a 2s cadence: everything but the last
    // couple of shots has expired again, bar any that hit a fresh spawn.
    assert!(fired >= 28);
    assert!(expired + destroyed + 3 >= fired);
    for fireball in world.fireballs() {
        assert!(fireball.position.distance(origin) < config::FIREBALL_MAX_RANGE + config::FIREBALL_SPEED * DT);
    }
}

#[test]
fn identical_seeds_produce_identical_runs() {
    let mut a = SimWorld::new(99);
    let mut b = SimWorld::new(99);
    let origin = Vec3::ZERO;
    let forward = Vec3::new(0.0, 0.0, -1.0);

    run_for(&mut a, 30.0, &origin, &forward);
    run_for(&mut b, 30.0, &origin, &forward);

    assert_eq!(a.enemy_count(), b.enemy_count());
    assert_eq!(a.fireball_count(), b.fireball_count());
    for (x, y) in a.enemies().iter().zip(b.enemies()) {
        assert_eq!(x.position, y.position);
        assert_eq!(x.orientation, y.orientation);
    }
}
