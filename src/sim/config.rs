/// Hard cap on live enemies.
pub const MAX_ENEMIES: usize = 100;
/// Hard cap on fireballs in flight.
pub const MAX_FIREBALLS: usize = 100;

/// Seconds between enemy spawns.
pub const SPAWN_INTERVAL: f32 = 3.0;
/// Seconds between fireball shots.
pub const SHOOT_INTERVAL: f32 = 2.0;

/// Enemies appear at integer offsets in [-SPAWN_RANGE, SPAWN_RANGE] on the
/// X/Z axes around the camera, on the camera's ground plane.
pub const SPAWN_RANGE: i32 = 30;

/// Enemy collision radius.
pub const ENEMY_SIZE: f32 = 2.0;

/// Fireball travel speed (units/second).
pub const FIREBALL_SPEED: f32 = 10.0;
/// Fireball collision radius.
pub const FIREBALL_SIZE: f32 = 1.0;

/// Fireballs at or past this camera distance are expired.
pub const FIREBALL_MAX_RANGE: f32 = SPAWN_RANGE as f32 + 10.0;
