use emberfall::sim::{config, SimWorld};
use emberfall::*;
use glam::*;

use std::rc::Rc;

fn main() {
    env_logger::init();

    let main_loop = MainLoop::new();
    let window_config = WindowConfig {
        title: "Emberfall",
        width: 1024,
        height: 768
    };
    main_loop.run(window_config, init, update);
}

struct GameState {
    world: SimWorld,
    enemy_batch: Rc<BatchID>,
    fireball_batch: Rc<BatchID>,

    fly: FlyController,
    clock: FrameClock,

    // Instance staging, reused every frame.
    enemy_positions: Vec<Vec3>,
    enemy_orientations: Vec<Quat>,
    fireball_positions: Vec<Vec3>
}

fn init(resources: &mut Resources, graphics: &mut Graphics) -> GameState {
    let sphere = resources
        .get_model("assets/models/sphere.obj")
        .expect("Failed to load sphere model.");
    let fire = resources
        .get_image("assets/textures/fire.png")
        .expect("Failed to load fire texture.");

    let renderer = graphics.renderer();
    let enemy_batch = renderer.add_instanced_mesh(&enemy_mesh(), config::MAX_ENEMIES, None);
    let fireball_batch =
        renderer.add_instanced_mesh(&sphere.mesh, config::MAX_FIREBALLS, Some(fire.as_ref()));

    graphics.camera().set_position(&Vec3::new(0.0, 0.0, 5.0));

    GameState {
        world: SimWorld::new(rand::random()),
        enemy_batch,
        fireball_batch,
        fly: FlyController::new(),
        clock: FrameClock::new(),
        enemy_positions: Vec::with_capacity(config::MAX_ENEMIES),
        enemy_orientations: Vec::with_capacity(config::MAX_ENEMIES),
        fireball_positions: Vec::with_capacity(config::MAX_FIREBALLS)
    }
}

fn update(app: &mut AppState<GameState>) {
    let state = &mut app.user_state;
    let dt = state.clock.tick();

    // Click captures the mouse, Tab gives it back.
    if app.input.get_cursor_mode() == CursorMode::FREE
        && app.input.mouse_button_down(MouseButton::Left)
    {
        app.input.set_cursor_mode(CursorMode::LOCKED, app.graphics.window());
    }
    if app.input.key_down(VirtualKeyCode::Tab) {
        app.input.toggle_cursor_mode(app.graphics.window());
    }

    if app.input.get_cursor_mode() == CursorMode::LOCKED {
        state.fly.update(app.graphics.camera(), &app.input, dt);
    }

    let camera_position = *app.graphics.camera().get_position();
    let camera_forward = app.graphics.camera().forward();

    let report = state.world.update(dt, &camera_position, &camera_forward);
    if report.enemies_destroyed > 0 {
        log::info!(
            "{} enemies down, {} remaining",
            report.enemies_destroyed,
            state.world.enemy_count()
        );
    }

    state
        .world
        .enemy_instances(&mut state.enemy_positions, &mut state.enemy_orientations);
    state.world.fireball_instances(&mut state.fireball_positions);

    let renderer = app.graphics.renderer();
    renderer
        .instanced_batch(&state.enemy_batch)
        .upload_instances(&state.enemy_positions, Some(&state.enemy_orientations));
    renderer
        .instanced_batch(&state.fireball_batch)
        .upload_instances(&state.fireball_positions, None);

    let hud = format!(
        "FPS: {:.0}  ENEMIES: {}  FIREBALLS: {}",
        state.clock.fps(),
        state.world.enemy_count(),
        state.world.fireball_count()
    );
    renderer.draw_text(&hud, &Vec2::new(10.0, 10.0), 16.0);
}

/// The enemy shape from the original scene: eight hand-placed triangles with
/// a randomized green channel per vertex.
fn enemy_mesh() -> Mesh {
    let positions = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.5, -1.0, 1.5),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.5, -1.0, -1.5),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.5, -1.0, -1.5),
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(-1.5, -1.0, 1.5),
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(-1.5, -1.0, 1.5),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.5, -1.0, -1.5),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0)
    ];
    let colors = positions
        .iter()
        .map(|_| Vec3::new(0.7, rand::random::<f32>(), 1.0))
        .collect();

    Mesh::from_positions(positions, colors)
}
