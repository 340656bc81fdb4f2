use emberfall::*;
use glam::*;

use std::rc::Rc;

fn main() {
    env_logger::init();

    let main_loop = MainLoop::new();
    let config = WindowConfig {
        title: "Emberfall - Triangles",
        ..Default::default()
    };
    main_loop.run(config, init, update);
}

struct DemoState {
    triangle_ids: Vec<Rc<MeshID>>,
    orbit: OrbitController,
    clock: FrameClock
}

fn init(_resources: &mut Resources, graphics: &mut Graphics) -> DemoState {
    // Two interpenetrating triangles, one red and one green, blended.
    let first = Mesh::from_positions(
        vec![
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.0, 0.5, 0.5)
        ],
        vec![Vec3::new(0.9, 0.1, 0.1); 3]
    );
    let second = Mesh::from_positions(
        vec![
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.0, 0.5, -0.5)
        ],
        vec![Vec3::new(0.1, 0.9, 0.1); 3]
    );

    let renderer = graphics.renderer();
    let mut triangle_ids = Vec::new();
    for mesh in [first, second] {
        let id = renderer.add_mesh(&mesh, None);
        renderer.mesh_renderer(&id).alpha = 0.6;
        triangle_ids.push(id);
    }

    DemoState {
        triangle_ids,
        orbit: OrbitController::new(Vec3::ZERO, 5.0, 1.0),
        clock: FrameClock::new()
    }
}

fn update(app: &mut AppState<DemoState>) {
    let dt = app.user_state.clock.tick();

    app.user_state.orbit.update(app.graphics.camera(), dt);

    // Drop the oldest triangle.
    if app.input.key_down(VirtualKeyCode::Space) && !app.user_state.triangle_ids.is_empty() {
        app.user_state.triangle_ids.remove(0);
    }
}
