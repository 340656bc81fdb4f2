pub mod window;
pub use window::*;
pub mod camera;
pub use camera::*;
pub mod controller;
pub use controller::*;
pub mod transform;
pub use transform::*;
pub mod renderer;
pub use renderer::*;

use crate::MainLoop;

pub struct Graphics {
    window: Window,
    camera: Camera,
    renderer: Renderer
}

impl Graphics {
    pub(crate) fn new(main_loop: &MainLoop, config: &WindowConfig) -> Self {
        let window = Window::new(main_loop, config);

        let mut camera = Camera::new();
        camera.set_aspect_ratio(config.width as f32 / config.height as f32);

        let renderer = Renderer::new(&window)
            .expect("Failed to create renderer.");

        Graphics {
            window,
            camera,
            renderer
        }
    }

    pub fn window(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn camera(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn renderer(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.window.resize(width, height);
        self.camera.set_aspect_ratio(width as f32 / height as f32);
        self.renderer.resize(width, height);
    }

    pub(crate) fn render(&mut self) {
        self.renderer.render(&self.window, &mut self.camera);
    }
}
