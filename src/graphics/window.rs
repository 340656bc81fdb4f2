use glutin::{ContextWrapper, PossiblyCurrent};

use crate::MainLoop;

/// Window creation parameters passed to [`MainLoop::run`].
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Emberfall",
            width: 1024,
            height: 768
        }
    }
}

pub struct Window {
    context: ContextWrapper<PossiblyCurrent, glutin::window::Window>
}

impl Window {
    pub(crate) fn new(main_loop: &MainLoop, config: &WindowConfig) -> Self {
        let window_builder = glutin::window::WindowBuilder::new()
            .with_title(config.title)
            .with_inner_size(glutin::dpi::PhysicalSize::new(config.width, config.height));

        let context = glutin::ContextBuilder::new()
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
            .with_gl_profile(glutin::GlProfile::Core)
            .with_multisampling(4)
            .with_vsync(true)
            .build_windowed(window_builder, main_loop.internal_loop())
            .expect("Failed to build context.");

        let context = unsafe {
            context.make_current()
                .expect("Failed to make context current.")
        };

        Window {
            context
        }
    }

    pub(crate) fn internal_context(&self) -> &glutin::ContextWrapper<glutin::PossiblyCurrent, glutin::window::Window> {
        &self.context
    }

    pub(crate) fn internal_window(&self) -> &glutin::window::Window {
        self.context.window()
    }

    pub(crate) fn resize(&self, width: u32, height: u32) {
        self.context.resize(glutin::dpi::PhysicalSize::new(width, height));
    }

    pub(crate) fn swap_buffers(&self) {
        self.context.swap_buffers()
            .expect("Failed to swap buffers.");
    }

    /// Get inner width.
    pub fn get_width(&self) -> u32 {
        self.internal_window().inner_size().width
    }

    /// Get inner height.
    pub fn get_height(&self) -> u32 {
        self.internal_window().inner_size().height
    }
}
