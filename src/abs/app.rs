//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;

use crate::{config::WindowConfig, error::AppError};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Field order matters: the GL context is dropped before the window it belongs to.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    pub gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

impl App {
    /// Creates a new fixed-size [`App`] window with an OpenGL 3.3 core context made current on
    /// the calling thread.
    pub fn new(config: &WindowConfig) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let video_subsystem = sdl.video().map_err(AppError::Sdl)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .position_centered()
            .build()?;
        let gl_context = window.gl_create_context().map_err(AppError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::Context)?;

        if config.vsync
            && let Err(e) = video_subsystem.gl_set_swap_interval(sdl2::video::SwapInterval::VSync)
        {
            log::warn!("Could not enable vsync: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };

        let (drawable_width, drawable_height) = window.drawable_size();
        unsafe {
            log::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
            gl.viewport(0, 0, drawable_width as i32, drawable_height as i32);
        }

        let event_pump = sdl.event_pump().map_err(AppError::Sdl)?;
        log::debug!(
            "Created window \"{}\" ({}x{}, drawable {}x{})",
            config.title,
            config.width,
            config.height,
            drawable_width,
            drawable_height
        );

        Ok(Self {
            gl: Arc::new(gl),
            event_pump,
            gl_context,
            window,
            video_subsystem,
            sdl,
        })
    }

    /// Returns the aspect ratio of the window.
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.window.size();
        width as f32 / height.max(1) as f32
    }
}
