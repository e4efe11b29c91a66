//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use sdl2::video::{FullscreenType, GLProfile, SwapInterval};

use crate::{
    error::AppError,
    settings::{GlVersion, WindowSettings},
};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates a window with a forward-compatible core profile context of `gl_version`.
    /// The configured width and height are ignored if `fullscreen` is set.
    pub fn new(window_settings: &WindowSettings, gl_version: GlVersion) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let video_subsystem = sdl.video().map_err(AppError::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(gl_version.major, gl_version.minor);
        gl_attr.set_context_flags().forward_compatible().set();
        gl_attr.set_depth_size(24);

        let (width, height) = if window_settings.fullscreen {
            let display_mode = video_subsystem
                .current_display_mode(0)
                .map_err(AppError::Sdl)?;
            (display_mode.w as u32, display_mode.h as u32)
        } else {
            (window_settings.width, window_settings.height)
        };

        let mut window = video_subsystem
            .window(&window_settings.title, width, height)
            .opengl()
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| AppError::Sdl(e.to_string()))?;
        window
            .set_fullscreen(if window_settings.fullscreen {
                FullscreenType::Desktop
            } else {
                FullscreenType::Off
            })
            .map_err(AppError::Sdl)?;

        let gl_context = window.gl_create_context().map_err(AppError::Sdl)?;
        window.gl_make_current(&gl_context).map_err(AppError::Sdl)?;

        let interval = if window_settings.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Could not set swap interval {interval:?}: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(AppError::Sdl)?;

        log::info!("Created {width}x{height} window with an OpenGL {gl_version} core context");

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            event_pump,
        })
    }

    /// Current drawable size in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}
