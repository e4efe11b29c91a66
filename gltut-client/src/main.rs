use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use glow::HasContext;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};

use crate::{
    abs::App,
    cli::Cli,
    error::AppError,
    lessons::{Frame, LessonContext},
    settings::Settings,
};

mod abs;
mod cli;
mod error;
mod lessons;
mod logging;
mod render;
mod settings;

/// Builds a [`gltut_core::ShaderProgram`] from `render/shaders/<name>/{vert,frag}.glsl`.
#[macro_export]
macro_rules! shader_program {
    ($gl:expr, $name:literal) => {
        gltut_core::ShaderProgram::new(
            $gl,
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/src/render/shaders/",
                $name,
                "/vert.glsl"
            )),
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/src/render/shaders/",
                $name,
                "/frag.glsl"
            )),
        )
    };
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list {
        for lesson in lessons::LESSONS {
            println!(
                "{:<20} {} (OpenGL {})",
                lesson.name, lesson.description, lesson.min_gl_version
            );
        }
        return ExitCode::SUCCESS;
    }

    let (settings, settings_path) = match setup(&cli) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &settings, settings_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Errors after [`setup`] go through the installed logger.
fn report_error(error: &AppError) {
    log::error!("{error}");
}

/// Loads the settings and installs the logger.
fn setup(cli: &Cli) -> Result<(Settings, Option<PathBuf>), AppError> {
    let settings_path = cli.config.clone().or_else(Settings::default_path);
    let settings = match &settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let level = match cli.log_level {
        Some(level) => level,
        None => settings.log_level()?,
    };
    logging::init(level)?;

    Ok((settings, settings_path))
}

fn run(cli: Cli, settings: &Settings, settings_path: Option<&Path>) -> Result<(), AppError> {
    match settings_path {
        Some(path) if cli.write_settings => {
            settings.save(path)?;
            log::info!("Wrote settings to {}", path.display());
        }
        Some(path) => log::debug!("Settings file: {}", path.display()),
        None => log::warn!("No config directory on this platform, using default settings"),
    }

    let info = lessons::find(&cli.lesson).ok_or_else(|| AppError::UnknownLesson(cli.lesson))?;
    let gl_version = settings.gl_version.max(info.min_gl_version);

    let mut app = App::new(&settings.window, gl_version)?;
    let (width, height) = app.drawable_size();

    unsafe {
        let [r, g, b, a] = settings.clear_color;
        app.gl.clear_color(r, g, b, a);
        app.gl.viewport(0, 0, width as i32, height as i32);
    }

    let mut lesson = (info.build)(&LessonContext {
        gl: &app.gl,
        settings,
        size: (width, height),
    })?;
    log::info!("Running lesson `{}`: {}", info.name, info.description);

    let start = Instant::now();
    let mut last_frame_time = start;
    let mut frames = 0u32;
    let mut since_report = 0.0f32;

    'running: loop {
        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = app.window.drawable_size();
                    unsafe {
                        app.gl.viewport(0, 0, width as i32, height as i32);
                    }
                    lesson.resize(width, height);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let frame = Frame {
            time: now.duration_since(start).as_secs_f32(),
            delta: now.duration_since(last_frame_time).as_secs_f32(),
        };
        last_frame_time = now;

        frames += 1;
        since_report += frame.delta;
        if since_report >= 5.0 {
            log::debug!("{:.1} fps", frames as f32 / since_report);
            frames = 0;
            since_report = 0.0;
        }

        unsafe {
            app.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        lesson.render(&frame)?;
        app.window.gl_swap_window();
    }

    log::info!("Closing lesson `{}`", info.name);
    Ok(())
}
