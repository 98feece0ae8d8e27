use log::LevelFilter;

use crate::{
    abs::App,
    config::Config,
    error::AppError,
    input::{KeyboardState, Rotation},
    render::PyramidRenderer,
};

mod abs;
mod config;
mod error;
mod input;
mod logger;
mod pyramid;
mod render;
mod transform;

fn main() {
    let config = Config::load();
    let level = config
        .as_ref()
        .map_or(LevelFilter::Info, |config| config.log_level);
    if let Err(e) = logger::init(level) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let result = config.map_err(AppError::from).and_then(|config| run(&config));
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(-1);
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    let mut app = App::new(&config.window)?;
    let renderer = PyramidRenderer::new(&app.gl, &config.textures, config.clear_color)?;

    let mut keyboard = KeyboardState::default();
    let mut rotation = Rotation::default();

    log::info!("Running. W/S, A/D and Up/Down rotate the pyramid, Escape quits");

    'running: loop {
        keyboard.begin_frame();
        for event in app.event_pump.poll_iter() {
            keyboard.handle_event(&event);
        }
        if keyboard.close_requested() {
            break 'running;
        }
        rotation.apply_input(&keyboard, config.rotate_on_press);

        renderer.render(&rotation, app.aspect_ratio());
        app.window.gl_swap_window();
    }

    log::info!(
        "Closing with rotation ({}, {}, {})",
        rotation.x,
        rotation.y,
        rotation.z
    );
    drop(renderer);
    Ok(())
}
