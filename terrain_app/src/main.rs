//! Terrain viewer
//!
//! Opens a fixed-size window, renders the procedural terrain, and runs the
//! free-fly camera loop until the window closes or Escape is pressed.

use std::process;

use terrain_engine::camera::{Camera, CameraController};
use terrain_engine::config::{AppConfig, Config};
use terrain_engine::foundation::math::Vec2;
use terrain_engine::foundation::time::Timer;
use terrain_engine::input::{InputState, Key, MessageOutcome, WindowMessage};
use terrain_engine::render::vulkan::Window;
use terrain_engine::render::TerrainRenderer;

const CONFIG_PATH: &str = "config/terrain.toml";

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("Fatal error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();

    let mut window = Window::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;

    let mut renderer = TerrainRenderer::new(&mut window, &config)?;
    renderer.prepare()?;

    let (width, height) = window.get_size();
    let mut camera = Camera::new(width as f32, height as f32);
    let mut controller = CameraController::new(&config.camera);

    // Cursor anchor: the client area center, fixed for the window's lifetime
    let anchor = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    let mut input = InputState::new(anchor);
    window.set_cursor_pos(anchor.x as f64, anchor.y as f64);

    let mut timer = Timer::new();

    while !window.should_close() {
        window.poll_events();

        let mut exit_requested = false;
        for (_, event) in window.flush_events() {
            if let Some(message) = translate_event(&event) {
                if input.handle_message(message) == MessageOutcome::ExitRequested {
                    exit_requested = true;
                }
            }
        }
        if exit_requested {
            window.set_should_close(true);
            continue;
        }

        timer.update();
        controller.update(&mut camera, &mut input, timer.delta_time());
        window.set_cursor_pos(anchor.x as f64, anchor.y as f64);

        renderer.render(&camera)?;
    }

    log::info!(
        "Exiting after {} frames ({:.1} fps)",
        timer.frame_count(),
        timer.current_fps()
    );
    Ok(())
}

/// Load the app config, falling back to defaults when no file is present
fn load_config() -> AppConfig {
    match AppConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => {
            log::info!("Loaded configuration from {CONFIG_PATH}");
            config
        }
        Err(err) => {
            log::debug!("No config at {CONFIG_PATH} ({err}), using defaults");
            AppConfig::default()
        }
    }
}

/// Map a GLFW event to an input-layer message, dropping events the viewer
/// does not react to
fn translate_event(event: &glfw::WindowEvent) -> Option<WindowMessage> {
    match event {
        glfw::WindowEvent::Key(key, _, action, _) => {
            let key = translate_key(*key)?;
            match action {
                glfw::Action::Press => Some(WindowMessage::KeyDown(key)),
                glfw::Action::Release => Some(WindowMessage::KeyUp(key)),
                glfw::Action::Repeat => None,
            }
        }
        glfw::WindowEvent::CursorPos(x, y) => {
            Some(WindowMessage::MouseMove(Vec2::new(*x as f32, *y as f32)))
        }
        _ => None,
    }
}

fn translate_key(key: glfw::Key) -> Option<Key> {
    match key {
        glfw::Key::W => Some(Key::W),
        glfw::Key::A => Some(Key::A),
        glfw::Key::S => Some(Key::S),
        glfw::Key::D => Some(Key::D),
        glfw::Key::LeftShift | glfw::Key::RightShift => Some(Key::Shift),
        glfw::Key::Escape => Some(Key::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_keys_translate() {
        assert_eq!(translate_key(glfw::Key::W), Some(Key::W));
        assert_eq!(translate_key(glfw::Key::A), Some(Key::A));
        assert_eq!(translate_key(glfw::Key::S), Some(Key::S));
        assert_eq!(translate_key(glfw::Key::D), Some(Key::D));
    }

    #[test]
    fn both_shift_keys_sprint() {
        assert_eq!(translate_key(glfw::Key::LeftShift), Some(Key::Shift));
        assert_eq!(translate_key(glfw::Key::RightShift), Some(Key::Shift));
    }

    #[test]
    fn unbound_keys_are_dropped() {
        assert_eq!(translate_key(glfw::Key::Space), None);
        assert_eq!(translate_key(glfw::Key::Enter), None);
    }

    #[test]
    fn key_repeat_is_ignored() {
        let event = glfw::WindowEvent::Key(
            glfw::Key::W,
            0,
            glfw::Action::Repeat,
            glfw::Modifiers::empty(),
        );
        assert_eq!(translate_event(&event), None);
    }

    #[test]
    fn cursor_motion_becomes_mouse_move() {
        let event = glfw::WindowEvent::CursorPos(640.0, 360.0);
        assert_eq!(
            translate_event(&event),
            Some(WindowMessage::MouseMove(Vec2::new(640.0, 360.0)))
        );
    }
}
