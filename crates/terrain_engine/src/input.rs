//! Input state tracking fed from window messages
//!
//! [`InputState`] owns the flat key map and the mouse delta the camera
//! controller reads once per frame. Window messages overwrite state in
//! place; there is no event queue, the last message wins. Mouse motion is
//! tracked relative to a fixed screen anchor computed at startup; after each
//! camera update the cursor is recentered to that anchor, which is what makes
//! the deltas relative.

use std::collections::HashMap;

use crate::foundation::math::Vec2;

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move forward
    W,
    /// Move left
    A,
    /// Move backward
    S,
    /// Move right
    D,
    /// Sprint modifier
    Shift,
    /// Quit the application
    Escape,
}

/// Window messages the input layer consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowMessage {
    /// A key was pressed
    KeyDown(Key),
    /// A key was released
    KeyUp(Key),
    /// The cursor moved to an absolute screen position
    MouseMove(Vec2),
}

/// Result of handling a window message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Keep running
    Continue,
    /// Escape was pressed; the application should exit cleanly
    ExitRequested,
}

/// Keyboard and mouse state owned by the render loop
pub struct InputState {
    keys: HashMap<Key, bool>,
    mouse_delta: Vec2,
    anchor: Vec2,
    cursor_position: Vec2,
}

impl InputState {
    /// Create input state with the screen anchor the cursor recenters to
    ///
    /// The anchor is computed once at startup from the window client
    /// rectangle (its center in screen coordinates) and never changes.
    pub fn new(anchor: Vec2) -> Self {
        Self {
            keys: HashMap::new(),
            mouse_delta: Vec2::zeros(),
            anchor,
            cursor_position: anchor,
        }
    }

    /// Handle one window message, overwriting previous state
    pub fn handle_message(&mut self, message: WindowMessage) -> MessageOutcome {
        match message {
            WindowMessage::KeyDown(key) => {
                self.keys.insert(key, true);
                if key == Key::Escape {
                    log::info!("Escape pressed, requesting exit");
                    return MessageOutcome::ExitRequested;
                }
            }
            WindowMessage::KeyUp(key) => {
                self.keys.insert(key, false);
            }
            WindowMessage::MouseMove(position) => {
                self.cursor_position = position;
                self.mouse_delta = position - self.anchor;
            }
        }
        MessageOutcome::Continue
    }

    /// Whether a key is currently held
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Mouse offset from the anchor since the last recenter
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// The fixed screen anchor point
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Last known cursor position in screen coordinates
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Snap the tracked cursor back to the anchor and clear the delta
    ///
    /// The caller is responsible for warping the OS cursor to
    /// [`InputState::anchor`] so the tracked state stays truthful.
    pub fn recenter_cursor(&mut self) {
        self.cursor_position = self.anchor;
        self.mouse_delta = Vec2::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InputState {
        InputState::new(Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_key_down_up_transitions() {
        let mut input = state();
        assert!(!input.is_pressed(Key::W));

        assert_eq!(input.handle_message(WindowMessage::KeyDown(Key::W)), MessageOutcome::Continue);
        assert!(input.is_pressed(Key::W));

        assert_eq!(input.handle_message(WindowMessage::KeyUp(Key::W)), MessageOutcome::Continue);
        assert!(!input.is_pressed(Key::W));
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut input = state();
        assert_eq!(
            input.handle_message(WindowMessage::KeyDown(Key::Escape)),
            MessageOutcome::ExitRequested
        );
    }

    #[test]
    fn test_mouse_delta_relative_to_anchor() {
        let mut input = state();
        input.handle_message(WindowMessage::MouseMove(Vec2::new(410.0, 280.0)));

        assert_eq!(input.mouse_delta(), Vec2::new(10.0, -20.0));
    }

    #[test]
    fn test_last_mouse_message_wins() {
        let mut input = state();
        input.handle_message(WindowMessage::MouseMove(Vec2::new(500.0, 300.0)));
        input.handle_message(WindowMessage::MouseMove(Vec2::new(390.0, 305.0)));

        assert_eq!(input.mouse_delta(), Vec2::new(-10.0, 5.0));
    }

    #[test]
    fn test_recenter_resets_cursor_to_anchor() {
        let mut input = state();
        input.handle_message(WindowMessage::MouseMove(Vec2::new(123.0, 456.0)));
        assert_ne!(input.cursor_position(), input.anchor());

        input.recenter_cursor();

        assert_eq!(input.cursor_position(), input.anchor());
        assert_eq!(input.mouse_delta(), Vec2::zeros());
    }
}
