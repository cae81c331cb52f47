//! Free-fly camera for terrain navigation
//!
//! The camera keeps a world-space position and yaw/pitch orientation and
//! produces the view/projection matrices consumed by the uniform block.
//! [`CameraController`] applies the per-frame keyboard/mouse policy on top.

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::input::{InputState, Key};

/// Movement directions relative to the camera's current orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along the view direction
    Forward,
    /// Against the view direction
    Backward,
    /// Along the negative right vector
    Left,
    /// Along the right vector
    Right,
}

/// Rotation axes for mouse look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal rotation around the world up vector
    Yaw,
    /// Vertical rotation around the camera's right vector
    Pitch,
}

/// Pitch is clamped short of the poles to keep the view basis well defined
const PITCH_LIMIT_DEG: f32 = 89.0;

/// 3D camera with position, yaw/pitch orientation, and perspective projection
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Rotation around the world Y axis, in radians
    pub yaw: f32,
    /// Rotation around the camera's right vector, in radians
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Camera {
    /// Create a camera for a viewport of the given pixel dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: utils::deg_to_rad(60.0),
            aspect: width / height,
            near: 0.1,
            far: 512.0,
        }
    }

    /// Unit vector along the current view direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Unit vector to the camera's right, parallel to the ground plane
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// Move the camera by `distance` along one of its basis directions
    pub fn translate(&mut self, direction: Direction, distance: f32) {
        let step = match direction {
            Direction::Forward => self.forward() * distance,
            Direction::Backward => -self.forward() * distance,
            Direction::Left => -self.right() * distance,
            Direction::Right => self.right() * distance,
        };
        self.position += step;
    }

    /// Rotate the camera around the given axis by `angle` degrees
    ///
    /// Pitch is clamped to ±89° so the view basis never degenerates.
    pub fn rotate(&mut self, axis: Axis, angle: f32) {
        match axis {
            Axis::Yaw => self.yaw += utils::deg_to_rad(angle),
            Axis::Pitch => {
                let limit = utils::deg_to_rad(PITCH_LIMIT_DEG);
                self.pitch = (self.pitch + utils::deg_to_rad(angle)).clamp(-limit, limit);
            }
        }
    }

    /// Perspective projection matrix with Vulkan depth conventions
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_vk(self.fov, self.aspect, self.near, self.far)
    }

    /// World-to-view matrix derived from position and orientation
    pub fn view_matrix(&self) -> Mat4 {
        let f = self.forward();
        let r = self.right();
        let u = f.cross(&r);
        let p = self.position;

        Mat4::new(
            r.x, r.y, r.z, -r.dot(&p),
            u.x, u.y, u.z, -u.dot(&p),
            f.x, f.y, f.z, -f.dot(&p),
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Per-frame camera update policy driven by [`InputState`]
///
/// Held W/S/A/D keys translate the camera by `speed × frame_time` along the
/// matching axis, with the sprint speed substituted while Shift is held.
/// Mouse deltas rotate yaw (and pitch, when enabled) scaled by the same
/// factor, after which the cursor is recentered to the screen anchor so the
/// next delta is relative again.
pub struct CameraController {
    move_speed: f32,
    sprint_speed: f32,
    pitch_enabled: bool,
}

impl CameraController {
    /// Create a controller from camera configuration
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            sprint_speed: config.sprint_speed,
            pitch_enabled: config.pitch_enabled,
        }
    }

    /// Apply one frame of input to the camera
    pub fn update(&mut self, camera: &mut Camera, input: &mut InputState, frame_time: f32) {
        let speed = if input.is_pressed(Key::Shift) {
            self.sprint_speed
        } else {
            self.move_speed
        };

        if input.is_pressed(Key::W) {
            camera.translate(Direction::Forward, speed * frame_time);
        }
        if input.is_pressed(Key::S) {
            camera.translate(Direction::Backward, speed * frame_time);
        }
        if input.is_pressed(Key::A) {
            camera.translate(Direction::Left, speed * frame_time);
        }
        if input.is_pressed(Key::D) {
            camera.translate(Direction::Right, speed * frame_time);
        }

        let delta = input.mouse_delta();
        camera.rotate(Axis::Yaw, speed * frame_time * delta.x);
        if self.pitch_enabled {
            camera.rotate(Axis::Pitch, speed * frame_time * delta.y);
        }

        input.recenter_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::input::WindowMessage;
    use approx::assert_relative_eq;

    fn controller(pitch_enabled: bool) -> CameraController {
        CameraController::new(&CameraConfig {
            move_speed: 50.0,
            sprint_speed: 100.0,
            pitch_enabled,
        })
    }

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-4);
    }

    #[test]
    fn test_no_keys_no_translation() {
        let mut camera = Camera::new(800.0, 600.0);
        let start = camera.position;
        let mut input = InputState::new(Vec2::new(400.0, 300.0));

        controller(true).update(&mut camera, &mut input, 0.016);

        assert_vec3_eq(camera.position, start);
    }

    #[test]
    fn test_forward_one_second_at_move_speed() {
        let mut camera = Camera::new(800.0, 600.0);
        let start = camera.position;
        let forward = camera.forward();
        let mut input = InputState::new(Vec2::new(400.0, 300.0));
        input.handle_message(WindowMessage::KeyDown(Key::W));

        controller(true).update(&mut camera, &mut input, 1.0);

        assert_vec3_eq(camera.position, start + forward * 50.0);
    }

    #[test]
    fn test_sprint_doubles_distance() {
        let mut camera = Camera::new(800.0, 600.0);
        let start = camera.position;
        let forward = camera.forward();
        let mut input = InputState::new(Vec2::new(400.0, 300.0));
        input.handle_message(WindowMessage::KeyDown(Key::W));
        input.handle_message(WindowMessage::KeyDown(Key::Shift));

        controller(true).update(&mut camera, &mut input, 1.0);

        assert_vec3_eq(camera.position, start + forward * 100.0);
    }

    #[test]
    fn test_held_keys_compose() {
        let mut camera = Camera::new(800.0, 600.0);
        let start = camera.position;
        let expected = camera.forward() * 50.0 * 0.5 + camera.right() * 50.0 * 0.5;
        let mut input = InputState::new(Vec2::new(400.0, 300.0));
        input.handle_message(WindowMessage::KeyDown(Key::W));
        input.handle_message(WindowMessage::KeyDown(Key::D));

        controller(true).update(&mut camera, &mut input, 0.5);

        assert_vec3_eq(camera.position, start + expected);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut camera = Camera::new(800.0, 600.0);
        let start = camera.position;
        let mut input = InputState::new(Vec2::new(400.0, 300.0));
        input.handle_message(WindowMessage::KeyDown(Key::W));
        input.handle_message(WindowMessage::KeyDown(Key::S));

        controller(true).update(&mut camera, &mut input, 1.0);

        assert_vec3_eq(camera.position, start);
    }

    #[test]
    fn test_pitch_toggle_disables_vertical_look() {
        let mut camera = Camera::new(800.0, 600.0);
        let mut input = InputState::new(Vec2::new(400.0, 300.0));
        input.handle_message(WindowMessage::MouseMove(Vec2::new(410.0, 320.0)));

        controller(false).update(&mut camera, &mut input, 0.016);

        assert_eq!(camera.pitch, 0.0);
        assert!(camera.yaw != 0.0);
    }

    #[test]
    fn test_pitch_clamped_at_poles() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.rotate(Axis::Pitch, 500.0);
        assert_relative_eq!(camera.pitch, utils::deg_to_rad(89.0));

        camera.rotate(Axis::Pitch, -1000.0);
        assert_relative_eq!(camera.pitch, -utils::deg_to_rad(89.0));
    }

    #[test]
    fn test_view_matrix_translates_position_to_origin() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.position = Vec3::new(3.0, 4.0, 5.0);

        let view = camera.view_matrix();
        let eye = view * nalgebra::Vector4::new(3.0, 4.0, 5.0, 1.0);

        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-5);
    }
}
