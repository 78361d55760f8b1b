//! Free-flying camera with mouse look.

use glam::{Mat4, Vec3};
use vecscope_core::CameraOptions;

/// Largest pitch magnitude in degrees; keeps the view from flipping over.
const PITCH_LIMIT: f32 = 89.0;

/// A first-person camera described by position, yaw and pitch.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Yaw in degrees. -90 looks down -Z.
    pub yaw: f32,
    /// Pitch in degrees, clamped to +-89.
    pub pitch: f32,
    /// World up vector.
    pub world_up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion.
    pub sensitivity: f32,
}

impl FlyCamera {
    /// Creates a camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self::from_options(&CameraOptions::default(), aspect_ratio)
    }

    /// Creates a camera from configuration.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect_ratio: f32) -> Self {
        Self {
            position: options.position,
            yaw: options.yaw_degrees,
            pitch: options.pitch_degrees.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            world_up: Vec3::Y,
            fov_degrees: options.fov_degrees,
            aspect_ratio,
            near: options.near,
            far: options.far,
            move_speed: options.move_speed,
            sensitivity: options.mouse_sensitivity,
        }
    }

    /// Sets the aspect ratio. Degenerate sizes (minimized windows) are ignored.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    /// Returns the unit view direction.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// Returns the unit right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.front().cross(self.world_up).normalize()
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.world_up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// Moves the camera in its own frame.
    ///
    /// `direction` is (right, up, forward); it is scaled by `move_speed * dt`
    /// without being normalized.
    pub fn translate(&mut self, direction: Vec3, dt: f32) {
        let step = self.move_speed * dt;
        self.position += self.right() * (direction.x * step)
            + self.world_up * (direction.y * step)
            + self.front() * (direction.z * step);
    }

    /// Rotates the view by a mouse delta in pixels.
    pub fn look(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += delta_x * self.sensitivity;
        self.pitch = (self.pitch - delta_y * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_looks_down_neg_z() {
        let camera = FlyCamera::default();
        assert!(approx(camera.front(), Vec3::NEG_Z));
        assert!(approx(camera.right(), Vec3::X));
    }

    #[test]
    fn test_forward_motion() {
        let mut camera = FlyCamera::new(1.0);
        camera.position = Vec3::ZERO;
        camera.move_speed = 2.0;
        camera.translate(Vec3::Z, 0.5);
        assert!(approx(camera.position, Vec3::NEG_Z));
    }

    #[test]
    fn test_strafe_motion() {
        let mut camera = FlyCamera::new(1.0);
        camera.position = Vec3::ZERO;
        camera.move_speed = 1.0;
        camera.translate(Vec3::NEG_X, 1.0);
        assert!(approx(camera.position, Vec3::NEG_X));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::new(1.0);
        camera.sensitivity = 1.0;
        camera.look(0.0, -1000.0);
        assert!((camera.pitch - PITCH_LIMIT).abs() < f32::EPSILON);
        camera.look(0.0, 5000.0);
        assert!((camera.pitch + PITCH_LIMIT).abs() < f32::EPSILON);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = FlyCamera::default();
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert!(approx(eye, Vec3::ZERO));
    }

    #[test]
    fn test_projection_is_perspective() {
        let camera = FlyCamera::new(1.0);
        let proj = camera.projection_matrix();
        // Perspective matrix has non-zero w division
        assert!(proj.w_axis.z != 0.0);
        assert!((proj.z_axis.w + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ignores_degenerate_aspect() {
        let mut camera = FlyCamera::new(2.0);
        camera.set_aspect_ratio(0.0);
        camera.set_aspect_ratio(f32::NAN);
        assert!((camera.aspect_ratio - 2.0).abs() < f32::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_look_keeps_a_valid_basis(
            moves in proptest::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 1..20)
        ) {
            let mut camera = FlyCamera::default();
            for (dx, dy) in moves {
                camera.look(dx, dy);
            }
            prop_assert!(camera.pitch.abs() <= PITCH_LIMIT);
            prop_assert!((camera.front().length() - 1.0).abs() < 1e-4);
            prop_assert!(camera.front().dot(camera.right()).abs() < 1e-4);
            prop_assert!(camera.view_matrix().is_finite());
        }
    }
}
