use std::collections::HashSet;
use std::time::Instant;

use glam::{DVec2, Vec3};
use vecscope_core::{generate_arrows, generate_grid, GridConfig, LineSet, Options, VectorStore};
use vecscope_render::FlyCamera;
use winit::keyboard::KeyCode;

/// CPU geometry that must be re-uploaded this frame.
#[derive(Debug, Default)]
pub struct GeometryUpdates {
    /// New grid lines, if the grid configuration changed.
    pub grid: Option<LineSet>,
    /// New arrow lines, if the vector store changed.
    pub arrows: Option<LineSet>,
}

/// All mutable application state that is not a GPU resource.
pub struct AppState {
    pub camera: FlyCamera,
    pub last_frame_time: Option<Instant>,
    // Keyboard state for WASD movement
    pub keys_down: HashSet<KeyCode>,
    // Raw mouse motion accumulated since the last frame
    pub mouse_delta: DVec2,
    pub right_mouse_down: bool,
    pub grid: GridConfig,
    pub grid_dirty: bool,
    pub store: VectorStore,
    pub options: Options,
    pub close_requested: bool,
}

impl AppState {
    /// Creates the state for `options`. The grid starts dirty so the first
    /// frame uploads it.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let camera = FlyCamera::from_options(&options.camera, 16.0 / 9.0);
        Self {
            camera,
            last_frame_time: None,
            keys_down: HashSet::new(),
            mouse_delta: DVec2::ZERO,
            right_mouse_down: false,
            grid: options.grid,
            grid_dirty: true,
            store: options.vector_store(),
            options,
            close_requested: false,
        }
    }

    /// Enables or disables the XZ plane sweep.
    pub fn set_plane_xz(&mut self, enabled: bool) {
        if self.grid.enable_xz != enabled {
            self.grid.enable_xz = enabled;
            self.grid_dirty = true;
        }
    }

    /// Enables or disables the YZ plane sweep.
    pub fn set_plane_yz(&mut self, enabled: bool) {
        if self.grid.enable_yz != enabled {
            self.grid.enable_yz = enabled;
            self.grid_dirty = true;
        }
    }

    /// Movement requested by the held keys as (right, up, forward).
    #[must_use]
    pub fn movement_direction(&self) -> Vec3 {
        let held = |code| self.keys_down.contains(&code);
        let axis = |positive: bool, negative: bool| f32::from(i8::from(positive) - i8::from(negative));

        Vec3::new(
            axis(held(KeyCode::KeyD), held(KeyCode::KeyA)),
            axis(held(KeyCode::Space) || held(KeyCode::KeyE), held(KeyCode::KeyQ)),
            axis(held(KeyCode::KeyW), held(KeyCode::KeyS)),
        )
    }

    /// Advances the frame clock and returns the seconds since the previous frame.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = self
            .last_frame_time
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame_time = Some(now);
        dt
    }

    /// Applies held keys and the accumulated mouse motion to the camera.
    #[allow(clippy::cast_possible_truncation)]
    pub fn update_camera(&mut self, dt: f32) {
        let direction = self.movement_direction();
        if direction != Vec3::ZERO {
            self.camera.translate(direction, dt);
        }

        let delta = std::mem::take(&mut self.mouse_delta);
        if delta != DVec2::ZERO {
            self.camera.look(delta.x as f32, delta.y as f32);
        }
    }

    /// Regenerates the geometry whose source changed and clears the dirty flags.
    pub fn take_geometry_updates(&mut self) -> GeometryUpdates {
        let grid = std::mem::take(&mut self.grid_dirty).then(|| generate_grid(&self.grid));
        let arrows = self
            .store
            .take_dirty()
            .then(|| generate_arrows(self.store.vectors()));
        GeometryUpdates { grid, arrows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_frame_uploads_grid_only() {
        let mut state = AppState::new(Options::default());
        let updates = state.take_geometry_updates();
        assert_eq!(updates.grid, Some(generate_grid(&GridConfig::default())));
        assert!(updates.arrows.is_none());

        let updates = state.take_geometry_updates();
        assert!(updates.grid.is_none());
        assert!(updates.arrows.is_none());
    }

    #[test]
    fn test_plane_toggle_marks_grid_dirty_once() {
        let mut state = AppState::new(Options::default());
        state.take_geometry_updates();

        state.set_plane_xz(true);
        let grid = state.take_geometry_updates().grid.unwrap();
        assert!(grid.len() > generate_grid(&GridConfig::default()).len());

        // setting the same value again changes nothing
        state.set_plane_xz(true);
        assert!(state.take_geometry_updates().grid.is_none());
    }

    #[test]
    fn test_store_edit_regenerates_arrows() {
        let mut state = AppState::new(Options::default());
        state.take_geometry_updates();

        state.store.new_vector(Vec3::X, Vec3::ONE);
        let arrows = state.take_geometry_updates().arrows.unwrap();
        assert_eq!(arrows.positions(), &[Vec3::ZERO, Vec3::X]);
    }

    #[test]
    fn test_movement_direction() {
        let mut state = AppState::new(Options::default());
        assert_eq!(state.movement_direction(), Vec3::ZERO);

        state.keys_down.insert(KeyCode::KeyW);
        state.keys_down.insert(KeyCode::KeyA);
        state.keys_down.insert(KeyCode::Space);
        assert_eq!(state.movement_direction(), Vec3::new(-1.0, 1.0, 1.0));

        // opposing keys cancel
        state.keys_down.insert(KeyCode::KeyS);
        assert_eq!(state.movement_direction().z, 0.0);
    }

    #[test]
    fn test_update_camera_consumes_mouse_delta() {
        let mut state = AppState::new(Options::default());
        let yaw = state.camera.yaw;
        state.mouse_delta = DVec2::new(10.0, 0.0);

        state.update_camera(0.0);
        assert!(state.camera.yaw > yaw);
        assert_eq!(state.mouse_delta, DVec2::ZERO);

        let yaw = state.camera.yaw;
        state.update_camera(0.0);
        assert_eq!(state.camera.yaw, yaw);
    }

    #[test]
    fn test_tick() {
        let mut state = AppState::new(Options::default());
        let start = Instant::now();
        assert_eq!(state.tick(start), 0.0);
        let dt = state.tick(start + Duration::from_millis(500));
        assert!((dt - 0.5).abs() < 1e-6);
    }
}
