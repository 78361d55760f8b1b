//! Line geometry generation for the coordinate grid and the vector arrows.
//!
//! Everything here is CPU-only and deterministic: the same input always
//! produces the same [`LineSet`], vertex for vertex.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::store::UserVector;

/// Color of every grid vertex.
pub const GRID_COLOR: Vec3 = Vec3::ONE;

/// Increment used by the legacy fixed-step sweep.
pub const LEGACY_FIXED_STEP: f32 = 0.1;

/// How the grid sweep advances from one slice to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum GridStep {
    /// `2 * edge / max(slice_count, 1)`: the sweep spans exactly `[-edge, edge]`.
    #[default]
    Uniform,
    /// A constant increment independent of slice count and edge.
    Fixed(f32),
}

/// Parameters of the coordinate grid.
///
/// A config is never patched in place by the renderer; changing it means
/// regenerating the whole grid with [`generate_grid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of slices. Negative values produce an empty grid.
    pub slice_count: i32,
    /// Half-width of the grid square.
    pub edge: f32,
    /// Append an XZ-plane sweep per slice.
    pub enable_xz: bool,
    /// Append a YZ-plane sweep per slice.
    pub enable_yz: bool,
    /// Sweep increment mode.
    pub step: GridStep,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            slice_count: 20,
            edge: 1.0,
            enable_xz: false,
            enable_yz: false,
            step: GridStep::Uniform,
        }
    }
}

impl GridConfig {
    /// Creates a config with both optional planes disabled.
    #[must_use]
    pub fn new(slice_count: i32, edge: f32) -> Self {
        Self {
            slice_count,
            edge,
            ..Self::default()
        }
    }

    /// Returns the distance between consecutive sweep coordinates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn step_size(&self) -> f32 {
        match self.step {
            GridStep::Uniform => 2.0 * self.edge / self.slice_count.max(1) as f32,
            GridStep::Fixed(step) => step,
        }
    }

    /// Number of sweep positions, or `None` for a negative slice count.
    fn sweep_len(&self) -> Option<usize> {
        usize::try_from(self.slice_count).ok().map(|n| n + 1)
    }

    /// Number of vertices [`generate_grid`] emits for this config.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        let Some(n) = self.sweep_len() else {
            return 0;
        };
        let planes = usize::from(self.enable_xz) + usize::from(self.enable_yz);
        n * (6 + planes * 4 * n)
    }
}

/// CPU-side mirror of a line buffer: segment endpoints and their colors.
///
/// `positions` and `colors` always have the same, even length; vertex `i`
/// of one pairs with vertex `i` of the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
}

impl LineSet {
    /// Creates an empty line set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty line set with room for `vertices` vertices.
    #[must_use]
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
        }
    }

    /// Appends one segment with a single color on both endpoints.
    pub fn push_segment(&mut self, start: Vec3, end: Vec3, color: Vec3) {
        self.positions.extend([start, end]);
        self.colors.extend([color, color]);
    }

    /// Segment endpoints, two per segment.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex colors, parallel to [`Self::positions`].
    #[must_use]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }
}

#[allow(clippy::cast_precision_loss)]
fn sweep_coordinate(edge: f32, step: f32, i: usize) -> f32 {
    -edge + i as f32 * step
}

fn push_xz_sweep(lines: &mut LineSet, n: usize, edge: f32, step: f32) {
    for j in 0..n {
        let x = sweep_coordinate(edge, step, j);
        lines.push_segment(Vec3::new(x, 0.0, edge), Vec3::new(x, 0.0, -edge), GRID_COLOR);
        lines.push_segment(Vec3::new(-edge, 0.0, x), Vec3::new(edge, 0.0, x), GRID_COLOR);
    }
}

fn push_yz_sweep(lines: &mut LineSet, n: usize, edge: f32, step: f32) {
    for j in 0..n {
        let x = sweep_coordinate(edge, step, j);
        lines.push_segment(Vec3::new(0.0, edge, x), Vec3::new(0.0, -edge, x), GRID_COLOR);
        lines.push_segment(Vec3::new(0.0, x, -edge), Vec3::new(0.0, x, edge), GRID_COLOR);
    }
}

/// Generates the coordinate grid for `config`.
///
/// Each sweep position `x` contributes the XY-plane cross lines and the Z
/// axis segment. Enabled XZ/YZ planes append a full sweep of their own at
/// every position, so enabling a plane always adds vertices.
#[must_use]
pub fn generate_grid(config: &GridConfig) -> LineSet {
    let Some(n) = config.sweep_len() else {
        return LineSet::new();
    };
    let edge = config.edge;
    let step = config.step_size();
    let mut lines = LineSet::with_capacity(config.vertex_count());

    for i in 0..n {
        let x = sweep_coordinate(edge, step, i);

        // XY plane
        lines.push_segment(Vec3::new(x, edge, 0.0), Vec3::new(x, -edge, 0.0), GRID_COLOR);
        lines.push_segment(Vec3::new(-edge, x, 0.0), Vec3::new(edge, x, 0.0), GRID_COLOR);

        // Z axis
        lines.push_segment(Vec3::new(0.0, 0.0, edge), Vec3::new(0.0, 0.0, -edge), GRID_COLOR);

        if config.enable_xz {
            push_xz_sweep(&mut lines, n, edge, step);
        }
        if config.enable_yz {
            push_yz_sweep(&mut lines, n, edge, step);
        }
    }

    lines
}

/// Builds one origin-to-value segment per vector, in input order.
#[must_use]
pub fn generate_arrows(vectors: &[UserVector]) -> LineSet {
    let mut lines = LineSet::with_capacity(vectors.len() * 2);
    for vector in vectors {
        lines.push_segment(Vec3::ZERO, vector.value, vector.color);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_grid_for_negative_slices() {
        let config = GridConfig::new(-3, 1.0);
        assert!(generate_grid(&config).is_empty());
        assert_eq!(config.vertex_count(), 0);
    }

    #[test]
    fn test_base_grid_layout() {
        let lines = generate_grid(&GridConfig::new(2, 1.0));
        assert_eq!(lines.len(), 18);

        let p = lines.positions();
        assert_eq!(p[0], Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(p[1], Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(p[2], Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(p[3], Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(p[4], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(p[5], Vec3::new(0.0, 0.0, -1.0));
        // last sweep position lands on +edge
        assert_eq!(p[12], Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_grid_is_white() {
        let config = GridConfig {
            enable_xz: true,
            enable_yz: true,
            ..GridConfig::new(3, 2.0)
        };
        assert!(generate_grid(&config).colors().iter().all(|c| *c == GRID_COLOR));
    }

    #[test]
    fn test_xz_sweep_repeats_per_slice() {
        let config = GridConfig {
            enable_xz: true,
            ..GridConfig::new(2, 1.0)
        };
        let lines = generate_grid(&config);
        // 3 positions * (6 base + 3 * 4 xz)
        assert_eq!(lines.len(), 54);
        assert_eq!(lines.len(), config.vertex_count());

        // the xz sweep follows the first base block
        assert_eq!(lines.positions()[6], Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(lines.positions()[7], Vec3::new(-1.0, 0.0, -1.0));
    }

    #[test]
    fn test_zero_slices_emits_single_position() {
        let lines = generate_grid(&GridConfig::new(0, 0.5));
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.positions()[0].x, -0.5);
    }

    #[test]
    fn test_fixed_step_ignores_slice_count() {
        let config = GridConfig {
            step: GridStep::Fixed(LEGACY_FIXED_STEP),
            ..GridConfig::new(4, 1.0)
        };
        assert!((config.step_size() - 0.1).abs() < f32::EPSILON);

        let lines = generate_grid(&config);
        let last_x = lines.positions()[lines.len() - 6].x;
        assert!((last_x - (-0.6)).abs() < 1e-6);
    }

    #[test]
    fn test_arrows_empty() {
        assert_eq!(generate_arrows(&[]), LineSet::new());
    }

    #[test]
    fn test_single_arrow() {
        let v = UserVector::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.0, 0.0));
        let lines = generate_arrows(&[v]);
        assert_eq!(lines.segment_count(), 1);
        assert_eq!(lines.positions(), &[Vec3::ZERO, v.value]);
        assert_eq!(lines.colors(), &[v.color, v.color]);
    }

    #[test]
    fn test_arrows_keep_order_and_duplicates() {
        let a = UserVector::new(Vec3::X, Vec3::ONE);
        let b = UserVector::new(Vec3::Y, Vec3::ZERO);
        let lines = generate_arrows(&[a, b, a]);
        assert_eq!(lines.segment_count(), 3);
        assert_eq!(lines.positions()[1], Vec3::X);
        assert_eq!(lines.positions()[3], Vec3::Y);
        assert_eq!(lines.positions()[5], Vec3::X);
    }

    proptest! {
        #[test]
        fn grid_vertices_pair_up(
            slices in 0i32..24,
            edge in 0.01f32..100.0,
            enable_xz: bool,
            enable_yz: bool,
        ) {
            let config = GridConfig { slice_count: slices, edge, enable_xz, enable_yz, step: GridStep::Uniform };
            let lines = generate_grid(&config);
            prop_assert_eq!(lines.len() % 2, 0);
            prop_assert_eq!(lines.positions().len(), lines.colors().len());
            prop_assert_eq!(lines.len(), config.vertex_count());
        }

        #[test]
        fn grid_is_deterministic(slices in -4i32..16, edge in 0.01f32..10.0, enable_yz: bool) {
            let config = GridConfig { slice_count: slices, edge, enable_xz: true, enable_yz, step: GridStep::Uniform };
            prop_assert_eq!(generate_grid(&config), generate_grid(&config));
        }

        #[test]
        fn enabling_a_plane_adds_vertices(slices in 0i32..16, edge in 0.01f32..10.0, enable_yz: bool) {
            let without = GridConfig { slice_count: slices, edge, enable_xz: false, enable_yz, step: GridStep::Uniform };
            let with = GridConfig { enable_xz: true, ..without };
            prop_assert!(generate_grid(&with).len() > generate_grid(&without).len());
        }

        #[test]
        fn enabling_yz_plane_adds_vertices(slices in 0i32..16, edge in 0.01f32..10.0, enable_xz: bool) {
            let without = GridConfig { slice_count: slices, edge, enable_xz, enable_yz: false, step: GridStep::Uniform };
            let with = GridConfig { enable_yz: true, ..without };
            prop_assert!(generate_grid(&with).len() > generate_grid(&without).len());
        }
    }
}
