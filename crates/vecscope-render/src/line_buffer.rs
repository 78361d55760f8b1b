//! GPU-resident line geometry.
//!
//! A [`LineBuffer`] owns one vertex buffer for positions and one for colors.
//! [`LineBuffer::vertex_layouts`] describes how the pair binds to a pipeline.
//! Updates are always full re-uploads; callers gate them on a dirty flag.

use vecscope_core::LineSet;

use crate::error::{RenderError, RenderResult};

/// Bytes per vertex attribute (`vec3<f32>`).
pub const VERTEX_STRIDE: wgpu::BufferAddress = 12;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

struct GpuLines {
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
}

impl GpuLines {
    fn release(self) {
        self.positions.destroy();
        self.colors.destroy();
    }
}

/// A pair of vertex buffers holding a [`LineSet`], drawn as a line list.
pub struct LineBuffer {
    label: String,
    gpu: Option<GpuLines>,
    /// Vertices the current allocation can hold.
    capacity: u32,
    /// Vertices uploaded by the last `new`/`replace`.
    vertex_count: u32,
    line_width_hint: f32,
    released: bool,
}

impl LineBuffer {
    /// Uploads `initial` into freshly allocated vertex buffers.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: impl Into<String>,
        initial: &LineSet,
    ) -> RenderResult<Self> {
        let mut buffer = Self {
            label: label.into(),
            gpu: None,
            capacity: 0,
            vertex_count: 0,
            line_width_hint: 1.0,
            released: false,
        };
        buffer.replace(device, queue, initial)?;
        Ok(buffer)
    }

    /// Vertex buffer layouts: positions at slot 0, colors at slot 1.
    #[must_use]
    pub fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
        [
            wgpu::VertexBufferLayout {
                array_stride: VERTEX_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: VERTEX_STRIDE,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &COLOR_ATTRIBUTES,
            },
        ]
    }

    /// Replaces the whole contents with `data`.
    ///
    /// The existing allocation is reused when `data` fits; otherwise it is
    /// released and a larger one is made. If allocation fails, including when
    /// `data` exceeds the device's buffer size limit, the buffer is left empty
    /// and draws nothing until a later `replace` succeeds.
    pub fn replace(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &LineSet,
    ) -> RenderResult<()> {
        if self.released {
            return Err(RenderError::BufferReleased(self.label.clone()));
        }

        let count = u32::try_from(data.len()).map_err(|_| {
            RenderError::BufferAllocationFailed(format!(
                "{} vertices do not fit a draw call",
                data.len()
            ))
        })?;

        if self.gpu.is_none() || count > self.capacity {
            if let Some(old) = self.gpu.take() {
                old.release();
            }
            self.capacity = 0;
            self.vertex_count = 0;

            let max_bytes = device.limits().max_buffer_size;
            let capacity = fit_capacity(count, max_bytes).ok_or_else(|| {
                let error = RenderError::BufferAllocationFailed(format!(
                    "{count} vertices exceed the device buffer limit of {max_bytes} bytes"
                ));
                log::error!("line buffer '{}': {error}", self.label);
                error
            })?;

            let gpu = allocate(device, &self.label, capacity).inspect_err(|e| {
                log::error!("line buffer '{}': {e}", self.label);
            })?;
            log::debug!(
                "line buffer '{}' allocated for {capacity} vertices",
                self.label
            );
            self.gpu = Some(gpu);
            self.capacity = capacity;
        }

        if let Some(gpu) = &self.gpu {
            if !data.is_empty() {
                queue.write_buffer(&gpu.positions, 0, bytemuck::cast_slice(data.positions()));
                queue.write_buffer(&gpu.colors, 0, bytemuck::cast_slice(data.colors()));
            }
        }
        self.vertex_count = count;
        Ok(())
    }

    /// Draws the uploaded vertices as a line list and returns how many were drawn.
    ///
    /// The caller must have set a pipeline built with [`Self::vertex_layouts`].
    /// wgpu rasterizes lines one pixel wide, so `line_width_hint` is only
    /// recorded (clamped to at least 1). An empty or released buffer draws nothing.
    pub fn draw(&mut self, pass: &mut wgpu::RenderPass<'_>, line_width_hint: f32) -> u32 {
        self.line_width_hint = line_width_hint.max(1.0);

        let Some(gpu) = &self.gpu else {
            return 0;
        };
        if self.vertex_count == 0 {
            return 0;
        }

        let bytes = wgpu::BufferAddress::from(self.vertex_count) * VERTEX_STRIDE;
        pass.set_vertex_buffer(0, gpu.positions.slice(..bytes));
        pass.set_vertex_buffer(1, gpu.colors.slice(..bytes));
        pass.draw(0..self.vertex_count, 0..1);
        self.vertex_count
    }

    /// Releases the GPU buffers. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.released {
            return;
        }
        if let Some(gpu) = self.gpu.take() {
            gpu.release();
            log::debug!("line buffer '{}' released", self.label);
        }
        self.released = true;
        self.capacity = 0;
        self.vertex_count = 0;
    }

    /// Number of vertices the next draw will issue.
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Vertices the current allocation can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// The width hint passed to the last draw.
    #[must_use]
    pub fn line_width_hint(&self) -> f32 {
        self.line_width_hint
    }

    /// Returns true if the buffer has been destroyed.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Returns true if the buffer currently holds a GPU allocation.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.gpu.is_some()
    }
}

impl Drop for LineBuffer {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Picks the allocation size for `count` vertices.
///
/// Rounds up to a power of two when that still fits `max_bytes`, falls back
/// to the exact count otherwise, and returns `None` if even that is too big.
fn fit_capacity(count: u32, max_bytes: wgpu::BufferAddress) -> Option<u32> {
    let fits = |vertices: u32| wgpu::BufferAddress::from(vertices) * VERTEX_STRIDE <= max_bytes;
    let count = count.max(1);
    count
        .checked_next_power_of_two()
        .filter(|&rounded| fits(rounded))
        .or_else(|| fits(count).then_some(count))
}

fn buffer_descriptor(label: &str, size: wgpu::BufferAddress) -> wgpu::BufferDescriptor<'_> {
    wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }
}

fn allocate(device: &wgpu::Device, label: &str, capacity: u32) -> RenderResult<GpuLines> {
    let size = wgpu::BufferAddress::from(capacity) * VERTEX_STRIDE;
    let positions_label = format!("{label} positions");
    let colors_label = format!("{label} colors");

    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let positions = device.create_buffer(&buffer_descriptor(&positions_label, size));
    let colors = device.create_buffer(&buffer_descriptor(&colors_label, size));
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());

    if let Some(error) = validation.or(out_of_memory) {
        positions.destroy();
        colors.destroy();
        return Err(RenderError::BufferAllocationFailed(error.to_string()));
    }

    Ok(GpuLines { positions, colors })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_match_shader_locations() {
        let [positions, colors] = LineBuffer::vertex_layouts();
        assert_eq!(positions.array_stride, 12);
        assert_eq!(positions.attributes[0].shader_location, 0);
        assert_eq!(positions.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(colors.attributes[0].shader_location, 1);
        assert_eq!(colors.attributes[0].offset, 0);
    }

    #[test]
    fn test_capacity_rounds_up_when_it_fits() {
        assert_eq!(fit_capacity(0, 1024), Some(1));
        assert_eq!(fit_capacity(5, 1024), Some(8));
        assert_eq!(fit_capacity(64, 1024), Some(64));
    }

    #[test]
    fn test_capacity_falls_back_to_exact_count() {
        // 70 vertices need 840 bytes; 128 would need 1536
        assert_eq!(fit_capacity(70, 1024), Some(70));
        // a large grid with the XZ plane under the default 256 MiB limit
        assert_eq!(fit_capacity(17_669_410, 1 << 28), Some(17_669_410));
    }

    #[test]
    fn test_capacity_over_limit_is_rejected() {
        assert_eq!(fit_capacity(86, 1024), None);
        assert_eq!(fit_capacity(u32::MAX, 1 << 28), None);
    }

    #[test]
    fn test_stride_matches_vec3() {
        assert_eq!(VERTEX_STRIDE as usize, std::mem::size_of::<glam::Vec3>());
    }
}
