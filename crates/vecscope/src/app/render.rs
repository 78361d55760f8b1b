use std::time::Instant;

use egui_wgpu::ScreenDescriptor;
use vecscope_core::Mat4;

use super::{App, GeometryUpdates};
use crate::ui_sync;

impl App {
    /// Renders a single frame.
    pub(super) fn render(&mut self) {
        let Self {
            scene,
            egui,
            engine,
            window,
            state,
            draft,
            pending_intents,
            ..
        } = self;
        let (Some(scene), Some(egui), Some(engine), Some(window)) =
            (scene.as_mut(), egui.as_mut(), engine.as_mut(), window.as_ref())
        else {
            return;
        };

        // Intents collected by the previous frame's UI pass
        ui_sync::apply_intents(state, draft, pending_intents.drain(..));

        let dt = state.tick(Instant::now());
        state.update_camera(dt);

        let Some(surface) = &engine.surface else {
            return;
        };
        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                engine.reconfigure_surface();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of memory acquiring the surface texture");
                state.close_requested = true;
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout");
                return;
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("surface error: other");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let shader = &mut scene.shader;
        shader.set_mat4(&engine.queue, "model", Mat4::IDENTITY);
        shader.set_mat4(&engine.queue, "view", state.camera.view_matrix());
        shader.set_mat4(&engine.queue, "projection", state.camera.projection_matrix());

        let GeometryUpdates { grid, arrows } = state.take_geometry_updates();
        if let Some(grid) = grid {
            if let Err(e) = scene.grid.replace(&engine.device, &engine.queue, &grid) {
                log::error!("failed to upload grid: {e}");
            }
        }

        let mut encoder = engine
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let mut pass =
                engine.begin_scene_pass(&mut encoder, &view, state.options.background_color);
            scene.shader.use_program(&mut pass);
            scene.grid.draw(&mut pass, state.options.grid_line_width);

            if let Some(arrows) = arrows {
                if let Err(e) = scene.vectors.replace(&engine.device, &engine.queue, &arrows) {
                    log::error!("failed to upload vectors: {e}");
                }
            }
            scene.vectors.draw(&mut pass, state.options.vector_line_width);
        }

        let ui_output = egui.run(window, |ctx| {
            vecscope_ui::build_sandbox_panel(ctx, &state.grid, &state.store, draft, pending_intents);
        });

        #[allow(clippy::cast_possible_truncation)]
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [engine.width, engine.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        egui.render(
            &engine.device,
            &engine.queue,
            &mut encoder,
            &view,
            &screen_descriptor,
            ui_output,
        );

        engine.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}
