//! Application window and event loop management.

mod input;
mod render;
mod state;

pub(super) use std::sync::Arc;

pub(super) use pollster::FutureExt;
pub(super) use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

pub(super) use vecscope_core::Options;
pub(super) use vecscope_render::{LineBuffer, RenderEngine, ShaderProgram};
pub(super) use vecscope_ui::{EguiIntegration, UiIntent, VectorDraft};

pub use state::{AppState, GeometryUpdates};

use crate::error::{AppError, AppResult};

/// GPU resources of the scene: the line program and the two line buffers.
pub(super) struct SceneGpu {
    pub(super) shader: ShaderProgram,
    pub(super) grid: LineBuffer,
    pub(super) vectors: LineBuffer,
}

/// The vecscope application.
pub struct App {
    // GPU resources go before the engine so they are dropped first
    pub(super) scene: Option<SceneGpu>,
    pub(super) egui: Option<EguiIntegration>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) window: Option<Arc<Window>>,
    pub(super) state: AppState,
    // Values typed into the "new vector" fields
    pub(super) draft: VectorDraft,
    // Intents from the last UI pass, applied at the start of the next frame
    pub(super) pending_intents: Vec<UiIntent>,
    pub(super) fatal_error: Option<AppError>,
}

impl App {
    /// Creates a new application.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            scene: None,
            egui: None,
            engine: None,
            window: None,
            state: AppState::new(options),
            draft: VectorDraft::default(),
            pending_intents: Vec::new(),
            fatal_error: None,
        }
    }

    /// The application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Creates the window, GPU context, line program and line buffers.
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> AppResult<()> {
        let options = &self.state.options;
        let [width, height] = options.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(options.window_title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let engine = RenderEngine::new_windowed(window.clone()).block_on()?;
        let format = engine.color_format();

        let shader = match (&options.vertex_shader, &options.fragment_shader) {
            (Some(vertex), Some(fragment)) => {
                log::info!(
                    "loading shaders {} and {}",
                    vertex.display(),
                    fragment.display()
                );
                ShaderProgram::from_files(&engine.device, format, vertex, fragment)?
            }
            _ => ShaderProgram::builtin(&engine.device, format)?,
        };

        let GeometryUpdates { grid, arrows } = self.state.take_geometry_updates();
        let grid = LineBuffer::new(
            &engine.device,
            &engine.queue,
            "grid",
            &grid.unwrap_or_default(),
        )?;
        let vectors = LineBuffer::new(
            &engine.device,
            &engine.queue,
            "vectors",
            &arrows.unwrap_or_default(),
        )?;

        self.state.camera.set_aspect_ratio(engine.aspect_ratio());
        let egui = EguiIntegration::new(&engine.device, format, &window);
        window.request_redraw();

        self.scene = Some(SceneGpu {
            shader,
            grid,
            vectors,
        });
        self.egui = Some(egui);
        self.engine = Some(engine);
        self.window = Some(window);
        Ok(())
    }

    /// Records a fatal error and stops the event loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.fatal_error = Some(error);
        event_loop.exit();
    }
}

/// Runs the application until the window is closed.
///
/// Returns the error that stopped initialization, if any.
pub fn run_app(options: Options) -> AppResult<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(options);

    event_loop.run_app(&mut app)?;

    if let Some(scene) = &mut app.scene {
        scene.grid.destroy();
        scene.vectors.destroy();
    }
    match app.fatal_error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
