use super::{
    ActiveEventLoop, App, ApplicationHandler, DeviceEvent, DeviceId, ElementState, KeyCode,
    MouseButton, PhysicalKey, WindowEvent, WindowId,
};

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.fatal_error.is_some() {
            return;
        }

        if let Err(error) = self.init_graphics(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Releases are tracked even when egui consumes them so nothing gets stuck.
        if let WindowEvent::MouseInput {
            state: ElementState::Released,
            button: MouseButton::Right,
            ..
        } = &event
        {
            self.state.right_mouse_down = false;
        }

        let egui_consumed = if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            egui.handle_event(window, &event)
        } else {
            false
        };
        let egui_wants_keyboard = self.egui.as_ref().is_some_and(|e| e.wants_keyboard());
        let egui_wants_pointer = self.egui.as_ref().is_some_and(|e| e.wants_pointer());

        match event {
            WindowEvent::CloseRequested => {
                self.state.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                    self.state.camera.set_aspect_ratio(engine.aspect_ratio());
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } => {
                if !egui_consumed && !egui_wants_pointer {
                    self.state.right_mouse_down = true;
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if code == KeyCode::Escape {
                                self.state.close_requested = true;
                            } else if !egui_wants_keyboard {
                                self.state.keys_down.insert(code);
                            }
                        }
                        ElementState::Released => {
                            self.state.keys_down.remove(&code);
                        }
                    }
                }
            }
            WindowEvent::Focused(false) => {
                self.state.keys_down.clear();
                self.state.right_mouse_down = false;
            }
            _ => {}
        }

        if self.state.close_requested {
            event_loop.exit();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        // Mouse look reads raw motion while the right button is held.
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.state.right_mouse_down {
                self.state.mouse_delta.x += dx;
                self.state.mouse_delta.y += dy;
            }
        }
    }
}
