use crate::input::PlatformEvent;

pub trait Window {
    fn initialize(&mut self) -> bool;

    /// Drains every platform event that arrived since the last call.
    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>);

    /// Drawable size in physical pixels.
    fn size(&self) -> (u32, u32);

    fn set_cursor_captured(&mut self, captured: bool);

    fn close(&mut self);
}

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use desktop::WinitWindow;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod desktop {
    use std::time::Duration;

    use winit::{
        application::ApplicationHandler,
        dpi::LogicalSize,
        event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
        event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
        keyboard::PhysicalKey,
        platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
        window::{CursorGrabMode, Window as WinitHandle, WindowId},
    };

    use super::Window;
    use crate::config::WindowConfig;
    use crate::input::{MouseButton, PlatformEvent};

    /// Collects translated events between pumps and owns the OS window once
    /// the event loop has resumed.
    struct App {
        config: WindowConfig,
        window: Option<WinitHandle>,
        events: Vec<PlatformEvent>,
    }

    impl App {
        fn new(config: WindowConfig) -> Self {
            Self {
                config,
                window: None,
                events: Vec::new(),
            }
        }
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_some() {
                return;
            }

            let win_attr = WinitHandle::default_attributes()
                .with_title(self.config.title.clone())
                .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

            match event_loop.create_window(win_attr) {
                Ok(window) => self.window = Some(window),
                Err(err) => log::error!("failed to create a window: {err}"),
            }
        }

        fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
            let translated = match event {
                WindowEvent::CloseRequested => Some(PlatformEvent::Quit),
                WindowEvent::Resized(size) => Some(PlatformEvent::Resized {
                    width: size.width,
                    height: size.height,
                }),
                WindowEvent::KeyboardInput { event, .. } => match (event.physical_key, event.state) {
                    (PhysicalKey::Code(key), ElementState::Pressed) => Some(PlatformEvent::KeyDown(key)),
                    (PhysicalKey::Code(key), ElementState::Released) => Some(PlatformEvent::KeyUp(key)),
                    _ => None,
                },
                WindowEvent::CursorMoved { position, .. } => Some(PlatformEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                }),
                WindowEvent::MouseInput { state, button, .. } => Some(PlatformEvent::MouseButton {
                    button: translate_button(button),
                    pressed: state == ElementState::Pressed,
                }),
                WindowEvent::MouseWheel { delta, .. } => Some(match delta {
                    MouseScrollDelta::LineDelta(dx, dy) => PlatformEvent::MouseWheel { dx, dy },
                    MouseScrollDelta::PixelDelta(pos) => PlatformEvent::MouseWheel {
                        dx: pos.x as f32,
                        dy: pos.y as f32,
                    },
                }),
                _ => None,
            };
            self.events.extend(translated);
        }

        fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
            if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
                self.events.push(PlatformEvent::MouseMotion {
                    dx: dx as f32,
                    dy: dy as f32,
                });
            }
        }
    }

    fn translate_button(button: winit::event::MouseButton) -> MouseButton {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            winit::event::MouseButton::Back => MouseButton::Other(3),
            winit::event::MouseButton::Forward => MouseButton::Other(4),
            winit::event::MouseButton::Other(id) => MouseButton::Other(id),
        }
    }

    /// Desktop window driven by pumping the winit event loop once per frame,
    /// so the game keeps ownership of its own loop.
    pub struct WinitWindow {
        event_loop: Option<EventLoop<()>>,
        app: App,
    }

    impl WinitWindow {
        pub fn new(config: &WindowConfig) -> Self {
            Self {
                event_loop: None,
                app: App::new(config.clone()),
            }
        }

        fn pump(&mut self, timeout: Option<Duration>) {
            let Some(event_loop) = self.event_loop.as_mut() else {
                return;
            };
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(timeout, &mut self.app) {
                log::info!("event loop exited with code {code}");
                self.app.events.push(PlatformEvent::Quit);
            }
        }
    }

    impl Window for WinitWindow {
        fn initialize(&mut self) -> bool {
            let event_loop = match EventLoop::new() {
                Ok(event_loop) => event_loop,
                Err(err) => {
                    log::error!("failed to create the event loop: {err}");
                    return false;
                }
            };
            event_loop.set_control_flow(ControlFlow::Poll);
            self.event_loop = Some(event_loop);

            // The window is created from `resumed`, which fires on the first pump.
            self.pump(Some(Duration::ZERO));

            match &self.app.window {
                Some(window) => {
                    log::info!("window `{}` opened at {:?}", self.app.config.title, window.inner_size());
                    true
                }
                None => false,
            }
        }

        fn poll_events(&mut self, events: &mut Vec<PlatformEvent>) {
            self.pump(Some(Duration::ZERO));
            events.append(&mut self.app.events);
        }

        fn size(&self) -> (u32, u32) {
            self.app
                .window
                .as_ref()
                .map(|window| {
                    let size = window.inner_size();
                    (size.width, size.height)
                })
                .unwrap_or((0, 0))
        }

        fn set_cursor_captured(&mut self, captured: bool) {
            let Some(window) = &self.app.window else {
                return;
            };
            let grab = if captured {
                window
                    .set_cursor_grab(CursorGrabMode::Confined)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
            } else {
                window.set_cursor_grab(CursorGrabMode::None)
            };
            if let Err(err) = grab {
                log::warn!("cursor grab unsupported: {err}");
            }
            window.set_cursor_visible(!captured);
        }

        fn close(&mut self) {
            self.app.window = None;
            self.app.events.clear();
            self.event_loop = None;
            log::info!("window closed");
        }
    }
}
