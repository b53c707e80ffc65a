use std::collections::HashSet;

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Platform events, already translated out of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    Quit,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Absolute cursor position in window pixels.
    CursorMoved { x: f32, y: f32 },
    /// Raw relative motion, independent of the cursor.
    MouseMotion { dx: f32, dy: f32 },
    MouseButton { button: MouseButton, pressed: bool },
    MouseWheel { dx: f32, dy: f32 },
    Resized { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Edge-aware button state, derived from the previous and current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    None,
    Pressed,
    Released,
    Held,
}

impl ButtonState {
    fn from_frames(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, false) => ButtonState::None,
            (false, true) => ButtonState::Pressed,
            (true, false) => ButtonState::Released,
            (true, true) => ButtonState::Held,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    current: HashSet<KeyCode>,
    previous: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn key_value(&self, key: KeyCode) -> bool {
        self.current.contains(&key)
    }

    pub fn key_state(&self, key: KeyCode) -> ButtonState {
        ButtonState::from_frames(self.previous.contains(&key), self.current.contains(&key))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    scroll: Vec2,
    relative: bool,
    current: HashSet<MouseButton>,
    previous: HashSet<MouseButton>,
}

impl MouseState {
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Motion accumulated this frame. Only populated in relative mode.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    pub fn scroll_wheel(&self) -> Vec2 {
        self.scroll
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn button_value(&self, button: MouseButton) -> bool {
        self.current.contains(&button)
    }

    pub fn button_state(&self, button: MouseButton) -> ButtonState {
        ButtonState::from_frames(self.previous.contains(&button), self.current.contains(&button))
    }
}

/// Snapshot handed to every actor during the input pass.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

pub trait InputSystem {
    fn initialize(&mut self) -> bool;

    /// Rolls the current frame over into the previous one.
    fn pre_update(&mut self);

    /// Feeds one platform event. Returns `false` when the game should stop.
    fn process_event(&mut self, event: &PlatformEvent) -> bool;

    fn update(&mut self);

    fn input_state(&self) -> &InputState;

    fn set_mouse_relative_mode(&mut self, relative: bool);

    fn close(&mut self);
}

/// Keyboard + mouse input assembled from [`PlatformEvent`]s.
#[derive(Debug, Default)]
pub struct DeviceInput {
    state: InputState,
}

impl DeviceInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSystem for DeviceInput {
    fn initialize(&mut self) -> bool {
        self.state = InputState::default();
        log::info!("input system ready");
        true
    }

    fn pre_update(&mut self) {
        let keyboard = &mut self.state.keyboard;
        keyboard.previous.clone_from(&keyboard.current);

        let mouse = &mut self.state.mouse;
        mouse.previous.clone_from(&mouse.current);
        mouse.delta = Vec2::ZERO;
        mouse.scroll = Vec2::ZERO;
    }

    fn process_event(&mut self, event: &PlatformEvent) -> bool {
        match *event {
            PlatformEvent::Quit => return false,
            PlatformEvent::KeyDown(key) => {
                self.state.keyboard.current.insert(key);
            }
            PlatformEvent::KeyUp(key) => {
                self.state.keyboard.current.remove(&key);
            }
            PlatformEvent::CursorMoved { x, y } => {
                self.state.mouse.position = Vec2::new(x, y);
            }
            PlatformEvent::MouseMotion { dx, dy } => {
                if self.state.mouse.relative {
                    self.state.mouse.delta += Vec2::new(dx, dy);
                }
            }
            PlatformEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.state.mouse.current.insert(button);
                } else {
                    self.state.mouse.current.remove(&button);
                }
            }
            PlatformEvent::MouseWheel { dx, dy } => {
                self.state.mouse.scroll += Vec2::new(dx, dy);
            }
            PlatformEvent::Resized { .. } => {}
        }
        true
    }

    fn update(&mut self) {}

    fn input_state(&self) -> &InputState {
        &self.state
    }

    fn set_mouse_relative_mode(&mut self, relative: bool) {
        self.state.mouse.relative = relative;
        self.state.mouse.delta = Vec2::ZERO;
    }

    fn close(&mut self) {
        log::info!("input system closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(input: &mut DeviceInput, events: &[PlatformEvent]) -> bool {
        input.pre_update();
        let mut running = true;
        for event in events {
            running &= input.process_event(event);
        }
        input.update();
        running
    }

    #[test]
    fn key_goes_through_pressed_held_released_none() {
        let mut input = DeviceInput::new();
        assert!(input.initialize());

        frame(&mut input, &[PlatformEvent::KeyDown(KeyCode::Escape)]);
        assert_eq!(input.input_state().keyboard.key_state(KeyCode::Escape), ButtonState::Pressed);

        frame(&mut input, &[]);
        assert_eq!(input.input_state().keyboard.key_state(KeyCode::Escape), ButtonState::Held);

        frame(&mut input, &[PlatformEvent::KeyUp(KeyCode::Escape)]);
        assert_eq!(input.input_state().keyboard.key_state(KeyCode::Escape), ButtonState::Released);

        frame(&mut input, &[]);
        assert_eq!(input.input_state().keyboard.key_state(KeyCode::Escape), ButtonState::None);
    }

    #[test]
    fn quit_event_stops_running() {
        let mut input = DeviceInput::new();
        input.initialize();
        assert!(!frame(&mut input, &[PlatformEvent::KeyDown(KeyCode::KeyW), PlatformEvent::Quit]));
    }

    #[test]
    fn relative_motion_accumulates_and_resets_each_frame() {
        let mut input = DeviceInput::new();
        input.initialize();

        frame(&mut input, &[PlatformEvent::MouseMotion { dx: 3.0, dy: 1.0 }]);
        assert_eq!(input.input_state().mouse.delta(), Vec2::ZERO);

        input.set_mouse_relative_mode(true);
        frame(
            &mut input,
            &[
                PlatformEvent::MouseMotion { dx: 3.0, dy: 1.0 },
                PlatformEvent::MouseMotion { dx: -1.0, dy: 2.0 },
            ],
        );
        assert_eq!(input.input_state().mouse.delta(), Vec2::new(2.0, 3.0));

        frame(&mut input, &[]);
        assert_eq!(input.input_state().mouse.delta(), Vec2::ZERO);
    }

    #[test]
    fn mouse_buttons_track_edges() {
        let mut input = DeviceInput::new();
        input.initialize();

        let press = PlatformEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        };
        frame(&mut input, &[press, PlatformEvent::CursorMoved { x: 10.0, y: 20.0 }]);
        let mouse = &input.input_state().mouse;
        assert_eq!(mouse.button_state(MouseButton::Left), ButtonState::Pressed);
        assert_eq!(mouse.position(), Vec2::new(10.0, 20.0));
        assert!(!mouse.button_value(MouseButton::Right));
    }
}
