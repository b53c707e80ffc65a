pub mod actor;
pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logger;
pub mod registry;
pub mod renderer;
pub mod timer;
pub mod window;

pub use actor::{Actor, ActorBase, ActorContext, ActorId, ActorState, Appearance, Transform};
pub use assets::Assets;
pub use audio::{AudioSystem, EventAudio, SoundHandle};
pub use config::EngineConfig;
pub use error::EngineError;
pub use game::{Game, GameState, GameStatus, LoopPhase, Subsystems};
pub use input::{ButtonState, DeviceInput, InputState, InputSystem, MouseButton, PlatformEvent};
pub use registry::{ActorRegistry, FrameServices};
pub use renderer::{DirectionalLight, DrawItem, Renderer, SceneRenderer};
pub use timer::Timer;
pub use window::Window;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use window::WinitWindow;

pub use winit::keyboard::KeyCode;
