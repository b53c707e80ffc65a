use winit::keyboard::KeyCode;

use crate::actor::{Actor, ActorId};
use crate::assets::Assets;
use crate::audio::{AudioSystem, SoundHandle};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::input::{ButtonState, InputState, InputSystem, PlatformEvent};
use crate::registry::{ActorRegistry, FrameServices};
use crate::renderer::Renderer;
use crate::timer::Timer;
use crate::window::Window;

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    NotStarted,
    Running,
    ShuttingDown,
}

/// What the game is doing right now. Actors only receive input and updates
/// during [`GameState::Gameplay`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Gameplay,
    Paused,
}

/// Ambient state shared with actors through their context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub state: GameState,
    pub running: bool,
}

/// The four collaborators the game drives, in acquisition order.
pub struct Subsystems {
    pub window: Box<dyn Window>,
    pub renderer: Box<dyn Renderer>,
    pub audio: Box<dyn AudioSystem>,
    pub input: Box<dyn InputSystem>,
}

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
impl Subsystems {
    /// winit window, scene renderer, event-bank audio, keyboard/mouse input.
    pub fn desktop(config: &EngineConfig) -> Self {
        Self {
            window: Box::new(crate::window::WinitWindow::new(&config.window)),
            renderer: Box::new(crate::renderer::SceneRenderer::new()),
            audio: Box::new(crate::audio::EventAudio::new(&config.audio)),
            input: Box::new(crate::input::DeviceInput::new()),
        }
    }
}

pub struct Game {
    config: EngineConfig,
    window: Box<dyn Window>,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSystem>,
    input: Box<dyn InputSystem>,
    assets: Assets,
    actors: ActorRegistry,
    status: GameStatus,
    phase: LoopPhase,
    music: Option<SoundHandle>,
    events: Vec<PlatformEvent>,
    frame_count: u64,
}

impl Game {
    pub fn new(config: EngineConfig, subsystems: Subsystems) -> Self {
        let Subsystems {
            window,
            renderer,
            audio,
            input,
        } = subsystems;
        Self {
            config,
            window,
            renderer,
            audio,
            input,
            assets: Assets::new(),
            actors: ActorRegistry::new(),
            status: GameStatus::default(),
            phase: LoopPhase::NotStarted,
            music: None,
            events: Vec::new(),
            frame_count: 0,
        }
    }

    /// Brings up window, renderer, audio and input. All four are attempted
    /// even when an earlier one fails, so every failure gets reported.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.phase != LoopPhase::NotStarted {
            log::warn!("initialize called in phase {:?}", self.phase);
            return Ok(());
        }

        let window_ok = self.window.initialize();
        let renderer_ok = self.renderer.initialize(self.window.as_ref());
        let audio_ok = self.audio.initialize();
        let input_ok = self.input.initialize();

        let failed: Vec<&'static str> = [
            ("window", window_ok),
            ("renderer", renderer_ok),
            ("audio", audio_ok),
            ("input", input_ok),
        ]
        .into_iter()
        .filter_map(|(name, ok)| (!ok).then_some(name))
        .collect();

        if !failed.is_empty() {
            log::error!("startup failed: {}", failed.join(", "));
            return Err(EngineError::Startup { failed });
        }

        self.phase = LoopPhase::Running;
        self.status.running = true;
        log::info!("game initialized");
        Ok(())
    }

    pub fn process_input(&mut self) {
        self.input.pre_update();

        let mut events = std::mem::take(&mut self.events);
        self.window.poll_events(&mut events);
        for event in events.drain(..) {
            if !self.input.process_event(&event) {
                self.status.running = false;
            }
        }
        self.events = events;

        self.input.update();

        if self.status.state == GameState::Gameplay {
            let input = self.input.input_state();
            if self.config.input.escape_quits && input.keyboard.key_state(KeyCode::Escape) == ButtonState::Released {
                log::info!("escape released, quitting");
                self.status.running = false;
            }

            let mut services = FrameServices {
                status: &mut self.status,
                audio: self.audio.as_mut(),
                renderer: self.renderer.as_mut(),
            };
            self.actors.process_input(input, &mut services);
        }

        self.observe_quit();
    }

    pub fn update(&mut self, dt: f32) {
        self.audio.update(dt);

        if self.status.state == GameState::Gameplay {
            let mut services = FrameServices {
                status: &mut self.status,
                audio: self.audio.as_mut(),
                renderer: self.renderer.as_mut(),
            };
            self.actors.update(dt, &mut services);
        }

        self.observe_quit();
    }

    pub fn render(&mut self) {
        let mut items = Vec::with_capacity(self.actors.len());
        self.actors.draw_list(&mut items);

        self.renderer.begin_draw();
        self.renderer.draw(&items);
        self.renderer.end_draw();
    }

    /// Runs frames until a quit is observed: delta, input, update, render, pace.
    pub fn run_loop(&mut self) {
        if self.phase != LoopPhase::Running {
            log::warn!("run_loop called in phase {:?}", self.phase);
            return;
        }

        let mut timer = Timer::new(&self.config.timing);
        while self.status.running {
            let dt = timer.compute_delta_time().as_secs_f32();
            self.process_input();
            self.update(dt);
            self.render();
            self.frame_count += 1;
            timer.delay_time();
        }
        self.observe_quit();
        log::info!("left the game loop after {} frames", self.frame_count);
    }

    /// Destroys every remaining actor and releases cached resources.
    pub fn unload(&mut self) {
        self.actors.clear();
        if let Some(music) = self.music.take() {
            self.audio.stop(music);
        }
        self.assets.clear();
    }

    /// Closes the subsystems in reverse acquisition order.
    pub fn close(&mut self) {
        self.input.close();
        self.audio.close();
        self.renderer.close();
        self.window.close();
        if self.phase == LoopPhase::Running {
            self.phase = LoopPhase::ShuttingDown;
        }
        log::info!("game closed");
    }

    /// Full lifecycle: initialize, then load/loop/unload if startup worked,
    /// then close regardless.
    pub fn run<F>(&mut self, load: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Game) -> anyhow::Result<()>,
    {
        let result = match self.initialize() {
            Ok(()) => {
                let loaded = load(self);
                match &loaded {
                    Ok(()) => self.run_loop(),
                    Err(err) => {
                        log::error!("scene load failed: {err:#}");
                        self.quit();
                    }
                }
                self.unload();
                loaded
            }
            Err(err) => Err(err.into()),
        };
        self.close();
        result
    }

    pub fn quit(&mut self) {
        self.status.running = false;
        self.observe_quit();
    }

    fn observe_quit(&mut self) {
        if !self.status.running && self.phase == LoopPhase::Running {
            self.phase = LoopPhase::ShuttingDown;
            log::info!("shutting down");
        }
    }

    pub fn add_actor(&mut self, actor: Box<dyn Actor>) -> ActorId {
        self.actors.add_actor(actor)
    }

    pub fn destroy_actor(&mut self, id: ActorId) -> bool {
        self.actors.destroy_actor(id)
    }

    /// Starts the background music event, replacing any previous one.
    pub fn play_music(&mut self, event: &str) -> Result<SoundHandle, EngineError> {
        let handle = self.audio.play_event(event)?;
        if let Some(previous) = self.music.replace(handle) {
            self.audio.stop(previous);
        }
        Ok(handle)
    }

    pub fn set_mouse_relative_mode(&mut self, relative: bool) {
        self.input.set_mouse_relative_mode(relative);
        self.window.set_cursor_captured(relative);
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn state(&self) -> GameState {
        self.status.state
    }

    pub fn set_state(&mut self, state: GameState) {
        self.status.state = state;
    }

    pub fn is_running(&self) -> bool {
        self.status.running
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn music(&self) -> Option<SoundHandle> {
        self.music
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn actors(&self) -> &ActorRegistry {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut ActorRegistry {
        &mut self.actors
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut Assets {
        &mut self.assets
    }

    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    pub fn audio_mut(&mut self) -> &mut dyn AudioSystem {
        self.audio.as_mut()
    }

    pub fn input_state(&self) -> &InputState {
        self.input.input_state()
    }

    pub fn window(&self) -> &dyn Window {
        self.window.as_ref()
    }
}
