use std::fmt;

use glam::{Mat4, Quat, Vec3};

use crate::audio::{AudioSystem, SoundHandle};
use crate::error::EngineError;
use crate::game::{GameState, GameStatus};
use crate::input::InputState;
use crate::registry::Admission;
use crate::renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    Active,
    Paused,
    Dead,
}

/// Registry-assigned identity. Ids are never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub(crate) u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

/// Mesh and texture names the renderer draws this actor with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    pub mesh: String,
    pub texture: String,
}

impl Appearance {
    pub fn new(mesh: impl Into<String>, texture: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            texture: texture.into(),
        }
    }
}

/// State every actor carries: transform, cached world matrix, lifecycle.
#[derive(Debug, Clone)]
pub struct ActorBase {
    transform: Transform,
    world: Mat4,
    recompute_world: bool,
    state: ActorState,
    appearance: Option<Appearance>,
}

impl Default for ActorBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorBase {
    pub fn new() -> Self {
        Self {
            transform: Transform::default(),
            world: Mat4::IDENTITY,
            recompute_world: true,
            state: ActorState::Active,
            appearance: None,
        }
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.recompute_world = true;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
        self.recompute_world = true;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
        self.recompute_world = true;
    }

    pub fn forward(&self) -> Vec3 {
        self.transform.rotation * Vec3::X
    }

    pub fn world_transform(&self) -> Mat4 {
        self.world
    }

    pub fn compute_world_transform(&mut self) {
        if !self.recompute_world {
            return;
        }
        self.recompute_world = false;
        let Transform { position, rotation, scale } = self.transform;
        self.world = Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position);
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn set_state(&mut self, state: ActorState) {
        self.state = state;
    }

    pub fn appearance(&self) -> Option<&Appearance> {
        self.appearance.as_ref()
    }
}

/// Ambient game context handed to actor callbacks.
///
/// Actors never see the registry directly: anything they spawn goes through
/// [`ActorContext::spawn`] into the pending set and is activated at the end of
/// the current update.
pub struct ActorContext<'a> {
    pub(crate) status: &'a mut GameStatus,
    pub(crate) audio: &'a mut dyn AudioSystem,
    pub(crate) renderer: &'a mut dyn Renderer,
    pub(crate) admission: &'a mut Admission,
}

impl ActorContext<'_> {
    pub fn spawn(&mut self, actor: Box<dyn Actor>) -> ActorId {
        self.admission.admit(actor)
    }

    pub fn game_state(&self) -> GameState {
        self.status.state
    }

    pub fn set_game_state(&mut self, state: GameState) {
        self.status.state = state;
    }

    pub fn quit(&mut self) {
        self.status.running = false;
    }

    pub fn play_event(&mut self, name: &str) -> Result<SoundHandle, EngineError> {
        self.audio.play_event(name)
    }

    pub fn audio(&mut self) -> &mut dyn AudioSystem {
        &mut *self.audio
    }

    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }
}

pub trait Actor {
    fn base(&self) -> &ActorBase;

    fn base_mut(&mut self) -> &mut ActorBase;

    /// Actor-specific input handling. Only called while the actor is active.
    fn actor_input(&mut self, _input: &InputState, _ctx: &mut ActorContext<'_>) {}

    /// Actor-specific per-frame logic. Only called while the actor is active.
    fn update_actor(&mut self, _dt: f32, _ctx: &mut ActorContext<'_>) {}

    /// Runs once, right before the registry drops the actor.
    fn on_destroy(&mut self) {}

    fn state(&self) -> ActorState {
        self.base().state()
    }

    fn process_input(&mut self, input: &InputState, ctx: &mut ActorContext<'_>) {
        if self.state() == ActorState::Active {
            self.actor_input(input, ctx);
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut ActorContext<'_>) {
        if self.state() == ActorState::Active {
            self.compute_world_transform();
            self.update_actor(dt, ctx);
            self.compute_world_transform();
        }
    }

    fn compute_world_transform(&mut self) {
        self.base_mut().compute_world_transform();
    }
}
