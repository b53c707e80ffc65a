//! Ownership of live actors across a frame.
//!
//! Frame protocol, in order:
//! 1. update every active actor, with the `updating` flag raised;
//! 2. activate pending actors (world transform first, then append);
//! 3. collect every actor now in [`ActorState::Dead`];
//! 4. destroy the collected actors.
//!
//! Actors spawned during step 1 get their first update next frame, and no
//! actor is removed while a pass is walking the active set.

use crate::actor::{Actor, ActorContext, ActorId, ActorState};
use crate::audio::AudioSystem;
use crate::game::GameStatus;
use crate::input::InputState;
use crate::renderer::{DrawItem, Renderer};

struct Slot {
    id: ActorId,
    actor: Box<dyn Actor>,
}

/// Pending set plus id allocation. Actor callbacks reach it through
/// [`ActorContext`], never the active set.
#[derive(Default)]
pub struct Admission {
    next_id: u64,
    pending: Vec<Slot>,
}

impl Admission {
    fn allocate(&mut self) -> ActorId {
        self.next_id += 1;
        ActorId(self.next_id)
    }

    pub(crate) fn admit(&mut self, actor: Box<dyn Actor>) -> ActorId {
        let id = self.allocate();
        log::debug!("{id} admitted as pending");
        self.pending.push(Slot { id, actor });
        id
    }
}

/// The collaborators an actor may talk to during a pass.
pub struct FrameServices<'a> {
    pub status: &'a mut GameStatus,
    pub audio: &'a mut dyn AudioSystem,
    pub renderer: &'a mut dyn Renderer,
}

#[derive(Default)]
pub struct ActorRegistry {
    active: Vec<Slot>,
    admission: Admission,
    updating: bool,
}

fn context<'a>(services: &'a mut FrameServices<'_>, admission: &'a mut Admission) -> ActorContext<'a> {
    ActorContext {
        status: &mut *services.status,
        audio: &mut *services.audio,
        renderer: &mut *services.renderer,
        admission,
    }
}

fn position(slots: &[Slot], id: ActorId) -> Option<usize> {
    slots.iter().position(|slot| slot.id == id)
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `actor`. While a pass is running it lands in the
    /// pending set, otherwise straight in the active set.
    pub fn add_actor(&mut self, actor: Box<dyn Actor>) -> ActorId {
        if self.updating {
            return self.admission.admit(actor);
        }
        let id = self.admission.allocate();
        log::debug!("{id} admitted as active");
        self.active.push(Slot { id, actor });
        id
    }

    /// Detaches `id` from whichever set holds it (pending first) and hands the
    /// actor back. Order among the remaining actors is not preserved.
    /// Unknown or already-removed ids yield `None`.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Box<dyn Actor>> {
        if let Some(index) = position(&self.admission.pending, id) {
            return Some(self.admission.pending.swap_remove(index).actor);
        }
        if let Some(index) = position(&self.active, id) {
            return Some(self.active.swap_remove(index).actor);
        }
        None
    }

    /// Removes and drops `id`, running its `on_destroy` hook first.
    /// Returns `false` if the actor was not present.
    pub fn destroy_actor(&mut self, id: ActorId) -> bool {
        match self.remove_actor(id) {
            Some(mut actor) => {
                actor.on_destroy();
                drop(actor);
                log::debug!("{id} destroyed");
                true
            }
            None => false,
        }
    }

    pub fn process_input(&mut self, input: &InputState, services: &mut FrameServices<'_>) {
        self.updating = true;
        for slot in &mut self.active {
            let mut ctx = context(services, &mut self.admission);
            slot.actor.process_input(input, &mut ctx);
        }
        self.updating = false;
    }

    pub fn update(&mut self, dt: f32, services: &mut FrameServices<'_>) {
        self.updating = true;
        for slot in &mut self.active {
            let mut ctx = context(services, &mut self.admission);
            slot.actor.update(dt, &mut ctx);
        }
        self.updating = false;

        for mut slot in self.admission.pending.drain(..) {
            slot.actor.compute_world_transform();
            log::debug!("{} activated", slot.id);
            self.active.push(slot);
        }

        let dead: Vec<ActorId> = self
            .active
            .iter()
            .filter(|slot| slot.actor.state() == ActorState::Dead)
            .map(|slot| slot.id)
            .collect();
        for id in dead {
            self.destroy_actor(id);
        }
    }

    /// Destroys every actor, active ones first.
    pub fn clear(&mut self) {
        while let Some(id) = self.active.first().map(|slot| slot.id) {
            self.destroy_actor(id);
        }
        while let Some(id) = self.admission.pending.first().map(|slot| slot.id) {
            self.destroy_actor(id);
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.admission.pending.len()
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    pub fn contains(&self, id: ActorId) -> bool {
        position(&self.active, id).is_some()
    }

    pub fn is_pending(&self, id: ActorId) -> bool {
        position(&self.admission.pending, id).is_some()
    }

    pub fn active_ids(&self) -> Vec<ActorId> {
        self.active.iter().map(|slot| slot.id).collect()
    }

    pub fn pending_ids(&self) -> Vec<ActorId> {
        self.admission.pending.iter().map(|slot| slot.id).collect()
    }

    pub fn get(&self, id: ActorId) -> Option<&dyn Actor> {
        self.active
            .iter()
            .chain(&self.admission.pending)
            .find(|slot| slot.id == id)
            .map(|slot| slot.actor.as_ref())
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut (dyn Actor + 'static)> {
        self.active
            .iter_mut()
            .chain(&mut self.admission.pending)
            .find(|slot| slot.id == id)
            .map(|slot| slot.actor.as_mut())
    }

    /// Appends a draw item for every visible active actor.
    pub fn draw_list<'a>(&'a self, items: &mut Vec<DrawItem<'a>>) {
        for slot in &self.active {
            let base = slot.actor.base();
            if base.state() == ActorState::Dead {
                continue;
            }
            if let Some(appearance) = base.appearance() {
                items.push(DrawItem {
                    mesh: &appearance.mesh,
                    texture: &appearance.texture,
                    world: base.world_transform(),
                });
            }
        }
    }
}
