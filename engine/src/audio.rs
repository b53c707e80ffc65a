use std::collections::HashMap;

use crate::config::{AudioConfig, SoundEventConfig};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(u32);

impl SoundHandle {
    /// For audio backends minting their own handles.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

pub trait AudioSystem {
    fn initialize(&mut self) -> bool;

    fn update(&mut self, dt: f32);

    fn play_event(&mut self, name: &str) -> Result<SoundHandle, EngineError>;

    fn stop(&mut self, handle: SoundHandle);

    fn is_playing(&self, handle: SoundHandle) -> bool;

    fn close(&mut self);
}

#[derive(Debug)]
struct Instance {
    event: String,
    elapsed: f32,
    duration: f32,
    looping: bool,
}

/// Event-bank audio: named events from config, with per-instance playback
/// bookkeeping. One-shots expire after their duration, loops run until
/// stopped. Produces no sound output.
#[derive(Debug, Default)]
pub struct EventAudio {
    bank: HashMap<String, SoundEventConfig>,
    config: AudioConfig,
    instances: HashMap<SoundHandle, Instance>,
    next_id: u32,
}

impl EventAudio {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            config: config.clone(),
            ..Self::default()
        }
    }

    pub fn playing_count(&self) -> usize {
        self.instances.len()
    }
}

impl AudioSystem for EventAudio {
    fn initialize(&mut self) -> bool {
        self.bank.clear();
        for event in &self.config.events {
            if event.name.is_empty() {
                log::error!("sound event with empty name (path {})", event.path);
                return false;
            }
            if self.bank.insert(event.name.clone(), event.clone()).is_some() {
                log::error!("sound event `{}` declared twice", event.name);
                return false;
            }
        }
        log::info!("audio ready with {} events", self.bank.len());
        true
    }

    fn update(&mut self, dt: f32) {
        self.instances.retain(|handle, instance| {
            instance.elapsed += dt;
            let done = !instance.looping && instance.elapsed >= instance.duration;
            if done {
                log::trace!("sound {:?} ({}) finished", handle, instance.event);
            }
            !done
        });
    }

    fn play_event(&mut self, name: &str) -> Result<SoundHandle, EngineError> {
        let event = self
            .bank
            .get(name)
            .ok_or_else(|| EngineError::UnknownSoundEvent(name.to_owned()))?;

        self.next_id += 1;
        let handle = SoundHandle::new(self.next_id);
        self.instances.insert(
            handle,
            Instance {
                event: event.name.clone(),
                elapsed: 0.0,
                duration: event.duration_secs,
                looping: event.looping,
            },
        );
        log::debug!("playing `{name}` as {handle:?}");
        Ok(handle)
    }

    fn stop(&mut self, handle: SoundHandle) {
        if let Some(instance) = self.instances.remove(&handle) {
            log::debug!("stopped `{}`", instance.event);
        }
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.instances.contains_key(&handle)
    }

    fn close(&mut self) {
        self.instances.clear();
        self.bank.clear();
        log::info!("audio closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, duration_secs: f32, looping: bool) -> SoundEventConfig {
        SoundEventConfig {
            name: name.to_owned(),
            path: format!("Res/Audio/{name}.ogg"),
            duration_secs,
            looping,
        }
    }

    #[test]
    fn one_shot_expires_loop_keeps_playing() {
        let mut audio = EventAudio::new(&AudioConfig {
            events: vec![event("event:/Music", 1.0, true), event("event:/Hit", 0.5, false)],
        });
        assert!(audio.initialize());

        let music = audio.play_event("event:/Music").unwrap();
        let hit = audio.play_event("event:/Hit").unwrap();
        assert_ne!(music, hit);

        audio.update(0.25);
        assert!(audio.is_playing(hit));
        audio.update(0.25);
        assert!(!audio.is_playing(hit));

        audio.update(10.0);
        assert!(audio.is_playing(music));
        audio.stop(music);
        assert_eq!(audio.playing_count(), 0);
    }

    #[test]
    fn unknown_event_is_an_error() {
        let mut audio = EventAudio::new(&AudioConfig::default());
        assert!(audio.initialize());
        assert!(matches!(
            audio.play_event("event:/Nope"),
            Err(EngineError::UnknownSoundEvent(name)) if name == "event:/Nope"
        ));
    }

    #[test]
    fn duplicate_event_names_fail_initialization() {
        let mut audio = EventAudio::new(&AudioConfig {
            events: vec![event("event:/Music", 1.0, true), event("event:/Music", 2.0, false)],
        });
        assert!(!audio.initialize());
    }
}
