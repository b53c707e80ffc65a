use std::path::Path;

use serde::Deserialize;

use crate::error::EngineError;

/// Everything the engine reads from `game.toml`. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub input: InputConfig,
    pub audio: AudioConfig,
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            timing: TimingConfig::default(),
            input: InputConfig::default(),
            audio: AudioConfig::default(),
            log_filter: String::from("info"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Top View Template"),
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub target_fps: u32,
    /// Upper bound for a single frame's delta, so a stall (debugger, window
    /// drag) doesn't turn into one huge simulation step.
    pub max_delta_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_delta_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse_relative: bool,
    /// Releasing Escape during gameplay ends the game.
    pub escape_quits: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_relative: true,
            escape_quits: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub events: Vec<SoundEventConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoundEventConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub duration_secs: f32,
    #[serde(default)]
    pub looping: bool,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| EngineError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`EngineConfig::load`], but a missing file means "use defaults".
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.timing.target_fps, 60);
        assert_eq!(config.timing.max_delta_ms, 50);
        assert!(config.input.mouse_relative);
        assert!(config.input.escape_quits);
        assert!(config.audio.events.is_empty());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            log_filter = "debug"

            [window]
            title = "Arena"

            [[audio.events]]
            name = "event:/Music"
            path = "Res/Audio/Music.ogg"
            looping = true
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Arena");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.audio.events.len(), 1);
        assert!(config.audio.events[0].looping);
        assert_eq!(config.audio.events[0].duration_secs, 0.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = EngineConfig::load_or_default("definitely/not/here/game.toml").unwrap();
        assert_eq!(config.window.height, 768);
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(EngineConfig::from_toml_str("[timing]\ntarget_fps = \"fast\"").is_err());
    }
}
