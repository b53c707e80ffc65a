use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("subsystem startup failed: {}", failed.join(", "))]
    Startup { failed: Vec<&'static str> },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown sound event `{0}`")]
    UnknownSoundEvent(String),

    #[error("{kind} `{name}` was never loaded")]
    AssetNotFound { kind: &'static str, name: String },
}
