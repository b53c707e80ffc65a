use anyhow::Context;
use engine::{logger, EngineConfig, Game, Subsystems};

mod actors;
mod scene;

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| String::from("game.toml"));
    let config = EngineConfig::load_or_default(&path).with_context(|| format!("loading {path}"))?;

    // RUST_LOG overrides the configured filter.
    logger::init(&config.log_filter);

    // ---- Create the game (owns window, renderer, audio, input) ----
    let subsystems = Subsystems::desktop(&config);
    let mut game = Game::new(config, subsystems);
    game.run(scene::load)
}
