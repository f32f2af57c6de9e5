mod game;

use std::path::Path;

use anyhow::{Context, Result};

use skytaie_engine::config::EngineConfig;
use skytaie_engine::logging::{init_logging, LoggingConfig};
use skytaie_engine::window::Runtime;

use game::StudioGame;

/// Optional config file read from the working directory.
const CONFIG_FILE: &str = "skytaie.json";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = if Path::new(CONFIG_FILE).is_file() {
        EngineConfig::from_file(CONFIG_FILE)?
    } else {
        EngineConfig::default()
    };
    log::info!("starting \"{}\" at {}x{}", config.title, config.width, config.height);

    let save_root = std::env::current_dir().context("no working directory")?;
    Runtime::run(config, StudioGame::new(save_root))
}
