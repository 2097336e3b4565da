use std::{env, fs::OpenOptions, path::Path};

use anyhow::Result;
use log::{info, warn};

use term_snake::config::{Config, StorageConfig};
use term_snake::game::{Flow, SnakeGame};

/// Logs go to a file; stderr would scribble over the game screen.
fn init_logging(path: &Path) {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

fn run(game: &mut SnakeGame) -> Result<()> {
    if game.show_intro()? == Flow::Quit {
        return Ok(());
    }

    // The game loop returns once the player quits
    while game.play()? == Flow::PlayAgain {}
    Ok(())
}

fn main() -> Result<()> {
    let loaded = Config::load();
    let log_path = match &loaded {
        Ok(config) => config.storage.log_path.clone(),
        Err(_) => StorageConfig::default().log_path,
    };
    init_logging(&log_path);
    info!("Starting snake...");

    let config = loaded.unwrap_or_else(|e| {
        warn!("{:#}, using defaults", e);
        Config::default()
    });

    let mut game = SnakeGame::new(&config)?;
    game.initialize()?;

    let result = run(&mut game);
    game.shutdown()?;

    info!("Bye");
    result
}
