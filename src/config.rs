// Configuration read from snake.toml. Every section and key is optional;
// anything left out takes the built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::engine::Rules;
use crate::progression::Progression;
use crate::skin::Skin;
use crate::storage::LeaderboardStore;

pub const CONFIG_FILE: &str = "snake.toml";

pub const MAX_FOOD_POINTS: u32 = 1_000;
pub const MAX_POINTS_PER_LEVEL: u32 = 100_000;
pub const MAX_OBSTACLES_PER_LEVEL: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub progression: Progression,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub initial_snake_length: usize,
    pub food_points: u32,
    pub skin: Skin,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { initial_snake_length: 3, food_points: 10, skin: Skin::Classic }
    }
}

/// Where results and logs are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub high_score_path: PathBuf,
    pub leaderboard_path: PathBuf,
    pub leaderboard_size: usize,
    pub log_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            high_score_path: home_file(".snake_game_high_score.json"),
            leaderboard_path: home_file(".snake_game_leaderboard.json"),
            leaderboard_size: LeaderboardStore::DEFAULT_CAPACITY,
            log_path: home_file(".snake_game.log"),
        }
    }
}

/// `name` inside $HOME, or the working directory when HOME is unset.
fn home_file(name: &str) -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(name)
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `snake.toml` from the working directory. No file at all is not
    /// an error and gives the defaults.
    pub fn load() -> Result<Self> {
        if !Path::new(CONFIG_FILE).exists() {
            return Ok(Config::default());
        }
        Self::from_file(CONFIG_FILE)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.progression;

        if self.game.initial_snake_length == 0 {
            bail!("initial_snake_length must be at least 1");
        }
        if self.game.food_points == 0 || self.game.food_points > MAX_FOOD_POINTS {
            bail!("food_points must be between 1 and {}", MAX_FOOD_POINTS);
        }
        if p.points_per_level == 0 || p.points_per_level > MAX_POINTS_PER_LEVEL {
            bail!("points_per_level must be between 1 and {}", MAX_POINTS_PER_LEVEL);
        }
        if p.obstacles_per_level > MAX_OBSTACLES_PER_LEVEL {
            bail!("obstacles_per_level must not exceed {}", MAX_OBSTACLES_PER_LEVEL);
        }
        if p.min_interval_ms == 0 {
            bail!("min_interval_ms must be at least 1");
        }
        if p.min_interval_ms > p.base_interval_ms {
            bail!("min_interval_ms must not exceed base_interval_ms");
        }
        if self.storage.leaderboard_size == 0 {
            bail!("leaderboard_size must be at least 1");
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            initial_length: self.game.initial_snake_length,
            food_points: self.game.food_points,
            progression: self.progression.clone(),
        }
    }
}
