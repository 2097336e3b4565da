use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::{bail, Result};
use log::{info, warn};

use crate::config::Config;
use crate::engine::{Command, GameEngine, Phase, TickOutcome};
use crate::grid::{Grid, MIN_GRID_SIDE};
use crate::input::command_for;
use crate::storage::{LeaderboardEntry, LeaderboardStore, ScoreStore};
use crate::term::TermManager;

const POLL_INTERVAL_MS: u64 = 5;

/// What the player chose once a run is over.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    PlayAgain,
    Quit,
}

/// The terminal front end: feeds keys into the engine, ticks it on time,
/// draws snapshots and records finished runs.
pub struct SnakeGame {
    term: TermManager,
    engine: GameEngine,
    grid: Grid,
    score_store: ScoreStore,
    high_score: u32,
    leaderboard: LeaderboardStore,
}

impl SnakeGame {
    pub fn new(config: &Config) -> Result<Self> {
        let term = TermManager::new()?;

        let (height, width) = term.field_size();
        if height < MIN_GRID_SIDE || width < MIN_GRID_SIDE {
            let (w, h) = term.get_terminal_size();
            bail!("terminal too small ({}x{}), the playfield needs at least {}x{}", w, h, MIN_GRID_SIDE, MIN_GRID_SIDE);
        }
        let grid = Grid::new(height, width);

        let mut engine = GameEngine::new(grid, config.rules());
        engine.set_skin(config.game.skin);

        let score_store = ScoreStore::new(&config.storage.high_score_path);
        let high_score = score_store.load();
        let leaderboard = LeaderboardStore::open(&config.storage.leaderboard_path, config.storage.leaderboard_size);

        info!("field {}x{}, high score {}, {} leaderboard entries", height, width, high_score, leaderboard.entries().len());

        Ok(SnakeGame { term, engine, grid, score_store, high_score, leaderboard })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    pub fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "Arrow keys or WASD to move",
            "P or Esc to pause, K to change skin",
            "L for the leaderboard, Q to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        let key = self.term.read_key_blocking()?;
        if command_for(&key) == Some(Command::Quit) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::PlayAgain)
    }

    /// Plays one run to the end. Returns when the player quits or asks for
    /// another run after a game over.
    pub fn play(&mut self) -> Result<Flow> {
        self.engine.reset();
        self.term.clear()?;
        self.term.draw_layout(&self.grid)?;
        self.render()?;

        let mut last_tick = Instant::now();

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                let command = match command_for(&key_ev) {
                    Some(command) => command,
                    None => continue,
                };

                match command {
                    Command::Quit => return Ok(Flow::Quit),
                    Command::ShowLeaderboard => self.show_leaderboard()?,
                    Command::TogglePause => {
                        self.engine.handle(command);
                        self.update_pause_message()?;
                    }
                    Command::Restart => {
                        self.engine.handle(command);
                        self.term.hide_message()?;
                        last_tick = Instant::now();
                    }
                    _ => {
                        self.engine.handle(command);
                    }
                }

                if !self.term.has_message() {
                    self.render()?;
                }
            }

            if self.engine.phase() != Phase::Running || last_tick.elapsed() < self.engine.tick_interval() {
                continue;
            }
            last_tick = Instant::now();

            match self.engine.advance_tick() {
                TickOutcome::Crashed(_) => {
                    self.render()?;
                    self.finish_run();
                    return self.game_over();
                }
                TickOutcome::Moved { .. } => self.render()?,
                TickOutcome::Idle => {}
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn render(&mut self) -> Result<()> {
        let snap = self.engine.snapshot(self.high_score, self.leaderboard.entries());
        self.term.draw_frame(&self.grid, &snap)?;
        Ok(())
    }

    /// Saves the high score and leaderboard. Write failures only get logged.
    fn finish_run(&mut self) {
        let (score, level) = (self.engine.score(), self.engine.level());

        if score > self.high_score {
            self.high_score = score;
            if let Err(e) = self.score_store.save(score) {
                warn!("could not save high score: {:#}", e);
            }
        }

        if let Err(e) = self.leaderboard.record(score, level) {
            warn!("could not save leaderboard: {:#}", e);
        }
    }

    fn game_over(&mut self) -> Result<Flow> {
        let score_line = format!("Score: {}  Level: {}", self.engine.score(), self.engine.level());
        let high_line = format!("High score: {}", self.high_score);

        let lines = [
            "Game over!",
            score_line.as_str(),
            high_line.as_str(),
            "",
            "R to play again, L for the leaderboard",
            "Q to quit"
        ];
        self.term.show_message(&lines)?;

        loop {
            let key = self.term.read_key_blocking()?;
            match command_for(&key) {
                Some(Command::Restart) => return Ok(Flow::PlayAgain),
                Some(Command::Quit) => return Ok(Flow::Quit),
                Some(Command::ShowLeaderboard) => {
                    self.show_leaderboard()?;
                    self.term.show_message(&lines)?;
                }
                _ => {}
            }
        }
    }

    /// Shows the board until any key is pressed. The engine is paused
    /// meanwhile so the snake doesn't run off.
    fn show_leaderboard(&mut self) -> Result<()> {
        let was_running = self.engine.phase() == Phase::Running;
        if was_running {
            self.engine.toggle_pause();
        }

        let lines = leaderboard_lines(self.leaderboard.entries());
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        self.term.show_message(&refs)?;
        self.term.read_key_blocking()?;
        self.term.hide_message()?;

        if self.engine.phase() != Phase::GameOver {
            self.update_pause_message()?;
        }
        Ok(())
    }

    // Frame first: drawing after the overlay would paint over it
    fn update_pause_message(&mut self) -> Result<()> {
        self.term.hide_message()?;
        self.render()?;

        if self.engine.phase() == Phase::Paused {
            self.term.show_message(&["Paused", "Press P or Esc to resume", "or Q to quit"])?;
        }
        Ok(())
    }
}

pub fn leaderboard_lines(entries: &[LeaderboardEntry]) -> Vec<String> {
    let mut lines = vec!["LEADERBOARD".to_string(), String::new()];

    if entries.is_empty() {
        lines.push("No runs recorded yet".to_string());
    }

    for (rank, entry) in entries.iter().enumerate() {
        lines.push(format!("{:>2}. {:>5}  lvl {:>2}  {}", rank + 1, entry.score, entry.level, entry.date));
    }

    lines.push(String::new());
    lines.push("Press any key".to_string());
    lines
}
