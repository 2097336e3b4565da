use std::collections::HashSet;
use std::time::Duration;

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::Coords;
use crate::grid::Grid;
use crate::occupancy::Occupancy;
use crate::placement::{place_food, place_obstacle};
use crate::progression::Progression;
use crate::skin::Skin;
use crate::snake::{Direction, Snake};
use crate::storage::LeaderboardEntry;

/// Knobs for a run that don't change while it is being played.
#[derive(Debug, Clone)]
pub struct Rules {
    pub initial_length: usize,
    pub food_points: u32,
    pub progression: Progression,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { initial_length: 3, food_points: 10, progression: Progression::default() }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Everything the player can ask for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    TogglePause,
    Restart,
    Quit,
    CycleSkin,
    ShowLeaderboard,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
    Obstacle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already over; nothing moved.
    Idle,
    Moved { ate: bool, level_up: bool },
    Crashed(Collision),
}

/// Read-only view handed to the renderer.
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Coords,
    pub obstacles: &'a HashSet<Coords>,
    pub score: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    pub skin: Skin,
    pub high_score: u32,
    pub leaderboard: &'a [LeaderboardEntry],
}

pub struct GameEngine<R: Rng = StdRng> {
    grid: Grid,
    rules: Rules,
    rng: R,
    snake: Snake,
    food: Coords,
    obstacles: HashSet<Coords>,
    score: u32,
    level: u32,
    tick_interval: Duration,
    phase: Phase,
    pending_direction: Option<Direction>,
    skin: Skin,
}

impl GameEngine<StdRng> {
    pub fn new(grid: Grid, rules: Rules) -> Self {
        GameEngine::with_rng(grid, rules, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(grid: Grid, rules: Rules, rng: R) -> Self {
        let snake = Snake::new(grid.center(), 1, Direction::Right);
        let tick_interval = rules.progression.tick_interval(1);

        let mut engine = GameEngine {
            grid,
            rules,
            rng,
            snake,
            food: grid.center(),
            obstacles: HashSet::new(),
            score: 0,
            level: 1,
            tick_interval,
            phase: Phase::Running,
            pending_direction: None,
            skin: Skin::default(),
        };
        engine.reset();
        engine
    }

    /// Starts a fresh run. The skin survives, everything else is rebuilt.
    pub fn reset(&mut self) {
        let center = self.grid.center();
        // keep the tail off the left wall on narrow grids
        let length = self.rules.initial_length.min(center.1 as usize).max(1);

        self.snake = Snake::new(center, length, Direction::Right);
        self.obstacles.clear();
        self.score = 0;
        self.level = 1;
        self.tick_interval = self.rules.progression.tick_interval(1);
        self.phase = Phase::Running;
        self.pending_direction = None;
        self.food = place_food(
            &mut self.rng,
            &self.grid,
            &Occupancy::new(&self.snake, &self.obstacles, None),
        );

        debug!("new run on {}x{} grid, food at {:?}", self.grid.height(), self.grid.width(), self.food);
    }

    /// Replaces the board with a prepared layout and resumes play. For
    /// setting up a board; score and level are kept as they are.
    pub fn load_layout<I>(&mut self, snake: Snake, food: Coords, obstacles: I)
    where
        I: IntoIterator<Item = Coords>,
    {
        self.snake = snake;
        self.food = food;
        self.obstacles = obstacles.into_iter().collect();
        self.pending_direction = None;
        self.phase = Phase::Running;
    }

    /// Sets the score directly, recomputing level and speed. For setting up
    /// a board: obstacles are left alone, so pair it with `load_layout` when
    /// the level calls for some.
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
        self.level = self.rules.progression.level_for_score(score);
        self.tick_interval = self.rules.progression.tick_interval(self.level);
    }

    /// Applies a command. Returns false when it was ignored. `Quit` and
    /// `ShowLeaderboard` belong to the driver and are always ignored here.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Move(dir) => self.set_direction(dir),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => {
                self.reset();
                true
            }
            Command::CycleSkin => {
                self.skin = self.skin.next();
                true
            }
            Command::Quit | Command::ShowLeaderboard => false,
        }
    }

    /// Buffers a turn for the next tick. Reversal is judged against the
    /// last direction applied on a tick, not the last one requested.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.phase != Phase::Running || requested.is_opposite(self.snake.direction()) {
            return false;
        }

        self.pending_direction = Some(requested);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::GameOver => return false,
        };
        true
    }

    pub fn advance_tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        let direction = self.pending_direction.unwrap_or_else(|| self.snake.direction());
        let new_head = self.snake.next_head(direction);

        if let Some(collision) = self.collision_at(new_head) {
            info!("run over: {:?} at {:?}, score {} level {}", collision, new_head, self.score, self.level);
            self.phase = Phase::GameOver;
            return TickOutcome::Crashed(collision);
        }

        let ate = new_head == self.food;
        self.snake.advance(new_head, direction, ate);
        self.pending_direction = None;

        let mut level_up = false;
        if ate {
            self.score = self.score.saturating_add(self.rules.food_points);
            self.food = place_food(
                &mut self.rng,
                &self.grid,
                &Occupancy::new(&self.snake, &self.obstacles, None),
            );
            level_up = self.update_level();
        }

        TickOutcome::Moved { ate, level_up }
    }

    // The current tail counts as body: moving onto it is a bite even though
    // it would have moved away this tick.
    fn collision_at(&self, pos: Coords) -> Option<Collision> {
        if !self.grid.is_interior(pos) {
            Some(Collision::Wall)
        } else if self.snake.contains(&pos) {
            Some(Collision::SelfBite)
        } else if self.obstacles.contains(&pos) {
            Some(Collision::Obstacle)
        } else {
            None
        }
    }

    fn update_level(&mut self) -> bool {
        let progression = &self.rules.progression;
        let level = progression.level_for_score(self.score);
        if level <= self.level {
            return false;
        }

        let gained = (level - self.level) as usize;
        self.level = level;
        self.tick_interval = progression.tick_interval(level);

        let target = progression.obstacle_target(level);
        let free = self.grid.interior_len()
            .saturating_sub(Occupancy::new(&self.snake, &self.obstacles, Some(self.food)).count());
        let wanted = target
            .saturating_sub(self.obstacles.len())
            .min(gained.saturating_mul(progression.obstacles_per_level))
            .min(free);

        for _ in 0..wanted {
            let occ = Occupancy::new(&self.snake, &self.obstacles, Some(self.food));
            match place_obstacle(&mut self.rng, &self.grid, &occ) {
                Some(pos) => {
                    self.obstacles.insert(pos);
                }
                None => {
                    debug!("no room for another obstacle at level {}", level);
                    break;
                }
            }
        }

        info!("level {} reached, tick {:?}, {} obstacles", level, self.tick_interval, self.obstacles.len());
        true
    }

    pub fn snapshot<'a>(&'a self, high_score: u32, leaderboard: &'a [LeaderboardEntry]) -> Snapshot<'a> {
        Snapshot {
            snake: &self.snake,
            food: self.food,
            obstacles: &self.obstacles,
            score: self.score,
            level: self.level,
            paused: self.phase == Phase::Paused,
            game_over: self.phase == Phase::GameOver,
            skin: self.skin,
            high_score,
            leaderboard,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn obstacles(&self) -> &HashSet<Coords> {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    pub fn set_skin(&mut self, skin: Skin) {
        self.skin = skin;
    }
}
