// Whole-run scenarios driven through the public engine API.

use rand::{rngs::StdRng, Rng, SeedableRng};
use term_snake::engine::{Collision, Command, GameEngine, Phase, Rules, TickOutcome};
use term_snake::grid::Grid;
use term_snake::progression::Progression;
use term_snake::snake::{Direction, Snake};

fn engine_with(rules: Rules, seed: u64) -> GameEngine<StdRng> {
    GameEngine::with_rng(Grid::new(20, 40), rules, StdRng::seed_from_u64(seed))
}

/// Puts the food right in front of the head, keeping everything else.
fn food_ahead(engine: &mut GameEngine<StdRng>) {
    let snake = engine.snake().clone();
    let food = snake.next_head(snake.direction());
    let obstacles: Vec<_> = engine.obstacles().iter().copied().collect();
    engine.load_layout(snake, food, obstacles);
}

#[test]
fn one_tick_moves_the_whole_body() {
    let mut engine = engine_with(Rules::default(), 1);
    engine.load_layout(Snake::new((10, 10), 3, Direction::Right), (1, 1), vec![]);

    let outcome = engine.advance_tick();

    assert_eq!(outcome, TickOutcome::Moved { ate: false, level_up: false });
    assert_eq!(engine.snake().segments(), vec![(10, 11), (10, 10), (10, 9)]);
}

#[test]
fn hitting_the_top_wall_ends_the_run() {
    let mut engine = engine_with(Rules::default(), 2);
    engine.load_layout(Snake::new((1, 10), 3, Direction::Up), (5, 5), vec![]);

    assert_eq!(engine.advance_tick(), TickOutcome::Crashed(Collision::Wall));
    assert_eq!(engine.phase(), Phase::GameOver);
    // frozen as of the crash
    assert_eq!(engine.snake().head(), (1, 10));
    assert!(!engine.set_direction(Direction::Left));
}

#[test]
fn tenth_pickup_reaches_level_three_and_adds_obstacles() {
    let mut engine = engine_with(Rules::default(), 3);
    engine.load_layout(Snake::new((10, 10), 3, Direction::Right), (10, 11), vec![]);

    for pickup in 1..=9 {
        assert_eq!(engine.advance_tick(), TickOutcome::Moved { ate: true, level_up: pickup == 5 });
        food_ahead(&mut engine);
    }

    assert_eq!(engine.score(), 90);
    assert_eq!(engine.level(), 2);
    assert!(engine.obstacles().is_empty());

    assert_eq!(engine.advance_tick(), TickOutcome::Moved { ate: true, level_up: true });
    assert_eq!(engine.score(), 100);
    assert_eq!(engine.level(), 3);
    assert_eq!(engine.obstacles().len(), 2);
    assert_eq!(engine.snake().len(), 13);

    for obstacle in engine.obstacles() {
        assert!(!engine.snake().contains(obstacle));
        assert_ne!(*obstacle, engine.food());
        assert!(engine.grid().is_interior(*obstacle));
    }
}

#[test]
fn level_four_grows_the_obstacles_to_four() {
    let mut engine = engine_with(Rules::default(), 6);
    engine.load_layout(Snake::new((10, 10), 3, Direction::Right), (10, 11), vec![(1, 1), (1, 2)]);
    engine.set_score(140);
    assert_eq!(engine.level(), 3);

    assert_eq!(engine.advance_tick(), TickOutcome::Moved { ate: true, level_up: true });

    assert_eq!(engine.score(), 150);
    assert_eq!(engine.level(), 4);
    assert_eq!(engine.obstacles().len(), 4);
    assert!(engine.obstacles().contains(&(1, 1)));
    assert!(engine.obstacles().contains(&(1, 2)));
    for obstacle in engine.obstacles() {
        assert!(!engine.snake().contains(obstacle));
        assert_ne!(*obstacle, engine.food());
    }
}

#[test]
fn level_up_on_a_full_board_skips_the_obstacles() {
    let rules = Rules {
        progression: Progression { points_per_level: 10, obstacle_start_level: 2, ..Progression::default() },
        ..Rules::default()
    };
    let mut engine = GameEngine::with_rng(Grid::new(5, 5), rules, StdRng::seed_from_u64(7));
    // 3x3 interior: the snake fills seven cells, food takes an eighth
    let snake = Snake::from_segments(
        vec![(3, 2), (3, 1), (2, 1), (2, 2), (2, 3), (1, 3), (1, 2)],
        Direction::Right,
    );
    engine.load_layout(snake, (3, 3), vec![]);

    assert_eq!(engine.advance_tick(), TickOutcome::Moved { ate: true, level_up: true });

    assert_eq!(engine.level(), 2);
    assert_eq!(engine.snake().len(), 8);
    assert_eq!(engine.food(), (1, 1));
    assert!(engine.obstacles().is_empty());
    assert_eq!(engine.phase(), Phase::Running);
}

#[test]
fn restart_after_game_over_starts_clean() {
    let mut engine = engine_with(Rules::default(), 4);
    engine.load_layout(Snake::new((10, 10), 3, Direction::Right), (10, 11), vec![(10, 12), (3, 3)]);
    engine.advance_tick();
    engine.advance_tick();
    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(engine.score(), 10);

    engine.handle(Command::Restart);

    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.snake().len(), 3);
    assert!(engine.obstacles().is_empty());
}

/// Steers toward the food, turning only when it isn't a reversal.
fn chase(engine: &GameEngine<StdRng>, rng: &mut StdRng) -> Direction {
    let (hr, hc) = engine.snake().head();
    let (fr, fc) = engine.food();
    if rng.gen_bool(0.2) {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right][rng.gen_range(0..4)]
    } else if fr < hr {
        Direction::Up
    } else if fr > hr {
        Direction::Down
    } else if fc < hc {
        Direction::Left
    } else {
        Direction::Right
    }
}

#[test]
fn invariants_hold_over_long_play() {
    let rules = Rules {
        progression: Progression { points_per_level: 20, ..Progression::default() },
        ..Rules::default()
    };
    let mut engine = engine_with(rules, 5);
    let mut rng = StdRng::seed_from_u64(99);
    let mut saw_obstacles = false;

    for _ in 0..20_000 {
        if engine.phase() == Phase::GameOver {
            engine.handle(Command::Restart);
        }

        let committed = engine.snake().direction();
        let requested = chase(&engine, &mut rng);
        let accepted = engine.set_direction(requested);
        assert_eq!(accepted, !requested.is_opposite(committed));

        let before = engine.snake().len();
        let score_before = engine.score();

        match engine.advance_tick() {
            TickOutcome::Moved { ate, .. } => {
                let expected = if ate { before + 1 } else { before };
                assert_eq!(engine.snake().len(), expected);
                assert!(engine.score() >= score_before);
            }
            TickOutcome::Crashed(_) => continue,
            TickOutcome::Idle => panic!("running engine must move"),
        }

        let snake = engine.snake();
        let segments = snake.segments();
        let unique: std::collections::HashSet<_> = segments.iter().collect();
        assert_eq!(unique.len(), segments.len());

        assert!(!snake.contains(&engine.food()));
        for obstacle in engine.obstacles() {
            assert!(!snake.contains(obstacle));
            assert_ne!(*obstacle, engine.food());
        }
        assert_eq!(engine.level(), engine.score() / 20 + 1);

        saw_obstacles |= !engine.obstacles().is_empty();
    }

    assert!(saw_obstacles);
}
