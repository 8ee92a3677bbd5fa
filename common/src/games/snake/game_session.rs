use std::time::Duration;

use crate::games::SessionRng;
use crate::log;
use super::collision::check_collision;
use super::difficulty::{Difficulty, next_interval};
use super::food::place_food;
use super::snake::Snake;
use super::types::{BoardSize, Cell, DeathReason, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    GameOver(DeathReason),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::GameOver(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Moved,
    Ate {
        score: u32,
        interval: Duration,
        interval_changed: bool,
    },
    GameOver(DeathReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub board_size: u32,
}

#[derive(Clone, Debug)]
pub struct GameSession {
    board_size: BoardSize,
    difficulty: Difficulty,
    snake: Snake,
    food: Cell,
    direction: Direction,
    interval: Duration,
    score: u32,
    state: SessionState,
    tick: u64,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(board_size: u32, difficulty: Difficulty, seed: u64) -> Result<Self, String> {
        let board_size = BoardSize::new(board_size)?;
        let mut rng = SessionRng::new(seed);
        let snake = Snake::spawn(board_size);
        let food = place_food(snake.occupied(), board_size, &mut rng);

        Ok(Self {
            board_size,
            difficulty,
            snake,
            food,
            direction: Direction::Right,
            interval: difficulty.speed_profile().initial_interval,
            score: 0,
            state: SessionState::Running,
            tick: 0,
            rng,
        })
    }

    pub fn with_layout(
        board_size: u32,
        difficulty: Difficulty,
        snake: Snake,
        direction: Direction,
        food: Cell,
        seed: u64,
    ) -> Result<Self, String> {
        let board_size = BoardSize::new(board_size)?;
        if let Some(outside) = snake.segments().find(|cell| !board_size.contains(**cell)) {
            return Err(format!("Snake segment {} is outside the board", outside));
        }
        if !board_size.contains(food) {
            return Err(format!("Food {} is outside the board", food));
        }

        Ok(Self {
            board_size,
            difficulty,
            snake,
            food,
            direction,
            interval: difficulty.speed_profile().initial_interval,
            score: 0,
            state: SessionState::Running,
            tick: 0,
            rng: SessionRng::new(seed),
        })
    }

    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            board_size: self.board_size.get(),
        }
    }

    pub fn toggle_pause(&mut self) -> SessionState {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            over @ SessionState::GameOver(_) => over,
        };
        self.state
    }

    pub fn tick(&mut self, steer: Option<Direction>) -> TickOutcome {
        if self.state != SessionState::Running {
            return TickOutcome::Idle;
        }

        if let Some(direction) = steer
            && !direction.is_opposite(&self.direction)
        {
            self.direction = direction;
        }

        self.tick += 1;
        let next_head = self.snake.advance(self.direction);
        let eats = next_head == self.food;

        if let Some(reason) = check_collision(next_head, &self.snake, self.board_size, !eats) {
            self.state = SessionState::GameOver(reason);
            log!(
                "Snake {} at {} on tick {}. Final score: {}",
                reason,
                next_head,
                self.tick,
                self.score
            );
            return TickOutcome::GameOver(reason);
        }

        if !eats {
            self.snake.move_to(next_head);
            return TickOutcome::Moved;
        }

        self.snake.grow(next_head);
        self.score += 1;

        let previous = self.interval;
        self.interval = next_interval(previous, self.difficulty.speed_profile().increment);
        self.food = place_food(self.snake.occupied(), self.board_size, &mut self.rng);

        log!(
            "Ate food at {}. Score: {}, interval: {}ms, next food at {}",
            next_head,
            self.score,
            self.interval.as_millis(),
            self.food
        );

        TickOutcome::Ate {
            score: self.score,
            interval: self.interval,
            interval_changed: self.interval != previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::games::snake::MIN_TICK_INTERVAL;

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()).unwrap()
    }

    fn cells(session: &GameSession) -> Vec<(i32, i32)> {
        session.snake().segments().map(|c| (c.x, c.y)).collect()
    }

    fn scenario_a(difficulty: Difficulty) -> GameSession {
        GameSession::with_layout(
            20,
            difficulty,
            snake(&[(10, 10), (9, 10), (8, 10)]),
            Direction::Right,
            Cell::new(15, 15),
            11,
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_small_board() {
        assert!(GameSession::new(4, Difficulty::Easy, 1).is_err());
    }

    #[test]
    fn test_new_session_starts_running() {
        let session = GameSession::new(25, Difficulty::Hard, 5).unwrap();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.interval(), Duration::from_millis(100));
        assert_eq!(session.direction(), Direction::Right);
        assert!(!session.snake().contains(&session.food()));
        assert_eq!(cells(&session), vec![(12, 12), (11, 12), (10, 12)]);
    }

    #[test]
    fn test_layout_outside_board_is_rejected() {
        let result = GameSession::with_layout(
            10,
            Difficulty::Easy,
            snake(&[(10, 0)]),
            Direction::Left,
            Cell::new(1, 1),
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_plain_tick_moves_snake() {
        let mut session = scenario_a(Difficulty::Medium);
        assert_eq!(session.tick(None), TickOutcome::Moved);
        assert_eq!(cells(&session), vec![(11, 10), (10, 10), (9, 10)]);
        assert_eq!(session.score(), 0);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_eating_food_grows_and_speeds_up() {
        let mut session = scenario_a(Difficulty::Medium);
        for _ in 0..5 {
            assert_eq!(session.tick(Some(Direction::Right)), TickOutcome::Moved);
        }
        for _ in 0..4 {
            assert_eq!(session.tick(Some(Direction::Down)), TickOutcome::Moved);
        }
        assert_eq!(session.snake().head(), Cell::new(15, 14));

        let outcome = session.tick(None);
        assert_eq!(
            outcome,
            TickOutcome::Ate {
                score: 1,
                interval: Duration::from_millis(143),
                interval_changed: true,
            }
        );
        assert_eq!(session.snake().len(), 4);
        assert_eq!(session.snake().head(), Cell::new(15, 15));
        assert_eq!(session.score(), 1);
        assert!(!session.snake().contains(&session.food()));
        assert!(session.board_size().contains(session.food()));
    }

    #[test]
    fn test_wall_hit_ends_game_without_moving() {
        let mut session = GameSession::with_layout(
            20,
            Difficulty::Easy,
            snake(&[(0, 10), (1, 10), (2, 10)]),
            Direction::Left,
            Cell::new(15, 15),
            0,
        )
        .unwrap();

        assert_eq!(
            session.tick(None),
            TickOutcome::GameOver(DeathReason::WallCollision)
        );
        assert_eq!(session.state(), SessionState::GameOver(DeathReason::WallCollision));
        assert_eq!(cells(&session), vec![(0, 10), (1, 10), (2, 10)]);

        assert_eq!(session.tick(None), TickOutcome::Idle);
        assert_eq!(cells(&session), vec![(0, 10), (1, 10), (2, 10)]);
    }

    #[test]
    fn test_self_hit_ends_game() {
        let mut session = GameSession::with_layout(
            20,
            Difficulty::Easy,
            snake(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]),
            Direction::Left,
            Cell::new(15, 15),
            0,
        )
        .unwrap();

        assert_eq!(
            session.tick(Some(Direction::Down)),
            TickOutcome::GameOver(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn test_chasing_own_tail_is_allowed() {
        let mut session = GameSession::with_layout(
            10,
            Difficulty::Easy,
            snake(&[(1, 0), (1, 1), (0, 1), (0, 0)]),
            Direction::Up,
            Cell::new(8, 8),
            0,
        )
        .unwrap();

        assert_eq!(session.tick(Some(Direction::Left)), TickOutcome::Moved);
        assert_eq!(cells(&session), vec![(0, 0), (1, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut session = scenario_a(Difficulty::Easy);
        assert_eq!(session.tick(Some(Direction::Left)), TickOutcome::Moved);
        assert_eq!(session.direction(), Direction::Right);
        assert_eq!(session.snake().head(), Cell::new(11, 10));
    }

    #[test]
    fn test_pause_twice_restores_running_without_ticking() {
        let mut session = scenario_a(Difficulty::Easy);
        let before = cells(&session);

        assert_eq!(session.toggle_pause(), SessionState::Paused);
        assert_eq!(session.tick(None), TickOutcome::Idle);
        assert_eq!(session.toggle_pause(), SessionState::Running);

        assert_eq!(cells(&session), before);
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn test_pause_is_noop_after_game_over() {
        let mut session = GameSession::with_layout(
            5,
            Difficulty::Easy,
            snake(&[(4, 0)]),
            Direction::Right,
            Cell::new(0, 4),
            0,
        )
        .unwrap();
        session.tick(None);
        assert_eq!(
            session.toggle_pause(),
            SessionState::GameOver(DeathReason::WallCollision)
        );
    }

    #[test]
    fn test_interval_stops_at_floor() {
        // Single-row corridor of food: each step east eats.
        let mut session = GameSession::with_layout(
            30,
            Difficulty::Hard,
            snake(&[(0, 0)]),
            Direction::Right,
            Cell::new(1, 0),
            0,
        )
        .unwrap();

        let mut last_interval = session.interval();
        for step in 1..=8 {
            session.food = Cell::new(step, 0);
            match session.tick(None) {
                TickOutcome::Ate { interval, interval_changed, .. } => {
                    assert!(interval <= last_interval);
                    assert!(interval >= MIN_TICK_INTERVAL);
                    assert_eq!(interval_changed, interval != last_interval);
                    last_interval = interval;
                }
                other => panic!("expected to eat, got {:?}", other),
            }
        }
        assert_eq!(session.interval(), MIN_TICK_INTERVAL);
        assert_eq!(session.score(), 8);
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        for seed in 0..20u64 {
            let mut session = GameSession::new(8, Difficulty::Hard, seed).unwrap();
            let mut steering = SessionRng::new(seed + 100);
            let mut last_score = 0;
            let mut last_interval = session.interval();

            for _ in 0..500 {
                let steer = Direction::ALL[steering.random_range(0..4usize)];
                let outcome = session.tick(Some(steer));

                if let TickOutcome::GameOver(_) = outcome {
                    assert!(session.state().is_terminal());
                    break;
                }

                let distinct: HashSet<Cell> = session.snake().segments().copied().collect();
                assert_eq!(distinct.len(), session.snake().len());

                let expected_score = match outcome {
                    TickOutcome::Ate { .. } => last_score + 1,
                    _ => last_score,
                };
                assert_eq!(session.score(), expected_score);
                assert!(session.interval() <= last_interval);
                assert!(session.interval() >= MIN_TICK_INTERVAL);

                if matches!(outcome, TickOutcome::Ate { .. })
                    && session.snake().len() < session.board_size().cell_count()
                {
                    assert!(!session.snake().contains(&session.food()));
                }

                last_score = session.score();
                last_interval = session.interval();
            }
        }
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameSession::new(25, Difficulty::Easy, 99).unwrap();
        let b = GameSession::new(25, Difficulty::Easy, 99).unwrap();
        assert_eq!(a.food(), b.food());
        assert_eq!(a.seed(), 99);
    }
}
