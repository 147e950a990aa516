use super::{
    config::{ConfigError, GameConfig},
    direction::Direction,
    snapshot::Snapshot,
    state::{CollisionType, Phase, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IteratorRandom};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snake moved one step
    Moved,
    /// Snake moved onto the food and grew
    Ate,
    /// Snake hit something and the game ended
    Collided(CollisionType),
    /// Snake covers every cell, no food can be placed; the game ended
    BoardFull,
    /// Game was already over, nothing changed
    Idle,
}

impl TickOutcome {
    /// Returns true if this tick ended the game
    pub fn ended_game(&self) -> bool {
        matches!(self, TickOutcome::Collided(_) | TickOutcome::BoardFull)
    }
}

/// Complete state of one game of Snake
///
/// Pure data and transitions: no I/O, no rendering. The play loop calls
/// [`GameState::update`] once per tick and [`GameState::set_direction`] for
/// input, then draws from [`GameState::snapshot`].
///
/// Construction validates the config, so a live `GameState` always has a
/// grid that fits in `i32` coordinates.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    config: GameConfig,
    rng: R,
    pub snake: Snake,
    pub food: Position,
    pub score: u32,
    /// Direction the next update moves in
    direction: Direction,
    /// Direction of the last completed move; turns are filtered against it
    heading: Direction,
    phase: Phase,
}

impl GameState<StdRng> {
    /// Start a game with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a game whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let head = Position::from(config.initial_head);
        let mut state = Self {
            snake: Snake::new(head, Direction::Right, config.initial_length, 0),
            food: head,
            score: 0,
            direction: Direction::Right,
            heading: Direction::Right,
            phase: Phase::Playing,
            config,
            rng,
        };
        state.reset();
        Ok(state)
    }

    /// Start over: fresh snake heading right, score 0, new food
    pub fn reset(&mut self) {
        self.snake = Snake::new(
            Position::from(self.config.initial_head),
            Direction::Right,
            self.config.initial_length,
            self.step(),
        );
        self.direction = Direction::Right;
        self.heading = Direction::Right;
        self.score = 0;
        self.phase = Phase::Playing;
        self.spawn_food();
        log::info!(
            "New game: snake at {:?}, food at {:?}",
            self.snake.head(),
            self.food
        );
    }

    /// Place food on a random free cell
    ///
    /// Draws random cells up to `max_spawn_attempts` times, then picks
    /// uniformly from the free cells directly so a long snake cannot stall
    /// the loop. Returns `None`, leaving the food untouched, when the snake
    /// covers the whole grid.
    pub fn spawn_food(&mut self) -> Option<Position> {
        let step = self.step();
        // Validated configs keep both sides within MAX_GRID_CELLS.
        let max_x = i32::try_from(self.config.columns()).unwrap_or(0) - 1;
        let max_y = i32::try_from(self.config.rows()).unwrap_or(0) - 1;

        for _ in 0..self.config.max_spawn_attempts {
            let pos = Position::new(
                self.rng.gen_range(0..=max_x) * step,
                self.rng.gen_range(0..=max_y) * step,
            );
            if !self.snake.occupies(pos) {
                self.food = pos;
                return Some(pos);
            }
        }

        log::debug!(
            "No free cell after {} draws, sampling from free cells",
            self.config.max_spawn_attempts
        );
        let snake = &self.snake;
        let pos = grid_positions(max_x, max_y, step)
            .filter(|pos| !snake.occupies(*pos))
            .choose(&mut self.rng)?;
        self.food = pos;
        Some(pos)
    }

    /// Request a new direction for the next move
    ///
    /// Ignored when it reverses the last move or the game is over. Returns
    /// whether the request was taken.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        if self.heading.is_opposite(requested) {
            log::trace!("Ignoring reverse turn {:?} while heading {:?}", requested, self.heading);
            return false;
        }
        self.direction = requested;
        true
    }

    /// Advance the game by one tick
    pub fn update(&mut self) -> TickOutcome {
        if self.phase == Phase::GameOver {
            return TickOutcome::Idle;
        }

        let new_head = self.snake.head().moved_in_direction(self.direction, self.step());

        if !self.is_in_bounds(new_head) {
            return self.end_game(TickOutcome::Collided(CollisionType::Wall));
        }

        if self.snake.occupies(new_head) {
            return self.end_game(TickOutcome::Collided(CollisionType::SelfCollision));
        }

        self.heading = self.direction;
        let ate_food = new_head == self.food;
        self.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved;
        }

        self.score += 1;
        match self.spawn_food() {
            Some(food) => {
                log::debug!("Food eaten, score {}, next food at {:?}", self.score, food);
                TickOutcome::Ate
            }
            None => self.end_game(TickOutcome::BoardFull),
        }
    }

    fn end_game(&mut self, outcome: TickOutcome) -> TickOutcome {
        self.phase = Phase::GameOver;
        log::info!(
            "Game over ({:?}) with score {} and length {}",
            outcome,
            self.score,
            self.snake.len()
        );
        outcome
    }
}

impl<R> GameState<R> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Check if a position lies inside the window
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && i64::from(pos.x) < i64::from(self.config.window_width)
            && pos.y >= 0
            && i64::from(pos.y) < i64::from(self.config.window_height)
    }

    /// Everything a renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            segments: &self.snake.body,
            food: self.food,
            score: self.score,
            game_over: self.is_game_over(),
            step_size: self.config.step_size,
            window_width: self.config.window_width,
            window_height: self.config.window_height,
        }
    }

    fn step(&self) -> i32 {
        i32::try_from(self.config.step_size).unwrap_or(i32::MAX)
    }
}

fn grid_positions(max_x: i32, max_y: i32, step: i32) -> impl Iterator<Item = Position> {
    (0..=max_y).flat_map(move |y| (0..=max_x).map(move |x| Position::new(x * step, y * step)))
}
