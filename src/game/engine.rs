use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    config::{FoodPlacement, GameConfig},
    distance::DistanceField,
    state::{CollisionType, GameState, Position, Snake},
};

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Continue,
    GameOverWall,
    GameOverSelf,
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepStatus::Continue)
    }
}

impl From<Option<CollisionType>> for StepStatus {
    fn from(collision: Option<CollisionType>) -> Self {
        match collision {
            None => StepStatus::Continue,
            Some(CollisionType::Wall) => StepStatus::GameOverWall,
            Some(CollisionType::SelfCollision) => StepStatus::GameOverSelf,
        }
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub status: StepStatus,
    /// Whether the snake ate food this step
    pub ate_food: bool,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to its initial state
    ///
    /// The snake starts heading right with its head left of centre; on the
    /// default 25 board the body is `(10,10), (9,10), (8,10)`.
    pub fn reset(&mut self) -> GameState {
        let size = self.config.board_size as i32;
        let length = self.config.initial_snake_length;
        let start = (size / 2 - 2).max(0);

        let snake = Snake::new(
            Position::new(start.max(length as i32 - 1), start),
            Direction::Right,
            length,
        );

        let food = self.spawn_food(&snake);
        debug!("new game, food at ({}, {})", food.x, food.y);

        GameState::new(snake, food, self.config.board_size)
    }

    /// Build the distance field for the current food position
    pub fn distance_field(&self, state: &GameState) -> DistanceField {
        DistanceField::from_source(state.board_size, state.food)
    }

    /// Execute one tick of the game
    ///
    /// Eating food relocates it and recomputes `field` from the new position.
    /// Once the game is over this is a no-op that keeps reporting the same
    /// end state.
    pub fn step(&mut self, state: &mut GameState, field: &mut DistanceField) -> StepResult {
        if !state.is_alive() {
            return StepResult {
                status: state.collision.into(),
                ate_food: false,
            };
        }

        // A parked snake does not move, so it cannot run into its own neck
        if state.snake.pending == Direction::None {
            return StepResult {
                status: StepStatus::Continue,
                ate_food: false,
            };
        }

        state.snake.direction = state.snake.pending;
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(&state.snake);
            field.recompute(state.food);
            debug!(
                "food eaten, length {}, new food at ({}, {})",
                state.snake.len(),
                state.food.x,
                state.food.y
            );
        }

        state.collision = Self::check_collision(state, new_head);
        if let Some(collision) = state.collision {
            info!(
                "game over: snake {} at ({}, {}) with score {}",
                collision.describe(),
                new_head.x,
                new_head.y,
                state.score
            );
        }

        StepResult {
            status: state.collision.into(),
            ate_food,
        }
    }

    /// Check the freshly pushed head against the walls and the rest of the body
    fn check_collision(state: &GameState, head: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random cell for the next food according to the placement policy
    fn spawn_food(&mut self, snake: &Snake) -> Position {
        let size = self.config.board_size as i32;

        if self.config.food_placement == FoodPlacement::AvoidSnake {
            let free: Vec<Position> = (0..size)
                .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
                .filter(|&pos| !snake.occupies(pos))
                .collect();

            if !free.is_empty() {
                return free[self.rng.gen_range(0..free.len())];
            }
        }

        Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size))
    }
}
