use std::collections::VecDeque;

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Whether the position lies on a `size` x `size` board
    pub fn is_within(&self, size: usize) -> bool {
        let size = size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    pub body: VecDeque<Position>,
    /// Direction used by the last move
    pub direction: Direction,
    /// Direction the next move will use
    pub pending: Direction,
}

impl Snake {
    /// Create a new snake with given head position and direction
    ///
    /// The remaining segments trail behind the head, opposite to `direction`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self {
            body,
            direction,
            pending: direction,
        }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// Returns `None` if `segments` is empty.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<Self> {
        let snake = Self {
            body: segments.into_iter().collect(),
            direction,
            pending: direction,
        };

        (!snake.is_empty()).then_some(snake)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Request a new direction for the next move
    ///
    /// A request for the exact opposite of the current travel direction is
    /// ignored. The check is against the direction of the last move, not
    /// against an earlier request from the same tick, so the last accepted
    /// request wins.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) {
            return false;
        }

        self.pending = requested;
        true
    }

    /// Check if position collides with any segment behind the head
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Check if position is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push `head` to the front and drop the tail unless growing
    pub fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

impl CollisionType {
    pub fn describe(&self) -> &'static str {
        match self {
            CollisionType::Wall => "hit the wall",
            CollisionType::SelfCollision => "bit its own tail",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub board_size: usize,
    pub score: u32,
    pub steps: u32,
    /// Set once the game is over; a terminated game never changes again
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, board_size: usize) -> Self {
        Self {
            snake,
            food,
            board_size,
            score: 0,
            steps: 0,
            collision: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.collision.is_none()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.board_size)
    }
}
