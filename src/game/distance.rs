//! Breadth-first distance field over the open board
//!
//! Every cell stores its 4-connected step distance to a single source cell
//! (the food). The snake does not block the search. The field is rebuilt from
//! scratch on every [`DistanceField::recompute`] call.

use std::collections::VecDeque;

use log::warn;

use super::action::Direction;
use super::state::Position;

/// Marker for cells the last search did not reach
pub const UNREACHED: u32 = u32::MAX;

/// Distances from a source cell, stored row-major in a flat array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    size: usize,
    source: Option<Position>,
    cells: Vec<u32>,
}

impl DistanceField {
    /// Create an empty field where every cell is unreached
    pub fn new(size: usize) -> Self {
        Self {
            size,
            source: None,
            cells: vec![UNREACHED; size * size],
        }
    }

    /// Create a field already searched from `source`
    pub fn from_source(size: usize, source: Position) -> Self {
        let mut field = Self::new(size);
        field.recompute(source);
        field
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Source of the last successful search
    pub fn source(&self) -> Option<Position> {
        self.source
    }

    /// Reset every cell and search again from `source`
    ///
    /// A source outside the board leaves the whole field unreached.
    pub fn recompute(&mut self, source: Position) {
        self.cells.fill(UNREACHED);
        self.source = None;

        let Some(start) = self.index(source) else {
            warn!(
                "distance source ({}, {}) is outside the {}x{} board",
                source.x, source.y, self.size, self.size
            );
            return;
        };

        self.source = Some(source);
        self.cells[start] = 0;

        let mut queue = VecDeque::with_capacity(self.cells.len());
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let Some(current_idx) = self.index(current) else {
                continue;
            };
            let next_distance = self.cells[current_idx] + 1;

            for dir in Direction::MOVES {
                let next = current.moved_in_direction(dir);
                let Some(next_idx) = self.index(next) else {
                    continue;
                };

                if self.cells[next_idx] == UNREACHED {
                    self.cells[next_idx] = next_distance;
                    queue.push_back(next);
                }
            }
        }
    }

    /// Distance stored for `pos`, or `None` if it was not reached
    pub fn value_at(&self, pos: Position) -> Option<u32> {
        self.index(pos)
            .map(|idx| self.cells[idx])
            .filter(|&distance| distance != UNREACHED)
    }

    /// Largest finite distance in the field
    pub fn max_distance(&self) -> Option<u32> {
        self.cells.iter().copied().filter(|&d| d != UNREACHED).max()
    }

    /// All reached cells with their distances, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &distance)| distance != UNREACHED)
            .map(move |(idx, &distance)| {
                let pos = Position::new((idx % size) as i32, (idx / size) as i32);
                (pos, distance)
            })
    }

    fn index(&self, pos: Position) -> Option<usize> {
        pos.is_within(self.size)
            .then(|| pos.y as usize * self.size + pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_unreached() {
        let field = DistanceField::new(5);
        assert_eq!(field.size(), 5);
        assert_eq!(field.source(), None);
        assert_eq!(field.value_at(Position::new(2, 2)), None);
        assert_eq!(field.max_distance(), None);
        assert_eq!(field.iter().count(), 0);
    }

    #[test]
    fn test_center_source() {
        let source = Position::new(12, 12);
        let field = DistanceField::from_source(25, source);

        assert_eq!(field.value_at(source), Some(0));
        assert_eq!(field.value_at(Position::new(0, 0)), Some(24));
        assert_eq!(field.value_at(Position::new(24, 24)), Some(24));
        assert_eq!(field.max_distance(), Some(24));
    }

    #[test]
    fn test_open_grid_matches_manhattan_distance() {
        let source = Position::new(3, 17);
        let field = DistanceField::from_source(25, source);

        assert_eq!(field.iter().count(), 25 * 25);
        for (pos, distance) in field.iter() {
            assert_eq!(distance, pos.manhattan_distance(source), "at {pos:?}");
        }
    }

    #[test]
    fn test_corner_source() {
        let field = DistanceField::from_source(25, Position::new(24, 0));
        assert_eq!(field.value_at(Position::new(0, 24)), Some(48));
        assert_eq!(field.max_distance(), Some(48));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let source = Position::new(7, 2);
        let mut field = DistanceField::from_source(25, source);
        let first = field.clone();

        field.recompute(source);
        assert_eq!(field, first);
    }

    #[test]
    fn test_recompute_discards_previous_source() {
        let mut field = DistanceField::from_source(10, Position::new(0, 0));
        field.recompute(Position::new(9, 9));

        assert_eq!(field.source(), Some(Position::new(9, 9)));
        assert_eq!(field.value_at(Position::new(9, 9)), Some(0));
        assert_eq!(field.value_at(Position::new(0, 0)), Some(18));
        assert_eq!(field, DistanceField::from_source(10, Position::new(9, 9)));
    }

    #[test]
    fn test_out_of_bounds_source_clears_field() {
        let mut field = DistanceField::from_source(10, Position::new(4, 4));
        field.recompute(Position::new(10, 4));

        assert_eq!(field.source(), None);
        assert_eq!(field.iter().count(), 0);
    }

    #[test]
    fn test_value_at_out_of_bounds() {
        let field = DistanceField::from_source(10, Position::new(4, 4));
        assert_eq!(field.value_at(Position::new(-1, 4)), None);
        assert_eq!(field.value_at(Position::new(4, 10)), None);
    }

    #[test]
    fn test_iter_is_row_major() {
        let field = DistanceField::from_source(5, Position::new(0, 0));
        let positions: Vec<Position> = field.iter().take(6).map(|(pos, _)| pos).collect();

        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[4], Position::new(4, 0));
        assert_eq!(positions[5], Position::new(0, 1));
    }
}
