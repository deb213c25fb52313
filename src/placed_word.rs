use std::fmt::Display;

use serde::{Deserialize, Serialize};
use crate::word::{Direction, Position, Word};


/// Represents a word committed to a [grid](crate::grid::Grid)
///
/// A placed word returned by [Grid::place_word](crate::grid::Grid::place_word) describes letters that are actually in
/// that grid. One built by hand or deserialized is just a position and a value, check it with
/// [Grid::word_at](crate::grid::Grid::word_at) before trusting it. It doesn't own the cells, it is only an index into
/// them, used to highlight the solution.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct PlacedWord
{
    pub position: Position,
    pub direction: Direction,
    pub value: Word,
}

impl PlacedWord
{
    pub(crate) fn new(val: Word, pos: Position, dir: Direction) -> PlacedWord
    {
        PlacedWord { value: val, position: pos, direction: dir }
    }

    pub fn len(&self) -> usize
    {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.value.is_empty()
    }

    /// Returns the positions of all characters of the word, in reading order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_
    {
        (0..self.len()).map(|i| self.direction.step(self.position, i))
    }

    /// Position of the last character
    pub fn end(&self) -> Position
    {
        self.direction.step(self.position, self.len().saturating_sub(1))
    }

    /// Returns true if one of the characters of the word is at `pos`
    pub fn covers(&self, pos: Position) -> bool
    {
        let end = self.end();
        (self.position.x..=end.x).contains(&pos.x) && (self.position.y..=end.y).contains(&pos.y)
    }

    /// Returns the positions used by both words
    ///
    /// ## Examples
    /// ```text
    /// //     D
    /// // C A T
    /// //     G
    /// ```
    /// "CAT" going right from (0, 1) and "DTG" going down from (2, 0) share the cell (2, 1).
    ///
    /// Words in the same direction can share several cells (for example a duplicate word placed on top of itself).
    pub fn shared_cells(&self, other: &PlacedWord) -> Vec<Position>
    {
        self.cells().filter(|pos| other.covers(*pos)).collect()
    }
}

impl Display for PlacedWord
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} at ({}, {}) going {}", self.value, self.position.x, self.position.y, self.direction)
    }
}
