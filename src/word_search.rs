use serde::Serialize;
use crate::{grid::Grid, placed_word::PlacedWord, word::Position};

/// A finished puzzle, every cell of the [grid](Grid) is filled
///
/// The [words](PlacedWord) are in the order they were placed (longest first) and form the solution.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct WordSearch
{
    pub grid: Grid,
    pub words: Vec<PlacedWord>,
    /// How many whole-grid attempts it took to place all the words
    pub attempts: u32,
}

impl WordSearch
{
    /// Returns true if the cell at `pos` belongs to one of the hidden words
    pub fn is_solution_cell(&self, pos: Position) -> bool
    {
        self.grid.cell(pos.x, pos.y).is_some_and(|c| c.is_word_char)
    }

    /// Finds the placement of a word, the search is case insensitive
    pub fn find_word(&self, word: &str) -> Option<&PlacedWord>
    {
        let word = word.to_uppercase();
        self.words.iter().find(|w| w.value.value() == word)
    }
}
