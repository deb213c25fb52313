use std::fmt::Display;

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{placed_word::PlacedWord, word::{Direction, Position, Word}};

/// Letters used to fill the cells that are not part of any word
pub const FILLER_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Error type for possible errors when working with grids
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError
{
    #[error("Grid dimensions must be positive, got {width}x{height}.")]
    InvalidDimension { width: usize, height: usize },
    #[error("The word {0} doesn't fit in the grid at the requested position.")]
    WordDoesNotFit(String),
}

/// One position of a [grid](Grid)
///
/// Starts empty, gets either a letter of a placed word or a filler letter, never both.
#[derive(Clone, Copy, Eq, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct Cell
{
    pub character: Option<char>,
    pub is_word_char: bool,
}

impl Cell
{
    pub fn is_empty(&self) -> bool
    {
        self.character.is_none()
    }

    /// A cell accepts `c` if it's empty, filler, or already holds the same word character
    fn accepts(&self, c: char) -> bool
    {
        !self.is_word_char || self.character == Some(c)
    }
}

/// # Represents a word search grid
///
/// The size is fixed on creation, cells are stored row by row.
///
/// # Example
///
/// ```
/// # use word_salad::grid::Grid;
/// # use word_salad::word::{Direction, Position, Word};
/// let mut grid = Grid::new(5, 5).unwrap();
/// let hello = Word::new("hello").unwrap();
/// let local = Word::new("local").unwrap();
///
/// grid.place_word(&hello, Position::new(0, 0), Direction::Right).unwrap();          //     ---------
///                                                                                   //    |H E L L O|
/// // "local" crosses "hello" on the shared L                                        //    |    O    |
/// assert!(grid.word_fits(&local, Position::new(2, 0), Direction::Down));            //    |    C    |
/// // but not on the E                                                               //    |    A    |
/// assert!(!grid.word_fits(&local, Position::new(1, 0), Direction::Down));           //    |    L    |
///                                                                                   //     ---------
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Grid
{
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid
{
    /// Creates a new grid with all cells empty
    ///
    /// # Errors
    ///
    /// [GridError::InvalidDimension] - width or height is 0
    pub fn new(width: usize, height: usize) -> Result<Grid, GridError>
    {
        if width == 0 || height == 0 { return Err(GridError::InvalidDimension { width, height }); }

        Ok(Grid { width, height, cells: vec![vec![Cell::default(); width]; height] })
    }

    pub fn width(&self) -> usize
    {
        self.width
    }

    pub fn height(&self) -> usize
    {
        self.height
    }

    /// Returns the cell at column `x` and row `y`, or None if that's outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell>
    {
        self.cells.get(y).and_then(|row| row.get(x))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]>
    {
        self.cells.iter().map(|row| row.as_slice())
    }

    /// Returns true if every cell has a character
    pub fn is_filled(&self) -> bool
    {
        self.cells.iter().flatten().all(|c| !c.is_empty())
    }

    /// Returns true if a word of length `len` starting at `pos` and going in `dir` stays inside the grid
    pub fn span_fits(&self, len: usize, pos: Position, dir: Direction) -> bool
    {
        if pos.x >= self.width || pos.y >= self.height { return false; }

        match dir
        {
            Direction::Right => pos.x + len <= self.width,
            Direction::Down => pos.y + len <= self.height,
        }
    }

    /// Checks if a [word](Word) can be placed at `pos` going in `dir`, doesn't change the grid
    ///
    /// The word must stay inside the grid, and every cell it covers must be either free or hold the same
    /// letter from an earlier word (so words can cross on a shared letter).
    pub fn word_fits(&self, word: &Word, pos: Position, dir: Direction) -> bool
    {
        if !self.span_fits(word.len(), pos, dir) { return false; }

        word.chars().enumerate().all(|(i, c)|
        {
            let p = dir.step(pos, i);
            self.cells[p.y][p.x].accepts(c)
        })
    }

    /// Writes the [word](Word) into the grid and returns the record of the placement
    ///
    /// Placing the same word at the same position twice leaves the grid unchanged.
    ///
    /// # Errors
    ///
    /// [GridError::WordDoesNotFit] - [Grid::word_fits] is false for these arguments, the grid is not changed
    pub fn place_word(&mut self, word: &Word, pos: Position, dir: Direction) -> Result<PlacedWord, GridError>
    {
        if !self.word_fits(word, pos, dir) { return Err(GridError::WordDoesNotFit(word.to_string())); }

        for (i, c) in word.chars().enumerate()
        {
            let p = dir.step(pos, i);
            self.cells[p.y][p.x] = Cell { character: Some(c), is_word_char: true };
        }

        Ok(PlacedWord::new(word.clone(), pos, dir))
    }

    /// Fills every empty cell with a random letter from [FILLER_ALPHABET]
    ///
    /// Cells with word characters are left as they are. Meant to be called once, after all words are placed.
    pub fn fill_remaining(&mut self, rng: &mut impl Rng)
    {
        for cell in self.cells.iter_mut().flatten().filter(|c| c.is_empty())
        {
            let letter = FILLER_ALPHABET[rng.gen_range(0..FILLER_ALPHABET.len())];
            *cell = Cell { character: Some(letter as char), is_word_char: false };
        }
    }

    /// Reads `len` characters starting at `pos` going in `dir`
    ///
    /// Returns None if the span leaves the grid or crosses an empty cell.
    pub fn word_at(&self, pos: Position, dir: Direction, len: usize) -> Option<String>
    {
        if !self.span_fits(len, pos, dir) { return None; }

        (0..len).map(|i|
        {
            let p = dir.step(pos, i);
            self.cells[p.y][p.x].character
        }).collect()
    }

    /// Returns a matrix of characters that represent the grid
    ///
    /// # Example
    ///
    /// ```
    /// # use word_salad::grid::Grid;
    /// # use word_salad::word::{Direction, Position, Word};
    /// let mut grid = Grid::new(3, 2).unwrap();
    /// grid.place_word(&Word::new("dog").unwrap(), Position::new(0, 1), Direction::Right).unwrap();
    ///
    /// assert_eq!(grid.render(), vec!
    /// [
    ///     vec![' ', ' ', ' '],
    ///     vec!['D', 'O', 'G'],
    /// ]);
    ///
    /// // empty cells are rendered as spaces
    /// ```
    pub fn render(&self) -> Vec<Vec<char>>
    {
        self.cells.iter()
            .map(|row| row.iter().map(|c| c.character.unwrap_or(' ')).collect())
            .collect()
    }
}

impl Display for Grid
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        let text = self.render().into_iter().map(|row| row.into_iter().collect::<String>()).join("\n");
        writeln!(f, "{text}")
    }
}
