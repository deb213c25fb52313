use std::fmt::Display;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for words that can't be used in a [word search](crate::grid::Grid)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError
{
    #[error("A word can't be empty.")]
    Empty,
}

/// Represents the position of a [cell](crate::grid::Cell) in a [grid](crate::grid::Grid), x is the column, y is the row
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Hash, Serialize, Deserialize)]
pub struct Position
{
    pub x: usize,
    pub y: usize,
}

impl Position
{
    pub fn new(x: usize, y: usize) -> Position
    {
        Position { x, y }
    }
}

/// Represents the direction of a [word](crate::placed_word::PlacedWord) placed in a [grid](crate::grid::Grid)
///
/// Words are only read left to right or top to bottom.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Hash, Serialize, Deserialize)]
pub enum Direction
{
    #[default]
    Right,
    Down,
}

impl Direction
{
    /// Picks one of the two directions with equal probability
    pub fn random(rng: &mut impl Rng) -> Direction
    {
        if rng.gen_bool(0.5) { Direction::Right } else { Direction::Down }
    }

    /// Returns the position of the `index`-th character of a word that starts at `start` and goes in this direction
    pub fn step(&self, start: Position, index: usize) -> Position
    {
        match *self
        {
            Direction::Right => Position { x: start.x + index, y: start.y },
            Direction::Down => Position { x: start.x, y: start.y + index },
        }
    }
}

impl Display for Direction
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Direction::Right => write!(f, "right"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Represents a word outside of a [grid](crate::grid::Grid), has no particular [position](Position) or [direction](Direction) yet
///
/// The value is normalized to upper case on creation, so "Cat", "cat" and "CAT" are the same word.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word
{
    value: String,
}

impl Word
{
    /// # Errors
    ///
    /// [WordError::Empty] - the word has no characters
    pub fn new(val: &str) -> Result<Word, WordError>
    {
        let value = val.trim().to_uppercase();
        if value.is_empty() { return Err(WordError::Empty); }
        Ok(Word { value })
    }

    pub fn value(&self) -> &str
    {
        &self.value
    }

    /// Length in characters, not bytes
    pub fn len(&self) -> usize
    {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool
    {
        self.value.is_empty()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_
    {
        self.value.chars()
    }
}

impl TryFrom<String> for Word
{
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error>
    {
        Word::new(&value)
    }
}

impl From<Word> for String
{
    fn from(word: Word) -> Self
    {
        word.value
    }
}

impl Display for Word
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{}", self.value)
    }
}
