use std::{fs, path::Path};

use thiserror::Error;
use crate::word::Word;

/// Error type for possible errors when reading a list of [words](Word)
#[derive(Error, Debug)]
pub enum WordListError
{
    #[error("Failed to open file: {0}")]
    Io(#[from] std::io::Error),
    #[error("The word list is empty.")]
    Empty,
}

/// Splits `text` into [words](Word)
///
/// Words are separated by whitespace or commas, so both one word per line and csv lists work.
///
/// ```
/// # use word_salad::word_list::parse_words;
/// let words = parse_words("cat, dog\nBird");
/// assert_eq!(words.iter().map(|w| w.value()).collect::<Vec<_>>(), vec!["CAT", "DOG", "BIRD"]);
/// ```
pub fn parse_words(text: &str) -> Vec<Word>
{
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(|token| Word::new(token).ok())
        .collect()
}

/// Reads the [words](Word) from the file at `path`, see [parse_words]
///
/// # Errors
///
/// [WordListError::Io] - the file can't be read
///
/// [WordListError::Empty] - the file has no words
pub fn read_words(path: impl AsRef<Path>) -> Result<Vec<Word>, WordListError>
{
    let words = parse_words(&fs::read_to_string(path)?);
    if words.is_empty() { return Err(WordListError::Empty); }
    Ok(words)
}
