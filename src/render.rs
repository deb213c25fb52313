use crossterm::style::{style, Stylize};
use crate::{grid::Grid, word::Position, word_search::WordSearch};

#[cfg(feature = "png")]
pub mod png;

/// Renders the grid with a space before every cell, empty cells are shown as `/`
///
/// ```
/// # use word_salad::grid::Grid;
/// # use word_salad::render::spaced_text;
/// # use word_salad::word::{Direction, Position, Word};
/// let mut grid = Grid::new(3, 2).unwrap();
/// grid.place_word(&Word::new("ox").unwrap(), Position::new(1, 1), Direction::Right).unwrap();
///
/// assert_eq!(spaced_text(&grid), " / / /\n / O X\n");
/// ```
pub fn spaced_text(grid: &Grid) -> String
{
    let mut text = String::new();
    for row in grid.rows()
    {
        for cell in row
        {
            text.push(' ');
            text.push(cell.character.unwrap_or('/'));
        }
        text.push('\n');
    }
    text
}

/// Renders the puzzle like [spaced_text], with the letters of the hidden words highlighted for a terminal
pub fn solution_text(ws: &WordSearch) -> String
{
    let mut text = String::new();
    for (y, row) in ws.grid.rows().enumerate()
    {
        for (x, cell) in row.iter().enumerate()
        {
            let c = cell.character.unwrap_or('/');
            text.push(' ');
            if ws.is_solution_cell(Position::new(x, y)) { text.push_str(&style(c).magenta().bold().to_string()); }
            else { text.push(c); }
        }
        text.push('\n');
    }
    text
}

/// One line per hidden word, with 1-based row and column like a printed answer key
pub fn word_key(ws: &WordSearch) -> String
{
    ws.words.iter()
        .map(|w| format!("{}: (row {}, col {}, {})\n", w.value, w.position.y + 1, w.position.x + 1, w.direction))
        .collect()
}
