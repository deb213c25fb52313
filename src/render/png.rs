use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::{drawing::{draw_filled_rect_mut, draw_text_mut, text_size}, rect::Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{word::Position, word_search::WordSearch};

/// Error type for possible errors when painting a [word search](WordSearch) into an image
#[derive(Error, Debug)]
pub enum RenderError
{
    #[error("Failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("A {width}x{height} grid with {cell_size} px cells is too large for an image.")]
    TooLarge { width: usize, height: usize, cell_size: u32 },
}

/// Represents how a [word search](WordSearch) is painted
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageStyle
{
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Empty border around the grid in pixels
    pub margin: u32,
    pub font_size: f32,
    /// Paint the cells of the hidden words with [ImageStyle::highlight]
    pub show_solution: bool,
    pub background: [u8; 4],
    pub text: [u8; 4],
    pub highlight: [u8; 4],
}

impl Default for ImageStyle
{
    fn default() -> Self
    {
        ImageStyle
        {
            cell_size: 24,
            margin: 20,
            font_size: 20.0,
            show_solution: false,
            background: [255, 255, 255, 255],
            text: [0, 0, 0, 255],
            highlight: [255, 200, 230, 255],
        }
    }
}

impl ImageStyle
{
    /// Length in pixels of a canvas side that holds `cells` cells, None if it doesn't fit in the `i32` drawing coordinates
    fn canvas_side(&self, cells: usize) -> Option<u32>
    {
        u32::try_from(cells).ok()?
            .checked_mul(self.cell_size)?
            .checked_add(self.margin.checked_mul(2)?)
            .filter(|side| *side <= i32::MAX as u32)
    }

    /// Top left corner of the cell at `pos`, in pixels
    ///
    /// Only called for cells inside a canvas accepted by [ImageStyle::canvas_side], so it can't overflow.
    fn cell_origin(&self, pos: Position) -> (u32, u32)
    {
        (self.margin + pos.x as u32 * self.cell_size, self.margin + pos.y as u32 * self.cell_size)
    }
}

pub fn load_font(path: impl AsRef<Path>) -> Result<FontVec, RenderError>
{
    Ok(FontVec::try_from_vec(std::fs::read(path)?)?)
}

/// Paints the background and, if asked, the highlighted cells, without any letters
///
/// # Errors
///
/// [RenderError::TooLarge] - the canvas size overflows for this grid and [style](ImageStyle)
pub fn paint_cells(ws: &WordSearch, style: &ImageStyle) -> Result<RgbaImage, RenderError>
{
    let too_large = || RenderError::TooLarge { width: ws.grid.width(), height: ws.grid.height(), cell_size: style.cell_size };
    let width = style.canvas_side(ws.grid.width()).ok_or_else(too_large)?;
    let height = style.canvas_side(ws.grid.height()).ok_or_else(too_large)?;
    let mut img = RgbaImage::from_pixel(width, height, Rgba(style.background));

    if style.show_solution
    {
        for pos in ws.words.iter().flat_map(|w| w.cells())
        {
            let (x, y) = style.cell_origin(pos);
            draw_filled_rect_mut(&mut img, Rect::at(x as i32, y as i32).of_size(style.cell_size, style.cell_size), Rgba(style.highlight));
        }
    }

    Ok(img)
}

/// Paints the whole [word search](WordSearch), every letter centered in its cell
///
/// # Errors
///
/// See [paint_cells]
pub fn paint_image(ws: &WordSearch, font: &impl Font, style: &ImageStyle) -> Result<RgbaImage, RenderError>
{
    let mut img = paint_cells(ws, style)?;
    let scale = PxScale::from(style.font_size);

    for (y, row) in ws.grid.rows().enumerate()
    {
        for (x, cell) in row.iter().enumerate()
        {
            let Some(c) = cell.character else { continue };
            let letter = c.to_string();
            let (w, h) = text_size(scale, font, &letter);
            let (cx, cy) = style.cell_origin(Position::new(x, y));
            let dx = style.cell_size.saturating_sub(w) / 2;
            let dy = style.cell_size.saturating_sub(h) / 2;

            draw_text_mut(&mut img, Rgba(style.text), (cx + dx) as i32, (cy + dy) as i32, scale, font, &letter);
        }
    }

    Ok(img)
}

pub fn write_png(img: &RgbaImage, path: impl AsRef<Path>) -> Result<(), RenderError>
{
    img.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
    info!(path = %path.as_ref().display(), "wrote image");
    Ok(())
}
