//! Maps built geometry through a packing into pixel-space draw lists.
//!
//! Pure: the actual drawing goes through [`Canvas`], supplied by the host.

use serde::Serialize;

use crate::{
    board::{BoardGeometry, Tiling},
    geom::{Point, SQRT_2},
    packer::PackingResult,
};

pub type Rgb = [u8; 3];

pub const BACKGROUND: Rgb = [0, 0, 0];
const SQUARE_PALETTE: [Rgb; 2] = [[128, 64, 32], [255, 192, 128]];
const HEX_PALETTE: [Rgb; 3] = [[128, 64, 32], [255, 128, 64], [255, 192, 128]];

/// Fill colors indexed by cell color class.
pub fn palette(tiling: Tiling) -> &'static [Rgb] {
    match tiling {
        Tiling::Orthogonal => &SQUARE_PALETTE,
        Tiling::Hex { .. } => &HEX_PALETTE,
    }
}

/// Drawing capability of the rendering host.
pub trait Canvas {
    fn clear(&mut self, color: Rgb);
    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Rgb);
    /// Draws the overlay glyph as a `size` px square with its top-left at `(x, y)`.
    fn draw_glyph(&mut self, x: i32, y: i32, size: u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GlyphPlacement {
    pub x: i32,
    pub y: i32,
    pub overlay: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellFrame {
    pub polygon: Vec<(i32, i32)>,
    pub color: Rgb,
    pub glyph: GlyphPlacement,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardFrame {
    pub index: usize,
    pub cells: Vec<CellFrame>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub glyph_size: u32,
    pub boards: Vec<BoardFrame>,
}

// Half-up: -2.5 maps to -2.
fn to_pixel(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Placeholder glyph rule: `cx * cy + board` truncated toward zero is a multiple of 5.
pub fn has_glyph(centroid: Point, board: usize) -> bool {
    (centroid.x * centroid.y + board as f64) as i32 % 5 == 0
}

pub fn glyph_size(scale: f64) -> u32 {
    (scale / SQRT_2 + 0.5).floor().max(0.0) as u32
}

/// Places every cell of every board in pixel space.
pub fn compose(geometry: &BoardGeometry, packing: &PackingResult) -> Frame {
    let colors = palette(geometry.tiling());
    let size = glyph_size(packing.scale);
    let half = 0.5 * f64::from(size);
    let boards = geometry
        .boards()
        .enumerate()
        .map(|(index, board)| {
            let (bx, by) = packing.board_offset(index);
            let dx = packing.offset_x + bx;
            let dy = packing.offset_y + by;
            let cells = board
                .cells()
                .iter()
                .map(|cell| CellFrame {
                    polygon: cell
                        .vertices
                        .iter()
                        .map(|v| (to_pixel(v.x * packing.scale + dx), to_pixel(v.y * packing.scale + dy)))
                        .collect(),
                    color: colors[usize::from(cell.color_class) % colors.len()],
                    glyph: GlyphPlacement {
                        x: (cell.centroid.x * packing.scale + dx - half) as i32,
                        y: (cell.centroid.y * packing.scale + dy - half) as i32,
                        overlay: has_glyph(cell.centroid, index),
                    },
                })
                .collect();
            BoardFrame { index, cells }
        })
        .collect();
    Frame {
        glyph_size: size,
        boards,
    }
}

impl Frame {
    /// Clears the canvas, then fills each cell and draws its glyph, in order.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear(BACKGROUND);
        for cell in self.boards.iter().flat_map(|b| &b.cells) {
            canvas.fill_polygon(&cell.polygon, cell.color);
            if cell.glyph.overlay && self.glyph_size > 0 {
                canvas.draw_glyph(cell.glyph.x, cell.glyph.y, self.glyph_size);
            }
        }
    }

    pub fn cell_count(&self) -> usize {
        self.boards.iter().map(|b| b.cells.len()).sum()
    }
}
