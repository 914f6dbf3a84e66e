use std::num::NonZeroUsize;

use serde::Serialize;
use thiserror::Error;

use crate::geom::BoundingBox;

/// Pixels reserved on every side of a board inside its grid slot.
pub const BOARD_MARGIN: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("viewport {width}x{height} has no area")]
    DegenerateViewport { width: u32, height: u32 },
    #[error("no boards to lay out")]
    NoBoards,
    #[error("bounding box has no area")]
    DegenerateBounds,
    #[error("{boards} boards do not fit in {width}x{height}")]
    NoFit { boards: usize, width: u32, height: u32 },
}

/// Where every board lands on screen and how geometry maps to pixels.
///
/// `pixel = value * scale + offset + board_offset`, with the board offset
/// given by [`PackingResult::board_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PackingResult {
    /// Width of one board slot; boards are laid out on a grid of these.
    pub cell_pixel_size: f64,
    pub boards_per_row: NonZeroUsize,
    pub rows: usize,
    pub row_height: f64,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PackingResult {
    pub fn col_width(&self) -> f64 {
        self.cell_pixel_size
    }

    /// Top-left corner of board `index` relative to the grid origin.
    pub fn board_offset(&self, index: usize) -> (f64, f64) {
        let per_row = self.boards_per_row.get();
        (
            (index % per_row) as f64 * self.cell_pixel_size,
            (index / per_row) as f64 * self.row_height,
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    size: f64,
    cols: NonZeroUsize,
}

impl Candidate {
    /// Enough columns to make boards roughly square, sized by the pixel width.
    fn fit_width(width: u32, boards: usize, effective_h: f64) -> Option<Self> {
        let n = boards as f64;
        let cols = NonZeroUsize::new((f64::from(width) * n / effective_h).sqrt().ceil() as usize)?;
        let size = (u64::from(width) / cols.get() as u64) as f64;
        let rows = boards.div_ceil(cols.get());
        (size * rows as f64 <= effective_h).then_some(Self { size, cols })
    }

    /// Same with the roles of width and height swapped.
    fn fit_height(width: u32, boards: usize, effective_h: f64) -> Option<Self> {
        let n = boards as f64;
        let w = f64::from(width);
        let rows = NonZeroUsize::new((effective_h * n / w).sqrt().ceil() as usize)?;
        let size = effective_h / rows.get() as f64;
        let cols = NonZeroUsize::new(boards.div_ceil(rows.get()))?;
        (size * cols.get() as f64 <= w).then_some(Self { size, cols })
    }

    fn drawable(self) -> Option<Self> {
        (self.size > 2.0 * BOARD_MARGIN).then_some(self)
    }
}

/// Picks the largest board size for `boards` copies of `bounds` in `viewport`.
///
/// Only two candidates are tried: one driven by the viewport width and one by
/// its height, measured in units where a board is square.
pub fn pack(
    viewport: Viewport,
    boards: usize,
    bounds: &BoundingBox,
) -> Result<PackingResult, PackError> {
    if viewport.is_degenerate() {
        return Err(PackError::DegenerateViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if boards == 0 {
        return Err(PackError::NoBoards);
    }
    let (bw, bh) = (bounds.width(), bounds.height());
    if !(bw > 0.0 && bh > 0.0) || !bw.is_finite() || !bh.is_finite() {
        return Err(PackError::DegenerateBounds);
    }

    let vw = f64::from(viewport.width);
    let vh = f64::from(viewport.height);
    let effective_h = vh * bw / bh;

    let by_width = Candidate::fit_width(viewport.width, boards, effective_h).and_then(Candidate::drawable);
    let by_height = Candidate::fit_height(viewport.width, boards, effective_h).and_then(Candidate::drawable);
    let best = match (by_width, by_height) {
        (Some(w), Some(h)) => {
            if w.size > h.size {
                w
            } else {
                h
            }
        }
        (Some(w), None) => w,
        (None, Some(h)) => h,
        (None, None) => {
            return Err(PackError::NoFit {
                boards,
                width: viewport.width,
                height: viewport.height,
            });
        }
    };

    let col_width = best.size;
    let cols = best.cols;
    let rows = boards.div_ceil(cols.get());
    let row_height = col_width * bh / bw;
    let scale = (col_width - 2.0 * BOARD_MARGIN) / bw;
    Ok(PackingResult {
        cell_pixel_size: col_width,
        boards_per_row: cols,
        rows,
        row_height,
        scale,
        offset_x: BOARD_MARGIN + (vw - col_width * cols.get() as f64) * 0.5 - scale * bounds.xmin,
        offset_y: BOARD_MARGIN + (vh - row_height * rows as f64) * 0.5 - scale * bounds.ymin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_square(side: f64) -> BoundingBox {
        BoundingBox {
            xmin: 0.0,
            xmax: side,
            ymin: 0.0,
            ymax: side,
        }
    }

    fn fits(p: &PackingResult, vp: Viewport, boards: usize) {
        let cols = p.boards_per_row.get();
        assert_eq!(p.rows, boards.div_ceil(cols));
        assert!(p.col_width() * cols as f64 <= f64::from(vp.width) + 1e-9);
        assert!(p.row_height * p.rows as f64 <= f64::from(vp.height) + 1e-9);
    }

    #[test]
    fn single_square_board_fills_the_short_side() {
        let bounds = unit_square(8.0);
        let vp = Viewport::new(800, 600);
        let p = pack(vp, 1, &bounds).unwrap();
        assert_eq!(p.boards_per_row.get(), 1);
        assert_eq!(p.rows, 1);
        assert_abs_diff_eq!(p.col_width(), 600.0);
        assert_abs_diff_eq!(p.row_height, 600.0);
        assert_abs_diff_eq!(p.scale, (600.0 - 8.0) / 8.0);
        assert_abs_diff_eq!(p.offset_x, 4.0 + 100.0);
        assert_abs_diff_eq!(p.offset_y, 4.0);
    }

    #[test]
    fn tiny_viewport_is_unresolvable() {
        let err = pack(Viewport::new(10, 10), 100, &unit_square(1.0)).unwrap_err();
        assert_eq!(
            err,
            PackError::NoFit {
                boards: 100,
                width: 10,
                height: 10
            }
        );
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let b = unit_square(1.0);
        assert!(matches!(
            pack(Viewport::new(0, 600), 1, &b),
            Err(PackError::DegenerateViewport { .. })
        ));
        assert!(matches!(
            pack(Viewport::new(800, 0), 1, &b),
            Err(PackError::DegenerateViewport { .. })
        ));
        assert_eq!(pack(Viewport::new(800, 600), 0, &b), Err(PackError::NoBoards));
        let flat = BoundingBox {
            xmin: 0.0,
            xmax: 4.0,
            ymin: 1.0,
            ymax: 1.0,
        };
        assert_eq!(pack(Viewport::new(800, 600), 1, &flat), Err(PackError::DegenerateBounds));
    }

    #[test]
    fn width_candidate_uses_whole_pixels() {
        // One row of four slots, each floor(1001 / 4) px wide.
        let p = pack(Viewport::new(1001, 400), 4, &unit_square(1.0)).unwrap();
        fits(&p, Viewport::new(1001, 400), 4);
        assert_eq!(p.boards_per_row.get(), 4);
        assert_abs_diff_eq!(p.col_width(), 250.0);
    }

    #[test]
    fn many_boards_never_overflow() {
        let shapes = [
            unit_square(8.0),
            BoundingBox {
                xmin: -2.0,
                xmax: 6.0,
                ymin: 0.5,
                ymax: 3.5,
            },
            BoundingBox {
                xmin: 0.0,
                xmax: 3.0,
                ymin: -1.0,
                ymax: 9.0,
            },
        ];
        for bounds in &shapes {
            for (w, h) in [(800, 600), (1920, 1080), (333, 1000), (640, 64), (97, 89)] {
                let vp = Viewport::new(w, h);
                for boards in 1..=40 {
                    if let Ok(p) = pack(vp, boards, bounds) {
                        fits(&p, vp, boards);
                        assert!(p.scale > 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn larger_viewport_keeps_or_grows_boards() {
        let bounds = unit_square(8.0);
        for boards in [1, 2, 3, 4, 6, 9] {
            let small = pack(Viewport::new(640, 480), boards, &bounds).unwrap();
            let large = pack(Viewport::new(1280, 960), boards, &bounds).unwrap();
            assert!(large.col_width() >= small.col_width());
        }
    }

    #[test]
    fn grid_is_centered() {
        let vp = Viewport::new(900, 300);
        let p = pack(vp, 2, &unit_square(1.0)).unwrap();
        let used_w = p.col_width() * p.boards_per_row.get() as f64;
        let used_h = p.row_height * p.rows as f64;
        assert_abs_diff_eq!(p.offset_x - BOARD_MARGIN, (900.0 - used_w) / 2.0);
        assert_abs_diff_eq!(p.offset_y - BOARD_MARGIN, (300.0 - used_h) / 2.0);
    }

    #[test]
    fn offsets_cancel_the_bounds_origin() {
        let bounds = BoundingBox {
            xmin: -3.0,
            xmax: 1.0,
            ymin: 2.0,
            ymax: 6.0,
        };
        let p = pack(Viewport::new(400, 400), 1, &bounds).unwrap();
        assert_abs_diff_eq!(bounds.xmin * p.scale + p.offset_x, BOARD_MARGIN);
        assert_abs_diff_eq!(bounds.ymin * p.scale + p.offset_y, BOARD_MARGIN);
        assert_abs_diff_eq!(bounds.xmax * p.scale + p.offset_x, 400.0 - BOARD_MARGIN);
    }

    #[test]
    fn board_offsets_walk_rows() {
        let p = pack(Viewport::new(600, 600), 4, &unit_square(1.0)).unwrap();
        assert_eq!(p.boards_per_row.get(), 2);
        assert_eq!(p.board_offset(0), (0.0, 0.0));
        assert_eq!(p.board_offset(1), (300.0, 0.0));
        assert_eq!(p.board_offset(3), (300.0, 300.0));
    }
}
