use std::collections::HashSet;
use std::fmt;
use std::iter;
use std::sync::Arc;

use serde::Deserialize;

use crate::geom::{BoundingBox, Point};

/// Cell generation scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Tiling {
    #[default]
    Orthogonal,
    /// Hex board carved from a skewed axial grid by its three side lengths.
    Hex { x: u32, y: u32, z: u32 },
}

impl fmt::Display for Tiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tiling::Orthogonal => write!(f, "orthogonal"),
            Tiling::Hex { x, y, z } => write!(f, "hex {x}x{y}x{z}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub board_count: usize,
    pub width: u32,
    pub height: u32,
    pub tiling: Tiling,
    /// Global rotation in radians.
    pub rotation: f64,
    /// Blank squares, in `(x, y)` for orthogonal boards and `(a, b)` for hex.
    pub excluded: HashSet<(i32, i32)>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_count: 1,
            width: 8,
            height: 8,
            tiling: Tiling::Orthogonal,
            rotation: 0.0,
            excluded: HashSet::new(),
        }
    }
}

/// One polygon tile, already rotated into geometry space.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub coord: (i32, i32),
    pub vertices: Vec<Point>,
    pub centroid: Point,
    pub color_class: u8,
}

/// The cells of one playing surface, unique by coordinate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardInstance {
    pub(crate) cells: Vec<Cell>,
}

impl BoardInstance {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A canonical board shared by `board_count` instances.
///
/// All instances are translates of one another, so the cells are built once
/// and every instance points at the same allocation.
#[derive(Clone, Debug)]
pub struct BoardGeometry {
    tiling: Tiling,
    board: Arc<BoardInstance>,
    board_count: usize,
    bounds: Option<BoundingBox>,
}

impl BoardGeometry {
    pub(crate) fn new(tiling: Tiling, board: BoardInstance, board_count: usize) -> Self {
        let bounds = if board_count == 0 {
            None
        } else {
            BoundingBox::from_points(board.cells.iter().flat_map(|c| c.vertices.iter().copied()))
        };
        Self {
            tiling,
            board: Arc::new(board),
            board_count,
            bounds,
        }
    }

    pub fn tiling(&self) -> Tiling {
        self.tiling
    }

    pub fn board_count(&self) -> usize {
        self.board_count
    }

    pub fn canonical(&self) -> &BoardInstance {
        &self.board
    }

    pub fn boards(&self) -> impl Iterator<Item = &BoardInstance> + '_ {
        iter::repeat_n(&*self.board, self.board_count)
    }

    /// `None` when there is nothing to lay out.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }
}
