use std::collections::HashSet;

use tracing::debug;

use crate::{
    board::{BoardConfig, BoardGeometry, BoardInstance, Cell, Tiling},
    geom::{Point, Rotation, SQRT_3},
};

/// Corner offsets of a hex cell around its center, clockwise from upper right.
const HEX_CORNERS: [(f64, f64); 6] = [
    (0.5 / SQRT_3, -0.5),
    (1.0 / SQRT_3, 0.0),
    (0.5 / SQRT_3, 0.5),
    (-0.5 / SQRT_3, 0.5),
    (-1.0 / SQRT_3, 0.0),
    (-0.5 / SQRT_3, -0.5),
];

const SQUARE_CORNERS: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

struct SquareTiles {
    width: i32,
    height: i32,
}

impl SquareTiles {
    fn emit(&self, rot: &Rotation, excluded: &HashSet<(i32, i32)>, out: &mut Vec<Cell>) {
        for y in 0..self.height {
            for x in 0..self.width {
                if excluded.contains(&(x, y)) {
                    continue;
                }
                let (fx, fy) = (f64::from(x), f64::from(y));
                out.push(Cell {
                    coord: (x, y),
                    vertices: SQUARE_CORNERS
                        .iter()
                        .map(|&(dx, dy)| rot.apply(Point::new(fx + dx, fy + dy)))
                        .collect(),
                    centroid: rot.apply(Point::new(fx + 0.5, fy + 0.5)),
                    color_class: ((x + y) % 2) as u8,
                });
            }
        }
    }
}

struct HexTiles {
    x: i32,
    y: i32,
    z: i32,
}

impl HexTiles {
    fn emit(&self, rot: &Rotation, excluded: &HashSet<(i32, i32)>, out: &mut Vec<Cell>) {
        for a in 0..self.y.saturating_add(self.z) - 1 {
            for b in 0..self.x.saturating_add(self.z) - 1 {
                if a - b >= self.y || b - a >= self.x || excluded.contains(&(a, b)) {
                    continue;
                }
                let cx = f64::from(b - a) * 0.5 * SQRT_3;
                let cy = f64::from(a + b) * 0.5;
                out.push(Cell {
                    coord: (a, b),
                    vertices: HEX_CORNERS
                        .iter()
                        .map(|&(dx, dy)| rot.apply(Point::new(cx + dx, cy + dy)))
                        .collect(),
                    centroid: rot.apply(Point::new(cx, cy)),
                    color_class: ((a + b) % 3) as u8,
                });
            }
        }
    }
}

// Concrete tilings
enum TilerEnum {
    Square(SquareTiles),
    Hex(HexTiles),
}

impl TilerEnum {
    fn emit(&self, rot: &Rotation, excluded: &HashSet<(i32, i32)>, out: &mut Vec<Cell>) {
        match self {
            TilerEnum::Square(t) => t.emit(rot, excluded, out),
            TilerEnum::Hex(t) => t.emit(rot, excluded, out),
        }
    }

    fn capacity_hint(&self) -> usize {
        let (w, h) = match self {
            TilerEnum::Square(t) => (t.width, t.height),
            TilerEnum::Hex(t) => (t.x.saturating_add(t.z) - 1, t.y.saturating_add(t.z) - 1),
        };
        usize::try_from(i64::from(w.max(0)) * i64::from(h.max(0))).unwrap_or(0)
    }
}

/// Builds rotated cell polygons for one board and replicates it.
pub struct CellGeometryBuilder {
    tiling: Tiling,
    tiler: TilerEnum,
    rotation: Rotation,
}

impl CellGeometryBuilder {
    pub fn new(config: &BoardConfig) -> Self {
        let dim = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Self {
            tiling: config.tiling,
            tiler: match config.tiling {
                Tiling::Orthogonal => TilerEnum::Square(SquareTiles {
                    width: dim(config.width),
                    height: dim(config.height),
                }),
                Tiling::Hex { x, y, z } => TilerEnum::Hex(HexTiles {
                    x: dim(x),
                    y: dim(y),
                    z: dim(z),
                }),
            },
            rotation: Rotation::new(config.rotation),
        }
    }

    /// Generates the canonical board once; its `board_count` copies share it.
    pub fn build(&self, board_count: usize, excluded: &HashSet<(i32, i32)>) -> BoardGeometry {
        let mut cells = Vec::with_capacity(self.tiler.capacity_hint());
        self.tiler.emit(&self.rotation, excluded, &mut cells);
        let geometry = BoardGeometry::new(self.tiling, BoardInstance { cells }, board_count);
        debug!(
            tiling = %self.tiling,
            cells = geometry.canonical().len(),
            boards = board_count,
            bounds = ?geometry.bounds(),
            "built board geometry"
        );
        geometry
    }
}

pub fn build(config: &BoardConfig) -> BoardGeometry {
    CellGeometryBuilder::new(config).build(config.board_count, &config.excluded)
}
