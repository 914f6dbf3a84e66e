pub mod board;
pub mod builder;
pub mod engine;
pub mod frame;
pub mod geom;
pub mod packer;

pub use board::{BoardConfig, BoardGeometry, BoardInstance, Cell, Tiling};
pub use engine::{LayoutEngine, PackState};
pub use frame::{Canvas, Frame, Rgb};
pub use geom::{BoundingBox, Point};
pub use packer::{PackError, PackingResult, Viewport};
