use tracing::{debug, warn};

use crate::{
    board::{BoardConfig, BoardGeometry},
    builder,
    frame::{self, BACKGROUND, Canvas, Frame},
    packer::{self, PackError, PackingResult, Viewport},
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PackState {
    /// No geometry or no usable viewport seen yet.
    #[default]
    Pending,
    /// Geometry has no cells or no boards; nothing to draw.
    Empty,
    Ready(PackingResult),
    Unresolvable(PackError),
}

/// Holds the last built geometry and the packing derived from it.
///
/// Configuration changes and resizes may arrive in any order; both end with
/// a repack, so the packing never lags behind the geometry it was made for.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    geometry: Option<BoardGeometry>,
    viewport: Option<Viewport>,
    packing: PackState,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &BoardConfig) -> Self {
        let mut engine = Self::new();
        engine.configure(config);
        engine
    }

    pub fn configure(&mut self, config: &BoardConfig) {
        self.geometry = Some(builder::build(config));
        self.repack();
    }

    /// Ignores viewports without area and keeps the last good layout.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_degenerate() {
            debug!(?viewport, "ignoring degenerate viewport");
            return;
        }
        self.viewport = Some(viewport);
        self.repack();
    }

    fn repack(&mut self) {
        let (Some(geometry), Some(viewport)) = (&self.geometry, self.viewport) else {
            self.packing = PackState::Pending;
            return;
        };
        let Some(bounds) = geometry.bounds() else {
            self.packing = PackState::Empty;
            return;
        };
        self.packing = match packer::pack(viewport, geometry.board_count(), &bounds) {
            Ok(result) => {
                debug!(
                    ?viewport,
                    cols = result.boards_per_row.get(),
                    rows = result.rows,
                    size = result.cell_pixel_size,
                    scale = result.scale,
                    "packed boards"
                );
                PackState::Ready(result)
            }
            Err(err) => {
                warn!(%err, "board layout unresolvable");
                PackState::Unresolvable(err)
            }
        };
    }

    pub fn geometry(&self) -> Option<&BoardGeometry> {
        self.geometry.as_ref()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn packing(&self) -> &PackState {
        &self.packing
    }

    /// Draw lists for the current layout, if it resolved.
    pub fn frame(&self) -> Option<Frame> {
        match (&self.geometry, &self.packing) {
            (Some(geometry), PackState::Ready(packing)) => Some(frame::compose(geometry, packing)),
            _ => None,
        }
    }

    /// Paints the current layout; without one the canvas is only cleared.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match self.frame() {
            Some(frame) => frame.paint(canvas),
            None => canvas.clear(BACKGROUND),
        }
    }
}
