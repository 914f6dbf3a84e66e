use image::RgbaImage;
use layout::{BoardConfig, LayoutEngine, PackState, Viewport};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, info};

use crate::{
    io::FrameWriter,
    record::FrameRecord,
    render::{ImageCanvas, RenderCfg},
};

/// Drives one engine through a series of viewport sizes, writing every frame.
pub struct Sweep<'a> {
    pub config: &'a RenderCfg,
    engine: LayoutEngine,
    tiling: String,
    glyph: Option<RgbaImage>,
}

impl<'a> Sweep<'a> {
    pub fn new(config: &'a RenderCfg, board: &BoardConfig, glyph: Option<RgbaImage>) -> Self {
        Self {
            config,
            engine: LayoutEngine::with_config(board),
            tiling: board.tiling.to_string(),
            glyph,
        }
    }

    /// The configured size, then `frames` seeded random resizes.
    ///
    /// Random sides may be zero, which exercises the degenerate path.
    pub fn viewports(&self) -> Vec<Viewport> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.config.seed);
        let max_w = self.config.width.saturating_mul(2);
        let max_h = self.config.height.saturating_mul(2);
        std::iter::once(Viewport::new(self.config.width, self.config.height))
            .chain((0..self.config.frames).map(|_| {
                Viewport::new(rng.random_range(0..=max_w), rng.random_range(0..=max_h))
            }))
            .collect()
    }

    /// Renders the current layout at the engine's viewport.
    pub fn render(&self) -> Option<RgbaImage> {
        let vp = self.engine.viewport()?;
        let mut canvas = ImageCanvas::new(vp.width, vp.height, self.glyph.as_ref());
        self.engine.render(&mut canvas);
        Some(canvas.into_image())
    }

    pub fn run(&mut self, out: &mut FrameWriter) -> anyhow::Result<u32> {
        let mut written = 0;
        for vp in self.viewports() {
            self.engine.resize(vp);
            if vp.is_degenerate() {
                debug!(?vp, "window has no area, nothing to repaint");
                continue;
            }
            let Some(img) = self.render() else {
                continue;
            };
            let frame = self.engine.frame();
            let packing = match self.engine.packing() {
                PackState::Ready(p) => Some(*p),
                _ => None,
            };
            let record = FrameRecord {
                schema: "v1",
                image: FrameWriter::image_rel(written),
                viewport: vp,
                tiling: self.tiling.clone(),
                packing,
                glyph_size: frame.as_ref().map_or(0, |f| f.glyph_size),
                boards: frame.as_ref().map(|f| f.boards.as_slice()).unwrap_or_default(),
            };
            out.save_png(&img, written)?;
            out.write_record(&record)?;
            info!(
                id = written,
                width = vp.width,
                height = vp.height,
                cells = frame.as_ref().map_or(0, |f| f.cell_count()),
                "frame written"
            );
            written += 1;
        }
        Ok(written)
    }
}
