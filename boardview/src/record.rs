use layout::{PackingResult, Viewport, frame::BoardFrame};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct FrameRecord<'a> {
    pub schema: &'static str,
    pub image: String,
    pub viewport: Viewport,
    pub tiling: String,
    /// `null` when the layout did not resolve for this viewport.
    pub packing: Option<PackingResult>,
    pub glyph_size: u32,
    pub boards: &'a [BoardFrame],
}
