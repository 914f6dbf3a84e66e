use std::path::PathBuf;

use image::{
    Rgba, RgbaImage,
    imageops::{self, FilterType},
};
use imageproc::{drawing::draw_polygon_mut, point::Point};
use layout::{Canvas, Rgb};

pub struct RenderCfg {
    pub out_dir: PathBuf,
    pub glyph_path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub frames: u32, // extra frames at random viewport sizes
    pub seed: u64,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("frames"),
            glyph_path: None,
            width: 800,
            height: 600,
            frames: 0,
            seed: 0,
        }
    }
}

fn rgba([r, g, b]: Rgb) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Drops repeated points so imageproc gets a proper open polygon.
///
/// Returns `None` when fewer than three distinct points remain.
pub fn polygon_points(points: &[(i32, i32)]) -> Option<Vec<Point<i32>>> {
    let mut out: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for &(x, y) in points {
        let p = Point::new(x, y);
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    (out.len() >= 3).then_some(out)
}

/// `RgbaImage` backed canvas; glyphs are skipped when no asset is loaded.
pub struct ImageCanvas<'a> {
    img: RgbaImage,
    glyph: Option<&'a RgbaImage>,
    scaled: Option<(u32, RgbaImage)>,
}

impl<'a> ImageCanvas<'a> {
    pub fn new(width: u32, height: u32, glyph: Option<&'a RgbaImage>) -> Self {
        Self {
            img: RgbaImage::new(width, height),
            glyph,
            scaled: None,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }
}

impl Canvas for ImageCanvas<'_> {
    fn clear(&mut self, color: Rgb) {
        let px = rgba(color);
        self.img.pixels_mut().for_each(|p| *p = px);
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Rgb) {
        if let Some(poly) = polygon_points(points) {
            draw_polygon_mut(&mut self.img, &poly, rgba(color));
        }
    }

    fn draw_glyph(&mut self, x: i32, y: i32, size: u32) {
        let Some(glyph) = self.glyph else {
            return;
        };
        if self.scaled.as_ref().is_none_or(|(s, _)| *s != size) {
            self.scaled = Some((size, imageops::resize(glyph, size, size, FilterType::Triangle)));
        }
        if let Some((_, scaled)) = &self.scaled {
            imageops::overlay(&mut self.img, scaled, i64::from(x), i64::from(y));
        }
    }
}
