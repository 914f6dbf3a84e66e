use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::RgbaImage;

use crate::record::FrameRecord;

/// Writes `images/{id:06}.png` files and one `frames.jsonl` line per frame.
pub struct FrameWriter {
    out_dir: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FrameWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            writer: None,
        }
    }

    pub fn init_output(&mut self) -> anyhow::Result<()> {
        let dir = self.out_dir.join("images");
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        if self.writer.is_none() {
            let path = self.out_dir.join("frames.jsonl");
            let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            self.writer = Some(BufWriter::with_capacity(1 << 20, file));
        }
        Ok(())
    }

    pub fn image_rel(id: u32) -> String {
        format!("images/{id:06}.png")
    }

    pub fn write_record(&mut self, record: &FrameRecord<'_>) -> anyhow::Result<()> {
        let json = serde_json::to_string(record)?;
        if let Some(ref mut writer) = self.writer {
            writeln!(writer, "{json}")?;
        }
        Ok(())
    }

    pub fn save_png(&self, img: &RgbaImage, id: u32) -> anyhow::Result<()> {
        let out_path = self.out_dir.join(Self::image_rel(id));
        img.save(&out_path)
            .with_context(|| format!("writing {}", out_path.display()))
    }

    pub fn finalize_output(&mut self) -> anyhow::Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.into_inner()?.sync_all()?;
        }
        Ok(())
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl Drop for FrameWriter {
    fn drop(&mut self) {
        let _ = self.finalize_output();
    }
}
