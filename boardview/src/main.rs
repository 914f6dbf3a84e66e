use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use layout::BoardConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{io::FrameWriter, render::RenderCfg, sweep::Sweep};

mod glyph;
mod io;
mod record;
mod render;
mod sweep;

/// Render packed board layouts to PNG frames.
#[derive(Parser, Debug)]
#[command(name = "boardview", version)]
struct Args {
    /// Board configuration (JSON); defaults to one 8x8 chessboard.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Overrides `board_count` from the configuration.
    #[arg(long)]
    boards: Option<usize>,
    /// Extra frames at random viewport sizes.
    #[arg(long, default_value_t = 0)]
    frames: u32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value = "frames")]
    out: PathBuf,
    /// Overlay glyph image; overlays are skipped when missing.
    #[arg(long)]
    glyph: Option<PathBuf>,
}

fn load_board(args: &Args) -> anyhow::Result<BoardConfig> {
    let mut board = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => BoardConfig::default(),
    };
    if let Some(n) = args.boards {
        board.board_count = n;
    }
    Ok(board)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let board = load_board(&args)?;
    let cfg = RenderCfg {
        out_dir: args.out,
        glyph_path: args.glyph,
        width: args.width,
        height: args.height,
        frames: args.frames,
        seed: args.seed,
    };
    info!(boards = board.board_count, tiling = %board.tiling, "starting sweep");

    let glyph = glyph::load(cfg.glyph_path.as_deref());
    let mut out = FrameWriter::new(&cfg.out_dir);
    out.init_output()?;
    let written = Sweep::new(&cfg, &board, glyph).run(&mut out)?;
    out.finalize_output()?;

    info!(frames = written, out = %out.out_dir().display(), "done");
    Ok(())
}
