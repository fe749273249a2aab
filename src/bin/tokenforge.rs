//! Command-line front end: decode an image, render a token, write it out.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use tokenforge::{BackgroundMode, FillMode, SourceImage, TokenLayout, export, render};

#[derive(Parser, Debug)]
#[command(name = "tokenforge", version, about = "Render a square token image")]
struct Args {
    /// Source image (PNG or JPEG).
    input: PathBuf,

    /// Directory to write the token into (defaults to the current directory).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Square output size in pixels.
    #[arg(long, default_value_t = 200)]
    size: u32,

    /// Fill mode: fit or cover.
    #[arg(long, default_value = "fit")]
    mode: String,

    /// Numpad anchor position (1-9, 5 = center).
    #[arg(long, default_value_t = 5)]
    anchor: u8,

    /// Scale percentage (0-400).
    #[arg(long, default_value_t = 100)]
    scale: i32,

    /// Horizontal offset in pixels.
    #[arg(long, default_value_t = 0)]
    offset_x: i32,

    /// Vertical offset in pixels.
    #[arg(long, default_value_t = 0)]
    offset_y: i32,

    /// Disable the circular mask.
    #[arg(long)]
    no_mask: bool,

    /// Flatten onto an opaque background (exports JPEG instead of PNG).
    #[arg(long)]
    opaque: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let fill_mode = match args.mode.as_str() {
        "fit" => FillMode::Fit,
        "cover" => FillMode::Cover,
        other => anyhow::bail!("unknown fill mode {other:?} (expected fit or cover)"),
    };
    let background = if args.opaque {
        BackgroundMode::Guess
    } else {
        BackgroundMode::Transparent
    };

    let layout = TokenLayout::new(fill_mode, args.size)
        .numpad_anchor(args.anchor)
        .scale_percent(args.scale)
        .offset(args.offset_x, args.offset_y)
        .mask(!args.no_mask)
        .background(background);

    let source = SourceImage::open(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let canvas = render(&source, &layout)?;
    let artifact = export(&canvas, background)?;

    let path = args
        .out_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join(artifact.file_name());
    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}
