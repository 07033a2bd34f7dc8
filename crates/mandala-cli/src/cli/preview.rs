//! Preview command: rasterize a pattern with resvg.

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use resvg::usvg;
use tiny_skia::Pixmap;

use mandala::pattern_to_svg;

use super::common::{has_flag, parse_pattern_args, reject_unknown, take_value};

/// Execute the preview command.
pub fn cmd_preview(args: &[String]) -> Result<()> {
    if has_flag(args, &["-h", "--help"]) {
        print_usage();
        return Ok(());
    }

    let parsed = parse_pattern_args(args)?;
    reject_unknown(&parsed.rest, &[], &["-o", "--output", "--scale"])?;

    let Some(png_path) = take_value(&parsed.rest, &["-o", "--output"])? else {
        print_usage();
        bail!("preview needs an output file (-o <file.png>)");
    };
    let scale: f64 = match take_value(&parsed.rest, &["--scale"])? {
        Some(v) => v.parse().map_err(|_| anyhow!("invalid value for --scale: '{}'", v))?,
        None => 1.0,
    };
    if !(scale > 0.0) {
        bail!("--scale must be positive, got {}", scale);
    }

    let pattern = parsed.generate()?;
    let svg = pattern_to_svg(&pattern);
    render_png(&svg, png_path, pattern.size, scale)
}

/// Render SVG content to a PNG on a white background.
fn render_png(svg_content: &str, png_path: &str, size: f64, scale: f64) -> Result<()> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).context("parsing generated SVG")?;

    let side = (size * scale).ceil() as u32;
    let mut pixmap =
        Pixmap::new(side, side).ok_or_else(|| anyhow!("could not create a {}x{} pixmap", side, side))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .with_context(|| format!("writing {}", png_path))?;
    info!("Wrote: {} ({}x{})", png_path, side, side);
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: mandala preview [pattern options] -o <file.png> [--scale <n>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    PNG file to write (required)");
    eprintln!("  --scale <n>            Pixels per canvas unit (default: 1.0)");
}
