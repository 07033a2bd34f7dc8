//! Save command: per-layer SVG files in a timestamped directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use mandala::{save_pattern, SaveOptions};

use super::common::{has_flag, parse_pattern_args, reject_unknown, take_value};

/// `mandala_layers_<YYYYmmdd-HHMMSS>` in the current directory.
pub fn timestamped_dir() -> PathBuf {
    PathBuf::from(format!("mandala_layers_{}", Local::now().format("%Y%m%d-%H%M%S")))
}

/// Execute the save command.
pub fn cmd_save(args: &[String]) -> Result<()> {
    if has_flag(args, &["-h", "--help"]) {
        print_usage();
        return Ok(());
    }

    let parsed = parse_pattern_args(args)?;
    reject_unknown(&parsed.rest, &["--no-combined", "--by-color"], &["--out"])?;

    let dir = match take_value(&parsed.rest, &["--out"])? {
        Some(dir) => PathBuf::from(dir),
        None => timestamped_dir(),
    };
    let options = SaveOptions {
        combined: !has_flag(&parsed.rest, &["--no-combined"]),
        by_color: has_flag(&parsed.rest, &["--by-color"]),
    };

    let pattern = parsed.generate()?;
    let report = save_pattern(&pattern, &dir, &options)
        .with_context(|| format!("saving pattern to {}", dir.display()))?;

    eprintln!("Saved {} files to {}", report.file_count(), report.dir.display());
    println!("{}", report.dir.display());
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: mandala save [pattern options] [--out <dir>] [--no-combined] [--by-color]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out <dir>        Output directory (default: mandala_layers_<timestamp>)");
    eprintln!("  --no-combined      Skip the combined mandala.svg");
    eprintln!("  --by-color         Also write one color_<hex>.svg per layer color");
    eprintln!();
    eprintln!("Writes layer_1.svg .. layer_<n>.svg and prints the directory on stdout.");
}
