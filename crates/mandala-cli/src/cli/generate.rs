//! Generate command: one pattern to stdout or a file.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;

use mandala::pattern_to_svg;

use super::common::{has_flag, parse_pattern_args, reject_unknown, take_value};

/// Execute the generate command.
pub fn cmd_generate(args: &[String]) -> Result<()> {
    if has_flag(args, &["-h", "--help"]) {
        print_usage();
        return Ok(());
    }

    let parsed = parse_pattern_args(args)?;
    reject_unknown(&parsed.rest, &["--json"], &["-o", "--output"])?;
    let output_path = take_value(&parsed.rest, &["-o", "--output"])?;
    let json = has_flag(&parsed.rest, &["--json"]);

    let pattern = parsed.generate()?;

    let content = if json {
        serde_json::to_string_pretty(&pattern).context("serializing pattern")?
    } else {
        pattern_to_svg(&pattern)
    };

    match output_path {
        Some(path) if path != "-" => {
            fs::write(path, &content).with_context(|| format!("writing {}", path))?;
            info!("Wrote: {}", path);
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: mandala generate [pattern options] [-o <file>] [--json]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  --json                 Emit the pattern as JSON instead of SVG");
    eprintln!();
    eprintln!("Run `mandala help` for the shared pattern options.");
}
