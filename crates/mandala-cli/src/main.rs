//! mandala - generate and export procedural mandala patterns
//!
//! Usage:
//!   mandala generate [options]          Print a pattern as SVG (or JSON)
//!   mandala save [options]              Write layer_<n>.svg files
//!   mandala preview -o <png> [options]  Rasterize a pattern to PNG
//!   mandala palettes                    List styles and palettes

mod cli;

use std::env;

use cli::{cmd_generate, cmd_palettes, cmd_preview, cmd_save};

fn print_usage(prog: &str) {
    eprintln!("mandala - procedural mandala patterns as SVG");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} generate [options] [-o <file>] [--json]", prog);
    eprintln!("  {} save [options] [--out <dir>] [--no-combined] [--by-color]", prog);
    eprintln!("  {} preview [options] -o <file.png> [--scale <n>]", prog);
    eprintln!("  {} palettes", prog);
    eprintln!();
    eprintln!("Pattern options:");
    eprintln!("  --config <file>        Load settings from .yaml/.yml/.json");
    eprintln!("  --seed <n>             Random seed (default: random)");
    eprintln!("  --style <name>         nested, rings, woven (default: nested)");
    eprintln!("  --palette <name>       viridis, harmony, complementary, custom");
    eprintln!("  --colors <c1,c2,...>   CSS colors, implies --palette custom");
    eprintln!("  --size <n>             Canvas size (default: 800)");
    eprintln!("  --layers <n>           Number of layers (default: 3)");
    eprintln!("  --shapes <n>           Shapes per ring (default: 50)");
    eprintln!("  --sides <n>            Sides per shape (default: 3)");
    eprintln!("  --depth <n>            Recursion depth (default: 2, max: {})", mandala::MAX_DEPTH);
    eprintln!("  --line-width <n>       Outline width of filled layers (default: 1)");
    eprintln!();
    eprintln!("Logging goes to stderr; set RUST_LOG=debug for per-layer detail.");
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    init_logging();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let rest = &args[2..];
    let result = match args[1].as_str() {
        "generate" => cmd_generate(rest),
        "save" => cmd_save(rest),
        "preview" => cmd_preview(rest),
        "palettes" => {
            cmd_palettes();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage(&args[0]);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
