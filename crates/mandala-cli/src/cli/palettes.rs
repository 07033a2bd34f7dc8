//! List the available styles and palettes.

use mandala::{PaletteKind, PatternStyle};

pub fn cmd_palettes() {
    println!("Styles:");
    for style in PatternStyle::all() {
        println!("  {:<14} {}", style.name(), style.description());
    }
    println!();
    println!("Palettes:");
    for palette in PaletteKind::all() {
        println!("  {:<14} {}", palette.name(), palette.description());
    }
}
