//! CLI command implementations.
//!
//! - `generate` - build a pattern and print it as SVG or JSON
//! - `save` - build a pattern and write per-layer SVG files
//! - `preview` - rasterize a pattern to PNG
//! - `palettes` - list styles and palettes

pub mod common;
pub mod generate;
pub mod palettes;
pub mod preview;
pub mod save;

pub use generate::cmd_generate;
pub use palettes::cmd_palettes;
pub use preview::cmd_preview;
pub use save::cmd_save;
