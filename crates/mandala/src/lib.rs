//! # mandala
//!
//! Procedural mandala generation: regular polygons, stars and interlaced
//! shapes, recursively ringed into layers and exported as SVG.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! The data flows one way: `layer` drives `shapes`, `pattern` drives `layer`,
//! and `svg` only ever reads a finished `Pattern`.

pub mod color;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod pattern;
pub mod rng;
pub mod shapes;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use color::{Color, Palette, PaletteKind};
pub use error::MandalaError;
pub use geometry::{Point, Shape};
pub use layer::{build_layer, build_layer_nodes, LayerNode, LayerParams, MAX_DEPTH, MIN_RADIUS};
pub use pattern::{Layer, Paint, Pattern, PatternConfig, PatternStyle, MAX_NESTED_SHAPES};
pub use rng::Rng;
pub use shapes::{complex_shape, interlace, regular_polygon, star};
pub use svg::{
    color_group_to_svg, color_groups, layer_to_svg, load_svg, pattern_to_svg, read_svg, save_pattern,
    ColorGroup, SaveOptions, SaveReport, SvgDocument, SvgError, SvgPolygon, COMBINED_FILE,
};
