//! Whole-artwork generation: config in, [`Pattern`] out.
//!
//! A pattern is generated from scratch on every call and never mutated
//! afterwards. The caller holds the value and passes it to the exporters;
//! there is no "current pattern" kept anywhere in the crate.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::{Color, PaletteKind, Palette};
use crate::error::MandalaError;
use crate::geometry::{union_bounds, Point, Shape};
use crate::layer::{build_layer, LayerParams, MAX_DEPTH, MIN_RADIUS};
use crate::rng::Rng;
use crate::shapes::{complex_shape, interlace, regular_polygon, star};

/// Base polygon side counts for ring styles: hexagon, octagon, dodecagon.
const RING_SIDES: [usize; 3] = [6, 8, 12];

/// Ring stars scale by up to this factor, so rings leave this much headroom.
const STAR_SCALE_MAX: f64 = 1.2;

/// Overall layout of a generated pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternStyle {
    /// Recursive rings of filled polygons, one recursion tree per layer
    Nested,
    /// Concentric outlined polygon + jittered star per layer
    Rings,
    /// Concentric interlaced polygon + three-tier star per layer
    Woven,
}

impl PatternStyle {
    pub fn all() -> &'static [PatternStyle] {
        &[PatternStyle::Nested, PatternStyle::Rings, PatternStyle::Woven]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternStyle::Nested => "nested",
            PatternStyle::Rings => "rings",
            PatternStyle::Woven => "woven",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PatternStyle::Nested => "filled polygons recursively ringed around the center",
            PatternStyle::Rings => "outlined polygon and star per ring",
            PatternStyle::Woven => "interlaced polygon and three-tier star per ring",
        }
    }

    pub fn from_name(name: &str) -> Option<PatternStyle> {
        Self::all().iter().copied().find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

/// Whether a layer's shapes are filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Paint {
    Fill,
    Stroke,
}

/// Tunables for one generated pattern.
///
/// Defaults match the classic 800px, three-layer nested mandala.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Canvas width and height
    pub size: f64,
    /// Number of layers
    pub layers: usize,
    /// Shapes per ring (nested style)
    pub shape_count: usize,
    /// Sides per shape (nested style)
    pub shape_sides: usize,
    /// Recursion depth per layer (nested style)
    pub depth: usize,
    pub style: PatternStyle,
    pub palette: PaletteKind,
    /// CSS colors for the custom palette
    pub colors: Vec<String>,
    /// Stroke/outline width for filled layers
    pub line_width: f64,
    /// Star inner radius as a fraction of the outer radius
    pub inner_ratio: f64,
    /// Maximum shift applied to `inner_ratio` per star
    pub star_jitter: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            size: 800.0,
            layers: 3,
            shape_count: 50,
            shape_sides: 3,
            depth: 2,
            style: PatternStyle::Nested,
            palette: PaletteKind::Viridis,
            colors: Vec::new(),
            line_width: 1.0,
            inner_ratio: 0.5,
            star_jitter: 0.1,
        }
    }
}

impl PatternConfig {
    /// Load a config from YAML (`.yaml`/`.yml`) or JSON (`.json`).
    ///
    /// Missing fields fall back to [`PatternConfig::default`].
    pub fn load(path: &Path) -> Result<PatternConfig, MandalaError> {
        let content = fs::read_to_string(path).map_err(|e| MandalaError::io(path, e))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let parsed = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
            other => Err(format!("unsupported config extension '{}' (use .yaml, .yml or .json)", other)),
        };

        parsed.map_err(|message| MandalaError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Check every value a generator would otherwise assert on.
    pub fn validate(&self) -> Result<(), MandalaError> {
        let fail = |msg: String| Err(MandalaError::InvalidConfig(msg));

        if !(self.size.is_finite() && self.size > 0.0) {
            return fail(format!("size must be positive, got {}", self.size));
        }
        if self.layers == 0 {
            return fail("layers must be at least 1".to_string());
        }
        if self.shape_count == 0 {
            return fail("shape_count must be at least 1".to_string());
        }
        if self.shape_sides < 3 {
            return fail(format!("shape_sides must be at least 3, got {}", self.shape_sides));
        }
        if self.depth > MAX_DEPTH {
            return fail(format!("depth must be at most {}, got {}", MAX_DEPTH, self.depth));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return fail(format!("line_width must be positive, got {}", self.line_width));
        }
        if !(self.inner_ratio > 0.0 && self.inner_ratio <= 1.0) {
            return fail(format!("inner_ratio must be in (0, 1], got {}", self.inner_ratio));
        }
        if !(0.0..0.5).contains(&self.star_jitter) {
            return fail(format!("star_jitter must be in [0, 0.5), got {}", self.star_jitter));
        }
        if self.palette == PaletteKind::Custom && self.colors.is_empty() {
            return fail("custom palette needs at least one color".to_string());
        }
        if self.style == PatternStyle::Nested {
            // Either of these leaves every layer empty
            if self.depth == 0 {
                return fail("nested style needs depth of at least 1".to_string());
            }
            if self.size / 2.0 < MIN_RADIUS {
                return fail(format!(
                    "nested style needs size of at least {}, got {}",
                    MIN_RADIUS * 2.0,
                    self.size
                ));
            }
            let estimate = nested_shape_estimate(self.shape_count, self.depth);
            if estimate > MAX_NESTED_SHAPES {
                return fail(format!(
                    "shape_count {} at depth {} would place up to {} shapes per layer (limit {})",
                    self.shape_count, self.depth, estimate, MAX_NESTED_SHAPES
                ));
            }
        }
        Ok(())
    }

    /// Center of the canvas.
    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }
}

/// Shapes sharing one color and line style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    /// Position in the pattern, 0 = drawn first
    pub index: usize,
    pub color: Color,
    pub line_width: f64,
    pub paint: Paint,
    pub shapes: Vec<Shape>,
}

impl Layer {
    pub fn point_count(&self) -> usize {
        self.shapes.iter().map(Shape::len).sum()
    }

    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        union_bounds(self.shapes.iter().filter_map(Shape::bounding_box))
    }
}

/// One complete generated artwork.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    /// Canvas width and height; every document uses `0 0 size size`
    pub size: f64,
    /// Seed the pattern was generated from
    pub seed: u64,
    pub style: PatternStyle,
    pub layers: Vec<Layer>,
}

impl Pattern {
    /// Generate a fresh pattern. Same config and seed, same pattern.
    pub fn generate(config: &PatternConfig, seed: u64) -> Result<Pattern, MandalaError> {
        config.validate()?;

        let mut rng = Rng::new(seed);
        let palette = Palette::build(config.palette, &config.colors, config.layers, &mut rng)?;

        let layers = (0..config.layers)
            .map(|i| {
                let shapes = match config.style {
                    PatternStyle::Nested => nested_shapes(config, &mut rng),
                    PatternStyle::Rings => ring_shapes(config, i, &mut rng),
                    PatternStyle::Woven => woven_shapes(config, i, &mut rng),
                };
                let (paint, line_width) = match config.style {
                    PatternStyle::Nested => (Paint::Fill, config.line_width),
                    PatternStyle::Rings | PatternStyle::Woven => (Paint::Stroke, ring_line_width(i)),
                };
                let layer = Layer {
                    name: format!("layer_{}", i + 1),
                    index: i,
                    color: palette.color_for(i),
                    line_width,
                    paint,
                    shapes,
                };
                debug!(
                    "{}: {} shapes, {} points, color {}",
                    layer.name,
                    layer.shapes.len(),
                    layer.point_count(),
                    layer.color.to_hex()
                );
                layer
            })
            .collect();

        Ok(Pattern {
            size: config.size,
            seed,
            style: config.style,
            layers,
        })
    }

    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(|l| l.shapes.len()).sum()
    }

    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        union_bounds(self.layers.iter().filter_map(Layer::bounding_box))
    }
}

/// Outline width for ring layer `index`: thinner towards the outside.
pub fn ring_line_width(index: usize) -> f64 {
    if index < 7 {
        1.0 - 0.1 * index as f64
    } else {
        0.3
    }
}

/// Most shapes a single nested layer may ask for.
pub const MAX_NESTED_SHAPES: usize = 250_000;

/// `count + count^2 + ... + count^depth`, saturating. An upper bound on
/// the recursion's output, since `MIN_RADIUS` can only cut it short.
fn nested_shape_estimate(count: usize, depth: usize) -> usize {
    let mut ring = 1usize;
    let mut total = 0usize;
    for _ in 0..depth.min(MAX_DEPTH) {
        ring = ring.saturating_mul(count);
        total = total.saturating_add(ring);
    }
    total
}

fn nested_shapes(config: &PatternConfig, rng: &mut Rng) -> Vec<Shape> {
    let params = LayerParams {
        center: config.center(),
        max_radius: config.size / 2.0,
        shape_count: config.shape_count,
        shape_sides: config.shape_sides,
        depth: config.depth,
        rotation: rng.next_angle(),
    };
    build_layer(&params, rng)
}

/// Radius of ring `index`, leaving room for the largest star scale.
fn ring_radius(config: &PatternConfig, index: usize) -> f64 {
    let outermost = config.size / 2.0 / STAR_SCALE_MAX;
    outermost * (index + 1) as f64 / config.layers as f64
}

fn jitter_amount(config: &PatternConfig) -> Option<f64> {
    (config.star_jitter > 0.0).then_some(config.star_jitter)
}

fn ring_shapes(config: &PatternConfig, index: usize, rng: &mut Rng) -> Vec<Shape> {
    let center = config.center();
    let sides = *rng.choose(&RING_SIDES);
    let radius = ring_radius(config, index);
    let star_radius = radius * rng.next_range(0.8, STAR_SCALE_MAX);
    let star_points = rng.next_inclusive(5, 12);

    let base = regular_polygon(sides, radius, center, 0.0);
    let jitter = jitter_amount(config).map(|amount| (rng, amount));
    let burst = star(center, star_radius, star_points, config.inner_ratio, jitter);
    vec![base, burst]
}

fn woven_shapes(config: &PatternConfig, index: usize, rng: &mut Rng) -> Vec<Shape> {
    let center = config.center();
    let sides = *rng.choose(&RING_SIDES);
    let radius = ring_radius(config, index);
    let outer = radius * rng.next_range(0.8, STAR_SCALE_MAX);
    let tips = rng.next_inclusive(5, 12);
    let inner = outer * config.inner_ratio;

    let base = interlace(&Shape::new(regular_polygon(sides, radius, center, 0.0).closed_points()));
    let knot = complex_shape(tips, inner, outer, center, rng.next_angle());
    vec![base, knot]
}
