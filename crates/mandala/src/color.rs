//! Layer colors and the palettes they are drawn from.
//!
//! Color-space work (HSV conversion, CSS parsing) is delegated to
//! `csscolorparser`; this module only decides which hues a pattern gets.

use serde::{Deserialize, Serialize};

use crate::error::MandalaError;
use crate::rng::Rng;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from hue (in turns, wrapped into [0, 1)), saturation and value.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let degrees = hue.rem_euclid(1.0) * 360.0;
        let css = csscolorparser::Color::from_hsva(degrees as _, saturation as _, value as _, 1.0);
        Self::from_rgba8(css.to_rgba8())
    }

    /// Parse any CSS color string (`#e63946`, `rebeccapurple`, `hsl(...)`).
    pub fn parse(input: &str) -> Result<Self, MandalaError> {
        csscolorparser::parse(input.trim())
            .map(|css| Self::from_rgba8(css.to_rgba8()))
            .map_err(|e| MandalaError::Color {
                input: input.to_string(),
                message: e.to_string(),
            })
    }

    fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, alpha goes to a separate opacity attribute.
    pub fn to_hex(&self) -> String {
        format!("#{}", self.hex_digits())
    }

    /// `rrggbb` without the hash, for file names.
    pub fn hex_digits(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Linear blend in RGB space, `t` in [0, 1].
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// How a pattern picks its layer colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    /// Evenly sampled along the viridis colormap, one color per layer
    Viridis,
    /// Random base hue (cyan excluded) with complementary and analogous hues
    Harmony,
    /// Random base hue and its complement
    Complementary,
    /// User-supplied CSS colors
    Custom,
}

impl PaletteKind {
    pub fn all() -> &'static [PaletteKind] {
        &[
            PaletteKind::Viridis,
            PaletteKind::Harmony,
            PaletteKind::Complementary,
            PaletteKind::Custom,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaletteKind::Viridis => "viridis",
            PaletteKind::Harmony => "harmony",
            PaletteKind::Complementary => "complementary",
            PaletteKind::Custom => "custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaletteKind::Viridis => "viridis colormap sampled once per layer",
            PaletteKind::Harmony => "base hue + complementary + two analogous hues (no cyan)",
            PaletteKind::Complementary => "base hue + its complement",
            PaletteKind::Custom => "colors given with --colors / `colors:`",
        }
    }

    pub fn from_name(name: &str) -> Option<PaletteKind> {
        Self::all().iter().copied().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Anchor colors of matplotlib's viridis at t = 0, 0.25, 0.5, 0.75, 1.
const VIRIDIS: [Color; 5] = [
    Color::rgb(0x44, 0x01, 0x54),
    Color::rgb(0x3b, 0x52, 0x8b),
    Color::rgb(0x21, 0x91, 0x8c),
    Color::rgb(0x5e, 0xc9, 0x62),
    Color::rgb(0xfd, 0xe7, 0x25),
];

/// An ordered list of colors; layer `i` takes `colors[i % len]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette for `layers` layers.
    ///
    /// `custom` is only read for [`PaletteKind::Custom`] and must then be
    /// non-empty.
    pub fn build(
        kind: PaletteKind,
        custom: &[String],
        layers: usize,
        rng: &mut Rng,
    ) -> Result<Palette, MandalaError> {
        let colors = match kind {
            PaletteKind::Viridis => viridis(layers.max(1)),
            PaletteKind::Harmony => harmony(rng),
            PaletteKind::Complementary => complementary(rng),
            PaletteKind::Custom => {
                if custom.is_empty() {
                    return Err(MandalaError::InvalidConfig(
                        "custom palette needs at least one color".to_string(),
                    ));
                }
                custom.iter().map(|c| Color::parse(c)).collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(Palette { colors })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for layer `index`, cycling through the palette.
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }
}

/// `n` colors sampled evenly from 0 to 1 (inclusive) along viridis.
pub fn viridis(n: usize) -> Vec<Color> {
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            sample_viridis(t)
        })
        .collect()
}

fn sample_viridis(t: f64) -> Color {
    let scaled = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    VIRIDIS[lo].lerp(&VIRIDIS[lo + 1], scaled - lo as f64)
}

/// Base hue from [0, 0.4] or [0.6, 1] so the palette never leans cyan.
fn pick_non_cyan_hue(rng: &mut Rng) -> f64 {
    // Ten evenly spaced candidates on each side of cyan
    let slot = rng.next_index(20);
    if slot < 10 {
        0.4 * slot as f64 / 9.0
    } else {
        0.6 + 0.4 * (slot - 10) as f64 / 9.0
    }
}

fn harmony(rng: &mut Rng) -> Vec<Color> {
    let hue = pick_non_cyan_hue(rng);
    [hue, hue + 0.5, hue + 1.0 / 12.0, hue - 1.0 / 12.0]
        .into_iter()
        .map(|h| Color::from_hsv(h, 1.0, 1.0))
        .collect()
}

fn complementary(rng: &mut Rng) -> Vec<Color> {
    let hue = rng.next_f64();
    vec![Color::from_hsv(hue, 1.0, 1.0), Color::from_hsv(hue + 0.5, 1.0, 1.0)]
}
