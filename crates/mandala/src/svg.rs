//! SVG export of patterns, and reading exported documents back.
//!
//! ## Writing
//!
//! Every document shares the pattern's canvas (`viewBox="0 0 size size"`).
//! Each Shape becomes one `<polygon>` whose `points` list is exactly the
//! Shape's point sequence, so point counts survive a save/load cycle.
//!
//! ## Reading
//!
//! [`read_svg`] first hands the document to usvg, which resolves it the same
//! way a renderer would; if usvg rejects it, so do we. Polygons and their
//! group ids are then pulled out with a streaming quick-xml pass, since usvg
//! rewrites `<polygon>` into generic paths and we want the raw point lists.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::color::Color;
use crate::error::MandalaError;
use crate::geometry::{Point, Shape};
use crate::pattern::{Layer, Paint, Pattern};

/// File name of the combined document inside a save directory.
pub const COMBINED_FILE: &str = "mandala.svg";

/// Error type for reading SVG documents.
#[derive(Debug)]
pub enum SvgError {
    /// usvg could not resolve the document
    ParseError(String),
    /// The XML stream itself is malformed
    Xml(String),
    /// A `points` attribute had an odd number of coordinates
    Points(String),
}

impl std::fmt::Display for SvgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SvgError::ParseError(msg) => write!(f, "SVG parse error: {}", msg),
            SvgError::Xml(msg) => write!(f, "SVG XML error: {}", msg),
            SvgError::Points(raw) => write!(f, "malformed polygon points: {}", raw),
        }
    }
}

impl std::error::Error for SvgError {}

// ============================================================================
// WRITING
// ============================================================================

fn document_header(svg: &mut String, size: f64, title: &str) {
    let _ = write!(
        svg,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">
  <title>{title}</title>
"#
    );
}

fn paint_attributes(color: &Color, paint: Paint, line_width: f64) -> String {
    let hex = color.to_hex();
    let mut attrs = match paint {
        Paint::Fill => format!(
            r#"fill="{hex}" stroke="{hex}" stroke-width="{line_width}" stroke-linejoin="round""#
        ),
        Paint::Stroke => format!(
            r#"fill="none" stroke="{hex}" stroke-width="{line_width}" stroke-linejoin="round""#
        ),
    };
    if color.a < 255 {
        let _ = write!(attrs, r#" opacity="{:.3}""#, color.opacity());
    }
    attrs
}

fn push_shape(svg: &mut String, shape: &Shape) {
    let points = shape
        .points
        .iter()
        .map(|p| format!("{:.3},{:.3}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(svg, r#"    <polygon points="{}"/>"#, points);
}

fn push_layer_group(svg: &mut String, layer: &Layer) {
    let _ = writeln!(
        svg,
        r#"  <g id="{}" {}>"#,
        layer.name,
        paint_attributes(&layer.color, layer.paint, layer.line_width)
    );
    for shape in &layer.shapes {
        push_shape(svg, shape);
    }
    svg.push_str("  </g>\n");
}

/// Standalone document for a single layer.
pub fn layer_to_svg(layer: &Layer, size: f64) -> String {
    let mut svg = String::new();
    document_header(&mut svg, size, &format!("mandala {}", layer.name));
    push_layer_group(&mut svg, layer);
    svg.push_str("</svg>\n");
    svg
}

/// One document holding every layer, in drawing order.
pub fn pattern_to_svg(pattern: &Pattern) -> String {
    let mut svg = String::new();
    document_header(
        &mut svg,
        pattern.size,
        &format!("mandala ({}, seed {})", pattern.style.name(), pattern.seed),
    );
    for layer in &pattern.layers {
        push_layer_group(&mut svg, layer);
    }
    svg.push_str("</svg>\n");
    svg
}

/// Layers that share one color, in first-appearance order.
#[derive(Debug, Clone)]
pub struct ColorGroup<'a> {
    pub color: Color,
    pub layers: Vec<&'a Layer>,
}

impl ColorGroup<'_> {
    /// `color_<rrggbb>.svg`, or `color_<rrggbbaa>.svg` for translucent colors
    /// so that groups differing only in alpha never share a file.
    pub fn file_name(&self) -> String {
        if self.color.a < 255 {
            format!("color_{}{:02x}.svg", self.color.hex_digits(), self.color.a)
        } else {
            format!("color_{}.svg", self.color.hex_digits())
        }
    }
}

/// Group a pattern's layers by color.
pub fn color_groups(pattern: &Pattern) -> Vec<ColorGroup<'_>> {
    let mut groups: Vec<ColorGroup<'_>> = Vec::new();
    let mut by_color: HashMap<Color, usize> = HashMap::new();

    for layer in &pattern.layers {
        match by_color.get(&layer.color) {
            Some(&i) => groups[i].layers.push(layer),
            None => {
                by_color.insert(layer.color, groups.len());
                groups.push(ColorGroup { color: layer.color, layers: vec![layer] });
            }
        }
    }
    groups
}

/// Document holding every layer of one color group.
pub fn color_group_to_svg(group: &ColorGroup<'_>, size: f64) -> String {
    let mut svg = String::new();
    document_header(&mut svg, size, &format!("mandala {}", group.color.to_hex()));
    for layer in &group.layers {
        push_layer_group(&mut svg, layer);
    }
    svg.push_str("</svg>\n");
    svg
}

/// Which extra documents [`save_pattern`] writes besides per-layer files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Also write all layers into [`COMBINED_FILE`]
    pub combined: bool,
    /// Also write one `color_<hex>.svg` per distinct layer color
    pub by_color: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { combined: true, by_color: false }
    }
}

/// Files written by [`save_pattern`].
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub dir: PathBuf,
    pub layer_files: Vec<PathBuf>,
    pub combined: Option<PathBuf>,
    pub color_files: Vec<PathBuf>,
}

impl SaveReport {
    pub fn file_count(&self) -> usize {
        self.layer_files.len() + self.color_files.len() + usize::from(self.combined.is_some())
    }
}

/// Write `layer_<n>.svg` for each layer (1-based) plus the optional extras.
///
/// The directory is created if missing. The first failing write aborts the
/// save; files already written stay on disk.
pub fn save_pattern(
    pattern: &Pattern,
    dir: &Path,
    options: &SaveOptions,
) -> Result<SaveReport, MandalaError> {
    fs::create_dir_all(dir).map_err(|e| MandalaError::io(dir, e))?;

    let write = |name: &str, content: String| -> Result<PathBuf, MandalaError> {
        let path = dir.join(name);
        fs::write(&path, content).map_err(|e| MandalaError::io(&path, e))?;
        info!("Saved {}", path.display());
        Ok(path)
    };

    let mut report = SaveReport {
        dir: dir.to_path_buf(),
        layer_files: Vec::with_capacity(pattern.layers.len()),
        combined: None,
        color_files: Vec::new(),
    };

    for layer in &pattern.layers {
        let name = format!("layer_{}.svg", layer.index + 1);
        report.layer_files.push(write(&name, layer_to_svg(layer, pattern.size))?);
    }

    if options.combined {
        report.combined = Some(write(COMBINED_FILE, pattern_to_svg(pattern))?);
    }

    if options.by_color {
        for group in color_groups(pattern) {
            let path = write(&group.file_name(), color_group_to_svg(&group, pattern.size))?;
            report.color_files.push(path);
        }
    }

    Ok(report)
}

// ============================================================================
// READING
// ============================================================================

/// A `<polygon>` read back from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPolygon {
    /// id of the innermost enclosing `<g>`, if any
    pub group: Option<String>,
    pub points: Vec<Point>,
}

/// What [`read_svg`] extracts from a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgDocument {
    /// (x, y, width, height)
    pub view_box: Option<(f64, f64, f64, f64)>,
    pub polygons: Vec<SvgPolygon>,
}

impl SvgDocument {
    /// Distinct group ids in document order.
    pub fn group_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for id in self.polygons.iter().filter_map(|p| p.group.as_deref()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Polygons inside the group with the given id.
    pub fn polygons_in<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a SvgPolygon> + 'a {
        self.polygons.iter().filter(move |p| p.group.as_deref() == Some(group))
    }
}

/// Validate a document with usvg and extract its polygons.
pub fn read_svg(content: &str) -> Result<SvgDocument, SvgError> {
    let options = usvg::Options::default();
    usvg::Tree::from_str(content, &options).map_err(|e| SvgError::ParseError(e.to_string()))?;

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut doc = SvgDocument::default();
    let mut groups: Vec<Option<String>> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"g" => groups.push(attribute(e, b"id")),
                b"svg" => read_view_box(e, &mut doc),
                b"polygon" => read_polygon(e, &groups, &mut doc)?,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"polygon" => read_polygon(e, &groups, &mut doc)?,
                b"svg" => read_view_box(e, &mut doc),
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"g" {
                    groups.pop();
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SvgError::Xml(format!(
                    "at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(doc)
}

/// Read a saved document from disk, e.g. one written by [`save_pattern`].
pub fn load_svg(path: &Path) -> Result<SvgDocument, MandalaError> {
    let content = fs::read_to_string(path).map_err(|e| MandalaError::io(path, e))?;
    Ok(read_svg(&content)?)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

fn read_view_box(e: &BytesStart<'_>, doc: &mut SvgDocument) {
    if let Some(raw) = attribute(e, b"viewBox") {
        if let Ok(vb) = svgtypes::ViewBox::from_str(&raw) {
            doc.view_box = Some((vb.x, vb.y, vb.w, vb.h));
        }
    }
}

fn read_polygon(
    e: &BytesStart<'_>,
    groups: &[Option<String>],
    doc: &mut SvgDocument,
) -> Result<(), SvgError> {
    let raw = attribute(e, b"points").unwrap_or_default();
    let points: Vec<Point> = svgtypes::PointsParser::from(raw.as_str())
        .map(|(x, y)| Point::new(x, y))
        .collect();

    // PointsParser silently drops a dangling x; count numbers to catch it
    let numbers = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .count();
    if numbers != points.len() * 2 {
        return Err(SvgError::Points(raw));
    }

    let group = groups.iter().rev().find_map(|g| g.clone());
    doc.polygons.push(SvgPolygon { group, points });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PaletteKind;
    use crate::pattern::{PatternConfig, PatternStyle};

    fn small_pattern(style: PatternStyle) -> Pattern {
        let config = PatternConfig {
            style,
            layers: 3,
            shape_count: 4,
            shape_sides: 5,
            size: 200.0,
            ..PatternConfig::default()
        };
        Pattern::generate(&config, 17).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mandala-svg-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn layer_document_keeps_point_counts() {
        let pattern = small_pattern(PatternStyle::Nested);
        let layer = &pattern.layers[0];

        let doc = read_svg(&layer_to_svg(layer, pattern.size)).unwrap();
        assert_eq!(doc.view_box, Some((0.0, 0.0, 200.0, 200.0)));
        assert_eq!(doc.polygons.len(), layer.shapes.len());
        for (read, shape) in doc.polygons.iter().zip(&layer.shapes) {
            assert_eq!(read.points.len(), shape.len());
            assert_eq!(read.group.as_deref(), Some("layer_1"));
        }
    }

    #[test]
    fn combined_document_groups_layers_in_order() {
        let pattern = small_pattern(PatternStyle::Rings);
        let doc = read_svg(&pattern_to_svg(&pattern)).unwrap();

        assert_eq!(doc.group_ids(), vec!["layer_1", "layer_2", "layer_3"]);
        for layer in &pattern.layers {
            let counts: Vec<usize> = doc.polygons_in(&layer.name).map(|p| p.points.len()).collect();
            let expected: Vec<usize> = layer.shapes.iter().map(Shape::len).collect();
            assert_eq!(counts, expected);
        }
    }

    #[test]
    fn stroke_layers_are_not_filled() {
        let pattern = small_pattern(PatternStyle::Rings);
        let svg = layer_to_svg(&pattern.layers[0], pattern.size);
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(&format!(r#"stroke="{}""#, pattern.layers[0].color.to_hex())));
    }

    #[test]
    fn color_groups_merge_shared_colors() {
        let config = PatternConfig {
            style: PatternStyle::Rings,
            layers: 5,
            palette: PaletteKind::Custom,
            colors: vec!["#ff0000".into(), "#0000ff".into()],
            ..PatternConfig::default()
        };
        let pattern = Pattern::generate(&config, 4).unwrap();
        let groups = color_groups(&pattern);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].file_name(), "color_ff0000.svg");
        let indices: Vec<usize> = groups[0].layers.iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![0, 2, 4]);
        assert_eq!(groups[1].layers.len(), 2);

        let doc = read_svg(&color_group_to_svg(&groups[1], pattern.size)).unwrap();
        assert_eq!(doc.group_ids(), vec!["layer_2", "layer_4"]);
    }

    #[test]
    fn save_writes_layers_and_combined() {
        let pattern = small_pattern(PatternStyle::Nested);
        let dir = scratch_dir("save");

        let report = save_pattern(&pattern, &dir.join("nested/out"), &SaveOptions::default()).unwrap();
        assert_eq!(report.layer_files.len(), 3);
        assert_eq!(report.file_count(), 4);
        assert!(report.color_files.is_empty());

        for (i, path) in report.layer_files.iter().enumerate() {
            assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("layer_{}.svg", i + 1));
            let doc = read_svg(&fs::read_to_string(path).unwrap()).unwrap();
            let counts: Vec<usize> = doc.polygons.iter().map(|p| p.points.len()).collect();
            let expected: Vec<usize> = pattern.layers[i].shapes.iter().map(Shape::len).collect();
            assert_eq!(counts, expected);
        }

        let combined = report.combined.as_ref().unwrap();
        let doc = read_svg(&fs::read_to_string(combined).unwrap()).unwrap();
        assert_eq!(doc.polygons.len(), pattern.shape_count());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_by_color_only() {
        let pattern = small_pattern(PatternStyle::Woven);
        let dir = scratch_dir("by-color");
        let options = SaveOptions { combined: false, by_color: true };

        let report = save_pattern(&pattern, &dir, &options).unwrap();
        assert!(report.combined.is_none());
        assert_eq!(report.color_files.len(), color_groups(&pattern).len());
        assert!(!dir.join(COMBINED_FILE).exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn colors_differing_in_alpha_get_separate_files() {
        let config = PatternConfig {
            style: PatternStyle::Rings,
            layers: 2,
            palette: PaletteKind::Custom,
            colors: vec!["#ff0000".into(), "#ff000080".into()],
            ..PatternConfig::default()
        };
        let pattern = Pattern::generate(&config, 9).unwrap();
        let dir = scratch_dir("alpha");
        let options = SaveOptions { combined: false, by_color: true };

        let report = save_pattern(&pattern, &dir, &options).unwrap();
        let names: Vec<&str> = report
            .color_files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["color_ff0000.svg", "color_ff000080.svg"]);

        let on_disk = fs::read_dir(&dir)
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().starts_with("color_"))
            .count();
        assert_eq!(on_disk, report.color_files.len());
        assert_eq!(report.file_count(), 4);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_into_a_file_path_fails_with_io() {
        let pattern = small_pattern(PatternStyle::Rings);
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let err = save_pattern(&pattern, &blocker, &SaveOptions::default()).unwrap_err();
        assert!(matches!(err, MandalaError::Io { .. }));
        // The pattern itself is untouched and can be saved elsewhere
        assert!(save_pattern(&pattern, &dir.join("retry"), &SaveOptions::default()).is_ok());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_reads_saved_files() {
        let pattern = small_pattern(PatternStyle::Woven);
        let dir = scratch_dir("load");
        let report = save_pattern(&pattern, &dir, &SaveOptions::default()).unwrap();

        let doc = load_svg(report.combined.as_ref().unwrap()).unwrap();
        assert_eq!(doc.polygons.len(), pattern.shape_count());

        let broken = dir.join("broken.svg");
        fs::write(&broken, "<svg").unwrap();
        let err = load_svg(&broken).unwrap_err();
        assert!(matches!(err, MandalaError::Svg(SvgError::ParseError(_))));
        assert!(std::error::Error::source(&err).is_some());

        let missing = load_svg(&dir.join("missing.svg")).unwrap_err();
        assert!(matches!(missing, MandalaError::Io { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rejects_broken_documents() {
        assert!(matches!(read_svg("<svg"), Err(SvgError::ParseError(_))));

        let odd = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
            <polygon points="1,1 5,1 5"/>
        </svg>"#;
        assert!(matches!(read_svg(odd), Err(SvgError::Points(_))));
    }
}
