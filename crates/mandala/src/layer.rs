//! Layer recursion: shapes placed around a center, each one seeding a
//! smaller ring of its own.
//!
//! ## Depth convention
//!
//! `depth` counts **down**: it is the number of recursion levels still to
//! place. A call with `depth == 3` places a ring, each child places a ring
//! with `depth == 2`, and so on until `depth == 0`. Requested depths are
//! clamped to [`MAX_DEPTH`], and any call whose `max_radius` is below
//! [`MIN_RADIUS`] places nothing.

use std::f64::consts::TAU;

use log::debug;

use crate::geometry::{Point, Shape};
use crate::rng::Rng;
use crate::shapes::regular_polygon;

/// Upper bound on recursion levels, whatever the caller asks for.
pub const MAX_DEPTH: usize = 5;

/// Calls with a smaller `max_radius` stop without placing shapes.
pub const MIN_RADIUS: f64 = 0.5;

/// Parameters for one layer of nested shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerParams {
    /// Center the first ring is placed around
    pub center: Point,
    /// Radius budget of the top-level call
    pub max_radius: f64,
    /// Shapes per ring (>= 1)
    pub shape_count: usize,
    /// Sides of every placed polygon (>= 3)
    pub shape_sides: usize,
    /// Remaining recursion levels
    pub depth: usize,
    /// Angular offset of the ring, radians
    pub rotation: f64,
}

/// One placed shape with the recursion state that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerNode {
    pub shape: Shape,
    /// Center of the placed polygon
    pub center: Point,
    /// Circumradius of the placed polygon
    pub radius: f64,
    /// `max_radius` of the call that placed this shape
    pub budget: f64,
    /// Remaining depth of the call that placed this shape
    pub depth: usize,
    /// 0 for the top-level ring, 1 for its children, ...
    pub level: usize,
}

/// Build one layer and return its shapes in depth-first order.
///
/// Each child is followed immediately by its own descendants, which is the
/// order they are drawn (later on top) and exported.
pub fn build_layer(params: &LayerParams, rng: &mut Rng) -> Vec<Shape> {
    build_layer_nodes(params, rng)
        .into_iter()
        .map(|node| node.shape)
        .collect()
}

/// Same walk as [`build_layer`], keeping per-node placement data.
pub fn build_layer_nodes(params: &LayerParams, rng: &mut Rng) -> Vec<LayerNode> {
    assert!(params.shape_count >= 1, "layer needs at least one shape per ring");
    assert!(params.shape_sides >= 3, "layer shapes need at least 3 sides, got {}", params.shape_sides);
    assert!(params.max_radius > 0.0, "layer radius must be positive, got {}", params.max_radius);

    let depth = params.depth.min(MAX_DEPTH);
    let mut nodes = Vec::new();
    place_ring(params, params.center, params.max_radius, depth, 0, rng, &mut nodes);

    debug!(
        "layer: {} shapes (count={}, sides={}, depth={}, radius={:.2})",
        nodes.len(),
        params.shape_count,
        params.shape_sides,
        depth,
        params.max_radius
    );
    nodes
}

/// Child radius for a ring placed with `depth` levels remaining.
#[inline]
pub fn child_radius(max_radius: f64, depth: usize) -> f64 {
    max_radius / (1.5 + depth as f64)
}

/// Distance from the parent center to each child center.
#[inline]
pub fn child_offset(max_radius: f64, depth: usize) -> f64 {
    max_radius / (2.0 + depth as f64)
}

fn place_ring(
    params: &LayerParams,
    center: Point,
    max_radius: f64,
    depth: usize,
    level: usize,
    rng: &mut Rng,
    out: &mut Vec<LayerNode>,
) {
    if depth == 0 || max_radius < MIN_RADIUS {
        return;
    }

    let offset = child_offset(max_radius, depth);
    let radius = child_radius(max_radius, depth);
    let count = params.shape_count as f64;

    for i in 0..params.shape_count {
        let angle = TAU * i as f64 / count + params.rotation;
        let child_center = center.polar_offset(angle, offset);
        let shape = regular_polygon(params.shape_sides, radius, child_center, rng.next_angle());

        out.push(LayerNode {
            shape,
            center: child_center,
            radius,
            budget: max_radius,
            depth,
            level,
        });

        place_ring(params, child_center, radius / 2.0, depth - 1, level + 1, rng, out);
    }
}
