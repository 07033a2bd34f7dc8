//! Shape generators: polygons, stars, three-tier complex shapes, interlacing.
//!
//! Every generator is a pure function of its numeric parameters. The only
//! randomness is an explicitly passed [`Rng`], so calling a generator twice
//! with the same inputs yields bit-identical points.
//!
//! Invalid parameters (fewer than 3 sides, non-positive radius) are caller
//! bugs and panic. User-supplied values are checked earlier by
//! [`PatternConfig::validate`](crate::pattern::PatternConfig::validate).

use std::f64::consts::{PI, TAU};

use crate::geometry::{Point, Shape};
use crate::rng::Rng;

/// Smallest inner ratio a jittered star may end up with.
const MIN_INNER_RATIO: f64 = 0.01;

/// Regular polygon with `sides` vertices on a circle of `radius`.
///
/// The first vertex sits at angle `rotation`, the rest follow
/// counter-clockwise every `2π / sides`. The boundary is not closed.
pub fn regular_polygon(sides: usize, radius: f64, center: Point, rotation: f64) -> Shape {
    assert!(sides >= 3, "polygon needs at least 3 sides, got {}", sides);
    assert!(radius > 0.0, "polygon radius must be positive, got {}", radius);

    let step = TAU / sides as f64;
    let points = (0..sides)
        .map(|i| center.polar_offset(rotation + i as f64 * step, radius))
        .collect();
    Shape::new(points)
}

/// Star with `num_points` tips, closed by repeating the first vertex.
///
/// Vertices alternate between `outer_radius` and
/// `outer_radius * inner_radius_ratio` every `π / num_points`, starting with
/// an outer tip at angle 0. With `jitter = Some((rng, amount))` the inner ratio
/// is shifted once by uniform noise in `[-amount, amount]` before any vertex
/// is placed, so the star stays regular but its depth varies between calls.
pub fn star(
    center: Point,
    outer_radius: f64,
    num_points: usize,
    inner_radius_ratio: f64,
    jitter: Option<(&mut Rng, f64)>,
) -> Shape {
    assert!(num_points >= 2, "star needs at least 2 points, got {}", num_points);
    assert!(outer_radius > 0.0, "star radius must be positive, got {}", outer_radius);
    assert!(
        inner_radius_ratio > 0.0 && inner_radius_ratio <= 1.0,
        "inner radius ratio must be in (0, 1], got {}",
        inner_radius_ratio
    );

    let ratio = match jitter {
        Some((rng, amount)) => {
            (inner_radius_ratio + rng.next_signed() * amount).clamp(MIN_INNER_RATIO, 1.0)
        }
        None => inner_radius_ratio,
    };
    let inner_radius = outer_radius * ratio;

    let step = PI / num_points as f64;
    let mut points: Vec<Point> = (0..num_points * 2)
        .map(|i| {
            let r = if i % 2 == 1 { inner_radius } else { outer_radius };
            center.polar_offset(i as f64 * step, r)
        })
        .collect();
    points.push(points[0]);
    Shape::new(points)
}

/// Three-tier star: outer, mid, inner, mid, ... across `4 * sides` steps.
///
/// The mid tier is the mean of `inner_radius` and `outer_radius`. Closed like
/// [`star`], so the result has `4 * sides + 1` points.
pub fn complex_shape(
    sides: usize,
    inner_radius: f64,
    outer_radius: f64,
    center: Point,
    rotation: f64,
) -> Shape {
    assert!(sides >= 2, "complex shape needs at least 2 sides, got {}", sides);
    assert!(
        inner_radius > 0.0 && outer_radius > 0.0,
        "complex shape radii must be positive, got {} / {}",
        inner_radius,
        outer_radius
    );

    let mid_radius = (inner_radius + outer_radius) / 2.0;
    let steps = sides * 4;
    let step = TAU / steps as f64;

    let mut points: Vec<Point> = (0..steps)
        .map(|i| {
            let r = match i % 4 {
                0 => outer_radius,
                2 => inner_radius,
                _ => mid_radius,
            };
            center.polar_offset(rotation + i as f64 * step, r)
        })
        .collect();
    points.push(points[0]);
    Shape::new(points)
}

/// Insert the midpoint of every consecutive vertex pair.
///
/// `n` points in, `2n - 1` out: even indices are the original vertices in
/// order, odd indices the midpoints between their neighbours.
pub fn interlace(shape: &Shape) -> Shape {
    assert!(shape.len() >= 2, "interlace needs at least 2 points, got {}", shape.len());

    let mut points = Vec::with_capacity(shape.len() * 2 - 1);
    for pair in shape.points.windows(2) {
        points.push(pair[0]);
        points.push(pair[0].midpoint(pair[1]));
    }
    if let Some(&last) = shape.points.last() {
        points.push(last);
    }
    Shape::new(points)
}
