// src/geometry.rs
//
// Exact convex-polygon math for zone membership tests.
//
// Zone shapes are perspective trapezoids, so bounding-box intersection is
// not good enough: a box clipped against a slanted zone edge produces a
// polygon with up to 8 vertices. Sutherland-Hodgman clipping against each
// zone edge gives the exact intersection, and the shoelace formula gives
// its area.

use serde::{Deserialize, Serialize};

use crate::types::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Convex quadrilateral in pixel coordinates. Vertices are stored in
/// drawing order (top-left, top-right, bottom-right, bottom-left for the
/// zones built here); the last vertex connects back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    pub points: [Point; 4],
}

impl Quad {
    pub fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        Self::new([
            Point::new(bbox.x1, bbox.y1),
            Point::new(bbox.x2, bbox.y1),
            Point::new(bbox.x2, bbox.y2),
            Point::new(bbox.x1, bbox.y2),
        ])
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices())
    }

    fn vertices(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.x as f64, p.y as f64))
            .collect()
    }
}

/// Unsigned polygon area via the shoelace formula.
pub fn polygon_area(vertices: &[(f64, f64)]) -> f64 {
    signed_area(vertices).abs()
}

fn signed_area(vertices: &[(f64, f64)]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let (x1, y1) = vertices[i];
        let (x2, y2) = vertices[(i + 1) % vertices.len()];
        sum += x1 * y2 - x2 * y1;
    }
    sum / 2.0
}

/// Intersection of two convex polygons (Sutherland-Hodgman): the subject is
/// clipped against each edge of the clip polygon in turn. Returns an empty
/// vector when the polygons are disjoint or either is degenerate.
pub fn convex_intersection(subject: &[(f64, f64)], clip: &[(f64, f64)]) -> Vec<(f64, f64)> {
    if subject.len() < 3 || clip.len() < 3 {
        return Vec::new();
    }

    // Clipping assumes a counter-clockwise clip polygon; flip if needed.
    let mut clip_ccw: Vec<(f64, f64)> = clip.to_vec();
    if signed_area(&clip_ccw) < 0.0 {
        clip_ccw.reverse();
    }

    let mut output: Vec<(f64, f64)> = subject.to_vec();

    for i in 0..clip_ccw.len() {
        if output.is_empty() {
            break;
        }
        let a = clip_ccw[i];
        let b = clip_ccw[(i + 1) % clip_ccw.len()];

        let input = std::mem::take(&mut output);
        for j in 0..input.len() {
            let current = input[j];
            let previous = input[(j + input.len() - 1) % input.len()];

            let current_inside = cross(a, b, current) >= 0.0;
            let previous_inside = cross(a, b, previous) >= 0.0;

            if current_inside {
                if !previous_inside {
                    output.push(edge_intersection(previous, current, a, b));
                }
                output.push(current);
            } else if previous_inside {
                output.push(edge_intersection(previous, current, a, b));
            }
        }
    }

    output
}

/// Area of the intersection of two convex quadrilaterals.
pub fn intersection_area(a: &Quad, b: &Quad) -> f64 {
    polygon_area(&convex_intersection(&a.vertices(), &b.vertices()))
}

/// Intersection area of `subject` with `zone`, divided by the subject's own
/// area. Returns 0 for a degenerate subject (zero or negative area), so a
/// collapsed box can never match any zone.
pub fn overlap_ratio(subject: &Quad, zone: &Quad) -> f64 {
    let subject_area = subject.area();
    if subject_area <= 0.0 {
        return 0.0;
    }
    intersection_area(subject, zone) / subject_area
}

fn cross(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

fn edge_intersection(
    p1: (f64, f64),
    p2: (f64, f64),
    a: (f64, f64),
    b: (f64, f64),
) -> (f64, f64) {
    let d1 = (p2.0 - p1.0, p2.1 - p1.1);
    let d2 = (b.0 - a.0, b.1 - a.1);
    let denom = d1.0 * d2.1 - d1.1 * d2.0;
    if denom.abs() < f64::EPSILON {
        // Segment parallel to the clip edge; either endpoint lies on it.
        return p2;
    }
    let t = ((a.0 - p1.0) * d2.1 - (a.1 - p1.1) * d2.0) / denom;
    (p1.0 + t * d1.0, p1.1 + t * d1.1)
}
