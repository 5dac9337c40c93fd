//! Convex polygon helpers backing the rectangle overlap tests.
//!
//! Everything here works on fixed-size arrays so the crate stays allocation free.

use crate::Point2;
use libm::{fabs, sqrt};

/// Slack used when comparing projected extents, in plane units.
pub(crate) const SEPARATION_EPSILON: f64 = 1e-9;

/// A quadrilateral clipped by another quadrilateral has at most eight vertices.
const MAX_VERTICES: usize = 8;

/// Small convex polygon with inline storage.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConvexPolygon {
    vertices: [Point2; MAX_VERTICES],
    len: usize,
}

impl ConvexPolygon {
    pub(crate) fn from_quad(quad: &[Point2; 4]) -> Self {
        let mut vertices = [Point2::default(); MAX_VERTICES];
        vertices[..4].copy_from_slice(quad);
        ConvexPolygon { vertices, len: 4 }
    }

    fn empty() -> Self {
        ConvexPolygon {
            vertices: [Point2::default(); MAX_VERTICES],
            len: 0,
        }
    }

    fn push(&mut self, p: Point2) {
        // A convex quad loses or gains at most one vertex per clipping edge.
        if self.len < MAX_VERTICES {
            self.vertices[self.len] = p;
            self.len += 1;
        }
    }

    pub(crate) fn vertices(&self) -> &[Point2] {
        &self.vertices[..self.len]
    }

    /// Shoelace area, always non-negative.
    pub(crate) fn area(&self) -> f64 {
        if self.len < 3 {
            return 0.0;
        }
        let pts = self.vertices();
        let mut twice_area = 0.0;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            twice_area += a.x * b.y - b.x * a.y;
        }
        fabs(twice_area) / 2.0
    }

    /// Sutherland-Hodgman clipping of `self` against a counter-clockwise quad.
    pub(crate) fn clip(&self, clip_quad: &[Point2; 4]) -> ConvexPolygon {
        let mut output = *self;
        for i in 0..4 {
            let edge_start = clip_quad[i];
            let edge_end = clip_quad[(i + 1) % 4];
            let input = output;
            output = ConvexPolygon::empty();
            if input.len == 0 {
                break;
            }

            let pts = input.vertices();
            let mut prev = pts[pts.len() - 1];
            for &current in pts {
                let current_inside = side(edge_start, edge_end, current) >= 0.0;
                let prev_inside = side(edge_start, edge_end, prev) >= 0.0;
                if current_inside {
                    if !prev_inside {
                        output.push(line_intersection(prev, current, edge_start, edge_end));
                    }
                    output.push(current);
                } else if prev_inside {
                    output.push(line_intersection(prev, current, edge_start, edge_end));
                }
                prev = current;
            }
        }
        output
    }
}

/// Signed area of the triangle (a, b, p); positive when `p` is left of `a -> b`.
fn side(a: Point2, b: Point2, p: Point2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Intersection of segment `p -> q` with the infinite line through `a -> b`.
fn line_intersection(p: Point2, q: Point2, a: Point2, b: Point2) -> Point2 {
    let side_p = side(a, b, p);
    let side_q = side(a, b, q);
    let denom = side_p - side_q;
    if denom == 0.0 {
        return q;
    }
    let t = side_p / denom;
    Point2::new(p.x + t * (q.x - p.x), p.y + t * (q.y - p.y))
}

/// Projects the corners onto a unit axis and returns `(min, max)`.
fn project(corners: &[Point2; 4], ax: f64, ay: f64) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for c in corners {
        let dot = c.x * ax + c.y * ay;
        lo = lo.min(dot);
        hi = hi.max(dot);
    }
    (lo, hi)
}

/// Separating axis test between two rectangles given by their corners.
///
/// Returns `true` only when the interiors overlap; shared edges or corners do not count.
pub(crate) fn quads_overlap(a: &[Point2; 4], b: &[Point2; 4]) -> bool {
    for corners in [a, b] {
        // Opposite edges of a rectangle are parallel, two normals suffice.
        for i in 0..2 {
            let ex = corners[i + 1].x - corners[i].x;
            let ey = corners[i + 1].y - corners[i].y;
            let len = sqrt(ex * ex + ey * ey);
            if len == 0.0 {
                return false;
            }
            let (ax, ay) = (-ey / len, ex / len);
            let (min_a, max_a) = project(a, ax, ay);
            let (min_b, max_b) = project(b, ax, ay);
            if max_a <= min_b + SEPARATION_EPSILON || max_b <= min_a + SEPARATION_EPSILON {
                return false;
            }
        }
    }
    true
}
