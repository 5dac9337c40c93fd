#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library of rotated-rectangle geometry."]
#![doc = ""]
#![doc = "This crate provides rotated rectangles, their corners and bounding boxes,"]
#![doc = "and the overlap tests used to rasterize detected objects into a grid."]

use core::fmt;
use libm::{cos, sin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
mod polygon;

pub use error::GeometryError;
use polygon::{ConvexPolygon, quads_overlap};

/// A point in the image plane. Units are whatever the detector reports (usually pixels).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// Horizontal coordinate, growing to the right.
    pub x: f64,
    /// Vertical coordinate, growing downward in image space.
    pub y: f64,
}

impl Point2 {
    /// Construct a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        sqrt(dx * dx + dy * dy)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Point2) -> Point2 {
        Point2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Axis-aligned bounds `[min_x, max_x] x [min_y, max_y]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Bottom edge.
    pub max_y: f64,
}

impl Bounds {
    /// Construct bounds from their edges.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    /// Smallest bounds containing every rectangle, or `None` for an empty input.
    pub fn enclosing<'a, I>(rects: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a RotatedRect>,
    {
        rects
            .into_iter()
            .map(RotatedRect::bounding_box)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Smallest bounds containing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// The top-left corner in image coordinates.
    pub fn top_left(&self) -> Point2 {
        Point2::new(self.min_x, self.min_y)
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A rectangle given by its center, side lengths and rotation.
///
/// `rotation` is in degrees. Corners are rotated with the standard rotation
/// matrix about the center; with the image y-axis pointing down this turns the
/// rectangle clockwise on screen, matching common vision-library conventions.
/// `width` and `height` are measured along the rectangle's own axes and do not
/// change with rotation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotatedRect {
    /// Center x coordinate.
    pub x: f64,
    /// Center y coordinate.
    pub y: f64,
    /// Side length along the rectangle's local x-axis.
    pub width: f64,
    /// Side length along the rectangle's local y-axis.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl RotatedRect {
    /// Construct a rectangle without validation.
    ///
    /// # Arguments
    ///
    /// * `x`, `y`: Center of the rectangle.
    /// * `width`, `height`: Side lengths, expected to be non-negative.
    /// * `rotation`: Rotation in degrees.
    pub const fn new(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        RotatedRect {
            x,
            y,
            width,
            height,
            rotation,
        }
    }

    /// Construct an unrotated rectangle.
    pub const fn axis_aligned(x: f64, y: f64, width: f64, height: f64) -> Self {
        RotatedRect::new(x, y, width, height, 0.0)
    }

    /// Construct a rectangle, rejecting values that cannot describe a shape.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeometryError::NonFinite)` if any value is NaN or infinite.
    /// Returns `Err(GeometryError::InvalidSize)` if `width` or `height` is negative.
    pub fn try_new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rotation: f64,
    ) -> Result<Self, GeometryError> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(GeometryError::NonFinite("center and size must be finite"));
        }
        if !rotation.is_finite() {
            return Err(GeometryError::NonFinite("rotation must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(GeometryError::InvalidSize("width and height must be non-negative"));
        }
        Ok(RotatedRect::new(x, y, width, height, rotation))
    }

    /// The rectangle center.
    pub fn center(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Distance from this rectangle's center to `other`'s center.
    pub fn distance(&self, other: &RotatedRect) -> f64 {
        self.center().distance(&other.center())
    }

    /// The four corners, counter-clockwise in a y-up frame.
    pub fn corners(&self) -> [Point2; 4] {
        const SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let theta = self.rotation.to_radians();
        let (s, c) = (sin(theta), cos(theta));
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        let mut corners = [Point2::default(); 4];
        for (corner, &(sx, sy)) in corners.iter_mut().zip(SIGNS.iter()) {
            let lx = sx * half_w;
            let ly = sy * half_h;
            *corner = Point2::new(self.x + lx * c - ly * s, self.y + lx * s + ly * c);
        }
        corners
    }

    /// Axis-aligned bounds of the rotated corners.
    pub fn bounding_box(&self) -> Bounds {
        let corners = self.corners();
        // Four corners always yield bounds.
        Bounds::from_points(corners.iter()).unwrap_or(Bounds::new(self.x, self.y, self.x, self.y))
    }

    /// Area of the region shared by both rectangles.
    pub fn overlap_area(&self, other: &RotatedRect) -> f64 {
        if self.area() <= 0.0 || other.area() <= 0.0 {
            return 0.0;
        }
        ConvexPolygon::from_quad(&self.corners())
            .clip(&other.corners())
            .area()
    }

    /// Whether the rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge or at a corner, and
    /// rectangles with zero width or height, never intersect.
    pub fn intersects(&self, other: &RotatedRect) -> bool {
        if self.area() <= 0.0 || other.area() <= 0.0 {
            return false;
        }
        quads_overlap(&self.corners(), &other.corners())
    }
}

impl fmt::Display for RotatedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "center: ({:.2}, {:.2}) - w: {:.2} - h: {:.2} - rot: {:.1}°",
            self.x, self.y, self.width, self.height, self.rotation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_try_new_validation() {
        assert!(RotatedRect::try_new(0.0, 0.0, 1.0, 2.0, 30.0).is_ok());
        assert!(matches!(
            RotatedRect::try_new(0.0, 0.0, -1.0, 2.0, 0.0),
            Err(GeometryError::InvalidSize(_))
        ));
        assert!(matches!(
            RotatedRect::try_new(f64::NAN, 0.0, 1.0, 2.0, 0.0),
            Err(GeometryError::NonFinite(_))
        ));
        assert!(matches!(
            RotatedRect::try_new(0.0, 0.0, 1.0, 2.0, f64::INFINITY),
            Err(GeometryError::NonFinite(_))
        ));
    }

    #[test]
    fn test_distance() {
        let a = RotatedRect::axis_aligned(0.0, 0.0, 1.0, 1.0);
        let b = RotatedRect::new(3.0, 4.0, 2.0, 7.0, 45.0);
        assert!((a.distance(&b) - 5.0).abs() < EPSILON);
        assert!((b.distance(&a) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_corners_axis_aligned() {
        let rect = RotatedRect::axis_aligned(10.0, 20.0, 4.0, 2.0);
        let corners = rect.corners();
        assert_eq!(corners[0], Point2::new(8.0, 19.0));
        assert_eq!(corners[1], Point2::new(12.0, 19.0));
        assert_eq!(corners[2], Point2::new(12.0, 21.0));
        assert_eq!(corners[3], Point2::new(8.0, 21.0));
    }

    #[test]
    fn test_corners_quarter_turn_swaps_extent() {
        let rect = RotatedRect::new(0.0, 0.0, 4.0, 2.0, 90.0);
        let bounds = rect.bounding_box();
        assert!((bounds.width() - 2.0).abs() < EPSILON);
        assert!((bounds.height() - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_bounding_box_diagonal() {
        let rect = RotatedRect::new(0.0, 0.0, 2.0, 2.0, 45.0);
        let bounds = rect.bounding_box();
        let half_diag = 2.0_f64.sqrt();
        assert!((bounds.min_x + half_diag).abs() < EPSILON);
        assert!((bounds.max_y - half_diag).abs() < EPSILON);
    }

    #[test]
    fn test_enclosing_bounds() {
        let rects = [
            RotatedRect::axis_aligned(0.0, 0.0, 2.0, 2.0),
            RotatedRect::axis_aligned(10.0, 5.0, 4.0, 2.0),
        ];
        let bounds = Bounds::enclosing(rects.iter()).unwrap();
        assert_eq!(bounds, Bounds::new(-1.0, -1.0, 12.0, 6.0));
        assert_eq!(bounds.top_left(), Point2::new(-1.0, -1.0));
        let empty: [RotatedRect; 0] = [];
        assert!(Bounds::enclosing(empty.iter()).is_none());
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = RotatedRect::axis_aligned(0.0, 0.0, 2.0, 2.0);
        let b = RotatedRect::axis_aligned(1.5, 0.0, 2.0, 2.0);
        assert!(a.intersects(&b));
        assert!((a.overlap_area(&b) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = RotatedRect::axis_aligned(0.0, 0.0, 2.0, 2.0);
        let b = RotatedRect::axis_aligned(2.0, 0.0, 2.0, 2.0);
        assert!(!a.intersects(&b));
        assert!(a.overlap_area(&b).abs() < EPSILON);

        let corner = RotatedRect::axis_aligned(2.0, 2.0, 2.0, 2.0);
        assert!(!a.intersects(&corner));
    }

    #[test]
    fn test_touching_edges_after_quarter_turn() {
        // Floating point noise from cos(90°) must not create an overlap.
        let a = RotatedRect::new(0.0, 0.0, 2.0, 2.0, 90.0);
        let b = RotatedRect::axis_aligned(2.0, 0.0, 2.0, 2.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_zero_area_never_intersects() {
        let a = RotatedRect::axis_aligned(0.0, 0.0, 2.0, 2.0);
        let line = RotatedRect::axis_aligned(0.0, 0.0, 0.0, 5.0);
        assert!(!a.intersects(&line));
        assert!(!line.intersects(&a));
        assert_eq!(a.overlap_area(&line), 0.0);
    }

    #[test]
    fn test_rotated_same_center_intersects() {
        let a = RotatedRect::axis_aligned(0.0, 0.0, 4.0, 1.0);
        let b = RotatedRect::new(0.0, 0.0, 4.0, 1.0, 45.0);
        assert!(a.intersects(&b));
        assert!(a.overlap_area(&b) > 0.0);
    }

    #[test]
    fn test_rotated_diamond_misses_corner_cell() {
        // A 45° square's bounding box covers the cell, but the diamond itself does not.
        let diamond = RotatedRect::new(0.0, 0.0, 2.0, 2.0, 45.0);
        let corner_cell = RotatedRect::axis_aligned(1.2, 1.2, 0.4, 0.4);
        assert!(!diamond.intersects(&corner_cell));
        assert!(diamond.overlap_area(&corner_cell).abs() < EPSILON);
    }

    #[test]
    fn test_contained_overlap_area() {
        let outer = RotatedRect::new(5.0, 5.0, 10.0, 10.0, 15.0);
        let inner = RotatedRect::axis_aligned(5.0, 5.0, 1.0, 1.0);
        assert!(outer.intersects(&inner));
        assert!((outer.overlap_area(&inner) - 1.0).abs() < EPSILON);
        assert!((inner.overlap_area(&outer) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_display() {
        let rect = RotatedRect::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let s = format!("{}", rect);
        assert!(s.contains("center: (1.00, 2.00)"));
        assert!(s.contains("w: 3.00"));
    }
}
