//! Geometry primitives shared by the keypoint tools.
//!
//! This module contains the point/rectangle types and the pure helper
//! functions used by the template editor and the pose annotation actions:
//! - Point-in-region tests and clamping against a region of interest
//! - Projection of a point onto an edge segment
//! - Extent computation and mirroring of point sets

use serde::{Deserialize, Serialize};

// ============================================================================
// Core Geometry Types
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rectangle in image pixel space against which points are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionOfInterest {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    /// Width of the region
    pub width: f32,
    /// Height of the region
    pub height: f32,
}

impl RegionOfInterest {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region anchored at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Get the center point of the region.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Scale the region about its center.
    pub fn scaled(&self, factor: f32) -> Self {
        let width = self.width * factor;
        let height = self.height * factor;
        Self {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }

    /// Whether the region has a strictly positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Coordinate axis used by extent and mirror operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointAxis {
    X,
    Y,
}

impl PointAxis {
    /// Get the display name for this axis.
    pub fn name(&self) -> &'static str {
        match self {
            PointAxis::X => "X",
            PointAxis::Y => "Y",
        }
    }
}

/// Anything with a 2D position.
///
/// Lets the helpers below operate on plain points as well as on keypoint
/// nodes without dropping the extra fields those carry.
pub trait Positioned: Clone {
    fn position(&self) -> Point;
    fn set_position(&mut self, point: Point);

    fn coordinate(&self, axis: PointAxis) -> f32 {
        let p = self.position();
        match axis {
            PointAxis::X => p.x,
            PointAxis::Y => p.y,
        }
    }

    fn set_coordinate(&mut self, axis: PointAxis, value: f32) {
        let mut p = self.position();
        match axis {
            PointAxis::X => p.x = value,
            PointAxis::Y => p.y = value,
        }
        self.set_position(p);
    }
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }

    fn set_position(&mut self, point: Point) {
        *self = point;
    }
}

// ============================================================================
// Region of Interest Helpers
// ============================================================================

/// Check if a point lies inside the region, bounds inclusive.
pub fn is_point_within_roi(roi: &RegionOfInterest, point: &Point) -> bool {
    point.x >= roi.x
        && point.x <= roi.x + roi.width
        && point.y >= roi.y
        && point.y <= roi.y + roi.height
}

/// Clamp each coordinate of a point independently into the region.
pub fn clamp_point_to_roi<T: Positioned>(point: &T, roi: &RegionOfInterest) -> T {
    let p = point.position();
    let mut clamped = point.clone();
    clamped.set_position(Point::new(
        p.x.max(roi.x).min(roi.x + roi.width),
        p.y.max(roi.y).min(roi.y + roi.height),
    ));
    clamped
}

/// Map a normalized (0-1) point into the region.
pub fn denormalize_point<T: Positioned>(point: &T, roi: &RegionOfInterest) -> T {
    let p = point.position();
    let mut out = point.clone();
    out.set_position(Point::new(
        roi.x + p.x * roi.width,
        roi.y + p.y * roi.height,
    ));
    out
}

/// Map a point inside the region to normalized (0-1) coordinates.
///
/// Exact inverse of [`denormalize_point`] for regions with positive size.
pub fn normalize_point<T: Positioned>(point: &T, roi: &RegionOfInterest) -> T {
    let p = point.position();
    let mut out = point.clone();
    out.set_position(Point::new(
        (p.x - roi.x) / roi.width,
        (p.y - roi.y) / roi.height,
    ));
    out
}

// ============================================================================
// Segment Projection
// ============================================================================

/// Project a point orthogonally onto the segment `[start, end]`.
///
/// Returns `None` when the projection falls outside the segment, which is
/// the rule deciding whether a click on an edge may insert a new joint.
/// Both endpoints are inclusive.
pub fn project_point_onto_segment(segment: (Point, Point), point: &Point) -> Option<Point> {
    let (start, end) = segment;

    // Move start to origin
    let bx = end.x - start.x;
    let by = end.y - start.y;
    let ax = point.x - start.x;
    let ay = point.y - start.y;

    let b_dot_b = bx * bx + by * by;
    if b_dot_b == 0.0 {
        // Degenerate segment: only its single point is on it
        return (ax == 0.0 && ay == 0.0).then_some(start);
    }

    let t = (ax * bx + ay * by) / b_dot_b;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    Some(Point::new(start.x + bx * t, start.y + by * t))
}

// ============================================================================
// Extents and Mirroring
// ============================================================================

/// Extreme values of a point set along one axis.
///
/// Returns `(INFINITY, NEG_INFINITY)` for an empty set; callers must guard.
pub fn min_max_along_axis<T: Positioned>(points: &[T], axis: PointAxis) -> (f32, f32) {
    points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
            let v = p.coordinate(axis);
            (min.min(v), max.max(v))
        })
}

/// Reflect every point about the midpoint of the set's extent on `axis`.
///
/// The perpendicular coordinate is untouched. Mirroring an empty set is a
/// no-op rather than producing NaN midpoints.
pub fn mirror_points_across_axis<T: Positioned>(points: &[T], axis: PointAxis) -> Vec<T> {
    if points.is_empty() {
        return Vec::new();
    }

    let (min, max) = min_max_along_axis(points, axis);
    let sum = min + max;

    points
        .iter()
        .map(|p| {
            let mut mirrored = p.clone();
            mirrored.set_coordinate(axis, sum - p.coordinate(axis));
            mirrored
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_point_within_roi_inclusive() {
        let roi = RegionOfInterest::new(10.0, 10.0, 100.0, 50.0);

        assert!(is_point_within_roi(&roi, &Point::new(10.0, 10.0)));
        assert!(is_point_within_roi(&roi, &Point::new(110.0, 60.0)));
        assert!(is_point_within_roi(&roi, &Point::new(50.0, 30.0)));
        assert!(!is_point_within_roi(&roi, &Point::new(9.9, 30.0)));
        assert!(!is_point_within_roi(&roi, &Point::new(50.0, 60.1)));
    }

    #[test]
    fn test_clamp_point_to_roi() {
        let roi = RegionOfInterest::new(0.0, 0.0, 100.0, 100.0);

        assert_eq!(clamp_point_to_roi(&Point::new(-10.0, 0.0), &roi).x, 0.0);
        assert_eq!(clamp_point_to_roi(&Point::new(110.0, 0.0), &roi).x, 100.0);
        assert_eq!(clamp_point_to_roi(&Point::new(0.0, -10.0), &roi).y, 0.0);
        assert_eq!(clamp_point_to_roi(&Point::new(0.0, 110.0), &roi).y, 100.0);

        // Offset region clamps against its far edge, not its width
        let offset = RegionOfInterest::new(50.0, 50.0, 100.0, 100.0);
        let clamped = clamp_point_to_roi(&Point::new(200.0, 10.0), &offset);
        assert_eq!(clamped, Point::new(150.0, 50.0));
    }

    #[test]
    fn test_normalize_denormalize_roundtrip() {
        let rois = [
            RegionOfInterest::new(0.0, 0.0, 100.0, 100.0),
            RegionOfInterest::new(12.5, -40.0, 640.0, 480.0),
            RegionOfInterest::new(300.0, 200.0, 3.0, 7.0),
        ];
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.25, 0.75),
            Point::new(0.333, 0.9),
        ];

        for roi in &rois {
            for p in &points {
                let back = normalize_point(&denormalize_point(p, roi), roi);
                assert!(approx_eq(back.x, p.x), "{:?} in {:?}", p, roi);
                assert!(approx_eq(back.y, p.y), "{:?} in {:?}", p, roi);
            }
        }
    }

    #[test]
    fn test_denormalize_uses_roi_origin() {
        let roi = RegionOfInterest::new(10.0, 20.0, 200.0, 100.0);
        let p = denormalize_point(&Point::new(0.5, 0.5), &roi);
        assert_eq!(p, Point::new(110.0, 70.0));
    }

    #[test]
    fn test_project_point_onto_segment() {
        let segment = (Point::new(0.0, 0.0), Point::new(10.0, 0.0));

        assert_eq!(
            project_point_onto_segment(segment, &Point::new(5.0, 3.0)),
            Some(Point::new(5.0, 0.0))
        );
        assert_eq!(project_point_onto_segment(segment, &Point::new(-1.0, 0.0)), None);
        assert_eq!(project_point_onto_segment(segment, &Point::new(11.0, 0.0)), None);
        assert_eq!(
            project_point_onto_segment(segment, &Point::new(0.0, 0.0)),
            Some(Point::new(0.0, 0.0))
        );
        assert_eq!(
            project_point_onto_segment(segment, &Point::new(10.0, -4.0)),
            Some(Point::new(10.0, 0.0))
        );
    }

    #[test]
    fn test_project_point_onto_diagonal_segment() {
        let segment = (Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let projected = project_point_onto_segment(segment, &Point::new(0.0, 10.0))
            .expect("projection should be on the segment");

        assert!(approx_eq(projected.x, 5.0));
        assert!(approx_eq(projected.y, 5.0));
    }

    #[test]
    fn test_project_onto_degenerate_segment() {
        let p = Point::new(3.0, 3.0);
        assert_eq!(project_point_onto_segment((p, p), &p), Some(p));
        assert_eq!(project_point_onto_segment((p, p), &Point::new(4.0, 3.0)), None);
    }

    #[test]
    fn test_min_max_along_axis() {
        let points = [
            Point::new(10.0, 20.0),
            Point::new(5.0, 30.0),
            Point::new(15.0, 10.0),
        ];

        assert_eq!(min_max_along_axis(&points, PointAxis::X), (5.0, 15.0));
        assert_eq!(min_max_along_axis(&points, PointAxis::Y), (10.0, 30.0));
    }

    #[test]
    fn test_min_max_empty() {
        let (min, max) = min_max_along_axis::<Point>(&[], PointAxis::X);
        assert_eq!(min, f32::INFINITY);
        assert_eq!(max, f32::NEG_INFINITY);
    }

    #[test]
    fn test_mirror_across_x() {
        let points = [Point::new(10.0, 1.0), Point::new(20.0, 2.0), Point::new(40.0, 3.0)];
        let mirrored = mirror_points_across_axis(&points, PointAxis::X);

        assert_eq!(
            mirrored,
            vec![Point::new(40.0, 1.0), Point::new(30.0, 2.0), Point::new(10.0, 3.0)]
        );
    }

    #[test]
    fn test_mirror_across_y_keeps_x() {
        let points = [Point::new(1.0, 0.0), Point::new(2.0, 8.0)];
        let mirrored = mirror_points_across_axis(&points, PointAxis::Y);

        assert_eq!(mirrored, vec![Point::new(1.0, 8.0), Point::new(2.0, 0.0)]);
    }

    #[test]
    fn test_mirror_is_involutive() {
        let points = [
            Point::new(3.0, 7.0),
            Point::new(-12.5, 4.25),
            Point::new(100.0, 0.5),
            Point::new(42.0, 42.0),
        ];

        let twice = mirror_points_across_axis(
            &mirror_points_across_axis(&points, PointAxis::X),
            PointAxis::X,
        );
        assert_eq!(twice, points.to_vec());
    }

    #[test]
    fn test_mirror_empty_is_noop() {
        assert!(mirror_points_across_axis::<Point>(&[], PointAxis::X).is_empty());
    }

    #[test]
    fn test_roi_scaled_about_center() {
        let roi = RegionOfInterest::new(0.0, 0.0, 100.0, 200.0);
        let scaled = roi.scaled(0.5);

        assert_eq!(scaled, RegionOfInterest::new(25.0, 50.0, 50.0, 100.0));
        assert_eq!(scaled.center(), roi.center());
    }
}
