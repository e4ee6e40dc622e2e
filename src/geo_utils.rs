//! Geographic utilities: great-circle distance between track points.

use geo::{Distance, Haversine, Point};

use crate::TrackPoint;

/// Great-circle (haversine) distance between two track points, in meters.
pub fn haversine_distance(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let a = Point::new(p1.longitude(), p1.latitude());
    let b = Point::new(p2.longitude(), p2.latitude());
    Haversine::distance(a, b)
}

/// Total great-circle length of a polyline of track points, in meters.
///
/// Returns 0.0 for fewer than two points.
pub fn polyline_length(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}
