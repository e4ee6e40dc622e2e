//! Track data model: ordered segments of ordered GPS points.
//!
//! A [`Track`] is one full GPS recording, composed of one or more
//! [`Segment`]s. A segment is a maximal run of points recorded without a
//! gap or pause; it accumulates the great-circle distance between
//! consecutive points in insertion order.

use log::debug;

use crate::error::{Result, TrackError};
use crate::geo_utils::haversine_distance;
use crate::TrackPoint;

/// One continuous recording: an ordered sequence of points plus the
/// cumulative great-circle distance along them.
#[derive(Debug, Clone, Default)]
pub struct Segment {
    points: Vec<TrackPoint>,
    distance: f64,
}

impl Segment {
    /// Create an empty segment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, extending the cumulative distance by the great-circle
    /// leg from the previous last point.
    ///
    /// Time ordering is not checked here; the ingestion layer enforces it.
    /// On allocation failure the segment is left unchanged.
    pub fn add_point(&mut self, pt: TrackPoint) -> Result<()> {
        self.points
            .try_reserve(1)
            .map_err(|_| TrackError::AllocationFailure)?;
        self.push_point(pt);
        Ok(())
    }

    /// Cumulative great-circle distance in meters, in insertion order.
    pub fn length(&self) -> f64 {
        self.distance
    }

    /// Number of points in this segment.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Copy of the point at `index`.
    pub fn point_at(&self, index: usize) -> Result<TrackPoint> {
        self.points
            .get(index)
            .copied()
            .ok_or(TrackError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    /// All points in insertion order.
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Append without reserving; callers must have reserved capacity.
    fn push_point(&mut self, pt: TrackPoint) {
        if let Some(last) = self.points.last() {
            self.distance += haversine_distance(last, &pt);
        }
        self.points.push(pt);
    }
}

/// A full GPS recording.
///
/// A track always holds at least one segment; the "current" segment is the
/// last one, and [`Track::add_point`] appends there until
/// [`Track::start_new_segment`] opens a fresh one.
#[derive(Debug, Clone)]
pub struct Track {
    segments: Vec<Segment>,
}

impl Default for Track {
    fn default() -> Self {
        Self::new()
    }
}

impl Track {
    /// Create a track with exactly one empty segment.
    pub fn new() -> Self {
        Self {
            segments: vec![Segment::new()],
        }
    }

    /// Append a point to the current (last) segment.
    pub fn add_point(&mut self, pt: TrackPoint) -> Result<()> {
        match self.segments.last_mut() {
            Some(seg) => seg.add_point(pt),
            // Unreachable: a track always holds at least one segment.
            None => Err(TrackError::IndexOutOfRange { index: 0, len: 0 }),
        }
    }

    /// Open a new empty segment; subsequent points append there.
    pub fn start_new_segment(&mut self) -> Result<()> {
        self.segments
            .try_reserve(1)
            .map_err(|_| TrackError::AllocationFailure)?;
        self.segments.push(Segment::new());
        Ok(())
    }

    /// Merge segments `start + 1 ..= end` into segment `start`.
    ///
    /// Every donor's points are appended to segment `start` in order,
    /// including segment `end`'s points; the donors are removed and the
    /// remaining segments compact leftward. The merged cumulative distance
    /// is the insertion-order sum, so the legs joining consecutive donors
    /// are counted.
    ///
    /// Fails with [`TrackError::IndexOutOfRange`] when `start >= end` or
    /// `end >= segment_count()`, without mutating the track.
    pub fn merge_segments(&mut self, start: usize, end: usize) -> Result<()> {
        let len = self.segments.len();
        if start >= end || end >= len {
            return Err(TrackError::IndexOutOfRange { index: end, len });
        }

        let extra: usize = self.segments[start + 1..=end]
            .iter()
            .map(Segment::point_count)
            .sum();
        self.segments[start]
            .points
            .try_reserve(extra)
            .map_err(|_| TrackError::AllocationFailure)?;

        let donors: Vec<Segment> = self.segments.drain(start + 1..=end).collect();
        for donor in donors {
            for pt in donor.points {
                self.segments[start].push_point(pt);
            }
        }
        debug!(
            "[Track] Merged segments {}..={} into {} ({} points absorbed)",
            start + 1,
            end,
            start,
            extra
        );
        Ok(())
    }

    /// Number of segments (always >= 1).
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of points in segment `seg_index`.
    pub fn point_count(&self, seg_index: usize) -> Result<usize> {
        self.segment(seg_index).map(Segment::point_count)
    }

    /// Copy of point `pt_index` within segment `seg_index`.
    pub fn get_point(&self, seg_index: usize, pt_index: usize) -> Result<TrackPoint> {
        self.segment(seg_index)?.point_at(pt_index)
    }

    /// Cumulative distance of every segment, in segment order.
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.segments.iter().map(Segment::length).collect()
    }

    /// Total number of points across all segments.
    pub fn total_point_count(&self) -> usize {
        self.segments.iter().map(Segment::point_count).sum()
    }

    /// All segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn segment(&self, seg_index: usize) -> Result<&Segment> {
        self.segments
            .get(seg_index)
            .ok_or(TrackError::IndexOutOfRange {
                index: seg_index,
                len: self.segments.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64, time: i64) -> TrackPoint {
        TrackPoint::new(lat, lon, time).unwrap()
    }

    #[test]
    fn test_new_track_has_one_empty_segment() {
        let track = Track::new();
        assert_eq!(track.segment_count(), 1);
        assert_eq!(track.point_count(0).unwrap(), 0);
        assert_eq!(track.segment_lengths(), vec![0.0]);
    }

    #[test]
    fn test_segment_distance_accumulates() {
        let a = pt(51.5074, -0.1278, 0);
        let b = pt(51.5080, -0.1290, 10);
        let c = pt(51.5090, -0.1300, 20);

        let mut seg = Segment::new();
        seg.add_point(a).unwrap();
        assert_eq!(seg.length(), 0.0);
        seg.add_point(b).unwrap();
        seg.add_point(c).unwrap();

        let expected = haversine_distance(&a, &b) + haversine_distance(&b, &c);
        assert_eq!(seg.point_count(), 3);
        assert!((seg.length() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_segment_point_at_bounds() {
        let mut seg = Segment::new();
        seg.add_point(pt(1.0, 2.0, 0)).unwrap();
        assert_eq!(seg.point_at(0).unwrap(), pt(1.0, 2.0, 0));
        assert_eq!(
            seg.point_at(1),
            Err(TrackError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_points_append_to_current_segment() {
        let mut track = Track::new();
        track.add_point(pt(10.0, 10.0, 0)).unwrap();
        track.start_new_segment().unwrap();
        track.add_point(pt(20.0, 20.0, 10)).unwrap();
        track.add_point(pt(20.0, 21.0, 20)).unwrap();

        assert_eq!(track.segment_count(), 2);
        assert_eq!(track.point_count(0).unwrap(), 1);
        assert_eq!(track.point_count(1).unwrap(), 2);
        assert_eq!(track.get_point(1, 0).unwrap(), pt(20.0, 20.0, 10));
    }

    #[test]
    fn test_accessors_reject_bad_indices() {
        let track = Track::new();
        assert!(matches!(
            track.point_count(1),
            Err(TrackError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(track.get_point(0, 0).is_err());
        assert!(track.get_point(5, 0).is_err());
    }

    fn four_segment_track() -> Track {
        let mut track = Track::new();
        track.add_point(pt(0.0, 0.0, 0)).unwrap();
        track.start_new_segment().unwrap();
        track.add_point(pt(1.0, 1.0, 10)).unwrap();
        track.start_new_segment().unwrap();
        track.add_point(pt(2.0, 2.0, 20)).unwrap();
        track.add_point(pt(2.0, 3.0, 30)).unwrap();
        track.start_new_segment().unwrap();
        track.add_point(pt(3.0, 3.0, 40)).unwrap();
        track
    }

    #[test]
    fn test_merge_includes_endpoint_segment() {
        let mut track = four_segment_track();
        track.merge_segments(0, 2).unwrap();

        // Segments 1 and 2 folded into 0; old segment 3 shifts to index 1.
        assert_eq!(track.segment_count(), 2);
        assert_eq!(track.point_count(0).unwrap(), 4);
        assert_eq!(track.get_point(0, 1).unwrap(), pt(1.0, 1.0, 10));
        assert_eq!(track.get_point(0, 3).unwrap(), pt(2.0, 3.0, 30));
        assert_eq!(track.get_point(1, 0).unwrap(), pt(3.0, 3.0, 40));
    }

    #[test]
    fn test_merge_distance_counts_junction_legs() {
        let mut track = four_segment_track();
        track.merge_segments(0, 3).unwrap();

        assert_eq!(track.segment_count(), 1);
        let all: Vec<TrackPoint> = (0..track.point_count(0).unwrap())
            .map(|i| track.get_point(0, i).unwrap())
            .collect();
        let expected = crate::geo_utils::polyline_length(&all);
        let lengths = track.segment_lengths();
        assert!((lengths[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_merge_rejects_bad_range_without_mutation() {
        let mut track = four_segment_track();
        let lengths_before = track.segment_lengths();

        assert!(track.merge_segments(2, 2).is_err());
        assert!(track.merge_segments(3, 1).is_err());
        assert!(track.merge_segments(0, 4).is_err());

        assert_eq!(track.segment_count(), 4);
        assert_eq!(track.segment_lengths(), lengths_before);
    }

    #[test]
    fn test_total_point_count() {
        let track = four_segment_track();
        assert_eq!(track.total_point_count(), 5);
    }
}
