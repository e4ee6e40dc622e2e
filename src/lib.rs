//! # Track Heatmap
//!
//! GPS track modelling and character-grid occupancy heatmaps.
//!
//! This library provides:
//! - A track data model (segments of ordered, timestamped GPS points with
//!   derived great-circle distance)
//! - Heatmap construction over a latitude/longitude grid, with circular
//!   longitude handling (the widest empty arc across the antimeridian is
//!   excluded from the grid)
//! - Text-line ingestion and palette-based character rendering collaborators
//!
//! ## Quick Start
//!
//! ```rust
//! use track_heatmap::{generate_heatmap, HeatmapConfig, Track, TrackPoint};
//!
//! let mut track = Track::new();
//! track.add_point(TrackPoint::new(51.5074, -0.1278, 0).unwrap()).unwrap();
//! track.add_point(TrackPoint::new(51.5080, -0.1290, 10).unwrap()).unwrap();
//! track.start_new_segment().unwrap();
//! track.add_point(TrackPoint::new(51.5090, -0.1300, 20).unwrap()).unwrap();
//!
//! let config = HeatmapConfig::new(0.001, 0.001);
//! let heatmap = generate_heatmap(&track, &config).unwrap();
//! assert_eq!(heatmap.total_count(), 3);
//! ```

use serde::Serialize;

// Unified error handling
pub mod error;
pub use error::{Result, TrackError};

// Geographic utilities (great-circle distance)
pub mod geo_utils;
pub use geo_utils::{haversine_distance, polyline_length};

// Track data model (segments of ordered points)
pub mod track;
pub use track::{Segment, Track};

// Heatmap generation (grid extents + binning)
pub mod heatmap;
pub use heatmap::{generate_heatmap, Heatmap, HeatmapConfig};

// Text-line ingestion collaborator
pub mod ingest;
pub use ingest::read_track;

// Character-grid rendering collaborator
pub mod render;
pub use render::{render_heatmap, RenderConfig};

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude, longitude and a timestamp.
///
/// Coordinates are validated at construction: latitude must lie in
/// `[-90, 90]` and longitude in `[-180, 180)` (the antimeridian itself is
/// represented as -180). Points are immutable values and are copied wherever
/// a collection takes ownership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    latitude: f64,
    longitude: f64,
    time: i64,
}

impl TrackPoint {
    /// Create a validated track point.
    ///
    /// Returns [`TrackError::InvalidCoordinate`] when the latitude is outside
    /// `[-90, 90]`, the longitude is outside `[-180, 180)`, or either value
    /// is not finite.
    pub fn new(latitude: f64, longitude: f64, time: i64) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(TrackError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            time,
        })
    }

    /// Latitude in degrees, in `[-90, 90]`.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, in `[-180, 180)`.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Timestamp (opaque, monotonically comparable).
    pub fn time(&self) -> i64 {
        self.time
    }
}

// ============================================================================
// Tests
// ============================================================================
