//! Unified error handling for the track-heatmap library.
//!
//! This module provides a consistent error type for all track and heatmap
//! operations, replacing mixed error handling patterns (Option, panic,
//! silent failures).

use std::fmt;

/// Unified error type for track-heatmap operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    /// Point construction rejected: coordinates outside the valid range
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// Segment or point accessor called with a bad index
    IndexOutOfRange { index: usize, len: usize },
    /// Heatmap requested for a track with zero points
    EmptyTrack,
    /// Collection growth failed; the collection is unchanged
    AllocationFailure,
    /// Input line could not be parsed as `lat lon time`
    MalformedLine { line: usize },
    /// Input timestamps must be strictly increasing
    NonIncreasingTimestamp { line: usize, time: i64, last: i64 },
    /// Configuration error (cell sizes, palette, bucket width)
    ConfigError { message: String },
    /// I/O error while reading track input
    Io { message: String },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::InvalidCoordinate {
                latitude,
                longitude,
            } => {
                write!(f, "Invalid coordinate: ({}, {})", latitude, longitude)
            }
            TrackError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range (length {})", index, len)
            }
            TrackError::EmptyTrack => {
                write!(f, "Track contains no points")
            }
            TrackError::AllocationFailure => {
                write!(f, "Allocation failed while growing a collection")
            }
            TrackError::MalformedLine { line } => {
                write!(f, "Line {}: expected `lat lon time`", line)
            }
            TrackError::NonIncreasingTimestamp { line, time, last } => {
                write!(
                    f,
                    "Line {}: timestamp {} does not increase past {}",
                    line, time, last
                )
            }
            TrackError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            TrackError::Io { message } => {
                write!(f, "I/O error: {}", message)
            }
        }
    }
}

impl std::error::Error for TrackError {}

impl From<std::io::Error> for TrackError {
    fn from(err: std::io::Error) -> Self {
        TrackError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias for track-heatmap operations.
pub type Result<T> = std::result::Result<T, TrackError>;
