//! Heatmap generation: grid extents and point-to-cell binning.
//!
//! The grid covers the track's latitude extent top-down (row 0 is the
//! northernmost row) and the occupied longitude arc left-to-right. Longitude
//! is circular, so the column span is chosen by finding the widest empty
//! longitude arc and excluding it from the grid; a track hugging the
//! antimeridian gets a narrow grid rather than one wrapping the whole globe.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackError};
use crate::{Track, TrackPoint};

/// Grid cell dimensions in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Degrees of longitude per column, > 0
    pub cell_width: f64,
    /// Degrees of latitude per row, > 0
    pub cell_height: f64,
}

impl HeatmapConfig {
    /// Create a config with the given cell dimensions.
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.cell_width) || !ok(self.cell_height) {
            return Err(TrackError::ConfigError {
                message: format!(
                    "cell dimensions must be positive, got {} x {}",
                    self.cell_width, self.cell_height
                ),
            });
        }
        Ok(())
    }
}

/// A dense grid of visit counts over geographic cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<u64>>,
}

impl Heatmap {
    /// Number of rows (latitude cells, north to south).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (longitude cells, west to east along the occupied arc).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Visit count for one cell.
    pub fn count_at(&self, row: usize, col: usize) -> Result<u64> {
        let cell = self
            .grid
            .get(row)
            .ok_or(TrackError::IndexOutOfRange {
                index: row,
                len: self.rows,
            })?
            .get(col)
            .ok_or(TrackError::IndexOutOfRange {
                index: col,
                len: self.cols,
            })?;
        Ok(*cell)
    }

    /// Rows of counts, north to south.
    pub fn grid(&self) -> &[Vec<u64>] {
        &self.grid
    }

    /// Sum of all cell counts; equals the number of binned points.
    pub fn total_count(&self) -> u64 {
        self.grid.iter().flatten().sum()
    }
}

/// Geographic extent of the grid plus its dimensions.
struct GridExtent {
    min_lat: f64,
    max_lat: f64,
    start_lon: f64,
    end_lon: f64,
    rows: usize,
    cols: usize,
}

impl GridExtent {
    /// Compute extents from points sorted by longitude ascending.
    fn from_sorted(points: &[&TrackPoint], config: &HeatmapConfig) -> Self {
        let mut min_lat = points[0].latitude();
        let mut max_lat = min_lat;
        for p in &points[1..] {
            let lat = p.latitude();
            if lat > max_lat {
                max_lat = lat;
            } else if lat < min_lat {
                min_lat = lat;
            }
        }
        let rows = cell_count(max_lat - min_lat, config.cell_height);

        let lowest = points[0].longitude();
        let highest = points[points.len() - 1].longitude();

        // Candidate gap: the arc crossing the antimeridian, from the
        // highest longitude around to the lowest.
        let mut start_lon = lowest;
        let mut end_lon = highest;
        let mut widest_gap = (180.0 + lowest) + (180.0 - highest);

        // Linear scan over adjacent pairs for a wider interior gap. The
        // grid runs from the end of the widest gap around to its start.
        for pair in points.windows(2) {
            let gap = pair[1].longitude() - pair[0].longitude();
            if gap > widest_gap {
                widest_gap = gap;
                start_lon = pair[1].longitude();
                end_lon = pair[0].longitude();
            }
        }

        // Re-check the wraparound arc against the widest interior gap.
        let wraparound_gap = (180.0 - highest) + (180.0 + lowest);
        if wraparound_gap > widest_gap {
            start_lon = lowest;
            end_lon = highest;
        }

        let direct_diff = (start_lon - end_lon).abs();
        let span = direct_diff.min(360.0 - direct_diff);
        let cols = cell_count(span, config.cell_width);

        Self {
            min_lat,
            max_lat,
            start_lon,
            end_lon,
            rows,
            cols,
        }
    }

    /// Map a point to its (row, col) cell.
    ///
    /// Exact-boundary points are forced into the last row/column, and both
    /// indices are clamped into range as a floating-point safety net. This
    /// is deliberate rounding repair, not an error path.
    fn cell(&self, pt: &TrackPoint, config: &HeatmapConfig) -> (usize, usize) {
        let mut row = ((self.max_lat - pt.latitude()) / config.cell_height).floor() as i64;
        if pt.latitude() == self.min_lat {
            row = self.rows as i64 - 1;
        }

        let mut lon_offset = pt.longitude() - self.start_lon;
        if lon_offset < 0.0 {
            lon_offset += 360.0;
        }
        let mut col = (lon_offset / config.cell_width).floor() as i64;
        if pt.longitude() == self.end_lon {
            col = self.cols as i64 - 1;
        }

        (
            row.clamp(0, self.rows as i64 - 1) as usize,
            col.clamp(0, self.cols as i64 - 1) as usize,
        )
    }
}

/// Number of cells needed to cover `span` degrees, at least one.
fn cell_count(span: f64, cell_size: f64) -> usize {
    let cells = (span / cell_size).ceil();
    if cells < 1.0 {
        1
    } else {
        cells as usize
    }
}

/// Build an occupancy heatmap over the track's points.
///
/// Flattens every segment's points, determines the grid extents (including
/// circular-longitude gap detection), and counts points per cell. Fails with
/// [`TrackError::EmptyTrack`] when the track holds no points.
pub fn generate_heatmap(track: &Track, config: &HeatmapConfig) -> Result<Heatmap> {
    config.validate()?;

    let mut points: Vec<&TrackPoint> = track
        .segments()
        .iter()
        .flat_map(|seg| seg.points().iter())
        .collect();
    if points.is_empty() {
        return Err(TrackError::EmptyTrack);
    }

    // Coordinates are validated at construction, so NaN cannot appear.
    points.sort_by(|a, b| a.longitude().total_cmp(&b.longitude()));

    let extent = GridExtent::from_sorted(&points, config);
    let mut grid = vec![vec![0u64; extent.cols]; extent.rows];
    for pt in &points {
        let (row, col) = extent.cell(pt, config);
        grid[row][col] += 1;
    }

    debug!(
        "[Heatmap] Binned {} points into {}x{} grid (lat {}..{}, lon {}..{})",
        points.len(),
        extent.rows,
        extent.cols,
        extent.min_lat,
        extent.max_lat,
        extent.start_lon,
        extent.end_lon
    );

    Ok(Heatmap {
        rows: extent.rows,
        cols: extent.cols,
        grid,
    })
}
