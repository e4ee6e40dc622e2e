//! Text-line ingestion: builds a [`Track`] from `lat lon time` lines.
//!
//! One point per line, whitespace separated. A blank line closes the current
//! segment; the next point opens a fresh one, so a trailing blank never
//! leaves an empty segment behind. Timestamps must be strictly increasing
//! across the whole input, and every segment must receive at least one point.

use std::io::BufRead;

use log::info;

use crate::error::{Result, TrackError};
use crate::{Track, TrackPoint};

/// Read a whole track from `reader`.
///
/// Fails fast on the first malformed line, invalid coordinate, or
/// non-increasing timestamp; the partial track is discarded.
pub fn read_track<R: BufRead>(reader: R) -> Result<Track> {
    let mut track = Track::new();
    let mut last_time: Option<i64> = None;
    let mut segment_has_points = false;
    let mut pending_break = false;
    let mut line_no = 0;

    for line in reader.lines() {
        let line = line?;
        line_no += 1;

        if line.trim().is_empty() {
            if !segment_has_points {
                return Err(TrackError::MalformedLine { line: line_no });
            }
            segment_has_points = false;
            pending_break = true;
            continue;
        }

        let (lat, lon, time) = parse_line(&line, line_no)?;
        if let Some(last) = last_time {
            if time <= last {
                return Err(TrackError::NonIncreasingTimestamp {
                    line: line_no,
                    time,
                    last,
                });
            }
        }
        let pt = TrackPoint::new(lat, lon, time)?;

        if pending_break {
            track.start_new_segment()?;
            pending_break = false;
        }
        track.add_point(pt)?;
        last_time = Some(time);
        segment_has_points = true;
    }

    if !segment_has_points {
        return Err(TrackError::Io {
            message: "unexpected end of input: final segment has no points".to_string(),
        });
    }

    info!(
        "[Ingest] Read {} points in {} segments",
        track.total_point_count(),
        track.segment_count()
    );
    Ok(track)
}

/// Parse one `lat lon time` line; exactly three fields.
fn parse_line(line: &str, line_no: usize) -> Result<(f64, f64, i64)> {
    let malformed = || TrackError::MalformedLine { line: line_no };
    let mut fields = line.split_whitespace();
    let lat: f64 = fields.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    let lon: f64 = fields.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    let time: i64 = fields.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    if fields.next().is_some() {
        return Err(malformed());
    }
    Ok((lat, lon, time))
}
