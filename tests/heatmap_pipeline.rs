//! End-to-end pipeline tests: text input -> track -> heatmap -> rendering.
//!
//! These exercise the same path as the CLI binary, without the process
//! wrapper: `read_track` over a text buffer, `generate_heatmap`, then
//! `render_heatmap` into a byte buffer.

use std::io::Cursor;

use track_heatmap::{
    generate_heatmap, read_track, render_heatmap, Heatmap, HeatmapConfig, RenderConfig,
    TrackError,
};

/// Helper: run the full pipeline and return the rendered character grid.
fn render_pipeline(
    input: &str,
    cell_width: f64,
    cell_height: f64,
    palette: &str,
    bucket_width: u64,
) -> String {
    let track = read_track(Cursor::new(input)).expect("failed to read track");
    let heatmap = generate_heatmap(&track, &HeatmapConfig::new(cell_width, cell_height))
        .expect("failed to build heatmap");
    let config = RenderConfig::new(palette, bucket_width).expect("invalid render config");
    let mut out = Vec::new();
    render_heatmap(&mut out, &heatmap, &config).expect("failed to render");
    String::from_utf8(out).expect("rendered output is not UTF-8")
}

#[test]
fn two_segment_track_renders_expected_grid() {
    // Two segments over a 2-degree by 2-degree area; a digit palette with
    // bucket width 1 makes the rendered characters the raw counts.
    let input = "\
2.5 10.5 1
2.5 10.6 2
1.5 11.5 3

0.5 12.5 4
0.5 12.5 6
";
    let rendered = render_pipeline(input, 1.0, 1.0, "0123456789", 1);
    assert_eq!(rendered, "20\n03\n");
}

#[test]
fn antimeridian_crossing_track_stays_narrow() {
    // Points either side of the antimeridian bin into a single 1-degree
    // column; the 359-degree direct span must lose to the 1-degree arc.
    let input = "10.0 179.5 1\n10.0 -179.5 2\n";
    let rendered = render_pipeline(input, 1.0, 1.0, " .o", 1);
    assert_eq!(rendered, "o\n");
}

#[test]
fn every_point_is_binned_exactly_once() {
    let input = "\
51.50 -0.12 1
51.51 -0.13 2
51.52 -0.14 3

51.53 -0.12 4
51.54 -0.11 5

51.55 -0.10 6
";
    let track = read_track(Cursor::new(input)).unwrap();
    assert_eq!(track.segment_count(), 3);
    assert_eq!(track.total_point_count(), 6);

    let heatmap = generate_heatmap(&track, &HeatmapConfig::new(0.01, 0.01)).unwrap();
    assert_eq!(heatmap.total_count(), 6);
}

#[test]
fn merged_segments_produce_the_same_heatmap() {
    let input = "0.5 0.5 1\n\n1.5 1.5 2\n\n2.5 2.5 3\n";
    let mut track = read_track(Cursor::new(input)).unwrap();
    let config = HeatmapConfig::new(1.0, 1.0);
    let before = generate_heatmap(&track, &config).unwrap();

    track.merge_segments(0, 2).unwrap();
    assert_eq!(track.segment_count(), 1);
    let after = generate_heatmap(&track, &config).unwrap();

    // Merging moves points between segments; cell occupancy is unchanged.
    assert_eq!(before, after);
}

#[test]
fn ingest_errors_abort_the_run() {
    assert!(matches!(
        read_track(Cursor::new("0 0 1\nbroken\n")).unwrap_err(),
        TrackError::MalformedLine { line: 2 }
    ));
    assert!(matches!(
        read_track(Cursor::new("0 0 2\n0 1 1\n")).unwrap_err(),
        TrackError::NonIncreasingTimestamp { line: 2, .. }
    ));
    assert!(matches!(
        read_track(Cursor::new("91.0 0 1\n")).unwrap_err(),
        TrackError::InvalidCoordinate { .. }
    ));
}

#[test]
fn heatmap_json_matches_rendered_counts() {
    let input = "2.5 10.5 1\n2.5 10.6 2\n1.5 11.5 3\n";
    let track = read_track(Cursor::new(input)).unwrap();
    let heatmap = generate_heatmap(&track, &HeatmapConfig::new(1.0, 1.0)).unwrap();

    let json = serde_json::to_string(&heatmap).unwrap();
    let decoded: Heatmap = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, heatmap);
    assert_eq!(decoded.total_count(), 3);
}
