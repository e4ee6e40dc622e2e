//! Character-grid rendering: maps cell counts to palette characters.
//!
//! Counts are bucketed in runs of `bucket_width`: the first palette
//! character covers counts `0..bucket_width`, the second the next run, and
//! so on; every count from the last bucket upward renders as the final
//! palette character.

use std::io::Write;

use crate::error::{Result, TrackError};
use crate::Heatmap;

/// Palette and bucket width for rendering a heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    palette: Vec<char>,
    bucket_width: u64,
}

impl RenderConfig {
    /// Create a render config from a non-empty palette string and a positive
    /// bucket width.
    pub fn new(palette: &str, bucket_width: u64) -> Result<Self> {
        let palette: Vec<char> = palette.chars().collect();
        if palette.is_empty() {
            return Err(TrackError::ConfigError {
                message: "palette must not be empty".to_string(),
            });
        }
        if bucket_width == 0 {
            return Err(TrackError::ConfigError {
                message: "bucket width must be positive".to_string(),
            });
        }
        Ok(Self {
            palette,
            bucket_width,
        })
    }

    /// The display character for one cell count.
    ///
    /// With `N` palette characters and bucket width `W`, any count at or
    /// above `N*W - W` takes the final character; otherwise bucket
    /// `count / W` selects it.
    pub fn char_for(&self, count: u64) -> char {
        let n = self.palette.len() as u64;
        let w = self.bucket_width;
        if count >= n * w - w {
            self.palette[self.palette.len() - 1]
        } else {
            self.palette[(count / w) as usize]
        }
    }
}

/// Write the heatmap as one line of palette characters per grid row.
pub fn render_heatmap<W: Write>(out: &mut W, heatmap: &Heatmap, config: &RenderConfig) -> Result<()> {
    let mut line = String::with_capacity(heatmap.cols() + 1);
    for row in heatmap.grid() {
        line.clear();
        for &count in row {
            line.push(config.char_for(count));
        }
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }
    Ok(())
}
