pub mod driver;
pub mod json;
pub mod svg;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{ConfigError, StyleConfig};
use crate::domain::RingId;
use crate::geometry::{PolygonOutline, Viewport};
use crate::status::{Color, StatusColor, parse_color};

pub use driver::{BlockRequest, MapRenderer, RenderReport};
pub use json::JsonSurface;
pub use svg::SvgSurface;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

/// Resolved colors for everything that is not a block fill
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub stroke: StrokeStyle,
    pub background: Color,
    pub overlay: StrokeStyle,
}

impl Default for RenderStyle {
    fn default() -> Self {
        let black = Color::new(0, 0, 0);
        Self {
            stroke: StrokeStyle {
                color: black,
                width: 1.0,
            },
            background: Color::new(0xFF, 0xFF, 0xFF),
            overlay: StrokeStyle {
                color: Color::new(0x6B, 0x72, 0x80),
                width: 1.0,
            },
        }
    }
}

impl RenderStyle {
    pub fn from_config(config: &StyleConfig) -> Result<Self, ConfigError> {
        if config.stroke_width < 0.0 || !config.stroke_width.is_finite() {
            return Err(ConfigError::NonPositive("style.stroke_width"));
        }
        Ok(Self {
            stroke: StrokeStyle {
                color: parse_color("style.stroke_color", &config.stroke_color)?,
                width: config.stroke_width,
            },
            background: parse_color("style.background", &config.background)?,
            overlay: StrokeStyle {
                color: parse_color("style.overlay_color", &config.overlay_color)?,
                width: config.stroke_width,
            },
        })
    }
}

/// One block ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: String,
    pub ring: RingId,
    pub index: usize,
    pub outline: PolygonOutline,
    pub status: StatusColor,
    pub fill: Color,
    pub stroke: StrokeStyle,
}

/// Stroke-only path drawn over the blocks, e.g. a ring road from a site plan
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub ring: String,
    pub path_data: String,
    pub stroke: StrokeStyle,
}

/// A drawing surface the renderer paints onto
///
/// The renderer owns the surface for one pass: `mount` once, any number of
/// draw calls, then `unmount` consumes it and yields the finished output.
pub trait Surface {
    type Output;

    fn mount(&mut self, viewport: &Viewport, background: Color);
    fn draw_block(&mut self, shape: &Shape);
    fn draw_overlay(&mut self, overlay: &Overlay);
    fn unmount(self) -> Self::Output;
}

/// Write a rendered document to disk
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(contents.as_bytes())?;
    writer.flush()?;

    Ok(())
}
