use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{BlockError, RingAlphabet, RingId};
use crate::render::OutputFormat;

/// Map layout defaults, in canvas units.
///
/// Ring `i` (0 = innermost letter) occupies the annulus
///   inner = (BASE_RADIUS + i * RING_WIDTH) * SCALE
///   outer = inner + RING_WIDTH * SCALE
/// so with the defaults ring A spans 80 -> 104 and ring F spans 200 -> 224,
/// comfortably inside an 800 x 800 canvas centered at (400, 400).
pub mod defaults {
    pub const CENTER: (f64, f64) = (400.0, 400.0);
    pub const BASE_RADIUS: f64 = 100.0;
    pub const RING_WIDTH: f64 = 30.0;
    pub const SCALE: f64 = 0.8;
    pub const SUBDIVISIONS: usize = 8;
    pub const CANVAS_SIZE: f64 = 800.0;
    pub const FIT_MARGIN: f64 = 20.0;

    pub const STROKE_COLOR: &str = "#000000";
    pub const STROKE_WIDTH: f64 = 1.0;
    pub const BACKGROUND: &str = "#FFFFFF";
    pub const OVERLAY_COLOR: &str = "#6B7280";

    pub const COLOR_NONE: &str = "#9CA3AF";
    pub const COLOR_VIDEO_COMPLETE: &str = "#FDE047";
    pub const COLOR_BUDDY_ASSIGNED: &str = "#FB923C";
    pub const COLOR_COMPLETE: &str = "#4ADE80";
    pub const COLOR_UNASSIGNED: &str = "#9CA3AF";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid color for {key}: {value:?}")]
    InvalidColor { key: &'static str, value: String },
    #[error("ring alphabet is empty")]
    EmptyAlphabet,
    #[error("ring '{0}' appears more than once in the ring alphabet")]
    DuplicateRing(char),
    #[error("subdivisions must be at least 2 so each block spans at most 180 degrees")]
    TooFewSubdivisions,
    #[error("{0} must be positive")]
    NonPositive(&'static str),
}

fn default_center() -> (f64, f64) {
    defaults::CENTER
}
fn default_base_radius() -> f64 {
    defaults::BASE_RADIUS
}
fn default_ring_width() -> f64 {
    defaults::RING_WIDTH
}
fn default_scale() -> f64 {
    defaults::SCALE
}
fn default_subdivisions() -> usize {
    defaults::SUBDIVISIONS
}
fn default_canvas_size() -> f64 {
    defaults::CANVAS_SIZE
}
fn default_margin() -> f64 {
    defaults::FIT_MARGIN
}

/// Geometry of the ring layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center")]
    pub center: (f64, f64),
    #[serde(default = "default_base_radius")]
    pub base_radius: f64,
    #[serde(default = "default_ring_width")]
    pub ring_width: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub rings: RingAlphabet,
    #[serde(default = "default_subdivisions")]
    pub subdivisions: usize,
    #[serde(default = "default_canvas_size")]
    pub canvas_size: f64,
    /// Padding around the map when fitting the view to its content
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            base_radius: default_base_radius(),
            ring_width: default_ring_width(),
            scale: default_scale(),
            rings: RingAlphabet::default(),
            subdivisions: default_subdivisions(),
            canvas_size: default_canvas_size(),
            margin: default_margin(),
        }
    }
}

impl MapConfig {
    /// Inner and outer radius of a ring
    pub fn ring_radii(&self, ring: RingId) -> Result<(f64, f64), BlockError> {
        let index = self
            .rings
            .index_of(ring)
            .ok_or(BlockError::InvalidRing(ring))?;
        let inner = (self.base_radius + index as f64 * self.ring_width) * self.scale;
        let outer = inner + self.ring_width * self.scale;
        Ok((inner, outer))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rings.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if let Some(letter) = self.rings.first_duplicate() {
            return Err(ConfigError::DuplicateRing(letter));
        }
        if self.subdivisions < 2 {
            return Err(ConfigError::TooFewSubdivisions);
        }
        if self.base_radius < 0.0 || !self.base_radius.is_finite() {
            return Err(ConfigError::NonPositive("base_radius"));
        }
        if self.ring_width <= 0.0 || !self.ring_width.is_finite() {
            return Err(ConfigError::NonPositive("ring_width"));
        }
        if self.scale <= 0.0 || !self.scale.is_finite() {
            return Err(ConfigError::NonPositive("scale"));
        }
        if self.canvas_size <= 0.0 || !self.canvas_size.is_finite() {
            return Err(ConfigError::NonPositive("canvas_size"));
        }
        Ok(())
    }
}

fn default_stroke_color() -> String {
    defaults::STROKE_COLOR.to_string()
}
fn default_stroke_width() -> f64 {
    defaults::STROKE_WIDTH
}
fn default_background() -> String {
    defaults::BACKGROUND.to_string()
}
fn default_overlay_color() -> String {
    defaults::OVERLAY_COLOR.to_string()
}

/// Stroke and background colors, as hex strings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_background")]
    pub background: String,
    /// Stroke color of ring roads read from a site plan
    #[serde(default = "default_overlay_color")]
    pub overlay_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            stroke_width: default_stroke_width(),
            background: default_background(),
            overlay_color: default_overlay_color(),
        }
    }
}

fn default_color_none() -> String {
    defaults::COLOR_NONE.to_string()
}
fn default_color_video_complete() -> String {
    defaults::COLOR_VIDEO_COMPLETE.to_string()
}
fn default_color_buddy_assigned() -> String {
    defaults::COLOR_BUDDY_ASSIGNED.to_string()
}
fn default_color_complete() -> String {
    defaults::COLOR_COMPLETE.to_string()
}
fn default_color_unassigned() -> String {
    defaults::COLOR_UNASSIGNED.to_string()
}

/// Fill color per bed status, as hex strings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaletteConfig {
    #[serde(default = "default_color_none")]
    pub none: String,
    #[serde(default = "default_color_video_complete")]
    pub video_complete: String,
    #[serde(default = "default_color_buddy_assigned")]
    pub buddy_assigned: String,
    #[serde(default = "default_color_complete")]
    pub complete: String,
    /// Blocks with no matching camp
    #[serde(default = "default_color_unassigned")]
    pub unassigned: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            none: default_color_none(),
            video_complete: default_color_video_complete(),
            buddy_assigned: default_color_buddy_assigned(),
            complete: default_color_complete(),
            unassigned: default_color_unassigned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
    /// JSON file of camp records; built-in sample camps when absent
    #[serde(default)]
    pub camps: Option<PathBuf>,
    /// SVG site plan to read ring roads from
    #[serde(default)]
    pub site_plan: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub fit: bool,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

impl FileConfig {
    /// Load the first config file found in the usual locations
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists() {
                match Self::from_path(&path) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        log::warn!("Failed to load config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.map.validate()?;
        Ok(config)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("campmap.toml"));
    paths.push(PathBuf::from(".campmap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("campmap").join("config.toml"));
        paths.push(config_dir.join("campmap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".campmap.toml"));
        paths.push(home.join(".config").join("campmap").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_ring_radii() {
        let config = MapConfig::default();
        let (inner, outer) = config.ring_radii(RingId::new('A')).unwrap();
        assert!((inner - 80.0).abs() < 1e-9);
        assert!((outer - 104.0).abs() < 1e-9);

        let (inner, outer) = config.ring_radii(RingId::new('F')).unwrap();
        assert!((inner - 200.0).abs() < 1e-9);
        assert!((outer - 224.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_ring_radii() {
        let config = MapConfig::default();
        assert_eq!(
            config.ring_radii(RingId::new('Z')),
            Err(BlockError::InvalidRing(RingId::new('Z')))
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.map, MapConfig::default());
        assert_eq!(config.palette, PaletteConfig::default());
        assert!(config.output.is_none());
        assert!(!config.fit);
    }

    #[test]
    fn test_partial_map_section() {
        let config = FileConfig::from_toml(
            r##"
            format = "json"
            fit = true

            [map]
            rings = "ABCDEFGHIJKL"
            subdivisions = 12
            center = [500.0, 500.0]

            [palette]
            complete = "#00FF00"
            "##,
        )
        .unwrap();

        assert_eq!(config.format, Some(OutputFormat::Json));
        assert!(config.fit);
        assert_eq!(config.map.rings.len(), 12);
        assert_eq!(config.map.subdivisions, 12);
        assert_eq!(config.map.center, (500.0, 500.0));
        assert_eq!(config.map.scale, defaults::SCALE);
        assert_eq!(config.palette.complete, "#00FF00");
        assert_eq!(config.palette.none, defaults::COLOR_NONE);
    }

    #[test]
    fn test_validation_rejects_bad_layout() {
        let err = FileConfig::from_toml("[map]\nrings = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAlphabet));

        let err = FileConfig::from_toml("[map]\nrings = \"ABA\"").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRing('A')));

        let err = FileConfig::from_toml("[map]\nsubdivisions = 1").unwrap_err();
        assert!(matches!(err, ConfigError::TooFewSubdivisions));

        let err = FileConfig::from_toml("[map]\nring_width = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive("ring_width")));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "verbose = true").unwrap();
        writeln!(file, "[style]").unwrap();
        writeln!(file, "stroke_width = 2.5").unwrap();

        let config = FileConfig::from_path(file.path()).unwrap();
        assert!(config.verbose);
        assert_eq!(config.style.stroke_width, 2.5);
        assert_eq!(config.style.stroke_color, defaults::STROKE_COLOR);
    }

    #[test]
    fn test_missing_file() {
        let err = FileConfig::from_path(Path::new("/nonexistent/campmap.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
