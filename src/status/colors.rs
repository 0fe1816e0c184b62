use palette::Srgb;
use std::fmt;
use std::iter;
use strum::IntoEnumIterator;

use crate::config::{ConfigError, PaletteConfig};
use crate::domain::BedStatus;

pub type Color = Srgb<u8>;

/// Palette key of a block: the matched camp's status, or no camp at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusColor {
    Status(BedStatus),
    Unassigned,
}

impl StatusColor {
    /// Every palette key, statuses first
    pub fn all() -> impl Iterator<Item = StatusColor> {
        BedStatus::iter()
            .map(StatusColor::Status)
            .chain(iter::once(StatusColor::Unassigned))
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusColor::Status(status) => write!(f, "{}", status),
            StatusColor::Unassigned => write!(f, "unassigned"),
        }
    }
}

/// Fill colors for every palette key
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub none: Color,
    pub video_complete: Color,
    pub buddy_assigned: Color,
    pub complete: Color,
    pub unassigned: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            none: Srgb::new(0x9C, 0xA3, 0xAF),
            video_complete: Srgb::new(0xFD, 0xE0, 0x47),
            buddy_assigned: Srgb::new(0xFB, 0x92, 0x3C),
            complete: Srgb::new(0x4A, 0xDE, 0x80),
            unassigned: Srgb::new(0x9C, 0xA3, 0xAF),
        }
    }
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            none: parse_color("palette.none", &config.none)?,
            video_complete: parse_color("palette.video_complete", &config.video_complete)?,
            buddy_assigned: parse_color("palette.buddy_assigned", &config.buddy_assigned)?,
            complete: parse_color("palette.complete", &config.complete)?,
            unassigned: parse_color("palette.unassigned", &config.unassigned)?,
        })
    }

    pub fn color(&self, key: StatusColor) -> Color {
        match key {
            StatusColor::Status(BedStatus::None) => self.none,
            StatusColor::Status(BedStatus::VideoComplete) => self.video_complete,
            StatusColor::Status(BedStatus::BuddyAssigned) => self.buddy_assigned,
            StatusColor::Status(BedStatus::Complete) => self.complete,
            StatusColor::Unassigned => self.unassigned,
        }
    }
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional)
pub fn parse_color(key: &'static str, value: &str) -> Result<Color, ConfigError> {
    value
        .trim()
        .parse::<Srgb<u8>>()
        .map_err(|_| ConfigError::InvalidColor {
            key,
            value: value.to_string(),
        })
}

/// Format as uppercase `#RRGGBB`
pub fn to_hex(color: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}
