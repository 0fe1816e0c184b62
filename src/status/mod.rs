pub mod classify;
pub mod colors;

pub use classify::{CampIndex, classify_block};
pub use colors::{Color, Palette, StatusColor, parse_color, to_hex};
