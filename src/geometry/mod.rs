pub mod outline;
pub mod viewport;

pub use outline::{
    PathCommand, PolygonOutline, Sweep, build_block_outline, build_outline_for, map_center,
};
pub use viewport::{Bounds, Viewport};
