//! campmap - Render circular festival camp maps colored by bed-assignment status

pub mod config;
pub mod data;
pub mod domain;
pub mod geometry;
pub mod render;
pub mod status;
pub mod svgdoc;
