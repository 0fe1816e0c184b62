use thiserror::Error;

use super::RingId;

/// Widest span a block may cover; arcs are always drawn as minor arcs
pub const MAX_SPAN_DEGREES: f64 = 180.0;

const SPAN_EPSILON: f64 = 1e-9;

/// Why a single block's outline could not be computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("ring '{0}' is not part of the ring alphabet")]
    InvalidRing(RingId),
    #[error("block {start}..{end} has zero angular span")]
    Degenerate { start: f64, end: f64 },
    #[error("block {start}..{end} ends before it starts")]
    InvertedRange { start: f64, end: f64 },
    #[error("block {start}..{end} spans more than 180 degrees")]
    SpanTooWide { start: f64, end: f64 },
    #[error("block angles must be finite")]
    NonFinite,
}

/// Angular span of a block in degrees
///
/// Construction normalizes the start angle into `[0, 360)` and keeps the span,
/// so `(-45, 0)` and `(315, 360)` describe the same range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRange {
    start: f64,
    end: f64,
}

impl AngleRange {
    pub fn new(start: f64, end: f64) -> Result<Self, BlockError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(BlockError::NonFinite);
        }

        let span = end - start;
        if span.abs() < SPAN_EPSILON {
            return Err(BlockError::Degenerate { start, end });
        }
        if span < 0.0 {
            return Err(BlockError::InvertedRange { start, end });
        }
        if span > MAX_SPAN_DEGREES + SPAN_EPSILON {
            return Err(BlockError::SpanTooWide { start, end });
        }

        // rem_euclid rounds tiny negative inputs up to exactly 360.0
        let mut start = start.rem_euclid(360.0);
        if start >= 360.0 {
            start = 0.0;
        }
        Ok(Self {
            start,
            end: start + span,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn start_radians(&self) -> f64 {
        self.start.to_radians()
    }

    pub fn end_radians(&self) -> f64 {
        self.end.to_radians()
    }
}

/// One angular subdivision of a ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub ring: RingId,
    pub index: usize,
    pub angles: AngleRange,
}

impl Block {
    pub fn new(ring: RingId, index: usize, angles: AngleRange) -> Self {
        Self {
            ring,
            index,
            angles,
        }
    }

    /// Stable identifier, e.g. `A-0-45`
    pub fn id(&self) -> String {
        block_id(self.ring, self.angles.start(), self.angles.end())
    }
}

/// Raw start and end angle of the `index`-th of `count` equal subdivisions
pub fn subdivision_angles(index: usize, count: usize) -> (f64, f64) {
    let step = 360.0 / count as f64;
    (index as f64 * step, (index + 1) as f64 * step)
}

/// Identifier for a ring and raw angle pair, also used for blocks that failed to build
pub fn block_id(ring: RingId, start: f64, end: f64) -> String {
    format!("{}-{}-{}", ring, start, end)
}
