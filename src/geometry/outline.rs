use geo::{BoundingRect, Coord, LineString, Polygon, Rect};
use serde::Serialize;
use std::f64::consts::TAU;
use std::fmt::Write;

use crate::config::MapConfig;
use crate::domain::{AngleRange, Block, BlockError, RingId};

/// Line segments used per arc when an outline is flattened into a polygon
pub const DEFAULT_ARC_SEGMENTS: usize = 16;

/// Direction an arc is traced in screen coordinates (y pointing down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sweep {
    /// Increasing angle
    Clockwise,
    /// Decreasing angle
    CounterClockwise,
}

impl Sweep {
    /// SVG `sweep-flag` value
    pub fn svg_flag(&self) -> u8 {
        match self {
            Sweep::Clockwise => 1,
            Sweep::CounterClockwise => 0,
        }
    }
}

/// One drawing primitive of an outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo {
        to: Coord<f64>,
    },
    /// Circular arc from the current point, centered on the map center
    ArcTo {
        radius: f64,
        sweep: Sweep,
        large_arc: bool,
        to: Coord<f64>,
    },
    LineTo {
        to: Coord<f64>,
    },
    ClosePath,
}

/// Closed outline of a block as an ordered list of drawing primitives
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonOutline {
    center: Coord<f64>,
    commands: Vec<PathCommand>,
}

impl PolygonOutline {
    pub fn new(center: Coord<f64>, commands: Vec<PathCommand>) -> Self {
        Self { center, commands }
    }

    /// An outline with nothing to draw, stands in for blocks that failed to build
    pub fn empty(center: Coord<f64>) -> Self {
        Self::new(center, Vec::new())
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn center(&self) -> Coord<f64> {
        self.center
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Serialize as SVG path data (`M .. A .. L .. A .. Z`)
    pub fn to_path_data(&self) -> String {
        let mut data = String::new();
        for command in &self.commands {
            if !data.is_empty() {
                data.push(' ');
            }
            // Writing into a String cannot fail
            let _ = match command {
                PathCommand::MoveTo { to } => write!(data, "M {:.3} {:.3}", to.x, to.y),
                PathCommand::ArcTo {
                    radius,
                    sweep,
                    large_arc,
                    to,
                } => write!(
                    data,
                    "A {:.3} {:.3} 0 {} {} {:.3} {:.3}",
                    radius,
                    radius,
                    u8::from(*large_arc),
                    sweep.svg_flag(),
                    to.x,
                    to.y
                ),
                PathCommand::LineTo { to } => write!(data, "L {:.3} {:.3}", to.x, to.y),
                PathCommand::ClosePath => write!(data, "Z"),
            };
        }
        data
    }

    /// Approximate the outline as a polygon, splitting each arc into
    /// `segments_per_arc` straight segments
    pub fn flatten(&self, segments_per_arc: usize) -> Polygon<f64> {
        let segments = segments_per_arc.max(1);
        let mut points: Vec<Coord<f64>> = Vec::new();
        let mut current: Option<Coord<f64>> = None;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { to } | PathCommand::LineTo { to } => {
                    points.push(to);
                    current = Some(to);
                }
                PathCommand::ArcTo {
                    radius, sweep, to, ..
                } => {
                    let from = current.unwrap_or(to);
                    let a0 = (from.y - self.center.y).atan2(from.x - self.center.x);
                    let a1 = (to.y - self.center.y).atan2(to.x - self.center.x);
                    let delta = match sweep {
                        Sweep::Clockwise => (a1 - a0).rem_euclid(TAU),
                        Sweep::CounterClockwise => -(a0 - a1).rem_euclid(TAU),
                    };
                    for step in 1..segments {
                        let theta = a0 + delta * step as f64 / segments as f64;
                        points.push(point_at(self.center, radius, theta));
                    }
                    points.push(to);
                    current = Some(to);
                }
                PathCommand::ClosePath => {}
            }
        }

        // LineString::from closes nothing by itself; Polygon::new closes the ring
        Polygon::new(LineString::from(points), Vec::new())
    }

    /// Axis-aligned bounds of the flattened outline, `None` for an empty outline
    pub fn bounds(&self) -> Option<Rect<f64>> {
        if self.is_empty() {
            return None;
        }
        self.flatten(DEFAULT_ARC_SEGMENTS).bounding_rect()
    }

    /// Smallest and largest distance of the flattened outline from the center
    pub fn radial_extent(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let polygon = self.flatten(DEFAULT_ARC_SEGMENTS);
        let (min, max) = polygon.exterior().coords().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), c| {
                let d = (c.x - self.center.x).hypot(c.y - self.center.y);
                (min.min(d), max.max(d))
            },
        );
        Some((min, max))
    }
}

/// Point at `radius` from `center` along angle `theta` (radians)
pub fn point_at(center: Coord<f64>, radius: f64, theta: f64) -> Coord<f64> {
    Coord {
        x: center.x + radius * theta.cos(),
        y: center.y + radius * theta.sin(),
    }
}

/// Compute the annular-sector outline of one block
///
/// # Algorithm
/// 1. Look up the ring's radial index and derive inner/outer radius
/// 2. Validate and normalize the angle range (zero, inverted and >180 degree
///    spans are rejected)
/// 3. Place the four corners: inner-start, inner-end, outer-end, outer-start
/// 4. Trace inner arc clockwise, line out, outer arc back counter-clockwise,
///    then close. Both arcs are minor arcs.
pub fn build_block_outline(
    config: &MapConfig,
    ring: RingId,
    start_angle: f64,
    end_angle: f64,
) -> Result<PolygonOutline, BlockError> {
    let (inner_radius, outer_radius) = config.ring_radii(ring)?;
    let angles = AngleRange::new(start_angle, end_angle)?;
    Ok(sector_outline(config, inner_radius, outer_radius, &angles))
}

/// Outline of an already validated block
pub fn build_outline_for(config: &MapConfig, block: &Block) -> Result<PolygonOutline, BlockError> {
    let (inner_radius, outer_radius) = config.ring_radii(block.ring)?;
    Ok(sector_outline(
        config,
        inner_radius,
        outer_radius,
        &block.angles,
    ))
}

fn sector_outline(
    config: &MapConfig,
    inner_radius: f64,
    outer_radius: f64,
    angles: &AngleRange,
) -> PolygonOutline {
    let center = map_center(config);
    let start = angles.start_radians();
    let end = angles.end_radians();

    let inner_start = point_at(center, inner_radius, start);
    let inner_end = point_at(center, inner_radius, end);
    let outer_end = point_at(center, outer_radius, end);
    let outer_start = point_at(center, outer_radius, start);

    PolygonOutline::new(
        center,
        vec![
            PathCommand::MoveTo { to: inner_start },
            PathCommand::ArcTo {
                radius: inner_radius,
                sweep: Sweep::Clockwise,
                large_arc: false,
                to: inner_end,
            },
            PathCommand::LineTo { to: outer_end },
            PathCommand::ArcTo {
                radius: outer_radius,
                sweep: Sweep::CounterClockwise,
                large_arc: false,
                to: outer_start,
            },
            PathCommand::ClosePath,
        ],
    )
}

pub fn map_center(config: &MapConfig) -> Coord<f64> {
    Coord {
        x: config.center.0,
        y: config.center.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    const EPS: f64 = 1e-6;

    fn corners(outline: &PolygonOutline) -> Vec<Coord<f64>> {
        outline
            .commands()
            .iter()
            .filter_map(|c| match *c {
                PathCommand::MoveTo { to }
                | PathCommand::LineTo { to }
                | PathCommand::ArcTo { to, .. } => Some(to),
                PathCommand::ClosePath => None,
            })
            .collect()
    }

    #[test]
    fn test_ring_a_first_block() {
        let config = MapConfig::default();
        let outline = build_block_outline(&config, RingId::new('A'), 0.0, 45.0).unwrap();
        let pts = corners(&outline);

        assert_eq!(pts.len(), 4);
        // inner-start
        assert!((pts[0].x - 480.0).abs() < 0.01);
        assert!((pts[0].y - 400.0).abs() < 0.01);
        // inner-end
        assert!((pts[1].x - 456.57).abs() < 0.01);
        assert!((pts[1].y - 456.57).abs() < 0.01);
        // outer-end, outer-start
        assert!((pts[2].x - (400.0 + 104.0 * 45f64.to_radians().cos())).abs() < EPS);
        assert!((pts[3].x - 504.0).abs() < EPS);
        assert!((pts[3].y - 400.0).abs() < EPS);
    }

    #[test]
    fn test_command_sequence() {
        let config = MapConfig::default();
        let outline = build_block_outline(&config, RingId::new('A'), 0.0, 45.0).unwrap();
        let commands = outline.commands();

        assert!(matches!(commands[0], PathCommand::MoveTo { .. }));
        match commands[1] {
            PathCommand::ArcTo {
                radius,
                sweep,
                large_arc,
                ..
            } => {
                assert!((radius - 80.0).abs() < EPS);
                assert_eq!(sweep, Sweep::Clockwise);
                assert!(!large_arc);
            }
            other => panic!("expected inner arc, got {:?}", other),
        }
        assert!(matches!(commands[2], PathCommand::LineTo { .. }));
        match commands[3] {
            PathCommand::ArcTo {
                radius,
                sweep,
                large_arc,
                ..
            } => {
                assert!((radius - 104.0).abs() < EPS);
                assert_eq!(sweep, Sweep::CounterClockwise);
                assert!(!large_arc);
            }
            other => panic!("expected outer arc, got {:?}", other),
        }
        assert_eq!(commands[4], PathCommand::ClosePath);
    }

    #[test]
    fn test_path_data() {
        let config = MapConfig::default();
        let outline = build_block_outline(&config, RingId::new('A'), 0.0, 90.0).unwrap();
        assert_eq!(
            outline.to_path_data(),
            "M 480.000 400.000 A 80.000 80.000 0 0 1 400.000 480.000 \
             L 400.000 504.000 A 104.000 104.000 0 0 0 504.000 400.000 Z"
        );
    }

    #[test]
    fn test_radial_extent_matches_ring() {
        let config = MapConfig::default();
        for ring in config.rings.rings() {
            let (inner, outer) = config.ring_radii(ring).unwrap();
            for (start, end) in [(0.0, 45.0), (90.0, 180.0), (300.0, 330.0), (10.0, 11.0)] {
                let outline = build_block_outline(&config, ring, start, end).unwrap();
                let (min, max) = outline.radial_extent().unwrap();
                assert!((min - inner).abs() < EPS, "ring {} min {}", ring, min);
                assert!((max - outer).abs() < EPS, "ring {} max {}", ring, max);
            }
        }
    }

    #[test]
    fn test_ring_monotonic_and_disjoint() {
        let config = MapConfig::default();
        let radii: Vec<(f64, f64)> = config
            .rings
            .rings()
            .map(|r| config.ring_radii(r).unwrap())
            .collect();

        for pair in radii.windows(2) {
            let (inner_a, outer_a) = pair[0];
            let (inner_b, _) = pair[1];
            assert!(inner_a < inner_b);
            assert!(inner_b >= outer_a - EPS);
        }
    }

    #[test]
    fn test_idempotent() {
        let config = MapConfig::default();
        let a = build_block_outline(&config, RingId::new('D'), 135.0, 180.0).unwrap();
        let b = build_block_outline(&config, RingId::new('D'), 135.0, 180.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_ring() {
        let config = MapConfig::default();
        let err = build_block_outline(&config, RingId::new('Q'), 0.0, 45.0).unwrap_err();
        assert_eq!(err, BlockError::InvalidRing(RingId::new('Q')));
    }

    #[test]
    fn test_degenerate_block_rejected() {
        let config = MapConfig::default();
        let err = build_block_outline(&config, RingId::new('A'), 45.0, 45.0).unwrap_err();
        assert!(matches!(err, BlockError::Degenerate { .. }));
    }

    #[test]
    fn test_negative_angles_normalized() {
        let config = MapConfig::default();
        let a = build_block_outline(&config, RingId::new('B'), -45.0, 0.0).unwrap();
        let b = build_block_outline(&config, RingId::new('B'), 315.0, 360.0).unwrap();
        for (p, q) in corners(&a).iter().zip(corners(&b).iter()) {
            assert!((p.x - q.x).abs() < EPS);
            assert!((p.y - q.y).abs() < EPS);
        }
    }

    #[test]
    fn test_flattened_area() {
        let config = MapConfig::default();
        let outline = build_block_outline(&config, RingId::new('A'), 0.0, 45.0).unwrap();
        let area = outline.flatten(256).unsigned_area();
        // Exact annular sector: span/2 * (R^2 - r^2)
        let expected = 45f64.to_radians() / 2.0 * (104.0f64.powi(2) - 80.0f64.powi(2));
        assert!((area - expected).abs() / expected < 1e-3);
    }

    #[test]
    fn test_bounds() {
        let config = MapConfig::default();
        let outline = build_block_outline(&config, RingId::new('A'), 0.0, 90.0).unwrap();
        let rect = outline.bounds().unwrap();
        assert!((rect.min().x - 400.0).abs() < EPS);
        assert!((rect.max().x - 504.0).abs() < EPS);
        assert!((rect.max().y - 504.0).abs() < EPS);

        assert!(PolygonOutline::empty(map_center(&config)).bounds().is_none());
    }

    #[test]
    fn test_build_outline_for_block() {
        let config = MapConfig::default();
        let block = Block::new(RingId::new('C'), 2, AngleRange::new(90.0, 135.0).unwrap());
        let a = build_outline_for(&config, &block).unwrap();
        let b = build_block_outline(&config, RingId::new('C'), 90.0, 135.0).unwrap();
        assert_eq!(a, b);
    }
}
