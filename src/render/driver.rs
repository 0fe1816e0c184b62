use std::collections::BTreeMap;

use super::{Overlay, RenderStyle, Shape, Surface};
use crate::config::MapConfig;
use crate::domain::{
    AngleRange, Block, BlockError, CampRecord, RingId, block_id, subdivision_angles,
};
use crate::geometry::{Bounds, PolygonOutline, Viewport, build_outline_for, map_center};
use crate::status::{CampIndex, Palette, StatusColor};

/// One (ring, subdivision) pair to render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRequest {
    pub ring: RingId,
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl BlockRequest {
    /// Identifier from the raw angles, so failed requests are still named
    pub fn id(&self) -> String {
        block_id(self.ring, self.start, self.end)
    }

    /// Validate the angle range into a block
    pub fn to_block(&self) -> Result<Block, BlockError> {
        Ok(Block::new(
            self.ring,
            self.index,
            AngleRange::new(self.start, self.end)?,
        ))
    }
}

/// Outcome of one render pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderReport {
    /// Blocks attempted
    pub total: usize,
    /// Blocks whose outline could not be built, with the reason
    pub failed: Vec<(String, String)>,
    /// Blocks per palette key
    pub by_status: BTreeMap<StatusColor, usize>,
    /// Camp records that could not be placed on a ring
    pub skipped_camps: usize,
    /// Ring roads drawn from the site plan
    pub overlays: usize,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped_camps == 0
    }

    pub fn summary(&self) -> String {
        let counts: Vec<String> = self
            .by_status
            .iter()
            .map(|(status, count)| format!("{} {}", count, status))
            .collect();
        let mut summary = format!(
            "{} blocks ({})",
            self.total,
            if counts.is_empty() {
                "none".to_string()
            } else {
                counts.join(", ")
            }
        );
        if !self.failed.is_empty() {
            summary.push_str(&format!(", {} failed", self.failed.len()));
        }
        if self.skipped_camps > 0 {
            summary.push_str(&format!(", {} camps skipped", self.skipped_camps));
        }
        summary
    }
}

/// Composes outline geometry and status colors and hands them to a surface
#[derive(Debug, Clone)]
pub struct MapRenderer {
    config: MapConfig,
    palette: Palette,
    style: RenderStyle,
    fit: bool,
    ring_roads: BTreeMap<String, String>,
}

impl MapRenderer {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            palette: Palette::default(),
            style: RenderStyle::default(),
            fit: false,
            ring_roads: BTreeMap::new(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Fit the view to the drawn blocks instead of the fixed canvas
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    /// Ring road path data keyed by ring id, drawn over the blocks
    pub fn with_ring_roads(mut self, ring_roads: BTreeMap<String, String>) -> Self {
        self.ring_roads = ring_roads;
        self
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Every ring of the alphabet times every equal subdivision
    pub fn block_requests(&self) -> Vec<BlockRequest> {
        let count = self.config.subdivisions;

        self.config
            .rings
            .rings()
            .flat_map(|ring| {
                (0..count).map(move |index| {
                    let (start, end) = subdivision_angles(index, count);
                    BlockRequest {
                        ring,
                        index,
                        start,
                        end,
                    }
                })
            })
            .collect()
    }

    /// Build one shape per request
    ///
    /// A request whose outline fails keeps its slot: it gets an empty outline
    /// and the unassigned color, and the failure is recorded in the report.
    pub fn build_shapes(
        &self,
        requests: &[BlockRequest],
        camps: &[CampRecord],
    ) -> (Vec<Shape>, RenderReport) {
        let index = CampIndex::new(camps);
        let mut report = RenderReport {
            total: requests.len(),
            skipped_camps: index.skipped(),
            ..Default::default()
        };

        let shapes: Vec<Shape> = requests
            .iter()
            .map(|request| {
                let built = request.to_block().and_then(|block| {
                    build_outline_for(&self.config, &block).map(|outline| (block, outline))
                });

                let (id, outline, status) = match built {
                    Ok((block, outline)) => (
                        block.id(),
                        outline,
                        index.classify(block.ring, block.index),
                    ),
                    Err(e) => {
                        log::warn!("Skipping block {}: {}", request.id(), e);
                        report.failed.push((request.id(), e.to_string()));
                        (
                            request.id(),
                            PolygonOutline::empty(map_center(&self.config)),
                            StatusColor::Unassigned,
                        )
                    }
                };

                *report.by_status.entry(status).or_insert(0) += 1;

                Shape {
                    id,
                    ring: request.ring,
                    index: request.index,
                    outline,
                    status,
                    fill: self.palette.color(status),
                    stroke: self.style.stroke,
                }
            })
            .collect();

        (shapes, report)
    }

    pub fn viewport_for(&self, shapes: &[Shape]) -> Viewport {
        let center = map_center(&self.config);
        if !self.fit {
            return Viewport::centered(center, self.config.canvas_size);
        }

        match Bounds::from_rects(shapes.iter().filter_map(|s| s.outline.bounds())) {
            Some(bounds) => Viewport::fit(&bounds, self.config.margin, self.config.canvas_size),
            None => Viewport::centered(center, self.config.canvas_size),
        }
    }

    /// Render the whole map onto `surface` and return its output
    pub fn render<S: Surface>(&self, surface: S, camps: &[CampRecord]) -> (S::Output, RenderReport) {
        self.render_requests(surface, &self.block_requests(), camps)
    }

    pub fn render_requests<S: Surface>(
        &self,
        mut surface: S,
        requests: &[BlockRequest],
        camps: &[CampRecord],
    ) -> (S::Output, RenderReport) {
        let (shapes, mut report) = self.build_shapes(requests, camps);
        let viewport = self.viewport_for(&shapes);

        surface.mount(&viewport, self.style.background);
        for shape in &shapes {
            surface.draw_block(shape);
        }
        for (ring, path_data) in &self.ring_roads {
            surface.draw_overlay(&Overlay {
                ring: ring.clone(),
                path_data: path_data.clone(),
                stroke: self.style.overlay,
            });
            report.overlays += 1;
        }

        log::debug!("Render pass: {}", report.summary());
        (surface.unmount(), report)
    }
}
