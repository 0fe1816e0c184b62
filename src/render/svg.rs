use quick_xml::escape::escape;
use std::fmt::Write;

use super::{Overlay, Shape, StrokeStyle, Surface};
use crate::geometry::Viewport;
use crate::status::{Color, to_hex};

/// Renders the map as a standalone SVG document
///
/// Blocks and ring roads are collected into separate groups so the roads
/// always sit on top regardless of call order.
#[derive(Debug, Default)]
pub struct SvgSurface {
    header: String,
    blocks: String,
    overlays: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

fn stroke_attrs(stroke: &StrokeStyle) -> String {
    format!(
        r#"stroke="{}" stroke-width="{}""#,
        to_hex(stroke.color),
        stroke.width
    )
}

impl Surface for SvgSurface {
    type Output = String;

    fn mount(&mut self, viewport: &Viewport, background: Color) {
        self.header.clear();
        let _ = writeln!(
            self.header,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="{view_box}">"#,
            size = viewport.size,
            view_box = viewport.view_box()
        );
        let _ = writeln!(
            self.header,
            r#"  <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}"/>"#,
            viewport.min_x,
            viewport.min_y,
            viewport.width,
            viewport.height,
            to_hex(background)
        );
    }

    fn draw_block(&mut self, shape: &Shape) {
        let _ = writeln!(
            self.blocks,
            r#"    <path id="{}" data-status="{}" d="{}" fill="{}" {}/>"#,
            escape(shape.id.as_str()),
            shape.status,
            shape.outline.to_path_data(),
            to_hex(shape.fill),
            stroke_attrs(&shape.stroke)
        );
    }

    fn draw_overlay(&mut self, overlay: &Overlay) {
        let _ = writeln!(
            self.overlays,
            r#"    <path data-ring="{}" d="{}" fill="none" {}/>"#,
            escape(overlay.ring.as_str()),
            escape(overlay.path_data.as_str()),
            stroke_attrs(&overlay.stroke)
        );
    }

    fn unmount(self) -> String {
        let mut doc = self.header;
        doc.push_str("  <g id=\"blocks\">\n");
        doc.push_str(&self.blocks);
        doc.push_str("  </g>\n");
        if !self.overlays.is_empty() {
            doc.push_str("  <g id=\"ring-roads\">\n");
            doc.push_str(&self.overlays);
            doc.push_str("  </g>\n");
        }
        doc.push_str("</svg>\n");
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::domain::{BedStatus, CampRecord};
    use crate::render::MapRenderer;
    use crate::svgdoc::parse_ring_roads;
    use std::collections::BTreeMap;

    #[test]
    fn test_svg_document() {
        let camps = vec![CampRecord::new("B & 3:00", BedStatus::Complete)];
        let renderer = MapRenderer::new(MapConfig::default());
        let (svg, report) = renderer.render(SvgSurface::new(), &camps);

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0.000 0.000 800.000 800.000""#));
        assert_eq!(svg.matches("<path ").count(), report.total);
        assert!(svg.contains(r#"id="B-0-45" data-status="complete""#));
        assert!(svg.contains(r##"fill="#4ADE80""##));
        assert!(svg.contains(r#"id="A-0-45" data-status="unassigned" d="M 480.000 400.000 A 80.000 80.000 0 0 1 456.569 456.569"#));
        assert!(!svg.contains("ring-roads"));
    }

    #[test]
    fn test_svg_overlays_are_ring_roads() {
        let mut roads = BTreeMap::new();
        roads.insert("C".to_string(), "M 0 0 L 10 10".to_string());
        let renderer = MapRenderer::new(MapConfig::default()).with_ring_roads(roads);
        let (svg, _) = renderer.render(SvgSurface::new(), &[]);

        assert!(svg.contains(r#"<g id="ring-roads">"#));
        assert!(svg.contains(r#"data-ring="C" d="M 0 0 L 10 10" fill="none""#));
    }

    #[test]
    fn test_rendered_svg_is_well_formed() {
        // The output reads back through the site plan parser without error
        let renderer = MapRenderer::new(MapConfig::default());
        let (svg, _) = renderer.render(SvgSurface::new(), &[]);
        assert!(parse_ring_roads(&svg).unwrap().is_empty());
    }
}
