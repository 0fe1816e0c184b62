use serde_json::{Value, json};

use super::{Overlay, Shape, Surface};
use crate::geometry::Viewport;
use crate::status::{Color, to_hex};

/// Dumps blocks as drawing-primitive lists for consumers with their own renderer
#[derive(Debug, Default)]
pub struct JsonSurface {
    viewport: Value,
    background: Value,
    blocks: Vec<Value>,
    ring_roads: Vec<Value>,
}

impl JsonSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for JsonSurface {
    type Output = Value;

    fn mount(&mut self, viewport: &Viewport, background: Color) {
        self.viewport = json!({
            "min_x": viewport.min_x,
            "min_y": viewport.min_y,
            "width": viewport.width,
            "height": viewport.height,
            "size": viewport.size,
        });
        self.background = json!(to_hex(background));
    }

    fn draw_block(&mut self, shape: &Shape) {
        self.blocks.push(json!({
            "id": shape.id,
            "ring": shape.ring.to_string(),
            "index": shape.index,
            "status": shape.status.to_string(),
            "fill": to_hex(shape.fill),
            "stroke": to_hex(shape.stroke.color),
            "stroke_width": shape.stroke.width,
            "commands": shape.outline.commands(),
        }));
    }

    fn draw_overlay(&mut self, overlay: &Overlay) {
        self.ring_roads.push(json!({
            "ring": overlay.ring,
            "d": overlay.path_data,
            "stroke": to_hex(overlay.stroke.color),
            "stroke_width": overlay.stroke.width,
        }));
    }

    fn unmount(self) -> Value {
        json!({
            "viewport": self.viewport,
            "background": self.background,
            "blocks": self.blocks,
            "ring_roads": self.ring_roads,
        })
    }
}
