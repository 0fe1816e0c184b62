use geo::{Coord, Rect};

/// Bounding box in canvas units
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[Coord<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        bounds.expand(points);
        Some(bounds)
    }

    /// Union of a set of rectangles, `None` when there are none
    pub fn from_rects(rects: impl IntoIterator<Item = Rect<f64>>) -> Option<Self> {
        let mut result: Option<Self> = None;
        for rect in rects {
            let corners = [rect.min(), rect.max()];
            match result.as_mut() {
                Some(bounds) => bounds.expand(&corners),
                None => result = Self::from_points(&corners),
            }
        }
        result
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[Coord<f64>]) {
        for p in points {
            self.min_x = self.min_x.min(p.x);
            self.max_x = self.max_x.max(p.x);
            self.min_y = self.min_y.min(p.y);
            self.max_y = self.max_y.max(p.y);
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }
}

/// Visible region of the drawing surface, in canvas units
///
/// Maps directly onto an SVG `viewBox`; `size` is the pixel size the
/// surface is mounted with.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
    pub size: f64,
}

impl Viewport {
    /// Square view of `size` units centered on `center`
    pub fn centered(center: Coord<f64>, size: f64) -> Self {
        Self {
            min_x: center.x - size / 2.0,
            min_y: center.y - size / 2.0,
            width: size,
            height: size,
            size,
        }
    }

    /// Square view that fits `bounds` plus `margin` on every side, rendered at `size`
    pub fn fit(bounds: &Bounds, margin: f64, size: f64) -> Self {
        let extent = bounds.width().max(bounds.height()) + 2.0 * margin;
        let extent = if extent > 0.0 { extent } else { size };
        let center = bounds.center();

        Self {
            min_x: center.x - extent / 2.0,
            min_y: center.y - extent / 2.0,
            width: extent,
            height: extent,
            size,
        }
    }

    pub fn view_box(&self) -> String {
        format!(
            "{:.3} {:.3} {:.3} {:.3}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}
