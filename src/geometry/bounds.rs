use geo::{Polygon, Rect, coord};

/// Axis-aligned bounding box in the layer's coordinate space
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds covering a set of rectangles
    pub fn from_rects(rects: impl IntoIterator<Item = Rect<f64>>) -> Option<Self> {
        let mut rects = rects.into_iter();
        let mut bounds = Self::from_rect(rects.next()?);

        for rect in rects {
            bounds.include(&rect);
        }

        Some(bounds)
    }

    pub fn from_rect(rect: Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            max_x: rect.max().x,
            min_y: rect.min().y,
            max_y: rect.max().y,
        }
    }

    /// Grow the bounds to include another rectangle
    pub fn include(&mut self, rect: &Rect<f64>) {
        self.min_x = self.min_x.min(rect.min().x);
        self.max_x = self.max_x.max(rect.max().x);
        self.min_y = self.min_y.min(rect.min().y);
        self.max_y = self.max_y.max(rect.max().y);
    }

    /// Pad the bounds by `margin` on every side
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_x, y: self.min_y },
            coord! { x: self.max_x, y: self.max_y },
        )
    }

    /// Closed rectangular polygon spanning the bounds
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    #[test]
    fn test_bounds_from_rects() {
        let rects = vec![
            Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1000.0, y: 500.0 }),
            Rect::new(coord! { x: 200.0, y: -50.0 }, coord! { x: 500.0, y: 2000.0 }),
        ];
        let bounds = Bounds::from_rects(rects).unwrap();

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 1000.0);
        assert_eq!(bounds.min_y, -50.0);
        assert_eq!(bounds.max_y, 2000.0);
    }

    #[test]
    fn test_bounds_from_no_rects() {
        assert!(Bounds::from_rects(Vec::new()).is_none());
    }

    #[test]
    fn test_expanded_polygon() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 2.0,
            min_y: 0.0,
            max_y: 3.0,
        };

        let padded = bounds.expanded(1.0);
        assert_eq!(padded.width(), 4.0);
        assert_eq!(padded.height(), 5.0);

        let polygon = padded.to_polygon();
        assert!((polygon.unsigned_area() - 20.0).abs() < 1e-12);
        assert!(polygon.exterior().is_closed());
        assert!(polygon.interiors().is_empty());
    }
}
