use geo::{Area, BoundingRect, MultiPolygon, Polygon, Rect};

/// Geometry value of a single feature row
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Shape {
    /// The empty geometry (a MultiPolygon without parts)
    pub fn empty() -> Self {
        Shape::MultiPolygon(MultiPolygon::new(Vec::new()))
    }

    /// Wrap the output of a boolean or buffer operation.
    ///
    /// A single part collapses to a plain Polygon; zero or several parts stay
    /// a MultiPolygon.
    pub fn from_multi_polygon(multi: MultiPolygon<f64>) -> Self {
        let mut parts = multi.0;
        if parts.len() == 1 {
            Shape::Polygon(parts.remove(0))
        } else {
            Shape::MultiPolygon(MultiPolygon::new(parts))
        }
    }

    /// Borrow the constituent polygons
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            Shape::Polygon(polygon) => std::slice::from_ref(polygon),
            Shape::MultiPolygon(multi) => &multi.0,
        }
    }

    /// Split into non-empty constituent polygons, in order
    pub fn into_polygons(self) -> Vec<Polygon<f64>> {
        let parts = match self {
            Shape::Polygon(polygon) => vec![polygon],
            Shape::MultiPolygon(multi) => multi.0,
        };
        parts.into_iter().filter(|p| !polygon_is_empty(p)).collect()
    }

    pub fn to_multi_polygon(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(self.polygons().to_vec())
    }

    pub fn is_empty(&self) -> bool {
        self.polygons().iter().all(polygon_is_empty)
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Shape::MultiPolygon(_))
    }

    pub fn area(&self) -> f64 {
        match self {
            Shape::Polygon(polygon) => polygon.unsigned_area(),
            Shape::MultiPolygon(multi) => multi.unsigned_area(),
        }
    }

    /// Total number of interior rings across all parts
    pub fn interior_count(&self) -> usize {
        self.polygons().iter().map(|p| p.interiors().len()).sum()
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Shape::Polygon(polygon) => polygon.bounding_rect(),
            Shape::MultiPolygon(multi) => multi.bounding_rect(),
        }
    }
}

impl From<Polygon<f64>> for Shape {
    fn from(polygon: Polygon<f64>) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<MultiPolygon<f64>> for Shape {
    fn from(multi: MultiPolygon<f64>) -> Self {
        Shape::MultiPolygon(multi)
    }
}

fn polygon_is_empty(polygon: &Polygon<f64>) -> bool {
    polygon.exterior().0.is_empty()
}
