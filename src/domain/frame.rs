use std::fmt;

use super::Shape;
use crate::geometry::Bounds;

/// Attribute map carried alongside each geometry
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Coordinate reference system label, e.g. `EPSG:4326`.
///
/// Carried through unchanged; never interpreted or reprojected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Crs(String);

impl Crs {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of a layer: a geometry plus its attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub shape: Shape,
    pub properties: Properties,
}

impl Feature {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            properties: Properties::new(),
        }
    }

    pub fn with_properties(shape: Shape, properties: Properties) -> Self {
        Self { shape, properties }
    }
}

/// An ordered polygon layer sharing a single CRS
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoFrame {
    rows: Vec<Feature>,
    crs: Option<Crs>,
}

impl GeoFrame {
    pub fn new(rows: Vec<Feature>, crs: Option<Crs>) -> Self {
        Self { rows, crs }
    }

    /// Build a frame from bare geometries with empty attributes
    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>, crs: Option<Crs>) -> Self {
        Self {
            rows: shapes.into_iter().map(Feature::new).collect(),
            crs,
        }
    }

    pub fn rows(&self) -> &[Feature] {
        &self.rows
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.rows.iter().map(|row| &row.shape)
    }

    /// Total area of all rows
    pub fn area(&self) -> f64 {
        self.shapes().map(Shape::area).sum()
    }

    /// Bounding box over every non-empty row, `None` if there is none
    pub fn total_bounds(&self) -> Option<Bounds> {
        Bounds::from_rects(self.shapes().filter_map(Shape::bounding_rect))
    }

    /// Apply `f` to every geometry, keeping order, attributes and CRS
    pub fn map_shapes<F>(&self, mut f: F) -> GeoFrame
    where
        F: FnMut(&Shape) -> Shape,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| Feature::with_properties(f(&row.shape), row.properties.clone()))
            .collect();

        GeoFrame {
            rows,
            crs: self.crs.clone(),
        }
    }
}
