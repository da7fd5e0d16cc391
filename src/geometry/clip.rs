use geo::algorithm::bool_ops::unary_union;
use geo::{BooleanOps, MultiPolygon, Polygon};

use crate::domain::{Feature, GeoFrame, Shape};

/// Union of every polygon in the layer, merged in a single cascaded pass
pub fn mask_of(layer: &GeoFrame) -> MultiPolygon<f64> {
    let polygons: Vec<&Polygon<f64>> = layer
        .shapes()
        .flat_map(|shape| shape.polygons().iter())
        .collect();

    unary_union(polygons)
}

/// Clip every row of `subject` to the footprint of `mask`.
///
/// Rows that fall completely outside the mask are dropped. Attributes and
/// CRS of `subject` are kept.
pub fn clip_frame(subject: &GeoFrame, mask: &GeoFrame) -> GeoFrame {
    let footprint = mask_of(mask);
    log::debug!("clip mask has {} part(s)", footprint.0.len());

    let rows = subject
        .rows()
        .iter()
        .filter_map(|row| {
            let clipped = row.shape.to_multi_polygon().intersection(&footprint);
            let shape = Shape::from_multi_polygon(clipped);
            (!shape.is_empty()).then(|| Feature::with_properties(shape, row.properties.clone()))
        })
        .collect();

    GeoFrame::new(rows, subject.crs().cloned())
}
