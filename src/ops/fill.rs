use std::path::Path;

use crate::domain::GeoFrame;
use crate::error::Result;
use crate::geometry::close_holes;
use crate::io::read_frame;

/// Close holes of at most `area_max` in every row, keeping order,
/// attributes and CRS
pub fn fill_frame(layer: &GeoFrame, area_max: f64) -> GeoFrame {
    layer.map_shapes(|shape| close_holes(shape, area_max))
}

/// Load a GeoJSON layer from disk and fill its holes
pub fn fill_file(path: impl AsRef<Path>, area_max: f64) -> Result<GeoFrame> {
    let layer = read_frame(path)?;
    Ok(fill_frame(&layer, area_max))
}
