use std::path::Path;

use crate::domain::{Feature, GeoFrame, Shape};
use crate::error::{Error, Result};
use crate::geometry::{DEFAULT_DISTANCE, DEFAULT_MITER_ANGLE, buffer_with, clip_frame};
use crate::io::read_frame;
use crate::ops::fill_frame;

/// Padding added around the layer bounds before clipping, in layer units
pub const DEFAULT_MARGIN: f64 = 1.0;

/// Tuning for [`dissolve_frame_with`]
#[derive(Debug, Clone, PartialEq)]
pub struct DissolveOptions {
    /// Padding around the total bounds so boundary features are fully covered
    pub margin: f64,
    /// Grow/shrink distance used to absorb clipping slivers
    pub tolerance: f64,
    /// Sharpest corner angle (radians) the buffer keeps pointed
    pub miter_angle: f64,
    /// Fill holes up to this area after dissolving
    pub fill_holes: Option<f64>,
}

impl Default for DissolveOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            tolerance: DEFAULT_DISTANCE,
            miter_angle: DEFAULT_MITER_ANGLE,
            fill_holes: None,
        }
    }
}

impl DissolveOptions {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_miter_angle(mut self, miter_angle: f64) -> Self {
        self.miter_angle = miter_angle;
        self
    }

    pub fn with_fill_holes(mut self, area_max: Option<f64>) -> Self {
        self.fill_holes = area_max;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(Error::InvalidOption {
                name: "margin",
                value: self.margin,
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidOption {
                name: "tolerance",
                value: self.tolerance,
            });
        }
        if !self.miter_angle.is_finite()
            || self.miter_angle <= 0.0
            || self.miter_angle >= std::f64::consts::PI
        {
            return Err(Error::InvalidOption {
                name: "miter_angle",
                value: self.miter_angle,
            });
        }
        if let Some(area_max) = self.fill_holes
            && !area_max.is_finite()
        {
            return Err(Error::InvalidOption {
                name: "fill_holes",
                value: area_max,
            });
        }
        Ok(())
    }
}

/// Dissolve a layer to its outer footprint with the default options
pub fn dissolve_frame(layer: &GeoFrame) -> Result<GeoFrame> {
    dissolve_frame_with(layer, &DissolveOptions::default())
}

/// Dissolve a layer to its outer footprint.
///
/// # Algorithm
/// 1. Pad the total bounds of the layer by `margin`
/// 2. Turn the padded box into a single-row rectangle layer
/// 3. Clip the rectangle against the union of the input polygons
/// 4. Grow then shrink every clipped row by `tolerance` to remove slivers
/// 5. Explode multi-part rows in place, one row per polygon
/// 6. Optionally fill holes up to `fill_holes`
///
/// # Returns
/// * A layer of polygons in the input CRS; several rows when the footprint
///   is disconnected
/// * `Err(Error::EmptyInput)` when the layer has no area to dissolve
pub fn dissolve_frame_with(layer: &GeoFrame, options: &DissolveOptions) -> Result<GeoFrame> {
    options.validate()?;

    // Step 1: Pad the total bounds
    let bounds = layer.total_bounds().ok_or(Error::EmptyInput)?;
    let padded = bounds.expanded(options.margin);
    log::debug!(
        "dissolving {} row(s) inside {:.6} x {:.6} box",
        layer.len(),
        padded.width(),
        padded.height()
    );

    // Step 2: Rectangle layer sharing the input CRS
    let rect = GeoFrame::from_shapes(
        vec![Shape::Polygon(padded.to_polygon())],
        layer.crs().cloned(),
    );

    // Step 3: Clip
    let clipped = clip_frame(&rect, layer);
    if clipped.is_empty() {
        return Err(Error::EmptyInput);
    }

    // Step 4: Clean clipping artifacts
    let buffered =
        clipped.map_shapes(|shape| buffer_with(shape, options.tolerance, options.miter_angle));

    // Step 5: One row per polygon
    let exploded = explode(&buffered);
    log::debug!(
        "dissolved into {} polygon(s) from {} clipped row(s)",
        exploded.len(),
        buffered.len()
    );

    // Step 6: Optional hole filling
    Ok(match options.fill_holes {
        Some(area_max) => fill_frame(&exploded, area_max),
        None => exploded,
    })
}

/// Load a GeoJSON layer from disk and dissolve it
pub fn dissolve_file(path: impl AsRef<Path>, options: &DissolveOptions) -> Result<GeoFrame> {
    let layer = read_frame(path)?;
    dissolve_frame_with(&layer, options)
}

/// Replace every multi-part row with one row per part, keeping row order.
///
/// Attributes are copied to each part. Empty parts are dropped.
pub fn explode(layer: &GeoFrame) -> GeoFrame {
    let mut rows = Vec::with_capacity(layer.len());

    for row in layer.rows() {
        for polygon in row.shape.clone().into_polygons() {
            rows.push(Feature::with_properties(
                Shape::Polygon(polygon),
                row.properties.clone(),
            ));
        }
    }

    GeoFrame::new(rows, layer.crs().cloned())
}
