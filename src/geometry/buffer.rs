use geo::MultiPolygon;
use geo::algorithm::buffer::{Buffer, BufferStyle, LineJoin};

use crate::domain::Shape;

/// Offset used to absorb slivers, in layer units
pub const DEFAULT_DISTANCE: f64 = 0.00001;

/// Sharpest corner angle, in radians, that still gets a pointed miter join.
///
/// Corners sharper than this are beveled. Equal to `2 * asin(1 / 5)`, the
/// angle at which a miter ratio of 5 cuts off.
pub const DEFAULT_MITER_ANGLE: f64 = 0.402_715_841_580_661_6;

/// Smooth a shape by growing it then shrinking it by the default distance.
///
/// Slivers, self-touching vertices and dangles narrower than the tolerance
/// disappear while the overall outline is kept.
pub fn buffer(shape: &Shape) -> Shape {
    buffer_with(shape, DEFAULT_DISTANCE, DEFAULT_MITER_ANGLE)
}

/// Grow by `distance` then shrink by `distance`, using mitered joins.
///
/// `miter_angle` is the minimum corner angle in radians kept sharp; right
/// angles and anything blunter always stay pointed with the default.
///
/// The result may be empty or split into several parts when the shrink
/// disconnects thin necks.
pub fn buffer_with(shape: &Shape, distance: f64, miter_angle: f64) -> Shape {
    if shape.is_empty() {
        return Shape::empty();
    }

    let grown = match shape {
        Shape::Polygon(polygon) => polygon.buffer_with_style(mitered(distance, miter_angle)),
        Shape::MultiPolygon(multi) => multi.buffer_with_style(mitered(distance, miter_angle)),
    };
    let shrunk: MultiPolygon<f64> = grown.buffer_with_style(mitered(-distance, miter_angle));

    Shape::from_multi_polygon(shrunk)
}

fn mitered(distance: f64, miter_angle: f64) -> BufferStyle<f64> {
    BufferStyle::new(distance).line_join(LineJoin::Miter(miter_angle))
}
