use geo::{Area, LineString, MultiPolygon, Polygon};

use crate::domain::Shape;

/// Fill interior rings whose enclosed area is at most `area_max`.
///
/// `area_max` is in squared layer units (square degrees for unprojected
/// data). With `area_max == 0` every hole is filled. A hole is kept only
/// when its area is strictly greater than `area_max`.
pub fn close_holes(shape: &Shape, area_max: f64) -> Shape {
    match shape {
        Shape::Polygon(polygon) => Shape::Polygon(close_polygon_holes(polygon, area_max)),
        Shape::MultiPolygon(multi) => Shape::MultiPolygon(
            multi
                .iter()
                .map(|polygon| close_polygon_holes(polygon, area_max))
                .collect::<MultiPolygon<f64>>(),
        ),
    }
}

pub fn close_polygon_holes(polygon: &Polygon<f64>, area_max: f64) -> Polygon<f64> {
    if area_max == 0.0 {
        if polygon.interiors().is_empty() {
            return polygon.clone();
        }
        return Polygon::new(polygon.exterior().clone(), Vec::new());
    }

    let kept: Vec<LineString<f64>> = polygon
        .interiors()
        .iter()
        .filter(|ring| ring_area(ring) > area_max)
        .cloned()
        .collect();

    Polygon::new(polygon.exterior().clone(), kept)
}

fn ring_area(ring: &LineString<f64>) -> f64 {
    Polygon::new(ring.clone(), Vec::new()).unsigned_area()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    /// 10x10 square with a 2x2 hole (area 4) and a 1x1 hole (area 1)
    fn donut() -> Polygon<f64> {
        polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 10.0, y: 0.0),
                (x: 10.0, y: 10.0),
                (x: 0.0, y: 10.0)
            ],
            interiors: [
                [
                    (x: 1.0, y: 1.0),
                    (x: 3.0, y: 1.0),
                    (x: 3.0, y: 3.0),
                    (x: 1.0, y: 3.0)
                ],
                [
                    (x: 6.0, y: 6.0),
                    (x: 7.0, y: 6.0),
                    (x: 7.0, y: 7.0),
                    (x: 6.0, y: 7.0)
                ]
            ]
        )
    }

    #[test]
    fn test_zero_threshold_drops_all_holes() {
        let polygon = donut();
        let closed = close_polygon_holes(&polygon, 0.0);

        assert!(closed.interiors().is_empty());
        assert_eq!(closed.exterior(), polygon.exterior());
        assert!((closed.unsigned_area() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_threshold_without_holes() {
        let polygon = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert_eq!(close_polygon_holes(&polygon, 0.0), polygon);
    }

    #[test]
    fn test_hole_equal_to_threshold_is_filled() {
        let closed = close_polygon_holes(&donut(), 4.0);
        assert!(closed.interiors().is_empty());
    }

    #[test]
    fn test_hole_above_threshold_is_kept() {
        let closed = close_polygon_holes(&donut(), 4.0 - 1e-9);

        assert_eq!(closed.interiors().len(), 1);
        assert!((ring_area(&closed.interiors()[0]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_threshold_keeps_every_hole() {
        let closed = close_polygon_holes(&donut(), -1.0);
        assert_eq!(closed.interiors().len(), 2);
    }

    #[test]
    fn test_ring_area_ignores_orientation() {
        let clockwise = line_string![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 0.0)
        ];
        assert!((ring_area(&clockwise) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_close_holes_multi_polygon() {
        let shape = Shape::from(MultiPolygon::new(vec![donut(), donut()]));
        let closed = close_holes(&shape, 2.0);

        assert!(closed.is_multi());
        assert_eq!(closed.polygons().len(), 2);
        assert_eq!(closed.interior_count(), 2);
    }
}
