use std::path::Path;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{FeatureCollection, GeoJson, JsonObject, PolygonType, Position, Value};
use serde_json::json;

use crate::domain::{Crs, Feature, GeoFrame, Shape};
use crate::error::{Error, Result};

/// Read a vector layer from disk.
///
/// Only GeoJSON (`.geojson` / `.json`) is supported.
pub fn read_frame(path: impl AsRef<Path>) -> Result<GeoFrame> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("geojson") | Some("json") => {}
        _ => return Err(Error::UnsupportedFormat(path.to_path_buf())),
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let geojson: GeoJson = contents.parse()?;
    let frame = frame_from_geojson(geojson)?;

    log::debug!(
        "read {} feature(s) from {} (crs: {})",
        frame.len(),
        path.display(),
        frame.crs().map(Crs::name).unwrap_or("none")
    );

    Ok(frame)
}

/// Write a layer as a GeoJSON FeatureCollection
pub fn write_frame(path: impl AsRef<Path>, frame: &GeoFrame) -> Result<()> {
    let path = path.as_ref();
    let contents = frame_to_geojson(frame).to_string();
    std::fs::write(path, contents).map_err(|e| Error::io(path, e))
}

/// Convert parsed GeoJSON into a layer.
///
/// Accepts a FeatureCollection, a single Feature or a bare Geometry.
/// Features without geometry are skipped.
pub fn frame_from_geojson(geojson: GeoJson) -> Result<GeoFrame> {
    let (features, foreign_members) = match geojson {
        GeoJson::FeatureCollection(collection) => {
            (collection.features, collection.foreign_members)
        }
        GeoJson::Feature(feature) => {
            let crs_members = feature.foreign_members.clone();
            (vec![feature], crs_members)
        }
        GeoJson::Geometry(geometry) => {
            let crs_members = geometry.foreign_members.clone();
            let feature = geojson::Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            };
            (vec![feature], crs_members)
        }
    };

    let crs = foreign_members.as_ref().and_then(crs_from_members);
    let mut rows = Vec::with_capacity(features.len());

    for (index, feature) in features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            log::warn!("Skipping feature {} without geometry", index);
            continue;
        };

        let shape = shape_from_value(index, &geometry.value)?;
        rows.push(Feature::with_properties(
            shape,
            feature.properties.unwrap_or_default(),
        ));
    }

    Ok(GeoFrame::new(rows, crs))
}

/// Convert a layer into a GeoJSON FeatureCollection
pub fn frame_to_geojson(frame: &GeoFrame) -> GeoJson {
    let features = frame
        .rows()
        .iter()
        .map(|row| geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(value_from_shape(&row.shape))),
            id: None,
            properties: Some(row.properties.clone()),
            foreign_members: None,
        })
        .collect();

    let foreign_members = frame.crs().map(|crs| {
        let mut members = JsonObject::new();
        members.insert(
            "crs".to_string(),
            json!({ "type": "name", "properties": { "name": crs.name() } }),
        );
        members
    });

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members,
    })
}

/// Read the legacy `"crs": {"type": "name", "properties": {"name": ...}}` member
fn crs_from_members(members: &JsonObject) -> Option<Crs> {
    members
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()
        .map(Crs::new)
}

fn shape_from_value(index: usize, value: &Value) -> Result<Shape> {
    match value {
        Value::Polygon(rings) => Ok(Shape::Polygon(polygon_from_rings(index, rings)?)),
        Value::MultiPolygon(polygons) => {
            let parts = polygons
                .iter()
                .map(|rings| polygon_from_rings(index, rings))
                .collect::<Result<Vec<_>>>()?;
            Ok(Shape::MultiPolygon(MultiPolygon::new(parts)))
        }
        other => Err(Error::NonPolygonal {
            index,
            kind: value_kind(other).to_string(),
        }),
    }
}

fn polygon_from_rings(index: usize, rings: &PolygonType) -> Result<Polygon<f64>> {
    let mut rings = rings
        .iter()
        .map(|ring| ring_from_positions(index, ring))
        .collect::<Result<Vec<_>>>()?;

    if rings.is_empty() {
        return Ok(Polygon::new(LineString::new(Vec::new()), Vec::new()));
    }

    let exterior = rings.remove(0);
    Ok(Polygon::new(exterior, rings))
}

fn ring_from_positions(index: usize, positions: &[Position]) -> Result<LineString<f64>> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
            [_, _, ..] => Err(Error::InvalidCoordinate {
                index,
                reason: format!("non-finite value in {:?}", position),
            }),
            _ => Err(Error::InvalidCoordinate {
                index,
                reason: format!("expected at least 2 values, got {}", position.len()),
            }),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn value_from_shape(shape: &Shape) -> Value {
    match shape {
        Shape::Polygon(polygon) => Value::Polygon(rings_from_polygon(polygon)),
        Shape::MultiPolygon(multi) => {
            Value::MultiPolygon(multi.iter().map(rings_from_polygon).collect())
        }
    }
}

fn rings_from_polygon(polygon: &Polygon<f64>) -> PolygonType {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect())
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}
