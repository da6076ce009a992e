//! Geometry decoder: MultiPolygon coordinates back to a named geometry type.

use serde_json::Value;

use super::validation::first;
use crate::error::{GeonormError, Result};
use crate::models::{Geometry, GeometryType, MultiPolygonCoords};

/// Strip MultiPolygon nesting down to the shape of `target`.
///
/// Only the elements the encoder would have produced are read; extra
/// polygons, rings or vertices are ignored. A level that is too shallow to
/// project fails with `MalformedCoordinates`.
pub fn decode_geometry(coordinates: MultiPolygonCoords, target: GeometryType) -> Result<Geometry> {
    let geometry = match target {
        GeometryType::MultiPolygon => Geometry::MultiPolygon { coordinates },
        GeometryType::Polygon => Geometry::Polygon {
            coordinates: first(coordinates, target, "polygon")?,
        },
        GeometryType::Point => {
            let ring = first(first(coordinates, target, "polygon")?, target, "ring")?;
            Geometry::Point { coordinates: first(ring, target, "position")? }
        }
        GeometryType::LineString => Geometry::LineString {
            coordinates: first(first(coordinates, target, "polygon")?, target, "ring")?,
        },
        GeometryType::MultiPoint => Geometry::MultiPoint {
            coordinates: coordinates
                .into_iter()
                .map(|polygon| first(first(polygon, target, "ring")?, target, "position"))
                .collect::<Result<_>>()?,
        },
        GeometryType::MultiLineString => Geometry::MultiLineString {
            coordinates: coordinates
                .into_iter()
                .map(|polygon| first(polygon, target, "ring"))
                .collect::<Result<_>>()?,
        },
    };

    Ok(geometry)
}

/// Decode a GeoJSON MultiPolygon object into `target`.
///
/// A MultiPolygon target returns the input value unchanged.
pub fn decode_geometry_value(geometry: &Value, target: GeometryType) -> Result<Value> {
    let coordinates = match Geometry::from_geojson(geometry)? {
        Geometry::MultiPolygon { coordinates } => coordinates,
        _ => return Err(GeonormError::GeometryNotMultiPolygon),
    };

    if target == GeometryType::MultiPolygon {
        tracing::trace!("Original geometry was a MultiPolygon");
        return Ok(geometry.clone());
    }

    let decoded = decode_geometry(coordinates, target)?;
    tracing::debug!("Decoded MultiPolygon as {}", target);

    decoded.to_geojson()
}
