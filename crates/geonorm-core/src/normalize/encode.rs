//! Geometry encoder: any supported geometry to MultiPolygon coordinates.
//!
//! The mapping only adds nesting levels. Rings are not closed and no
//! geometric validity is checked.

use serde_json::Value;

use crate::error::Result;
use crate::models::{Geometry, GeometryType, MultiPolygonCoords};

/// Reshape a geometry's coordinates into MultiPolygon nesting
pub fn encode_geometry(geometry: Geometry) -> MultiPolygonCoords {
    match geometry {
        Geometry::MultiPolygon { coordinates } => coordinates,
        Geometry::Polygon { coordinates } => vec![coordinates],
        Geometry::Point { coordinates } => vec![vec![vec![coordinates]]],
        Geometry::LineString { coordinates } => vec![vec![coordinates]],
        Geometry::MultiPoint { coordinates } => {
            coordinates.into_iter().map(|point| vec![vec![point]]).collect()
        }
        Geometry::MultiLineString { coordinates } => {
            coordinates.into_iter().map(|line| vec![line]).collect()
        }
    }
}

/// Encode a GeoJSON geometry object.
///
/// A MultiPolygon is returned as the same value it came in as, including any
/// extra members such as `bbox`.
pub fn encode_geometry_value(geometry: &Value) -> Result<(GeometryType, Value)> {
    let parsed = Geometry::from_geojson(geometry)?;
    let source_type = parsed.geometry_type();

    if source_type == GeometryType::MultiPolygon {
        tracing::trace!("Geometry is already a MultiPolygon");
        return Ok((source_type, geometry.clone()));
    }

    let encoded = Geometry::multi_polygon(encode_geometry(parsed));
    tracing::debug!("Encoded {} as MultiPolygon", source_type);

    Ok((source_type, encoded.to_geojson()?))
}
