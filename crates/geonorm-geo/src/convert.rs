//! Conversions between normalized coordinates and `geo` crate types.

use geo::{Coord, Geometry as GeoGeometry, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use geonorm_core::models::{Feature, Geometry, MultiPolygonCoords, PolygonCoords, Position};
use geonorm_core::{encode_geometry, GeometryType, GeonormError, Result};

fn to_geo_line_string(positions: &[Position]) -> LineString {
    LineString::new(positions.iter().map(|p| Coord { x: p.x(), y: p.y() }).collect())
}

fn to_geo_polygon(rings: &PolygonCoords) -> Polygon {
    let mut rings = rings.iter().map(|ring| to_geo_line_string(ring));
    match rings.next() {
        Some(exterior) => Polygon::new(exterior, rings.collect()),
        None => Polygon::new(LineString::new(vec![]), vec![]),
    }
}

fn from_geo_line_string(line: &LineString) -> Result<Vec<Position>> {
    line.coords()
        .map(|c| {
            Position::from_xy(c.x, c.y).ok_or_else(|| GeonormError::MalformedCoordinates {
                geometry_type: GeometryType::MultiPolygon,
                reason: format!("non-finite coordinate ({}, {})", c.x, c.y),
            })
        })
        .collect()
}

/// Convert MultiPolygon coordinates to a geo::MultiPolygon.
///
/// `geo` closes rings on construction, so open rings gain a closing vertex.
pub fn to_geo_multi_polygon(coordinates: &MultiPolygonCoords) -> MultiPolygon {
    MultiPolygon::new(coordinates.iter().map(to_geo_polygon).collect())
}

/// Convert a geo::MultiPolygon back to MultiPolygon coordinates.
///
/// Values come back as floats and only `x`/`y` survive; NaN or infinite
/// values fail with `MalformedCoordinates`.
pub fn from_geo_multi_polygon(multi_polygon: &MultiPolygon) -> Result<MultiPolygonCoords> {
    multi_polygon
        .iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(from_geo_line_string)
                .collect::<Result<PolygonCoords>>()
        })
        .collect()
}

/// Convert a Geometry to a geo::Geometry of the matching variant
pub fn to_geo_geometry(geometry: &Geometry) -> GeoGeometry {
    match geometry {
        Geometry::Point { coordinates } => {
            GeoGeometry::Point(geo::Point::new(coordinates.x(), coordinates.y()))
        }
        Geometry::LineString { coordinates } => {
            GeoGeometry::LineString(to_geo_line_string(coordinates))
        }
        Geometry::Polygon { coordinates } => GeoGeometry::Polygon(to_geo_polygon(coordinates)),
        Geometry::MultiPoint { coordinates } => GeoGeometry::MultiPoint(geo::MultiPoint::new(
            coordinates.iter().map(|c| geo::Point::new(c.x(), c.y())).collect(),
        )),
        Geometry::MultiLineString { coordinates } => GeoGeometry::MultiLineString(
            geo::MultiLineString::new(coordinates.iter().map(|l| to_geo_line_string(l)).collect()),
        ),
        Geometry::MultiPolygon { coordinates } => {
            GeoGeometry::MultiPolygon(to_geo_multi_polygon(coordinates))
        }
    }
}

/// Normalize a GeoJSON Feature and return its geometry as a geo::MultiPolygon
pub fn feature_multi_polygon(feature: &Value) -> Result<MultiPolygon> {
    let feature = Feature::from_value(feature)?;
    let geometry = feature.geometry().ok_or(GeonormError::MissingGeometry)?;
    let geometry = Geometry::from_geojson(geometry)?;

    tracing::debug!("Building geo::MultiPolygon from {}", geometry.geometry_type());
    Ok(to_geo_multi_polygon(&encode_geometry(geometry)))
}

/// Extension trait for Geometry with geo-crate operations
pub trait GeometryExt {
    /// Convert to geo::Geometry
    fn to_geo(&self) -> GeoGeometry;

    /// Convert the normalized form to geo::MultiPolygon
    fn to_geo_multi_polygon(&self) -> MultiPolygon;

    /// Get the centroid as `[x, y]`
    fn centroid_coords(&self) -> Option<[f64; 2]>;
}

impl GeometryExt for Geometry {
    fn to_geo(&self) -> GeoGeometry {
        to_geo_geometry(self)
    }

    fn to_geo_multi_polygon(&self) -> MultiPolygon {
        to_geo_multi_polygon(&encode_geometry(self.clone()))
    }

    fn centroid_coords(&self) -> Option<[f64; 2]> {
        use geo::algorithm::centroid::Centroid;
        self.to_geo().centroid().map(|p| [p.x(), p.y()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn xy(x: f64, y: f64) -> Position {
        Position::from_xy(x, y).unwrap()
    }

    fn square() -> PolygonCoords {
        vec![vec![xy(0.0, 0.0), xy(2.0, 0.0), xy(2.0, 2.0), xy(0.0, 2.0), xy(0.0, 0.0)]]
    }

    #[test]
    fn test_closed_polygon_roundtrip() {
        let coords = vec![square()];
        let geo_multi = to_geo_multi_polygon(&coords);
        assert_eq!(geo_multi.0.len(), 1);
        assert_eq!(from_geo_multi_polygon(&geo_multi).unwrap(), coords);
    }

    #[test]
    fn test_interior_rings_are_kept() {
        let mut rings = square();
        rings.push(vec![xy(0.5, 0.5), xy(1.0, 0.5), xy(1.0, 1.0), xy(0.5, 0.5)]);
        let geo_multi = to_geo_multi_polygon(&vec![rings.clone()]);
        assert_eq!(geo_multi.0[0].interiors().len(), 1);
        assert_eq!(from_geo_multi_polygon(&geo_multi).unwrap(), vec![rings]);
    }

    #[test]
    fn test_to_geo_geometry_keeps_variant() {
        let geometry = Geometry::MultiPoint { coordinates: vec![xy(1.0, 2.0), xy(3.0, 4.0)] };
        match to_geo_geometry(&geometry) {
            GeoGeometry::MultiPoint(mp) => assert_eq!(mp.0.len(), 2),
            other => panic!("unexpected geometry: {:?}", other),
        }
    }

    #[test]
    fn test_integer_and_3d_positions_convert() {
        let geometry = Geometry::line_string(vec![Position::from([0, 0, 10]), Position::from([4, 2])]);
        let multi = geometry.to_geo_multi_polygon();
        let back = from_geo_multi_polygon(&multi).unwrap();
        assert_eq!(back, vec![vec![vec![xy(0.0, 0.0), xy(4.0, 2.0), xy(0.0, 0.0)]]]);
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let multi = MultiPolygon::new(vec![Polygon::new(
            LineString::new(vec![Coord { x: f64::NAN, y: 0.0 }]),
            vec![],
        )]);
        let err = from_geo_multi_polygon(&multi).unwrap_err();
        assert!(matches!(err, GeonormError::MalformedCoordinates { .. }));
    }

    #[test]
    fn test_centroid() {
        let centroid = Geometry::polygon(square()).centroid_coords().unwrap();
        assert!((centroid[0] - 1.0).abs() < 1e-10);
        assert!((centroid[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_feature_multi_polygon() {
        let feature = json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "MultiLineString",
                "coordinates": [[[0.0, 0.0], [1.0, 1.0]], [[2.0, 2.0], [3.0, 3.0]]]
            }
        });
        let multi = feature_multi_polygon(&feature).unwrap();
        assert_eq!(multi.0.len(), 2);
    }

    #[test]
    fn test_feature_multi_polygon_errors() {
        let err = feature_multi_polygon(&json!({"type": "Feature"})).unwrap_err();
        assert!(matches!(err, GeonormError::MissingGeometry));

        let err = feature_multi_polygon(&json!({"type": "Point"})).unwrap_err();
        assert!(matches!(err, GeonormError::NotAFeature));
    }
}
