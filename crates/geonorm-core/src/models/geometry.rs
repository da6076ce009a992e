//! Typed GeoJSON geometries.
//!
//! Coordinates carry a fixed nesting depth per variant, so a malformed
//! GeoJSON coordinate array is rejected when it is parsed rather than when
//! it is reshaped.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeonormError, Result};

/// A coordinate: `x`, `y` and any further values such as altitude.
///
/// Values are kept as the JSON numbers they were read from, so `100` stays
/// an integer after reshaping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Position(Vec<Number>);

impl Position {
    /// Build a 2D position; `None` for non-finite values
    pub fn from_xy(x: f64, y: f64) -> Option<Self> {
        Some(Self(vec![Number::from_f64(x)?, Number::from_f64(y)?]))
    }

    pub fn x(&self) -> f64 {
        self.ordinate(0)
    }

    pub fn y(&self) -> f64 {
        self.ordinate(1)
    }

    /// Altitude, when the position has one
    pub fn z(&self) -> Option<f64> {
        self.0.get(2).and_then(Number::as_f64)
    }

    /// All values, as read
    pub fn values(&self) -> &[Number] {
        &self.0
    }

    // len >= 2 holds for every constructed position
    fn ordinate(&self, index: usize) -> f64 {
        self.0[index].as_f64().unwrap_or(f64::NAN)
    }
}

impl From<[i64; 2]> for Position {
    fn from([x, y]: [i64; 2]) -> Self {
        Self(vec![x.into(), y.into()])
    }
}

impl From<[i64; 3]> for Position {
    fn from([x, y, z]: [i64; 3]) -> Self {
        Self(vec![x.into(), y.into(), z.into()])
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<Number>::deserialize(deserializer)?;
        if values.len() < 2 {
            return Err(de::Error::invalid_length(values.len(), &"at least 2 numbers"));
        }
        Ok(Self(values))
    }
}

/// A sequence of positions; closure is not enforced
pub type Ring = Vec<Position>;

/// Rings of one polygon, exterior first
pub type PolygonCoords = Vec<Ring>;

/// Polygons of a MultiPolygon
pub type MultiPolygonCoords = Vec<PolygonCoords>;

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryType {
    pub const ALL: [GeometryType; 6] = [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
    ];

    /// The GeoJSON `type` member for this variant
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = GeonormError;

    /// Names are matched exactly, as GeoJSON spells them
    fn from_str(s: &str) -> Result<Self> {
        GeometryType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GeonormError::UnsupportedGeometryType(s.to_string()))
    }
}

/// GeoJSON-compatible geometry representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: PolygonCoords },
    MultiPoint { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: MultiPolygonCoords },
}

impl Geometry {
    /// Create a Point geometry
    pub fn point(position: impl Into<Position>) -> Self {
        Geometry::Point { coordinates: position.into() }
    }

    /// Create a LineString geometry
    pub fn line_string(coords: Vec<Position>) -> Self {
        Geometry::LineString { coordinates: coords }
    }

    /// Create a Polygon geometry
    pub fn polygon(rings: PolygonCoords) -> Self {
        Geometry::Polygon { coordinates: rings }
    }

    /// Create a MultiPolygon geometry
    pub fn multi_polygon(polygons: MultiPolygonCoords) -> Self {
        Geometry::MultiPolygon { coordinates: polygons }
    }

    /// Get the geometry type
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point { .. } => GeometryType::Point,
            Geometry::LineString { .. } => GeometryType::LineString,
            Geometry::Polygon { .. } => GeometryType::Polygon,
            Geometry::MultiPoint { .. } => GeometryType::MultiPoint,
            Geometry::MultiLineString { .. } => GeometryType::MultiLineString,
            Geometry::MultiPolygon { .. } => GeometryType::MultiPolygon,
        }
    }

    /// Parse a GeoJSON geometry object.
    ///
    /// Fails with `InvalidGeometry` when there is no string `type` member,
    /// `UnsupportedGeometryType` for names outside the six variants, and
    /// `MalformedCoordinates` when the nesting does not fit the variant.
    pub fn from_geojson(value: &Value) -> Result<Self> {
        let geometry_type: GeometryType = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(GeonormError::InvalidGeometry)?
            .parse()?;

        let coordinates = value.get("coordinates").ok_or_else(|| {
            GeonormError::MalformedCoordinates {
                geometry_type,
                reason: "missing coordinates member".to_string(),
            }
        })?;

        Ok(match geometry_type {
            GeometryType::Point => Geometry::Point {
                coordinates: parse_coordinates(geometry_type, coordinates)?,
            },
            GeometryType::LineString => Geometry::LineString {
                coordinates: parse_coordinates(geometry_type, coordinates)?,
            },
            GeometryType::Polygon => Geometry::Polygon {
                coordinates: parse_coordinates(geometry_type, coordinates)?,
            },
            GeometryType::MultiPoint => Geometry::MultiPoint {
                coordinates: parse_coordinates(geometry_type, coordinates)?,
            },
            GeometryType::MultiLineString => Geometry::MultiLineString {
                coordinates: parse_coordinates(geometry_type, coordinates)?,
            },
            GeometryType::MultiPolygon => Geometry::MultiPolygon {
                coordinates: parse_coordinates(geometry_type, coordinates)?,
            },
        })
    }

    /// Convert to serde_json::Value (GeoJSON)
    pub fn to_geojson(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| {
            GeonormError::Serialization(format!("Failed to serialize geometry: {}", e))
        })
    }
}

fn parse_coordinates<T: DeserializeOwned>(geometry_type: GeometryType, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|e| GeonormError::MalformedCoordinates {
        geometry_type,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geometry_serialization() {
        let point = Geometry::point([115, -8]);
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("Point"));
        assert!(json.contains("[115,-8]"));

        let parsed: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(point, parsed);
    }

    #[test]
    fn test_geometry_type_names() {
        for geometry_type in GeometryType::ALL {
            let parsed: GeometryType = geometry_type.as_str().parse().unwrap();
            assert_eq!(parsed, geometry_type);
            assert_eq!(geometry_type.to_string(), geometry_type.as_str());
        }
    }

    #[test]
    fn test_geometry_type_is_case_sensitive() {
        let err = "point".parse::<GeometryType>().unwrap_err();
        assert!(matches!(err, GeonormError::UnsupportedGeometryType(ref t) if t == "point"));
    }

    #[test]
    fn test_from_geojson_polygon() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[0.5, 0.0], [1, 0], [1, 1], [0.5, 0.0]]]
        });
        let geometry = Geometry::from_geojson(&value).unwrap();
        assert_eq!(geometry.geometry_type(), GeometryType::Polygon);
        assert_eq!(geometry.to_geojson().unwrap(), value);
    }

    #[test]
    fn test_integer_coordinates_stay_integers() {
        let value = json!({"type": "Point", "coordinates": [100, 0]});
        let geometry = Geometry::from_geojson(&value).unwrap();
        assert_eq!(geometry, Geometry::point([100, 0]));
        assert_eq!(geometry.to_geojson().unwrap(), value);
    }

    #[test]
    fn test_position_with_altitude() {
        let value = json!({"type": "LineString", "coordinates": [[100, 0, 5], [101.5, 1, 7.25]]});
        let geometry = Geometry::from_geojson(&value).unwrap();
        match &geometry {
            Geometry::LineString { coordinates } => {
                assert_eq!(coordinates[0].z(), Some(5.0));
                assert_eq!(coordinates[1].x(), 101.5);
                assert_eq!(coordinates[1].values().len(), 3);
            }
            other => panic!("unexpected geometry: {:?}", other),
        }
        assert_eq!(geometry.to_geojson().unwrap(), value);
    }

    #[test]
    fn test_position_from_xy() {
        let position = Position::from_xy(1.5, -2.0).unwrap();
        assert_eq!((position.x(), position.y(), position.z()), (1.5, -2.0, None));
        assert!(Position::from_xy(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_from_geojson_without_type() {
        let err = Geometry::from_geojson(&json!({"coordinates": [1, 2]})).unwrap_err();
        assert!(matches!(err, GeonormError::InvalidGeometry));

        let err = Geometry::from_geojson(&json!("Point")).unwrap_err();
        assert!(matches!(err, GeonormError::InvalidGeometry));
    }

    #[test]
    fn test_from_geojson_unsupported_type() {
        let value = json!({"type": "GeometryCollection", "geometries": []});
        let err = Geometry::from_geojson(&value).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported geometry type: GeometryCollection");
    }

    #[test]
    fn test_from_geojson_rejects_wrong_nesting() {
        let value = json!({"type": "LineString", "coordinates": [1, 2]});
        let err = Geometry::from_geojson(&value).unwrap_err();
        assert!(matches!(
            err,
            GeonormError::MalformedCoordinates { geometry_type: GeometryType::LineString, .. }
        ));

        let value = json!({"type": "Point", "coordinates": [1]});
        let err = Geometry::from_geojson(&value).unwrap_err();
        assert!(err.to_string().contains("at least 2 numbers"));

        let value = json!({"type": "Point", "coordinates": [1, "north"]});
        assert!(Geometry::from_geojson(&value).is_err());

        let value = json!({"type": "MultiPolygon"});
        let err = Geometry::from_geojson(&value).unwrap_err();
        assert!(err.to_string().contains("missing coordinates"));
    }
}
