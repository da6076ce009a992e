use serde_json::{Map, Value};

use crate::error::{GeonormError, Result};
use crate::models::GeometryType;

/// The `type` member of a geometry object, if it is a string
pub fn geometry_type_name(geometry: &Value) -> Option<&str> {
    geometry.get("type").and_then(Value::as_str)
}

/// Read the original geometry type hint from feature properties.
///
/// Absent, null and empty hints are missing; any other non-string value is
/// reported as an unsupported type name.
pub fn original_type_hint(
    properties: Option<&Map<String, Value>>,
    key: &str,
) -> Result<GeometryType> {
    let missing = || GeonormError::MissingOriginalType { key: key.to_string() };

    match properties.and_then(|props| props.get(key)) {
        None | Some(Value::Null) => Err(missing()),
        Some(Value::String(name)) if name.is_empty() => Err(missing()),
        Some(Value::String(name)) => name
            .parse()
            .map_err(|_| GeonormError::UnsupportedOriginalType(name.clone())),
        Some(other) => Err(GeonormError::UnsupportedOriginalType(other.to_string())),
    }
}

/// Take the first element of a coordinate level
pub fn first<T>(items: Vec<T>, target: GeometryType, level: &str) -> Result<T> {
    items.into_iter().next().ok_or_else(|| GeonormError::MalformedCoordinates {
        geometry_type: target,
        reason: format!("expected at least one {}", level),
    })
}
