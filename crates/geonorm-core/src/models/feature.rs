use serde_json::{Map, Value};

use crate::error::{GeonormError, Result};

/// A GeoJSON Feature object.
///
/// All top-level members are kept (`id`, `bbox`, foreign members) so a
/// conversion only overrides the members it owns and carries the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    members: Map<String, Value>,
}

impl Feature {
    /// Validate that `value` is a Feature object and copy its members
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(members) if members.get("type").and_then(Value::as_str) == Some("Feature") => {
                Ok(Self { members: members.clone() })
            }
            _ => Err(GeonormError::NotAFeature),
        }
    }

    /// Convert from a `geojson` crate feature
    pub fn from_geojson(feature: &geojson::Feature) -> Result<Self> {
        let value = serde_json::to_value(feature).map_err(|e| {
            GeonormError::Serialization(format!("Failed to serialize feature: {}", e))
        })?;
        Self::from_value(&value)
    }

    /// Convert into a `geojson` crate feature
    pub fn into_geojson(self) -> Result<geojson::Feature> {
        serde_json::from_value(self.into_value()).map_err(|e| {
            GeonormError::Serialization(format!("Failed to parse feature: {}", e))
        })
    }

    /// The geometry member.
    ///
    /// `null`, `false`, `0` and `""` count as absent, like a missing member.
    pub fn geometry(&self) -> Option<&Value> {
        self.members.get("geometry").filter(|g| !is_blank(g))
    }

    /// The properties object, if there is one
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.members.get("properties").and_then(Value::as_object)
    }

    /// A single property value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties().and_then(|props| props.get(key))
    }

    /// Copy of the properties, empty when absent or not an object
    pub fn properties_or_default(&self) -> Map<String, Value> {
        self.properties().cloned().unwrap_or_default()
    }

    /// Replace the geometry member
    pub fn with_geometry(mut self, geometry: Value) -> Self {
        self.members.insert("geometry".to_string(), geometry);
        self
    }

    /// Replace the properties member
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.members.insert("properties".to_string(), Value::Object(properties));
        self
    }

    /// All top-level members
    pub fn members(&self) -> &Map<String, Value> {
        &self.members
    }

    pub fn into_value(mut self) -> Value {
        self.members.insert("type".to_string(), Value::String("Feature".to_string()));
        Value::Object(self.members)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
