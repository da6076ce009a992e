//! Feature-level normalization to and from MultiPolygon form.
//!
//! Outputs are fresh values: the top-level members of the input feature are
//! copied and only `type`, `properties` and `geometry` are overridden. The
//! input is never modified.

pub mod decode;
pub mod encode;
pub mod validation;

pub use decode::decode_geometry;
pub use encode::encode_geometry;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GeonormError, Result};
use crate::models::{Feature, GeometryType};

/// Property key that records the original geometry type
pub const DEFAULT_HINT_KEY: &str = "originalGeometryType";

/// Settings for a `Normalizer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Property holding the original geometry type
    pub hint_key: String,

    /// Stamp the original type into properties when encoding, unless a hint
    /// is already present
    pub record_original_type: bool,

    /// Remove the hint from properties after decoding
    pub strip_hint_on_decode: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            hint_key: DEFAULT_HINT_KEY.to_string(),
            record_original_type: false,
            strip_hint_on_decode: false,
        }
    }
}

/// Converts features between their own geometry type and MultiPolygon form
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Convert a Feature to one whose geometry is a MultiPolygon
    pub fn to_multi_polygon(&self, feature: &Value) -> Result<Value> {
        let feature = Feature::from_value(feature)?;
        Ok(self.encode_feature(feature)?.into_value())
    }

    /// Restore a MultiPolygon Feature to the geometry type named by its hint
    pub fn from_multi_polygon(&self, feature: &Value) -> Result<Value> {
        let feature = Feature::from_value(feature)?;
        Ok(self.decode_feature(feature)?.into_value())
    }

    /// Apply `to_multi_polygon` to every member of a FeatureCollection
    pub fn to_multi_polygon_collection(&self, collection: &Value) -> Result<Value> {
        map_collection(collection, |feature| self.to_multi_polygon(feature))
    }

    /// Apply `from_multi_polygon` to every member of a FeatureCollection
    pub fn from_multi_polygon_collection(&self, collection: &Value) -> Result<Value> {
        map_collection(collection, |feature| self.from_multi_polygon(feature))
    }

    /// `to_multi_polygon` for `geojson` crate features
    pub fn normalize_geojson(&self, feature: &geojson::Feature) -> Result<geojson::Feature> {
        let feature = Feature::from_geojson(feature)?;
        self.encode_feature(feature)?.into_geojson()
    }

    /// `from_multi_polygon` for `geojson` crate features
    pub fn denormalize_geojson(&self, feature: &geojson::Feature) -> Result<geojson::Feature> {
        let feature = Feature::from_geojson(feature)?;
        self.decode_feature(feature)?.into_geojson()
    }

    fn encode_feature(&self, feature: Feature) -> Result<Feature> {
        let geometry = feature.geometry().ok_or(GeonormError::MissingGeometry)?;
        let (source_type, encoded) = encode::encode_geometry_value(geometry)?;

        let mut properties = feature.properties_or_default();
        if self.config.record_original_type && !properties.contains_key(&self.config.hint_key) {
            properties.insert(
                self.config.hint_key.clone(),
                Value::String(source_type.as_str().to_string()),
            );
        }

        Ok(feature.with_properties(properties).with_geometry(encoded))
    }

    fn decode_feature(&self, feature: Feature) -> Result<Feature> {
        let geometry = feature
            .geometry()
            .filter(|g| {
                validation::geometry_type_name(g) == Some(GeometryType::MultiPolygon.as_str())
            })
            .ok_or(GeonormError::GeometryNotMultiPolygon)?;

        let target = validation::original_type_hint(feature.properties(), &self.config.hint_key)?;
        let decoded = decode::decode_geometry_value(geometry, target)?;

        let mut properties = feature.properties_or_default();
        if self.config.strip_hint_on_decode {
            properties.remove(&self.config.hint_key);
        }

        Ok(feature.with_properties(properties).with_geometry(decoded))
    }
}

/// Convert a Feature to MultiPolygon form with the default settings
pub fn to_multi_polygon(feature: &Value) -> Result<Value> {
    Normalizer::default().to_multi_polygon(feature)
}

/// Restore a MultiPolygon Feature with the default settings
pub fn from_multi_polygon(feature: &Value) -> Result<Value> {
    Normalizer::default().from_multi_polygon(feature)
}

fn map_collection<F>(collection: &Value, convert: F) -> Result<Value>
where
    F: Fn(&Value) -> Result<Value>,
{
    let mut members = match collection {
        Value::Object(members)
            if members.get("type").and_then(Value::as_str) == Some("FeatureCollection") =>
        {
            members.clone()
        }
        _ => return Err(GeonormError::NotAFeatureCollection),
    };

    let features = members
        .get("features")
        .and_then(Value::as_array)
        .ok_or(GeonormError::NotAFeatureCollection)?
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            convert(feature).map_err(|e| GeonormError::in_feature(index, e))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Converted {} features", features.len());
    members.insert("features".to_string(), Value::Array(features));

    Ok(Value::Object(members))
}
