//! Error types for GeoNorm

use crate::models::GeometryType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeonormError {
    // Feature errors
    #[error("Input must be a GeoJSON Feature")]
    NotAFeature,

    #[error("Feature must have a geometry property")]
    MissingGeometry,

    #[error("Feature geometry must be a MultiPolygon")]
    GeometryNotMultiPolygon,

    #[error("Feature must have {key} in properties")]
    MissingOriginalType { key: String },

    // Geometry errors
    #[error("Invalid geometry input")]
    InvalidGeometry,

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    #[error("Unsupported original geometry type: {0}")]
    UnsupportedOriginalType(String),

    #[error("Malformed {geometry_type} coordinates: {reason}")]
    MalformedCoordinates {
        geometry_type: GeometryType,
        reason: String,
    },

    // Collection errors
    #[error("Input must be a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    #[error("Feature {index}: {source}")]
    InFeature {
        index: usize,
        #[source]
        source: Box<GeonormError>,
    },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeonormError {
    /// Wrap an error with the index of the collection member that produced it
    pub fn in_feature(index: usize, source: GeonormError) -> Self {
        GeonormError::InFeature { index, source: Box::new(source) }
    }
}

pub type Result<T> = std::result::Result<T, GeonormError>;
