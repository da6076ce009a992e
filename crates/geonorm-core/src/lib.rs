//! GeoNorm Core - Reversible MultiPolygon normalization for GeoJSON features
//!
//! Any of the six GeoJSON geometry variants can be re-encoded as a MultiPolygon
//! and restored later from the `originalGeometryType` property hint.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;

pub use error::{GeonormError, Result};
pub use models::{Feature, Geometry, GeometryType, MultiPolygonCoords};
pub use normalize::{
    decode_geometry, encode_geometry, from_multi_polygon, to_multi_polygon, NormalizeConfig,
    Normalizer,
};
