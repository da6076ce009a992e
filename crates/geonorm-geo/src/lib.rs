//! GeoNorm Geo - `geo` crate views of normalized geometries
//!
//! Once every feature is MultiPolygon-shaped, downstream code can work with a
//! single `geo::MultiPolygon` type instead of branching over six variants.

pub mod convert;

pub use convert::{
    feature_multi_polygon, from_geo_multi_polygon, to_geo_geometry, to_geo_multi_polygon,
    GeometryExt,
};
