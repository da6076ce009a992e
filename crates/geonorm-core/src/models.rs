pub mod feature;
pub mod geometry;

pub use feature::Feature;
pub use geometry::{
    Geometry, GeometryType, MultiPolygonCoords, PolygonCoords, Position, Ring,
};
