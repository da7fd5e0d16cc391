pub mod frame;
pub mod shape;

pub use frame::{Crs, Feature, GeoFrame, Properties};
pub use shape::Shape;
