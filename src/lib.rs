//! fastdissolve - Dissolve a polygon layer to its outer boundary by clipping
//! a bounding rectangle against it

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod io;
pub mod ops;

pub use domain::{Crs, Feature, GeoFrame, Shape};
pub use error::{Error, Result};
pub use geometry::{Bounds, buffer, close_holes};
pub use ops::{
    DissolveOptions, dissolve_file, dissolve_frame, dissolve_frame_with, fill_file, fill_frame,
};
