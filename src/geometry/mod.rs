pub mod bounds;
pub mod buffer;
pub mod clip;
pub mod holes;

pub use bounds::Bounds;
pub use buffer::{DEFAULT_DISTANCE, DEFAULT_MITER_ANGLE, buffer, buffer_with};
pub use clip::{clip_frame, mask_of};
pub use holes::{close_holes, close_polygon_holes};
