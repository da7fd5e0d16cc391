pub mod dissolve;
pub mod fill;

pub use dissolve::{
    DEFAULT_MARGIN, DissolveOptions, dissolve_file, dissolve_frame, dissolve_frame_with, explode,
};
pub use fill::{fill_file, fill_frame};
