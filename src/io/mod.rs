pub mod geojson;

pub use self::geojson::{frame_from_geojson, frame_to_geojson, read_frame, write_frame};
