use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, dissolving or writing a polygon layer
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("unsupported vector format: {} (expected .geojson or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("feature {index} has a {kind} geometry, only Polygon and MultiPolygon are supported")]
    NonPolygonal { index: usize, kind: String },

    #[error("feature {index} has an invalid position: {reason}")]
    InvalidCoordinate { index: usize, reason: String },

    #[error("input layer has no polygon geometry")]
    EmptyInput,

    #[error("invalid option {name}: {value}")]
    InvalidOption { name: &'static str, value: f64 },

    #[error("failed to parse config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
