use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::geometry::{DEFAULT_DISTANCE, DEFAULT_MITER_ANGLE};
use crate::ops::{DEFAULT_MARGIN, DissolveOptions};

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}
fn default_tolerance() -> f64 {
    DEFAULT_DISTANCE
}
fn default_miter_angle() -> f64 {
    DEFAULT_MITER_ANGLE
}
fn default_verbose() -> bool {
    false
}

/// Settings read from `fastdissolve.toml`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_miter_angle")]
    pub miter_angle: f64,
    /// Fill holes up to this area after dissolving
    #[serde(default)]
    pub fill_holes: Option<f64>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            tolerance: default_tolerance(),
            miter_angle: default_miter_angle(),
            fill_holes: None,
            output: None,
            verbose: default_verbose(),
        }
    }
}

impl FileConfig {
    /// Search the usual locations and return the first config that parses,
    /// along with the errors of every unreadable file skipped on the way.
    ///
    /// Errors are returned rather than logged so the caller can report them
    /// once logging is set up.
    pub fn load() -> (Option<Self>, Vec<Error>) {
        Self::load_first(get_config_paths())
    }

    fn load_first(paths: impl IntoIterator<Item = PathBuf>) -> (Option<Self>, Vec<Error>) {
        let mut skipped = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return (Some(config), skipped),
                    Err(e) => skipped.push(e),
                }
            }
        }
        (None, skipped)
    }

    /// Parse a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&contents).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml(contents: &str) -> std::result::Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    pub fn dissolve_options(&self) -> DissolveOptions {
        DissolveOptions::default()
            .with_margin(self.margin)
            .with_tolerance(self.tolerance)
            .with_miter_angle(self.miter_angle)
            .with_fill_holes(self.fill_holes)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("fastdissolve.toml"));
    paths.push(PathBuf::from(".fastdissolve.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fastdissolve").join("config.toml"));
        paths.push(config_dir.join("fastdissolve.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fastdissolve.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.dissolve_options(), DissolveOptions::default());
    }

    #[test]
    fn test_partial_config() {
        let config = FileConfig::from_toml("tolerance = 0.001\nfill_holes = 0.5\n").unwrap();

        assert_eq!(config.margin, DEFAULT_MARGIN);
        assert_eq!(config.tolerance, 0.001);
        assert_eq!(config.fill_holes, Some(0.5));

        let options = config.dissolve_options();
        assert_eq!(options.tolerance, 0.001);
        assert_eq!(options.fill_holes, Some(0.5));
    }

    #[test]
    fn test_load_from_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fastdissolve.toml");
        std::fs::write(&path, "margin = \"wide\"").unwrap();

        assert!(matches!(
            FileConfig::load_from(&path),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_load_first_reports_skipped_files() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("fastdissolve.toml");
        let good = dir.path().join(".fastdissolve.toml");
        let missing = dir.path().join("missing.toml");
        std::fs::write(&bad, "margin = \"wide\"").unwrap();
        std::fs::write(&good, "margin = 2.5").unwrap();

        let (config, skipped) = FileConfig::load_first(vec![missing, bad, good]);

        assert_eq!(config.map(|c| c.margin), Some(2.5));
        assert_eq!(skipped.len(), 1);
        assert!(matches!(skipped[0], Error::Config { .. }));
    }

    #[test]
    fn test_load_first_nothing_found() {
        let dir = tempdir().unwrap();
        let (config, skipped) = FileConfig::load_first(vec![dir.path().join("none.toml")]);

        assert!(config.is_none());
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_config_paths_start_local() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("fastdissolve.toml"));
    }
}
