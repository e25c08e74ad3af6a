// SPDX-License-Identifier: GPL-3.0-only

//! Scanner configuration
//!
//! Settings are stored as JSON. A missing file is not an error: the defaults
//! from [`crate::constants`] are used instead.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CORNER_RADIUS, DEFAULT_DETECTOR_MAX_DIMENSION,
    DEFAULT_EDGE_LENGTH, DEFAULT_HORIZONTAL_OFFSET, DEFAULT_SCANNER_HEIGHT,
    DEFAULT_SCANNER_WIDTH, DEFAULT_VERTICAL_OFFSET,
};
use crate::errors::ConfigError;
use crate::overlay::ScanRegion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Cutout width in overlay pixels
    pub scanner_width: f32,
    /// Cutout height in overlay pixels
    pub scanner_height: f32,
    /// Radius of the rounded cutout corners
    pub corner_radius: f32,
    /// Length of the viewfinder corner legs
    pub edge_length: f32,
    /// Horizontal position of the cutout centre (0.0 to 1.0)
    pub horizontal_offset: f32,
    /// Vertical position of the cutout centre (0.0 to 1.0)
    pub vertical_offset: f32,
    /// Only surface detections fully inside the cutout
    pub roi_enabled: bool,
    /// Frames come from a front camera and are mirrored on screen
    pub front_camera: bool,
    /// Frames are downscaled to this size before detection
    pub detector_max_dimension: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scanner_width: DEFAULT_SCANNER_WIDTH,
            scanner_height: DEFAULT_SCANNER_HEIGHT,
            corner_radius: DEFAULT_CORNER_RADIUS,
            edge_length: DEFAULT_EDGE_LENGTH,
            horizontal_offset: DEFAULT_HORIZONTAL_OFFSET,
            vertical_offset: DEFAULT_VERTICAL_OFFSET,
            roi_enabled: true,
            front_camera: false,
            detector_max_dimension: DEFAULT_DETECTOR_MAX_DIMENSION,
        }
    }
}

impl ScannerConfig {
    /// Default config file location (`<config dir>/scan-overlay/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path, or from [`Self::default_path`]
    ///
    /// Falls back to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    debug!("No config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), "Loaded scanner config");
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: std::io::Error::other(e),
        })?;
        std::fs::write(path, json).map_err(write_err)
    }

    /// Scan region for a viewport of the given size
    pub fn scan_region(&self, viewport_width: f32, viewport_height: f32) -> ScanRegion {
        ScanRegion::new(
            viewport_width,
            viewport_height,
            self.scanner_width,
            self.scanner_height,
            self.horizontal_offset,
            self.vertical_offset,
        )
        .with_corner_radius(self.corner_radius)
        .with_edge_length(self.edge_length)
    }
}
