// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the scan overlay

use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Detector-related errors
    #[error("Detector error: {0}")]
    Detector(#[from] DetectorError),
    /// Overlay geometry errors
    #[error("Overlay error: {0}")]
    Overlay(#[from] OverlayError),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Image decoding or encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by a barcode detector
#[derive(Debug, Clone, Error)]
pub enum DetectorError {
    /// Frame buffer does not match its declared dimensions
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
    /// The detection engine failed
    #[error("engine error: {0}")]
    Engine(String),
}

/// Errors from overlay geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    /// Image or view dimensions are zero or not finite
    #[error("invalid dimensions: image {image_width}x{image_height}, view {view_width}x{view_height}")]
    InvalidDimensions {
        image_width: f32,
        image_height: f32,
        view_width: f32,
        view_height: f32,
    },
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no config directory available")]
    NoConfigDir,
}
