use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while loading the 4×4 control-point grid.
#[derive(Debug, thiserror::Error)]
pub enum ControlGridError {
    /// I/O error reading the control-point file.
    #[error("failed to read control points from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource does not hold exactly 16 points.
    #[error("expected 16 control points, found {found}")]
    PointCount { found: usize },

    /// A line does not hold exactly three coordinates.
    #[error("line {line}: expected 3 coordinates, found {found}")]
    FieldCount { line: usize, found: usize },

    /// A coordinate could not be parsed as a number.
    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber { line: usize, token: String },

    /// A coordinate parsed, but is infinite or NaN.
    #[error("line {line}: coordinate {token:?} is not finite")]
    NonFinite { line: usize, token: String },
}

/// A per-frame parameter outside its allowed range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{name} = {value} is outside the allowed range {range}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: f64,
    pub range: String,
}

/// Errors that can occur while building a texture or normal map.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture has zero size ({width}×{height})")]
    Empty { width: u32, height: u32 },

    #[error("pixel data has {found} bytes, expected {expected} for {width}×{height} RGBA")]
    SizeMismatch { width: u32, height: u32, expected: usize, found: usize },

    /// Failed to decode an image file.
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Which optional sampled map a render mode depends on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MapKind {
    Texture,
    NormalMap,
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKind::Texture => f.write_str("texture"),
            MapKind::NormalMap => f.write_str("normal map"),
        }
    }
}

/// Errors that abort a frame before anything is drawn.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid frame configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A mapping mode is enabled but no map was supplied.
    #[error("{0} mapping is enabled but no {0} is loaded")]
    MissingMap(MapKind),
}
