use thiserror::Error;

#[derive(Error, Debug)]
pub enum EoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Missing band: {band}")]
    MissingBand { band: String },

    #[error("Profile '{profile}' references unknown band '{band}'")]
    UnknownBand { band: String, profile: String },

    #[error("Invalid visualization profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid mask bits: cloud={cloud}, cirrus={cirrus}")]
    InvalidMaskBits { cloud: u8, cirrus: u8 },

    #[error("Invalid navigation: {0}")]
    InvalidNavigation(String),

    #[error("Unknown viewport: {0}")]
    UnknownViewport(usize),

    #[error("Unknown place: {0}")]
    UnknownPlace(String),

    #[error("Unknown color: {0}")]
    UnknownColor(String),

    #[error("Imagery source error: {0}")]
    Imagery(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EoError>;
