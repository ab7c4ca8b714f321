//! Error type shared by every fallible scalelib operation.
//!
//! Most failures in this crate are recoverable: an unknown key
//! yields an empty scale, an empty range yields an empty note list, and a
//! corrupt saved preference falls back to its default. The variants here
//! cover what remains.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown pitch class '{0}'")]
    UnknownPitchClass(String),

    #[error("unknown scale type '{0}'")]
    UnknownScaleType(String),

    #[error("unknown tab '{0}'")]
    UnknownTab(String),

    #[error("invalid note label '{0}'")]
    InvalidNoteLabel(String),

    #[error("range start {start} must be below range end {end}")]
    InvalidRange { start: String, end: String },

    #[error("tempo {0} BPM is outside 40..=200")]
    TempoOutOfRange(u32),

    #[error("no notes available in the selected range")]
    NoNotesAvailable,
}

pub type Result<T> = std::result::Result<T, Error>;
