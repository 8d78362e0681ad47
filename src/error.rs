//! Error type shared by the rendering core and the export driver.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by rendering and exporting.
///
/// A missing font is deliberately absent: font resolution always falls back
/// to the built-in face.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller passed a value the geometry or canvas cannot work with.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// An image could not be encoded or written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A plan file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A plan could not be parsed or serialized.
    #[error("invalid export plan: {0}")]
    Plan(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
