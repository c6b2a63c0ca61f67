//! Error types for icon variant generation.

use std::path::PathBuf;

/// Errors that end a generation run.
///
/// A failing packaging tool is not an error: it is reported through
/// [`VariantOutcome::FellBack`](crate::VariantOutcome::FellBack) and recovered
/// locally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base icon does not exist. Checked before anything is written.
    #[error("base icon not found at {}", .0.display())]
    BaseIconMissing(PathBuf),

    /// An image could not be decoded or encoded.
    #[error("image error at {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A color name outside the fixed variant table.
    #[error("unknown color variant: {0}")]
    UnknownVariant(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
