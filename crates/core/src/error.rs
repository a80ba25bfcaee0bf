use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the playlist ports and services
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("HTTP error: {status} - {body}")]
    HttpStatus { status: u16, body: String },

    #[error("File {} not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlaylistError {
    /// Maps an I/O error on `path`, turning `NotFound` into [`PlaylistError::FileNotFound`]
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PlaylistError::FileNotFound(path)
        } else {
            PlaylistError::Io { path, source }
        }
    }
}
