//! Error types for the monitoring pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`LineSource`](crate::source::LineSource).
#[derive(Debug, Error)]
pub enum FollowError {
    /// The log file could not be opened.
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from or seeking within the stream failed.
    #[error("I/O error while following: {0}")]
    Io(#[from] io::Error),

    /// The stream shrank below the position already consumed.
    #[error("Stream truncated: length {len} is below read offset {offset}")]
    Truncated { offset: u64, len: u64 },

    /// The source was closed and can no longer be polled.
    #[error("Source is closed")]
    Closed,
}

/// Errors that stop a pipeline from starting or running.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration values were rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The line source failed.
    #[error(transparent)]
    Follow(#[from] FollowError),
}
