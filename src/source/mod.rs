//! Line source abstraction for following growing log files.
//!
//! A [`LineSource`] hands out complete, newline-terminated lines that were
//! appended after the source was opened. Polling is non-blocking; the
//! pipeline decides how long to wait between empty polls.

mod follow;

pub use follow::Follower;

use std::fmt::Debug;

use crate::error::FollowError;

/// Observable state of a line source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// No complete line is buffered; the next poll will read from the stream.
    AtEofWaiting,
    /// At least one complete line is buffered and will be returned immediately.
    LineReady,
    /// The underlying handle has been released.
    Closed,
}

/// Trait for receiving appended lines from a growing stream.
///
/// # Example
///
/// ```no_run
/// use hopwatch::source::{Follower, LineSource};
///
/// let mut source = Follower::open("bot.log")?;
/// while let Some(line) = source.poll_line()? {
///     println!("{}", line);
/// }
/// # Ok::<(), hopwatch::FollowError>(())
/// ```
pub trait LineSource: Send + Debug {
    /// Poll for the next complete line.
    ///
    /// Returns `Ok(Some(line))` without the trailing newline when one is
    /// available and `Ok(None)` when the stream has no new complete line yet.
    /// This method should be non-blocking.
    fn poll_line(&mut self) -> Result<Option<String>, FollowError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Current state of the source.
    fn state(&self) -> FollowState;

    /// Release the underlying handle. Further polls return [`FollowError::Closed`].
    fn close(&mut self);
}
