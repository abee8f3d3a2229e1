//! Tail-style follower over a seekable byte stream.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::{FollowState, LineSource};
use crate::error::FollowError;

/// Bytes requested from the stream per read call.
const READ_CHUNK: usize = 8 * 1024;

/// Follows a stream that only ever grows, yielding lines appended after open.
///
/// Content that exists when the follower is created is skipped. Bytes after
/// the last newline are held back until the line is completed by a later
/// append.
///
/// If the stream becomes shorter than the offset already consumed (the file
/// was truncated or replaced in place), polling fails with
/// [`FollowError::Truncated`] and the follower closes itself.
#[derive(Debug)]
pub struct Follower<R> {
    reader: Option<R>,
    description: String,
    /// Bytes consumed from the stream, including the skipped prefix.
    offset: u64,
    /// Bytes read after the last newline.
    partial: Vec<u8>,
    ready: VecDeque<String>,
}

impl Follower<File> {
    /// Open a file and position the follower at its current end.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FollowError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FollowError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file, format!("file: {}", path.display()))
    }
}

impl<R: Read + Seek> Follower<R> {
    /// Wrap a reader, seeking it to its end.
    pub fn new(mut reader: R, description: impl Into<String>) -> Result<Self, FollowError> {
        let offset = reader.seek(SeekFrom::End(0))?;
        let description = description.into();
        tracing::debug!(source = %description, offset, "Follower positioned at end of stream");

        Ok(Self {
            reader: Some(reader),
            description,
            offset,
            partial: Vec::new(),
            ready: VecDeque::new(),
        })
    }

    /// Bytes consumed from the stream so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read until at least one complete line is buffered or the stream is exhausted.
    fn fill(&mut self) -> Result<(), FollowError> {
        let Some(reader) = self.reader.as_mut() else {
            return Err(FollowError::Closed);
        };

        let mut buf = [0u8; READ_CHUNK];
        while self.ready.is_empty() {
            let n = match reader.read(&mut buf) {
                Ok(0) => {
                    // Nothing new. Make sure the stream did not shrink under us.
                    let len = reader.seek(SeekFrom::End(0))?;
                    reader.seek(SeekFrom::Start(self.offset))?;
                    if len < self.offset {
                        return Err(FollowError::Truncated {
                            offset: self.offset,
                            len,
                        });
                    }
                    return Ok(());
                }
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            self.offset += n as u64;
            self.partial.extend_from_slice(&buf[..n]);
            split_lines(&mut self.partial, &mut self.ready);
        }

        Ok(())
    }
}

/// Move every newline-terminated line out of `partial` into `ready`.
fn split_lines(partial: &mut Vec<u8>, ready: &mut VecDeque<String>) {
    while let Some(pos) = partial.iter().position(|&b| b == b'\n') {
        let mut line: Vec<u8> = partial.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        ready.push_back(String::from_utf8_lossy(&line).into_owned());
    }
}

impl<R> LineSource for Follower<R>
where
    R: Read + Seek + Send + std::fmt::Debug,
{
    fn poll_line(&mut self) -> Result<Option<String>, FollowError> {
        if let Some(line) = self.ready.pop_front() {
            return Ok(Some(line));
        }

        if let Err(e) = self.fill() {
            if !matches!(e, FollowError::Closed) {
                self.close();
            }
            return Err(e);
        }

        Ok(self.ready.pop_front())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn state(&self) -> FollowState {
        if self.reader.is_none() {
            FollowState::Closed
        } else if self.ready.is_empty() {
            FollowState::AtEofWaiting
        } else {
            FollowState::LineReady
        }
    }

    fn close(&mut self) {
        if self.reader.take().is_some() {
            tracing::debug!(
                source = %self.description,
                offset = self.offset,
                pending_bytes = self.partial.len(),
                "Follower closed"
            );
        }
        self.ready.clear();
        self.partial.clear();
    }
}
