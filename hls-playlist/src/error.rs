use std::io;

use thiserror::Error;

/// Boxed error produced by a caller-supplied [`CustomDecoder`](crate::CustomDecoder).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("window size {winsize} exceeds capacity {capacity}")]
    InvalidWindow { winsize: usize, capacity: usize },

    #[error("line {line}: {reason}: {content:?}")]
    Parse {
        line: usize,
        content: String,
        reason: &'static str,
    },

    #[error("playlist is full")]
    PlaylistFull,

    #[error("playlist is closed")]
    Closed,

    #[error(transparent)]
    Extension(BoxError),

    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("not a playlist file")]
    NotAPlaylist,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, content: impl Into<String>, reason: &'static str) -> Self {
        Self::Parse {
            line,
            content: content.into(),
            reason,
        }
    }
}
