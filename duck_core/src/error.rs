//! Error type shared by the buffer constructors and config validation.
//!
//! Gameplay itself never fails: a missed shot, a blit that would leave the
//! frame, or a frame with no hand are ordinary outcomes, not errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Raw pixel data does not match `width × height × channels`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Sprites carry 3 (RGB) or 4 (RGBA) interleaved channels.
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
