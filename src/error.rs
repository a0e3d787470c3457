//! Error taxonomy for snapshot parsing and screen extraction
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use thiserror::Error;

use crate::hardware::GraphicsMode;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed snapshot container. Fatal for the affected file; the
    /// caller skips to the next input.
    #[error("bad snapshot file: {0}")]
    Format(String),

    /// A named module is absent from the snapshot stream.
    #[error("{0} module not found")]
    ModuleNotFound(&'static str),

    /// The snapshot's graphics mode has no export mapping. Reported and
    /// skipped, never a crash.
    #[error("no export formats defined for {0} graphics mode")]
    UnsupportedMode(GraphicsMode),

    /// Register address outside $d000-$d02e. Caller contract violation.
    #[error("invalid VIC-II register ${0:04x}")]
    RegisterOutOfRange(u16),

    /// Sprite index outside 0-7. Caller contract violation.
    #[error("invalid sprite number {0}")]
    SpriteOutOfRange(usize),
}
