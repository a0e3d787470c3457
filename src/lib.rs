//! VICE Snapshot Screenshot Extractor Library
//!
//! This library provides the core functionality for extracting the frozen
//! C64 screen out of VICE snapshot files (.vsf) and re-encoding it in the
//! native file formats of historical paint programs.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

pub mod error;
pub mod export;
pub mod fileio;
pub mod formats;
pub mod hardware;
pub mod parse_vsf;
pub mod screen;

pub use error::Error;
pub use parse_vsf::Snapshot;
pub use screen::ScreenRecord;
