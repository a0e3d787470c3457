//! Native paint-program file formats
//!
//! One module per output format, named by the format's conventional
//! 3-letter file extension. Every packer is a pure function from a screen
//! record to the finished file image; the compressed formats share the
//! run-length engine in `rle`.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

pub mod rle;

// Hires bitmap formats.
pub mod aas;
pub mod doo;
pub mod hpc;

// Multicolor bitmap formats.
pub mod a64;
pub mod ami;
pub mod art;
pub mod che;
pub mod drp;
pub mod drz;
pub mod gas;
pub mod koa;
pub mod vid;
pub mod zom;

// Text mode formats.
pub mod pdr;
pub mod pet;
