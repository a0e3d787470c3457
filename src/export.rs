//! Export fan-out
//!
//! Runs every packer defined for a screen kind over one immutable record
//! and labels each output buffer with the format's file extension. Which
//! buffers get written, and where, is the caller's business.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use crate::formats::{a64, aas, ami, art, che, doo, drp, drz, gas, hpc, koa, pdr, pet, vid, zom};
use crate::screen::{HiresScreen, MultiColorScreen, ScreenRecord, TextScreen};

/// Pack the image in every hires format, smallest output first.
pub fn hires_images(image: &HiresScreen) -> Vec<(&'static str, Vec<u8>)> {
    let mut images = vec![
        ("aas", aas::pack(image)),
        ("doo", doo::pack(image)),
        ("hpc", hpc::pack(image)),
    ];
    images.sort_by_key(|(_, data)| data.len());
    images
}

/// Pack the image in every multicolor format, smallest output first.
pub fn multicolor_images(image: &MultiColorScreen) -> Vec<(&'static str, Vec<u8>)> {
    let mut images = vec![
        ("a64", a64::pack(image)),
        ("ami", ami::pack(image, None)),
        ("art", art::pack(image)),
        ("che", che::pack(image)),
        ("drp", drp::pack(image, None)),
        ("drz", drz::pack(image)),
        ("gas", gas::pack(image)),
        ("koa", koa::pack(image)),
        ("vid", vid::pack(image)),
        ("zom", zom::pack(image, None)),
    ];
    images.sort_by_key(|(_, data)| data.len());
    images
}

/// Pack the image in every text mode format, smallest output first.
pub fn text_images(image: &TextScreen) -> Vec<(&'static str, Vec<u8>)> {
    let mut images = vec![("pdr", pdr::pack(image)), ("pet", pet::pack(image))];
    images.sort_by_key(|(_, data)| data.len());
    images
}

/// Pack a screen record in every format defined for its kind.
pub fn images(record: &ScreenRecord) -> Vec<(&'static str, Vec<u8>)> {
    match record {
        ScreenRecord::Hires(image) => hires_images(image),
        ScreenRecord::MultiColor(image) => multicolor_images(image),
        ScreenRecord::Text(image) => text_images(image),
    }
}
