//! Zoomatic.
//!
//! RLE with reversed field order: a run is stored as value, count,
//! escape. The count byte wraps, a full run of 256 is stored as count 0.
//! The escape byte itself is not embedded per run; it is appended once at
//! the very end of the file, where Zoomatic's depacker picks it up before
//! decoding the stream back to front.

use crate::formats::rle;
use crate::screen::MultiColorScreen;

/// Load address.
const LDADDR: [u8; 2] = [0x00, 0x60];

const BUF_SIZE: usize = 10_001;

const MAX_REPEAT: u16 = 256;

fn pack_buf(buf: &[u8], esc: u8) -> Vec<u8> {
    assert_eq!(buf.len(), BUF_SIZE);

    let mut result = Vec::new();
    result.extend_from_slice(&LDADDR);

    for (val, count) in rle::rle_encode(buf, MAX_REPEAT) {
        if count > 1 {
            let count = if count == 256 { 0 } else { count as u8 };
            result.extend_from_slice(&[val, count, esc]);
        } else if val != esc {
            result.push(val);
        } else {
            result.extend_from_slice(&[val, 0x01, esc]);
        }
    }

    // Escape byte.
    result.push(esc);

    result
}

/// Pack the image in Zoomatic format.
///
/// `escval` pins the escape byte; without it the least common value of
/// the pre-RLE buffer is used.
pub fn pack(image: &MultiColorScreen, escval: Option<u8>) -> Vec<u8> {
    let last_byte = (image.border << 4) | image.bgcolor;

    let mut data = Vec::with_capacity(BUF_SIZE);
    data.extend_from_slice(&image.bitmap[..]);
    data.extend_from_slice(&image.screen[..]);
    data.extend_from_slice(&image.colors[..]);
    data.push(last_byte);

    assert_eq!(data.len(), BUF_SIZE);

    let esc = escval.unwrap_or_else(|| rle::find_escape_byte(&data));
    pack_buf(&data, esc)
}
