//! Draz Paint (compressed).
//!
//! Same escape-prefixed framing as Amica Paint, but the escape byte is
//! chosen per image (least common value in the pre-RLE buffer) and stored
//! in the header after the format signature.

use crate::formats::rle;
use crate::screen::MultiColorScreen;

/// Load address.
const LDADDR: [u8; 2] = [0x00, 0x58];

const MAGIC: &[u8] = b"DRAZPAINT 2.0";

const BUF_SIZE: usize = 10_049;

const MAX_REPEAT: u16 = 255;

fn pack_buf(buf: &[u8], esc: u8) -> Vec<u8> {
    assert_eq!(buf.len(), BUF_SIZE);

    let mut result = Vec::new();
    result.extend_from_slice(&LDADDR);
    result.extend_from_slice(MAGIC);
    result.push(esc);

    for (val, count) in rle::rle_encode(buf, MAX_REPEAT) {
        if count > 1 {
            result.extend_from_slice(&[esc, count as u8, val]);
        } else if val != esc {
            result.push(val);
        } else {
            result.extend_from_slice(&[esc, 0x01, val]);
        }
    }

    result
}

/// Pack the image in Draz Paint compressed format.
///
/// `escval` pins the escape byte; without it the least common value of
/// the pre-RLE buffer is used.
pub fn pack(image: &MultiColorScreen, escval: Option<u8>) -> Vec<u8> {
    let mut data = Vec::with_capacity(BUF_SIZE);
    data.extend_from_slice(&image.colors[..]);
    data.resize(data.len() + 24, 0);
    data.extend_from_slice(&image.screen[..]);
    data.resize(data.len() + 24, 0);
    data.extend_from_slice(&image.bitmap[..]);
    data.push(image.bgcolor);

    assert_eq!(data.len(), BUF_SIZE);

    let esc = escval.unwrap_or_else(|| rle::find_escape_byte(&data));
    pack_buf(&data, esc)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::screen::sample;

    fn unpack(data: &[u8]) -> Vec<u8> {
        assert_eq!(&data[..2], &LDADDR);
        assert_eq!(&data[2..15], MAGIC);
        let esc = data[15];
        let mut out = Vec::new();
        let mut pos = 16;
        while pos < data.len() {
            let val = data[pos];
            if val == esc {
                let count = data[pos + 1] as usize;
                out.extend(std::iter::repeat(data[pos + 2]).take(count));
                pos += 3;
            } else {
                out.push(val);
                pos += 1;
            }
        }
        out
    }

    fn prepacked(image: &MultiColorScreen) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&image.colors[..]);
        data.resize(data.len() + 24, 0);
        data.extend_from_slice(&image.screen[..]);
        data.resize(data.len() + 24, 0);
        data.extend_from_slice(&image.bitmap[..]);
        data.push(image.bgcolor);
        data
    }

    #[test]
    fn test_round_trip_auto_escape() {
        let image = sample::random_multi(&mut StdRng::seed_from_u64(21));
        assert_eq!(unpack(&pack(&image, None)), prepacked(&image));
    }

    #[test]
    fn test_round_trip_pinned_escape() {
        let image = sample::random_multi(&mut StdRng::seed_from_u64(22));
        let packed = pack(&image, Some(0x11));
        assert_eq!(packed[15], 0x11);
        assert_eq!(unpack(&packed), prepacked(&image));
    }

    #[test]
    fn test_header_layout() {
        let packed = pack(&sample::black_multi(), None);
        assert_eq!(&packed[..2], &[0x00, 0x58]);
        assert_eq!(&packed[2..15], b"DRAZPAINT 2.0");
        // All zeros: the least common value with the ascending tie-break
        // is 1, stored as the escape byte.
        assert_eq!(packed[15], 0x01);
    }
}
