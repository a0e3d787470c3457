//! Amica Paint.
//!
//! RLE-compressed with an escape-prefixed framing: a run is stored as
//! escape, count, value; a lone escape value is stored with count 1 so
//! the decoder never sees it bare.

use crate::formats::rle;
use crate::screen::MultiColorScreen;

/// Load address.
const LDADDR: [u8; 2] = [0x00, 0x40];

/// Escape byte used by Amica Paint itself.
const ESC: u8 = 0xc2;

const BUF_SIZE: usize = 10_001;

const MAX_REPEAT: u16 = 255;

fn pack_buf(buf: &[u8], esc: u8) -> Vec<u8> {
    assert_eq!(buf.len(), BUF_SIZE);

    let mut result = Vec::new();
    result.extend_from_slice(&LDADDR);

    for (val, count) in rle::rle_encode(buf, MAX_REPEAT) {
        if count > 1 {
            result.extend_from_slice(&[esc, count as u8, val]);
        } else if val != esc {
            result.push(val);
        } else {
            result.extend_from_slice(&[esc, 0x01, val]);
        }
    }

    // EOF marker.
    result.extend_from_slice(&[esc, 0x00]);

    result
}

/// Pack the image in Amica Paint format.
///
/// `escval` substitutes the stock $c2 escape byte throughout the stream,
/// EOF marker included.
pub fn pack(image: &MultiColorScreen, escval: Option<u8>) -> Vec<u8> {
    let mut data = Vec::with_capacity(BUF_SIZE);
    data.extend_from_slice(&image.bitmap[..]);
    data.extend_from_slice(&image.screen[..]);
    data.extend_from_slice(&image.colors[..]);
    data.push(image.bgcolor);

    assert_eq!(data.len(), BUF_SIZE);

    pack_buf(&data, escval.unwrap_or(ESC))
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::screen::sample;

    // Inverse of the escape-prefixed framing.
    fn unpack(data: &[u8], esc: u8) -> Vec<u8> {
        assert_eq!(&data[..2], &LDADDR);
        let mut out = Vec::new();
        let mut pos = 2;
        loop {
            let val = data[pos];
            if val == esc {
                let count = data[pos + 1];
                if count == 0 {
                    assert_eq!(pos + 2, data.len());
                    break;
                }
                out.extend(std::iter::repeat(data[pos + 2]).take(count as usize));
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
        data.extend_from_slice(&image.bitmap[..]);
        data.extend_from_slice(&image.screen[..]);
        data.extend_from_slice(&image.colors[..]);
        data.push(image.bgcolor);
        data
    }

    #[test]
    fn test_round_trip_default_escape() {
        let image = sample::random_multi(&mut StdRng::seed_from_u64(11));
        let packed = pack(&image, None);
        assert_eq!(unpack(&packed, ESC), prepacked(&image));
    }

    #[test]
    fn test_round_trip_pinned_escape() {
        let image = sample::random_multi(&mut StdRng::seed_from_u64(12));
        let packed = pack(&image, Some(0x03));
        assert_eq!(unpack(&packed, 0x03), prepacked(&image));
    }

    #[test]
    fn test_single_escape_value_is_framed() {
        // An all-zero image forces long zero runs; pin escape to 0x00 so
        // every run value collides with the escape.
        let image = sample::black_multi();
        let packed = pack(&image, Some(0x00));
        assert_eq!(unpack(&packed, 0x00), prepacked(&image));
    }

    #[test]
    fn test_black_image_compresses() {
        let packed = pack(&sample::black_multi(), None);
        // 10001 bytes of zeros: 39 runs of 255 plus one run of 56, three
        // bytes each, plus load address and EOF marker.
        assert_eq!(packed.len(), 2 + 40 * 3 + 2);
    }

    #[test]
    fn test_random_escape_never_bare() {
        let mut rng = StdRng::seed_from_u64(13);
        let image = sample::random_multi(&mut rng);
        let esc: u8 = rng.r#gen();
        let packed = pack(&image, Some(esc));
        assert_eq!(unpack(&packed, esc), prepacked(&image));
    }
}
