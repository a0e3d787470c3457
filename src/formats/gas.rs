//! Graphic Assault System.
//!
//! Count-prefixed RLE with no escape marker: every run, singletons
//! included, is stored as count, value. The stream ends with a two-byte
//! EOF sentinel followed by the program's fixed signature text.

use crate::formats::rle;
use crate::screen::MultiColorScreen;

/// Load address.
const LDADDR: [u8; 2] = [0x00, 0x60];

const MAGIC: u8 = 0xa0;

const BUF_SIZE: usize = 10_001;

const MAX_REPEAT: u16 = 255;

const FOOTER: &[u8] = b"gas UTILITY COMPRESSED GRAPHIC- bRUCE bOWDEN hEURISTICS 1987,1988";

fn pack_buf(buf: &[u8]) -> Vec<u8> {
    assert_eq!(buf.len(), BUF_SIZE);

    let mut result = Vec::new();
    result.extend_from_slice(&LDADDR);
    result.push(MAGIC);

    for (val, count) in rle::rle_encode(buf, MAX_REPEAT) {
        result.extend_from_slice(&[count as u8, val]);
    }

    // EOF marker.
    result.extend_from_slice(&[0x00, 0x00]);

    result.extend_from_slice(FOOTER);

    result
}

/// Pack the image in Graphic Assault System format.
pub fn pack(image: &MultiColorScreen) -> Vec<u8> {
    let mut data = Vec::with_capacity(BUF_SIZE);
    data.extend_from_slice(&image.bitmap[..]);
    data.extend_from_slice(&image.screen[..]);
    data.extend_from_slice(&image.colors[..]);
    data.push(image.bgcolor);

    assert_eq!(data.len(), BUF_SIZE);

    pack_buf(&data)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::screen::sample;

    fn unpack(data: &[u8]) -> Vec<u8> {
        assert_eq!(&data[..2], &LDADDR);
        assert_eq!(data[2], MAGIC);
        let mut out = Vec::new();
        let mut pos = 3;
        loop {
            let count = data[pos] as usize;
            let val = data[pos + 1];
            if count == 0 && val == 0 {
                break;
            }
            out.extend(std::iter::repeat(val).take(count));
            pos += 2;
        }
        out
    }

    #[test]
    fn test_round_trip() {
        let image = sample::random_multi(&mut StdRng::seed_from_u64(31));
        let mut data = Vec::new();
        data.extend_from_slice(&image.bitmap[..]);
        data.extend_from_slice(&image.screen[..]);
        data.extend_from_slice(&image.colors[..]);
        data.push(image.bgcolor);

        assert_eq!(unpack(&pack(&image)), data);
    }

    #[test]
    fn test_trailer_signature() {
        let packed = pack(&sample::black_multi());
        assert!(packed.ends_with(FOOTER));
        // EOF sentinel right before the trailer.
        let eof = packed.len() - FOOTER.len() - 2;
        assert_eq!(&packed[eof..eof + 2], &[0x00, 0x00]);
    }

    #[test]
    fn test_singleton_runs_are_count_prefixed() {
        let packed = pack(&sample::black_multi());
        // All-zero buffer: 39 runs of 255 and one of 56, two bytes each.
        assert_eq!(packed.len(), 3 + 40 * 2 + 2 + FOOTER.len());
        assert_eq!(&packed[3..5], &[255, 0x00]);
    }
}
