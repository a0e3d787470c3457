//! Art Studio Hires.

use crate::screen::HiresScreen;

/// Load address.
const LDADDR: [u8; 2] = [0x00, 0x20];

const FILE_SIZE: usize = 9009;

pub fn pack(image: &HiresScreen) -> Vec<u8> {
    let mut data = Vec::with_capacity(FILE_SIZE);
    data.extend_from_slice(&LDADDR);
    data.extend_from_slice(&image.bitmap[..]);
    data.extend_from_slice(&image.screen[..]);
    data.push(image.border);
    data.resize(data.len() + 6, 0);

    assert_eq!(data.len(), FILE_SIZE);

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::sample;

    #[test]
    fn test_packed_size() {
        let data = pack(&sample::black_hires());
        assert_eq!(data.len(), FILE_SIZE);
        assert_eq!(&data[..2], &LDADDR);
    }
}
