//! Vidcom 64.

use crate::screen::MultiColorScreen;

/// Load address.
const LDADDR: [u8; 2] = [0x00, 0x58];

const FILE_SIZE: usize = 10_050;

pub fn pack(image: &MultiColorScreen) -> Vec<u8> {
    let mut data = Vec::with_capacity(FILE_SIZE);
    data.extend_from_slice(&LDADDR);
    data.extend_from_slice(&image.colors[..]);
    data.resize(data.len() + 24, 0);
    data.extend_from_slice(&image.screen[..]);
    data.push(image.bgcolor);
    data.resize(data.len() + 23, 0);
    data.extend_from_slice(&image.bitmap[..]);

    assert_eq!(data.len(), FILE_SIZE);

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::sample;

    #[test]
    fn test_packed_size() {
        assert_eq!(pack(&sample::black_multi()).len(), FILE_SIZE);
    }
}
