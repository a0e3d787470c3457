//! Koala Painter.

use crate::screen::MultiColorScreen;

/// Load address.
const LDADDR: [u8; 2] = [0x00, 0x60];

const FILE_SIZE: usize = 10_003;

pub fn pack(image: &MultiColorScreen) -> Vec<u8> {
    let mut data = Vec::with_capacity(FILE_SIZE);
    data.extend_from_slice(&LDADDR);
    data.extend_from_slice(&image.bitmap[..]);
    data.extend_from_slice(&image.screen[..]);
    data.extend_from_slice(&image.colors[..]);
    data.push(image.bgcolor);

    assert_eq!(data.len(), FILE_SIZE);

    data
}
