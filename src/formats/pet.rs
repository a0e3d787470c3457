//! PETSCII Editor.

use crate::screen::TextScreen;

/// Load address.
const LDADDR: [u8; 2] = [0x00, 0x30];

const FILE_SIZE: usize = 2026;

pub fn pack(image: &TextScreen) -> Vec<u8> {
    let mut data = Vec::with_capacity(FILE_SIZE);
    data.extend_from_slice(&LDADDR);
    data.extend_from_slice(&image.screen[..]);
    data.push(image.border);
    data.push(image.bgcolor);
    data.push(image.mem_setup);
    data.resize(data.len() + 21, 0);
    data.extend_from_slice(&image.colors[..]);

    assert_eq!(data.len(), FILE_SIZE);

    data
}
