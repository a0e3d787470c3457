//! Canonical screen records and the screen extractor
//!
//! A screen record is an immutable copy of the RAM windows the VIC-II was
//! displaying when the snapshot was taken. One of three shapes is built
//! depending on the graphics mode; the format packers consume these and
//! nothing else.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use crate::error::Error;
use crate::hardware::{BITMAP_SIZE, COLOR_RAM_SIZE, GraphicsMode, SCREEN_SIZE, VideoState};

fn box_array<const N: usize>(data: &[u8]) -> Box<[u8; N]> {
    assert_eq!(data.len(), N);
    let mut array = Box::new([0u8; N]);
    array.copy_from_slice(data);
    array
}

/* ======================= Records ======================= */

/// Hires bitmap screen.
pub struct HiresScreen {
    pub bitmap: Box<[u8; BITMAP_SIZE]>,
    pub screen: Box<[u8; SCREEN_SIZE]>,
    pub border: u8,
}

impl HiresScreen {
    pub fn new(bitmap: &[u8], screen: &[u8], border: u8) -> Self {
        assert!(border < 16);
        Self {
            bitmap: box_array(bitmap),
            screen: box_array(screen),
            border,
        }
    }
}

/// Multicolor bitmap screen.
pub struct MultiColorScreen {
    pub bitmap: Box<[u8; BITMAP_SIZE]>,
    pub screen: Box<[u8; SCREEN_SIZE]>,
    pub colors: Box<[u8; COLOR_RAM_SIZE]>,
    pub bgcolor: u8,
    pub border: u8,
}

impl MultiColorScreen {
    pub fn new(bitmap: &[u8], screen: &[u8], colors: &[u8], bgcolor: u8, border: u8) -> Self {
        assert!(bgcolor < 16);
        assert!(border < 16);
        Self {
            bitmap: box_array(bitmap),
            screen: box_array(screen),
            colors: box_array(colors),
            bgcolor,
            border,
        }
    }
}

/// Standard character screen.
pub struct TextScreen {
    pub screen: Box<[u8; SCREEN_SIZE]>,
    pub colors: Box<[u8; COLOR_RAM_SIZE]>,
    pub bgcolor: u8,
    pub border: u8,
    /// VIC-II memory setup register, carried along for formats that
    /// store the character set location.
    pub mem_setup: u8,
}

impl TextScreen {
    pub fn new(screen: &[u8], colors: &[u8], bgcolor: u8, border: u8, mem_setup: u8) -> Self {
        assert!(bgcolor < 16);
        assert!(border < 16);
        Self {
            screen: box_array(screen),
            colors: box_array(colors),
            bgcolor,
            border,
            mem_setup,
        }
    }
}

/// One extracted screen, shaped by the graphics mode it was captured in.
pub enum ScreenRecord {
    Hires(HiresScreen),
    MultiColor(MultiColorScreen),
    Text(TextScreen),
}

/* ======================= Extractor ======================= */

/// Slice the visible screen out of the resolved hardware state.
///
/// Modes without an export mapping (multicolor character, extended
/// background color, the reserved codes) yield `UnsupportedMode`.
pub fn extract(state: &VideoState) -> Result<ScreenRecord, Error> {
    let vic = &state.vic2;
    match vic.graphics_mode() {
        GraphicsMode::HiresBitmap => Ok(ScreenRecord::Hires(HiresScreen::new(
            state.bitmap_ram(),
            state.screen_ram(),
            vic.border_color(),
        ))),
        GraphicsMode::MulticolorBitmap => Ok(ScreenRecord::MultiColor(MultiColorScreen::new(
            state.bitmap_ram(),
            state.screen_ram(),
            state.color_ram(),
            vic.background_color(),
            vic.border_color(),
        ))),
        GraphicsMode::StandardCharacter => Ok(ScreenRecord::Text(TextScreen::new(
            state.screen_ram(),
            state.color_ram(),
            vic.background_color(),
            vic.border_color(),
            vic.memory_setup(),
        ))),
        mode => Err(Error::UnsupportedMode(mode)),
    }
}

/* ======================= Preset screens ======================= */

/// Preset screens for tests and demos. The random variants take the
/// randomness source as a parameter so callers control determinism.
pub mod sample {
    use rand::Rng;

    use super::*;

    pub fn black_hires() -> HiresScreen {
        HiresScreen::new(&[0x00; BITMAP_SIZE], &[0x00; SCREEN_SIZE], 0x00)
    }

    pub fn white_hires() -> HiresScreen {
        HiresScreen::new(&[0x11; BITMAP_SIZE], &[0x11; SCREEN_SIZE], 0x01)
    }

    pub fn random_hires(rng: &mut impl Rng) -> HiresScreen {
        let mut bitmap = [0u8; BITMAP_SIZE];
        let mut screen = [0u8; SCREEN_SIZE];
        rng.fill_bytes(&mut bitmap);
        rng.fill_bytes(&mut screen);
        HiresScreen::new(&bitmap, &screen, rng.gen_range(0..15))
    }

    pub fn black_multi() -> MultiColorScreen {
        MultiColorScreen::new(
            &[0x00; BITMAP_SIZE],
            &[0x00; SCREEN_SIZE],
            &[0x00; COLOR_RAM_SIZE],
            0x00,
            0x00,
        )
    }

    pub fn white_multi() -> MultiColorScreen {
        MultiColorScreen::new(
            &[0x11; BITMAP_SIZE],
            &[0x11; SCREEN_SIZE],
            &[0x11; COLOR_RAM_SIZE],
            0x01,
            0x01,
        )
    }

    pub fn random_multi(rng: &mut impl Rng) -> MultiColorScreen {
        let mut bitmap = [0u8; BITMAP_SIZE];
        let mut screen = [0u8; SCREEN_SIZE];
        let mut colors = [0u8; COLOR_RAM_SIZE];
        rng.fill_bytes(&mut bitmap);
        rng.fill_bytes(&mut screen);
        rng.fill_bytes(&mut colors);
        MultiColorScreen::new(&bitmap, &screen, &colors, rng.gen_range(0..15), rng.gen_range(0..15))
    }

    pub fn black_text() -> TextScreen {
        TextScreen::new(&[0x00; SCREEN_SIZE], &[0x00; COLOR_RAM_SIZE], 0x00, 0x00, 0x00)
    }

    pub fn white_text() -> TextScreen {
        TextScreen::new(&[0x11; SCREEN_SIZE], &[0x11; COLOR_RAM_SIZE], 0x01, 0x01, 0x00)
    }

    pub fn random_text(rng: &mut impl Rng) -> TextScreen {
        let mut screen = [0u8; SCREEN_SIZE];
        let mut colors = [0u8; COLOR_RAM_SIZE];
        rng.fill_bytes(&mut screen);
        rng.fill_bytes(&mut colors);
        TextScreen::new(&screen, &colors, rng.gen_range(0..15), rng.gen_range(0..15), 0x00)
    }
}
