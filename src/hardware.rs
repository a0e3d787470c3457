//! C64 hardware state resolver
//!
//! Interprets the C64MEM, CIA2 and VIC-II module payloads: a flat 64KB
//! memory image, the video bank select register and the VIC-II register
//! file, from which graphics mode, memory addresses and sprite state are
//! derived.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use std::fmt;

use log::info;

use crate::error::Error;
use crate::parse_vsf::{Module, Snapshot};

pub const C64MEM_TAG: &str = "C64MEM";
pub const CIA2_TAG: &str = "CIA2";
pub const VIC2_TAG: &str = "VIC-II";

/// Size of the bitmap window in bitmap modes.
pub const BITMAP_SIZE: usize = 8000;
/// Size of the screen matrix (40x25 cells).
pub const SCREEN_SIZE: usize = 1000;
/// Size of the color RAM window.
pub const COLOR_RAM_SIZE: usize = 1000;

/// C64 color names, indexed by the 4-bit color value.
pub const COLOR_NAME: [&str; 16] = [
    "black", "white", "red", "cyan",
    "purple", "green", "blue", "yellow",
    "orange", "brown", "pink", "dark grey",
    "grey", "light green", "light blue", "light grey",
];

/// VIC-II register addresses.
///
/// Registers are addressed absolutely ($d000-$d02e) and mapped to offsets
/// into the register window of the VIC-II module payload.
pub mod reg {
    /// Sprite 0 X position; sprite n uses $d000 + 2n / $d001 + 2n.
    pub const SPRITE0_X: u16 = 0xd000;
    /// Sprite X position bit 8, one bit per sprite.
    pub const SPRITE_X_MSB: u16 = 0xd010;
    /// Control register 1 (ECM bit 6, BMM bit 5).
    pub const CONTROL_1: u16 = 0xd011;
    /// Sprite enable, one bit per sprite.
    pub const SPRITE_ENABLE: u16 = 0xd015;
    /// Control register 2 (MCM bit 4).
    pub const CONTROL_2: u16 = 0xd016;
    /// Sprite Y expand, one bit per sprite.
    pub const SPRITE_EXPAND_Y: u16 = 0xd017;
    /// Memory setup register.
    pub const MEMORY_SETUP: u16 = 0xd018;
    /// Border color.
    pub const BORDER_COLOR: u16 = 0xd020;
    /// Background color.
    pub const BACKGROUND_COLOR: u16 = 0xd021;
    /// Sprite multicolor, one bit per sprite.
    pub const SPRITE_MULTICOLOR: u16 = 0xd01c;
    /// Sprite X expand, one bit per sprite.
    pub const SPRITE_EXPAND_X: u16 = 0xd01d;
    /// Shared sprite multicolor %01.
    pub const SPRITE_MULTICOLOR_0: u16 = 0xd025;
    /// Shared sprite multicolor %11.
    pub const SPRITE_MULTICOLOR_1: u16 = 0xd026;
    /// Sprite 0 color; sprite n uses $d027 + n.
    pub const SPRITE0_COLOR: u16 = 0xd027;
}

const REG_BASE: u16 = 0xd000;
const REG_LAST: u16 = 0xd02e;

/// Offset of the register window within the VIC-II module payload.
const VIC_REG_OFFSET: usize = 1119;
const VIC_REG_COUNT: usize = (REG_LAST - REG_BASE) as usize + 1;

/// Color RAM window within the VIC-II module payload. Color RAM is a
/// separate 4-bit chip wired outside the banked address space, so this
/// window is absolute and never bank-relative.
const COLOR_RAM_OFFSET: usize = 43;

/// Offset of the 64KB RAM image within the C64MEM module payload.
const RAM_OFFSET: usize = 4;

/* ======================= Memory image ======================= */

/// Flat 64KB memory image from the C64MEM module.
pub struct C64Mem {
    ram: Box<[u8; 65536]>,
}

impl C64Mem {
    pub fn new(module: &Module) -> Result<Self, Error> {
        let end = RAM_OFFSET + 65536;
        if module.payload.len() < end {
            return Err(Error::Format("C64MEM module too small".into()));
        }
        let mut ram = Box::new([0u8; 65536]);
        ram.copy_from_slice(&module.payload[RAM_OFFSET..end]);
        Ok(Self { ram })
    }

    /// Slice of RAM starting at `addr`.
    pub fn ram(&self, addr: u16, size: usize) -> &[u8] {
        &self.ram[addr as usize..addr as usize + size]
    }
}

/* ======================= CIA2 ======================= */

/// CIA2 state; only port A ($dd00) matters for the screen, its low two
/// bits select the 16KB bank visible to the VIC-II.
pub struct Cia2 {
    dd00: u8,
}

impl Cia2 {
    pub fn new(module: &Module) -> Result<Self, Error> {
        let dd00 = *module
            .payload
            .first()
            .ok_or_else(|| Error::Format("CIA2 module too small".into()))?;
        Ok(Self { dd00 })
    }

    pub fn dd00(&self) -> u8 {
        self.dd00
    }

    /// Base address of the 16KB window visible to the VIC-II
    /// (0x0000, 0x4000, 0x8000 or 0xc000).
    pub fn bank_base(&self) -> u16 {
        0xc000 - 0x4000 * (self.dd00 as u16 & 0b11)
    }
}

/* ======================= Graphics mode ======================= */

/// VIC-II graphics mode, decoded from the ECM/BMM/MCM control bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsMode {
    StandardCharacter = 0,
    MulticolorCharacter = 1,
    HiresBitmap = 2,
    MulticolorBitmap = 3,
    ExtendedBackgroundColor = 4,
    Reserved5 = 5,
    Reserved6 = 6,
    Reserved7 = 7,
}

impl GraphicsMode {
    /// Map a 3-bit ecm|bmm|mcm code to a mode. Reserved codes are valid
    /// members, not errors.
    pub fn from_code(code: u8) -> Self {
        match code & 0b111 {
            0 => Self::StandardCharacter,
            1 => Self::MulticolorCharacter,
            2 => Self::HiresBitmap,
            3 => Self::MulticolorBitmap,
            4 => Self::ExtendedBackgroundColor,
            5 => Self::Reserved5,
            6 => Self::Reserved6,
            _ => Self::Reserved7,
        }
    }

    pub fn is_standard_character(self) -> bool {
        self == Self::StandardCharacter
    }

    pub fn is_hires_bitmap(self) -> bool {
        self == Self::HiresBitmap
    }

    pub fn is_multicolor_bitmap(self) -> bool {
        self == Self::MulticolorBitmap
    }

    pub fn is_bitmap(self) -> bool {
        self.is_hires_bitmap() || self.is_multicolor_bitmap()
    }
}

impl fmt::Display for GraphicsMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::StandardCharacter => write!(f, "standard character"),
            Self::MulticolorCharacter => write!(f, "multicolor character"),
            Self::HiresBitmap => write!(f, "hires bitmap"),
            Self::MulticolorBitmap => write!(f, "multicolor bitmap"),
            Self::ExtendedBackgroundColor => write!(f, "extended background color character"),
            other => write!(f, "(reserved: {})", *other as u8),
        }
    }
}

/* ======================= Sprites ======================= */

/// Snapshot of one hardware sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub num: usize,
    pub enabled: bool,
    /// 9-bit X position (bit 8 comes from $d010).
    pub pos_x: u16,
    pub pos_y: u8,
    pub multicolor: bool,
    pub color01: u8,
    pub color10: u8,
    pub color11: u8,
    pub expand_x: bool,
    pub expand_y: bool,
}

impl Sprite {
    /// Foreground color of a hires sprite.
    pub fn fg_color(&self) -> u8 {
        self.color10
    }
}

/* ======================= VIC-II ======================= */

/// VIC-II state: the register file and the color RAM window.
pub struct Vic2 {
    registers: [u8; VIC_REG_COUNT],
    color_ram: Box<[u8; COLOR_RAM_SIZE]>,
}

impl Vic2 {
    pub fn new(module: &Module) -> Result<Self, Error> {
        if module.payload.len() < VIC_REG_OFFSET + VIC_REG_COUNT {
            return Err(Error::Format("VIC-II module too small".into()));
        }

        let mut registers = [0u8; VIC_REG_COUNT];
        registers.copy_from_slice(&module.payload[VIC_REG_OFFSET..VIC_REG_OFFSET + VIC_REG_COUNT]);

        let mut color_ram = Box::new([0u8; COLOR_RAM_SIZE]);
        color_ram.copy_from_slice(&module.payload[COLOR_RAM_OFFSET..COLOR_RAM_OFFSET + COLOR_RAM_SIZE]);

        Ok(Self { registers, color_ram })
    }

    /// Register value by absolute address; out of range is a usage error.
    pub fn get_register(&self, addr: u16) -> Result<u8, Error> {
        if !(REG_BASE..=REG_LAST).contains(&addr) {
            return Err(Error::RegisterOutOfRange(addr));
        }
        Ok(self.registers[(addr - REG_BASE) as usize])
    }

    // Internal read for addresses known to be in range.
    fn reg(&self, addr: u16) -> u8 {
        self.registers[(addr - REG_BASE) as usize]
    }

    pub fn control1(&self) -> u8 {
        self.reg(reg::CONTROL_1)
    }

    pub fn control2(&self) -> u8 {
        self.reg(reg::CONTROL_2)
    }

    pub fn memory_setup(&self) -> u8 {
        self.reg(reg::MEMORY_SETUP)
    }

    pub fn border_color(&self) -> u8 {
        self.reg(reg::BORDER_COLOR) & 0x0f
    }

    pub fn background_color(&self) -> u8 {
        self.reg(reg::BACKGROUND_COLOR) & 0x0f
    }

    /// Color RAM, read from its fixed window in the module payload.
    pub fn color_ram(&self) -> &[u8; COLOR_RAM_SIZE] {
        &self.color_ram
    }

    /// Decode the graphics mode from the ECM, BMM and MCM control bits.
    pub fn graphics_mode(&self) -> GraphicsMode {
        let ecm = (self.control1() & 0b0100_0000) >> 4;
        let bmm = (self.control1() & 0b0010_0000) >> 4;
        let mcm = (self.control2() & 0b0001_0000) >> 4;
        GraphicsMode::from_code(ecm | bmm | mcm)
    }

    /// Bitmap base address (bitmap modes).
    pub fn bitmap_address(&self, bank: u16) -> u16 {
        bank + 8192 * ((self.memory_setup() as u16 >> 3) & 1)
    }

    /// Screen matrix base address; the formula holds for every mode.
    pub fn screen_address(&self, bank: u16) -> u16 {
        bank + 1024 * (self.memory_setup() as u16 >> 4)
    }

    /// Character generator base address (character modes).
    pub fn font_address(&self, bank: u16) -> u16 {
        bank + 2048 * ((self.memory_setup() as u16 >> 1) & 0b111)
    }

    /// True when the character generator is served by the ROM images the
    /// VIC-II sees at $1000/$1800 in banks 0 and 2.
    pub fn rom_font(&self, bank: u16) -> bool {
        matches!(self.font_address(bank), 0x1000 | 0x1800 | 0x9000 | 0x9800)
    }

    pub fn sprite(&self, num: usize) -> Result<Sprite, Error> {
        if num > 7 {
            return Err(Error::SpriteOutOfRange(num));
        }
        let bit = 1u8 << num;
        let high_x = if self.reg(reg::SPRITE_X_MSB) & bit != 0 { 0x100 } else { 0 };
        Ok(Sprite {
            num,
            enabled: self.reg(reg::SPRITE_ENABLE) & bit != 0,
            pos_x: high_x | self.reg(reg::SPRITE0_X + 2 * num as u16) as u16,
            pos_y: self.reg(reg::SPRITE0_X + 2 * num as u16 + 1),
            multicolor: self.reg(reg::SPRITE_MULTICOLOR) & bit != 0,
            color01: self.reg(reg::SPRITE_MULTICOLOR_0),
            color10: self.reg(reg::SPRITE0_COLOR + num as u16) & 0x0f,
            color11: self.reg(reg::SPRITE_MULTICOLOR_1),
            expand_x: self.reg(reg::SPRITE_EXPAND_X) & bit != 0,
            expand_y: self.reg(reg::SPRITE_EXPAND_Y) & bit != 0,
        })
    }

    /// All eight sprites.
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        (0..8).filter_map(move |num| self.sprite(num).ok())
    }

    pub fn has_active_sprites(&self) -> bool {
        self.reg(reg::SPRITE_ENABLE) != 0
    }
}

/* ======================= Resolved state ======================= */

/// Resolved video hardware state of a C64 snapshot.
pub struct VideoState {
    pub mem: C64Mem,
    pub cia2: Cia2,
    pub vic2: Vic2,
}

impl VideoState {
    pub fn from_snapshot(snap: &Snapshot) -> Result<Self, Error> {
        let mem = C64Mem::new(
            snap.find_module(C64MEM_TAG)
                .ok_or(Error::ModuleNotFound(C64MEM_TAG))?,
        )?;
        let cia2 = Cia2::new(
            snap.find_module(CIA2_TAG)
                .ok_or(Error::ModuleNotFound(CIA2_TAG))?,
        )?;
        let vic2 = Vic2::new(
            snap.find_module(VIC2_TAG)
                .ok_or(Error::ModuleNotFound(VIC2_TAG))?,
        )?;
        Ok(Self { mem, cia2, vic2 })
    }

    /// Bitmap RAM window for the current bank and memory setup.
    pub fn bitmap_ram(&self) -> &[u8] {
        let addr = self.vic2.bitmap_address(self.cia2.bank_base());
        self.mem.ram(addr, BITMAP_SIZE)
    }

    /// Screen matrix window for the current bank and memory setup.
    pub fn screen_ram(&self) -> &[u8] {
        let addr = self.vic2.screen_address(self.cia2.bank_base());
        self.mem.ram(addr, SCREEN_SIZE)
    }

    /// Color RAM; always the fixed window, never bank-relative.
    pub fn color_ram(&self) -> &[u8] {
        &self.vic2.color_ram()[..]
    }

    /// Log the resolved register, sprite and graphics state.
    pub fn log_info(&self) {
        let vic = &self.vic2;
        let reginfo = |name: &str, value: u8, desc: &str| {
            info!("   ${} = ${:02x} (%{:08b})  {}", name, value, value, desc);
        };

        info!("VIC-II registers:");
        reginfo("d011", vic.control1(), "Screen Control Register 1");
        reginfo("d015", vic.reg(reg::SPRITE_ENABLE), "Sprite Enable");
        reginfo("d016", vic.control2(), "Screen Control Register 2");
        reginfo("d017", vic.reg(reg::SPRITE_EXPAND_Y), "Sprite Double Height");
        reginfo("d018", vic.memory_setup(), "Memory Setup Register");
        reginfo("d01c", vic.reg(reg::SPRITE_MULTICOLOR), "Sprite Color Mode");
        reginfo("d01d", vic.reg(reg::SPRITE_EXPAND_X), "Sprite Double Width");
        reginfo(
            "d020",
            vic.border_color(),
            &format!("Border Color -- {}", COLOR_NAME[vic.border_color() as usize]),
        );
        reginfo(
            "d021",
            vic.background_color(),
            &format!("Background Color -- {}", COLOR_NAME[vic.background_color() as usize]),
        );

        info!("Sprites:");
        for sprite in vic.sprites() {
            let status = if sprite.enabled { "on" } else { "off" };
            let multi = if sprite.multicolor { "yes" } else { "no" };
            let colors = if sprite.multicolor {
                format!(
                    "%01={:2} %10={:2} %11={:2}",
                    sprite.color01, sprite.color10, sprite.color11
                )
            } else {
                format!("fg={}", sprite.fg_color())
            };
            info!(
                "   sprite {} : {:3}  ({:>3},{:>3})  multi={:3}  {}",
                sprite.num, status, sprite.pos_x, sprite.pos_y, multi, colors
            );
        }

        let mode = vic.graphics_mode();
        let bank = self.cia2.bank_base();
        info!("Graphics:");
        info!("   mode . . . . . . : {}", mode);
        info!("   VIC bank address : ${:04x}", bank);
        if mode.is_bitmap() {
            info!("   bitmap address . : ${:04x}", vic.bitmap_address(bank));
            info!("   screen address . : ${:04x}", vic.screen_address(bank));
        } else {
            info!("   font address . . : ${:04x}", vic.font_address(bank));
            info!("   screen address . : ${:04x}", vic.screen_address(bank));
            info!("   ROM font . . . . : {}", vic.rom_font(bank));
        }
    }
}
