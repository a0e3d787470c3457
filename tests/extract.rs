//! End-to-end extraction tests over synthetic snapshot containers.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use xsnap::error::Error;
use xsnap::export;
use xsnap::hardware::VideoState;
use xsnap::parse_vsf::Snapshot;
use xsnap::screen::{self, ScreenRecord};

const VIC_REG_OFFSET: usize = 1119;
const COLOR_RAM_OFFSET: usize = 43;

struct Builder {
    raw: Vec<u8>,
}

impl Builder {
    fn new() -> Self {
        let mut raw = Vec::new();
        raw.extend_from_slice(b"VICE Snapshot File\x1a");
        raw.push(2);
        raw.push(0);
        let mut machine = [0u8; 16];
        machine[..3].copy_from_slice(b"C64");
        raw.extend_from_slice(&machine);
        raw.extend_from_slice(b"VICE Version\x1a");
        raw.extend_from_slice(&[3, 8, 0, 0]);
        raw.extend_from_slice(&45000u32.to_le_bytes());
        Self { raw }
    }

    fn module(mut self, tag: &str, payload: &[u8]) -> Self {
        let mut magic = [0u8; 16];
        magic[..tag.len()].copy_from_slice(tag.as_bytes());
        self.raw.extend_from_slice(&magic);
        self.raw.push(1);
        self.raw.push(0);
        self.raw
            .extend_from_slice(&(22 + payload.len() as u32).to_le_bytes());
        self.raw.extend_from_slice(payload);
        self
    }

    fn build(self) -> Vec<u8> {
        self.raw
    }
}

fn mem_payload(ram: &[u8; 65536]) -> Vec<u8> {
    let mut payload = vec![0u8; 4];
    payload.extend_from_slice(ram);
    payload
}

fn vic_payload(edit: impl FnOnce(&mut [u8])) -> Vec<u8> {
    let mut payload = vec![0u8; VIC_REG_OFFSET + 47];
    edit(&mut payload);
    payload
}

#[test]
fn test_all_zero_hires_snapshot() {
    // Bank register 0 (bank base $c000), memory setup 0 (bitmap and
    // screen at the bank base), BMM set: hires bitmap mode over an
    // all-zero RAM image.
    let raw = Builder::new()
        .module("C64MEM", &mem_payload(&[0u8; 65536]))
        .module("CIA2", &[0x00, 0x00])
        .module(
            "VIC-II",
            &vic_payload(|payload| {
                payload[VIC_REG_OFFSET + 0x11] = 0b0010_0000; // BMM
            }),
        )
        .build();

    let snap = Snapshot::parse(&raw).unwrap();
    assert!(snap.is_c64());
    assert_eq!(snap.vice_revision, 45000);

    let state = VideoState::from_snapshot(&snap).unwrap();
    assert_eq!(state.cia2.bank_base(), 0xc000);
    assert!(state.vic2.graphics_mode().is_hires_bitmap());
    assert!(!state.vic2.has_active_sprites());

    let record = screen::extract(&state).unwrap();
    let ScreenRecord::Hires(image) = &record else {
        panic!("expected a hires record");
    };
    assert!(image.bitmap.iter().all(|&b| b == 0));
    assert!(image.screen.iter().all(|&b| b == 0));
    assert_eq!(image.border, 0);

    let images = export::images(&record);
    let size = |ext: &str| {
        images
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, data)| data.len())
            .unwrap()
    };
    assert_eq!(size("aas"), 9009);
    assert_eq!(size("doo"), 9218);
    assert_eq!(size("hpc"), 9003);
}

#[test]
fn test_multicolor_snapshot_with_patterned_windows() {
    let mut ram = [0u8; 65536];
    // Bank 0 ($0000), bitmap at $2000, screen at $0400.
    for offset in 0..8000 {
        ram[0x2000 + offset] = (offset % 251) as u8;
    }
    for offset in 0..1000 {
        ram[0x0400 + offset] = (offset % 7) as u8;
    }

    let raw = Builder::new()
        .module("C64MEM", &mem_payload(&ram))
        .module("CIA2", &[0x03]) // bank 0
        .module(
            "VIC-II",
            &vic_payload(|payload| {
                payload[VIC_REG_OFFSET + 0x11] = 0b0010_0000; // BMM
                payload[VIC_REG_OFFSET + 0x16] = 0b0001_0000; // MCM
                payload[VIC_REG_OFFSET + 0x18] = 0b0001_1000; // screen 1, bitmap 1
                payload[VIC_REG_OFFSET + 0x20] = 0xf5; // border, masked to 5
                payload[VIC_REG_OFFSET + 0x21] = 0xf6; // background, masked to 6
                for offset in 0..1000 {
                    payload[COLOR_RAM_OFFSET + offset] = (offset % 3) as u8;
                }
            }),
        )
        .build();

    let snap = Snapshot::parse(&raw).unwrap();
    let state = VideoState::from_snapshot(&snap).unwrap();
    assert_eq!(state.cia2.bank_base(), 0x0000);
    assert!(state.vic2.graphics_mode().is_multicolor_bitmap());
    assert_eq!(state.vic2.bitmap_address(0x0000), 0x2000);
    assert_eq!(state.vic2.screen_address(0x0000), 0x0400);

    let record = screen::extract(&state).unwrap();
    let ScreenRecord::MultiColor(image) = &record else {
        panic!("expected a multicolor record");
    };
    assert_eq!(image.bitmap[100], 100 % 251);
    assert_eq!(image.screen[10], 3);
    assert_eq!(image.colors[4], 1);
    assert_eq!(image.bgcolor, 6);
    assert_eq!(image.border, 5);

    // Koala Painter output embeds the fields in order after the load
    // address.
    let images = export::images(&record);
    let koa = &images.iter().find(|(ext, _)| *ext == "koa").unwrap().1;
    assert_eq!(koa.len(), 10_003);
    assert_eq!(&koa[..2], &[0x00, 0x60]);
    assert_eq!(koa[2], image.bitmap[0]);
    assert_eq!(koa[2 + 8000], image.screen[0]);
    assert_eq!(koa[2 + 8000 + 1000], image.colors[0]);
    assert_eq!(koa[10_002], image.bgcolor);
    assert_eq!(images.len(), 10);
}

#[test]
fn test_text_mode_snapshot() {
    let mut ram = [0u8; 65536];
    // Bank 0, screen at slot 1 ($0400), the power-on text screen layout.
    for offset in 0..1000 {
        ram[0x0400 + offset] = 0x20; // space
    }

    let raw = Builder::new()
        .module("C64MEM", &mem_payload(&ram))
        .module("CIA2", &[0x03])
        .module(
            "VIC-II",
            &vic_payload(|payload| {
                payload[VIC_REG_OFFSET + 0x18] = 0b0001_0100; // screen 1, font 2
            }),
        )
        .build();

    let state = VideoState::from_snapshot(&Snapshot::parse(&raw).unwrap()).unwrap();
    assert!(state.vic2.graphics_mode().is_standard_character());
    assert_eq!(state.vic2.font_address(0x0000), 0x1000);
    assert!(state.vic2.rom_font(0x0000));

    let record = screen::extract(&state).unwrap();
    let ScreenRecord::Text(image) = &record else {
        panic!("expected a text record");
    };
    assert!(image.screen.iter().all(|&b| b == 0x20));
    assert_eq!(image.mem_setup, 0b0001_0100);

    let images = export::images(&record);
    assert_eq!(images.len(), 2);
}

#[test]
fn test_unsupported_mode_is_reported_not_fatal() {
    let raw = Builder::new()
        .module("C64MEM", &mem_payload(&[0u8; 65536]))
        .module("CIA2", &[0x00])
        .module(
            "VIC-II",
            &vic_payload(|payload| {
                payload[VIC_REG_OFFSET + 0x11] = 0b0100_0000; // ECM only
            }),
        )
        .build();

    let state = VideoState::from_snapshot(&Snapshot::parse(&raw).unwrap()).unwrap();
    assert!(matches!(
        screen::extract(&state),
        Err(Error::UnsupportedMode(_))
    ));
}

#[test]
fn test_missing_module_is_reported() {
    let raw = Builder::new()
        .module("C64MEM", &mem_payload(&[0u8; 65536]))
        .module("CIA2", &[0x00])
        .build();

    let snap = Snapshot::parse(&raw).unwrap();
    assert!(matches!(
        VideoState::from_snapshot(&snap),
        Err(Error::ModuleNotFound("VIC-II"))
    ));
}
