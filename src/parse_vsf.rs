//! VSF container parser
//!
//! Walks the tagged-module layout of a VICE snapshot file (19-byte magic,
//! file header, optional version sub-record, then a stream of self-describing
//! modules) and collects file-level metadata plus every module payload.
//! Interpretation of individual module payloads lives in `hardware`.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info};

use crate::error::Error;

/// File magic ("VICE Snapshot File" + $1a separator).
pub const VSF_MAGIC: &[u8; 19] = b"VICE Snapshot File\x1a";

/// Magic of the optional version sub-record (VICE 2.4.30 and later).
const VERSION_MAGIC: &[u8; 13] = b"VICE Version\x1a";

/// Module header size: magic(16) + major(1) + minor(1) + size(4).
pub const MODULE_HEADER_SIZE: u32 = 22;

/* ======================= Module ======================= */

/// One tagged chunk of the snapshot stream.
///
/// `size` is the total module size including the 22-byte header, exactly
/// as stored in the file; `payload` holds the remaining `size - 22` bytes.
#[derive(Debug, Clone)]
pub struct Module {
    pub magic: String,
    pub major: u8,
    pub minor: u8,
    pub size: u32,
    pub payload: Vec<u8>,
}

impl Module {
    pub fn version(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

/* ======================= Snapshot ======================= */

#[derive(Debug)]
pub struct Snapshot {
    pub major: u8,
    pub minor: u8,
    pub machine: String,
    pub vice_version: [u8; 4],
    pub vice_revision: u32,
    pub modules: Vec<Module>,
}

impl Snapshot {
    /// Parse a whole snapshot from an in-memory byte stream.
    pub fn parse(raw: &[u8]) -> Result<Self, Error> {
        let mut cur = Cursor::new(raw);

        let mut magic = [0u8; 19];
        read_exact(&mut cur, &mut magic)?;
        if &magic != VSF_MAGIC {
            return Err(Error::Format("not a VSF snapshot - invalid magic".into()));
        }

        let major = read_u8(&mut cur)?;
        let minor = read_u8(&mut cur)?;

        let mut name = [0u8; 16];
        read_exact(&mut cur, &mut name)?;
        let machine = trim_nul(&name).to_string();

        // VICE version sub-record is present only in snapshots written by
        // VICE 2.4.30 or later. On a legacy snapshot, rewind and carry on
        // with zeroed version fields.
        let mark = cur.position();
        let mut version_magic = [0u8; 13];
        let has_version = cur.read_exact(&mut version_magic).is_ok() && version_magic == *VERSION_MAGIC;
        let (vice_version, vice_revision) = if has_version {
            let mut version = [0u8; 4];
            read_exact(&mut cur, &mut version)?;
            let revision = read_u32(&mut cur)?;
            (version, revision)
        } else {
            debug!("pre VICE 2.4.30 snapshot, no version record");
            cur.set_position(mark);
            ([0u8; 4], 0)
        };

        info!(
            "VSF snapshot version {}.{}, machine {}",
            major, minor, machine
        );
        if major > 1 {
            info!(
                "VICE version {}.{}.{}.{} rev. {}",
                vice_version[0], vice_version[1], vice_version[2], vice_version[3], vice_revision
            );
        }

        // Read all modules. A zero-length read signals end of stream; a
        // partial module header or payload is a broken file.
        let mut modules = Vec::new();
        while (cur.position() as usize) < raw.len() {
            modules.push(read_module(&mut cur, raw)?);
        }

        Ok(Self {
            major,
            minor,
            machine,
            vice_version,
            vice_revision,
            modules,
        })
    }

    /// Find the first module with the given tag.
    pub fn find_module(&self, tag: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.magic == tag)
    }

    pub fn is_c64(&self) -> bool {
        self.machine == "C64"
    }

    pub fn version(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

fn read_module(cur: &mut Cursor<&[u8]>, raw: &[u8]) -> Result<Module, Error> {
    let start = cur.position() as usize;

    let mut tag = [0u8; 16];
    read_exact(cur, &mut tag)?;
    let magic = trim_nul(&tag).to_string();
    let major = read_u8(cur)?;
    let minor = read_u8(cur)?;
    let size = read_u32(cur)?;

    let payload_len = size
        .checked_sub(MODULE_HEADER_SIZE)
        .ok_or_else(|| Error::Format(format!("module '{}' size corrupt", magic)))?
        as usize;

    let pos = cur.position() as usize;
    let end = pos + payload_len;
    if end > raw.len() {
        return Err(Error::Format(format!("module '{}' beyond EOF", magic)));
    }
    let payload = raw[pos..end].to_vec();
    cur.set_position(end as u64);

    debug!(
        "  {:07x}  {:16}  {}.{}  {:>8}  {:>8}",
        start,
        magic,
        major,
        minor,
        size,
        payload.len()
    );

    Ok(Module {
        magic,
        major,
        minor,
        size,
        payload,
    })
}

/* ======================= Helper functions ======================= */

fn read_exact(cur: &mut Cursor<&[u8]>, buf: &mut [u8]) -> Result<(), Error> {
    cur.read_exact(buf)
        .map_err(|_| Error::Format("unexpected end of file".into()))
}

fn read_u8(cur: &mut Cursor<&[u8]>) -> Result<u8, Error> {
    cur.read_u8()
        .map_err(|_| Error::Format("unexpected end of file".into()))
}

fn read_u32(cur: &mut Cursor<&[u8]>) -> Result<u32, Error> {
    cur.read_u32::<LittleEndian>()
        .map_err(|_| Error::Format("unexpected end of file".into()))
}

fn trim_nul(bytes: &[u8]) -> &str {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).unwrap_or("")
}
