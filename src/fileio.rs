//! File input/output helpers
//!
//! Transparent decompression of gzip-compressed snapshot files and
//! timestamped naming of the exported images. The snapshot core itself
//! never touches the file system; everything that does lives here.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::Local;
use flate2::read::GzDecoder;
use log::{info, warn};

/// Read a snapshot file into memory, transparently decompressing gzip.
pub fn read_snapshot(path: &Path) -> io::Result<Vec<u8>> {
    let raw = fs::read(path)?;
    if raw.starts_with(&[0x1f, 0x8b]) {
        let mut data = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut data)?;
        return Ok(data);
    }
    Ok(raw)
}

/// Base name of a snapshot file, with any compression suffix stripped
/// ("shot.vsf.gz" and "shot.vsf" both give "shot").
pub fn basename(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("snapshot");
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".gz") || lower.ends_with(".bz2") {
        return name.split('.').next().unwrap_or(name).to_string();
    }
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
        .to_string()
}

/// Write one packed image as `stem_TIMESTAMP.ext` under `outdir`.
///
/// Returns false when a file with that name already exists and
/// `overwrite` is not set.
pub fn save_image(
    outdir: &Path,
    stem: &str,
    ext: &str,
    data: &[u8],
    overwrite: bool,
) -> io::Result<bool> {
    let ext = ext.trim_start_matches('.');
    let timestamp = Local::now().format("%Y-%m-%d_%H%M");
    let outfile: PathBuf = outdir.join(format!("{stem}_{timestamp}.{ext}"));

    info!("writing {} : {:5} bytes", outfile.display(), data.len());

    if outfile.exists() && !overwrite {
        warn!("a file with that name already exists: {}", outfile.display());
        return Ok(false);
    }

    fs::write(outfile, data)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_strips_compression_suffix() {
        assert_eq!(basename(Path::new("/tmp/shot.vsf")), "shot");
        assert_eq!(basename(Path::new("shot.vsf.gz")), "shot");
        assert_eq!(basename(Path::new("shot.vsf.BZ2")), "shot");
        assert_eq!(basename(Path::new("noext")), "noext");
    }

    #[test]
    fn test_read_snapshot_passes_plain_files_through() {
        let dir = std::env::temp_dir();
        let path = dir.join("xsnap_plain_test.bin");
        fs::write(&path, b"plain bytes").unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), b"plain bytes");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_snapshot_decompresses_gzip() {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"snapshot payload").unwrap();
        let gz = encoder.finish().unwrap();

        let dir = std::env::temp_dir();
        let path = dir.join("xsnap_gzip_test.bin.gz");
        fs::write(&path, &gz).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), b"snapshot payload");
        let _ = fs::remove_file(&path);
    }
}
