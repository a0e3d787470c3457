//! Command-line interface for the VICE snapshot screenshot extractor
//!
//! Usage: xsnap [-o OUTDIR] [-f] <snapshot.vsf>...
//!
//! Processes each snapshot in turn; a broken file is reported and the
//! batch continues with the next one.
//!
//! This program is unlicensed and dedicated to the public domain.
//! Developed by Tommy Olsen.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, warn};

use xsnap::error::Error;
use xsnap::hardware::VideoState;
use xsnap::parse_vsf::Snapshot;
use xsnap::{export, fileio, screen};

#[derive(Parser, Debug)]
#[command(name = "xsnap", version, about = "Create screenshot image files from VICE snapshot files")]
struct Cli {
    /// Output directory (defaults to each snapshot's own directory)
    #[arg(short, long)]
    outdir: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(short = 'f', long)]
    overwrite: bool,

    /// VSF snapshot file(s), optionally gzip-compressed
    #[arg(required = true)]
    snapshot_file: Vec<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(outdir) = &cli.outdir {
        if !outdir.is_dir() {
            error!("not a directory: {}", outdir.display());
            process::exit(2);
        }
    }

    let mut failed = false;
    for file in &cli.snapshot_file {
        if let Err(e) = extract_images(file, cli.outdir.as_deref(), cli.overwrite) {
            error!("{}: {:#}", file.display(), e);
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}

/// Extract and save every image the snapshot's screen mode maps to.
fn extract_images(file: &Path, outdir: Option<&Path>, overwrite: bool) -> Result<()> {
    let raw = fileio::read_snapshot(file)
        .with_context(|| format!("cannot read '{}'", file.display()))?;
    let snap = Snapshot::parse(&raw)?;

    if !snap.is_c64() {
        warn!(
            "VICE snapshot, {} machine, screenshots unsupported",
            snap.machine
        );
        return Ok(());
    }

    let state = VideoState::from_snapshot(&snap)?;
    state.log_info();

    if state.vic2.has_active_sprites() {
        warn!("snapshot file has active sprites, screenshot images may not reflect the actual screen");
    }

    let record = match screen::extract(&state) {
        Ok(record) => record,
        Err(e @ Error::UnsupportedMode(_)) => {
            warn!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let outdir = match outdir {
        Some(dir) => dir.to_path_buf(),
        None => file.parent().unwrap_or(Path::new(".")).to_path_buf(),
    };
    let stem = fileio::basename(file);

    for (ext, data) in export::images(&record) {
        fileio::save_image(&outdir, &stem, ext, &data, overwrite)
            .with_context(|| format!("cannot write {stem}.{ext}"))?;
    }

    Ok(())
}
