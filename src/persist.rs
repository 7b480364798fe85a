#![cfg(feature = "std")]

//! File-backed placement and statistics records.
//!
//! Both files are read and written whole. Read failures fall back to a
//! default (regenerate, or zeroed stats); write failures are logged and
//! otherwise ignored so the game is never blocked on disk I/O.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;
use crate::placement::{deploy_fleet, Deployment};
use crate::stats::Stats;

/// Read the saved placement text, `None` when the file is missing or
/// unreadable.
pub fn read_placement(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("unable to read placement {}: {}", path.display(), e);
            None
        }
    }
}

/// Overwrite `path` with `text`.
pub fn write_placement(path: &Path, text: &str) -> anyhow::Result<()> {
    fs::write(path, text)
        .with_context(|| format!("unable to save placement to {}", path.display()))
}

/// Lay out `board` from the placement file, regenerating (and saving the new
/// layout) when the file is missing or invalid.
pub fn load_or_generate<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    path: &Path,
) -> Result<Deployment, BoardError> {
    let saved = read_placement(path);
    let deployment = deploy_fleet(rng, board, saved.as_deref())?;
    save_generated(path, &deployment);
    Ok(deployment)
}

/// Persist a freshly generated layout. Failures are only logged.
pub fn save_generated(path: &Path, deployment: &Deployment) {
    if let Deployment::Generated(text) = deployment {
        match write_placement(path, text) {
            Ok(()) => log::info!("saved placement to {}", path.display()),
            Err(e) => log::warn!("{:#}", e),
        }
    }
}

/// Load statistics. A missing file yields zeroed stats; so does a corrupt
/// one, with a warning.
pub fn load_stats(path: &Path) -> Stats {
    match fs::read_to_string(path) {
        Ok(text) => text.parse().unwrap_or_else(|e| {
            log::warn!("ignoring corrupt stats {}: {}", path.display(), e);
            Stats::default()
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Stats::default(),
        Err(e) => {
            log::warn!("unable to read stats {}: {}", path.display(), e);
            Stats::default()
        }
    }
}

pub fn save_stats(path: &Path, stats: &Stats) -> anyhow::Result<()> {
    fs::write(path, stats.to_string())
        .with_context(|| format!("unable to save stats to {}", path.display()))
}
