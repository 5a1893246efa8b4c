//! Filesystem capacity probe.

use std::path::Path;

use nix::sys::statvfs::statvfs;

use crate::{DepotError, Result};

/// Point-in-time read of total/available bytes on a storage volume.
///
/// Never persisted or cached; every caller takes a fresh snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Total bytes on the volume.
    pub total_bytes: u64,
    /// Bytes available to unprivileged writers.
    pub available_bytes: u64,
}

/// Stat the volume containing `path`.
///
/// The path must exist; probing a missing directory fails. Block counts
/// are converted to bytes using the fragment size, the unit statvfs
/// defines for its block counters.
pub fn probe(path: &Path) -> Result<Capacity> {
    let stat = statvfs(path)
        .map_err(|e| DepotError::Probe(format!("statvfs {}: {e}", path.display())))?;

    let frsize = stat.fragment_size() as u64;
    Ok(Capacity {
        total_bytes: stat.blocks() as u64 * frsize,
        available_bytes: stat.blocks_available() as u64 * frsize,
    })
}

/// Bytes available on the volume containing `path`.
pub fn free_space(path: &Path) -> Result<u64> {
    Ok(probe(path)?.available_bytes)
}
