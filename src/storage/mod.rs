//! On-disk storage for depot.
//!
//! This module provides the storage side of the service:
//! - basename sanitization for client-supplied names
//! - a statvfs capacity probe
//! - a flat file repository (upload, list, load, delete)

pub mod probe;
pub mod repository;
pub mod resolve;

pub use probe::{free_space, Capacity};
pub use repository::{FileEntry, FileRepository, Listing, StoredFile};
pub use resolve::sanitize;

/// One mebibyte, the unit for all human-facing size figures.
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Format a byte count as mebibytes with two decimals, no unit suffix.
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_PER_MB)
}
