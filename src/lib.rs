//! depot - minimal HTTP file storage service
//!
//! Clients upload files via multipart form, list them with disk-space
//! accounting, download them by name, and delete them. Stored files live
//! as direct children of a single storage root; client-supplied names are
//! reduced to their basename so no operation can escape the root.

pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{DepotError, Result};
pub use storage::{Capacity, FileEntry, FileRepository, Listing, StoredFile};
pub use web::WebServer;
