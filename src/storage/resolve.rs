//! Client-supplied name sanitization.

use std::path::Path;

use crate::{DepotError, Result};

/// Reduce a client-supplied name to its final path component.
///
/// Directory components, traversal segments and leading slashes are all
/// discarded; only the basename survives. Inputs with no usable basename
/// (empty, `.`, `..`, `/`) are rejected.
///
/// Two distinct inputs whose basenames collide reduce to the same stored
/// name. Upload overwrites in that case; delete removes whichever file has
/// that basename.
pub fn sanitize(supplied: &str) -> Result<String> {
    let base = Path::new(supplied)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    if base.is_empty() || base == "." || base == ".." {
        return Err(DepotError::InvalidName(supplied.to_string()));
    }

    Ok(base.to_string())
}
