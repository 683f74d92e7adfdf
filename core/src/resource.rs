//! The endpoints document compiled into the binary.
//!
//! `include_dir!` embeds everything under `resources/` at build time. The
//! bundle lives in a `static` for the whole process and is never mutated, so
//! reads need no locking.

use include_dir::{Dir, DirEntry, include_dir};

use crate::error::{LookupFailure, ResourceReadError};

/// Logical name of the endpoints document inside the bundle.
pub const ENDPOINTS_RESOURCE: &str = "endpoints.json";

static BUNDLE: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/resources");

/// Return a copy of the bundled `endpoints.json`.
///
/// Every call reads the bundle again; there is no cache on top of it and
/// failures are not retried.
///
/// # Errors
///
/// Returns [`ResourceReadError`] if the bundle has no file named
/// [`ENDPOINTS_RESOURCE`].
pub fn get_resource_content() -> Result<Vec<u8>, ResourceReadError> {
    read_bundled(&BUNDLE, ENDPOINTS_RESOURCE)
}

pub(crate) fn read_bundled(bundle: &Dir<'_>, name: &str) -> Result<Vec<u8>, ResourceReadError> {
    match bundle.get_entry(name) {
        Some(DirEntry::File(file)) => Ok(file.contents().to_vec()),
        Some(DirEntry::Dir(_)) => Err(ResourceReadError {
            name:   name.to_string(),
            source: LookupFailure::NotAFile { name: name.to_string() },
        }),
        None => {
            let available = bundle
                .entries()
                .iter()
                .map(|e| e.path().to_string_lossy().into_owned())
                .collect();
            tracing::error!("bundled resource {} not found", name);
            Err(ResourceReadError {
                name:   name.to_string(),
                source: LookupFailure::Missing {
                    name: name.to_string(),
                    available,
                },
            })
        }
    }
}
