//! Recording filename resolution.

use std::path::{Path, PathBuf};

/// Normalise a user-supplied base name into the canonical recording path.
///
/// Appends `.log` when the name carries no extension; names without a path
/// separator resolve under `dir`, names with one are used as given. Pure
/// string transform, no filesystem access.
pub fn resolve_recording_filename(name: &str, dir: &Path) -> PathBuf {
    let filename = if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{name}.log")
    };

    if name.contains(['/', '\\']) {
        PathBuf::from(filename)
    } else {
        dir.join(filename)
    }
}
