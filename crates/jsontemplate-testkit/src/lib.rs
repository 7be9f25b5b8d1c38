//! Shared test support for the jsontemplate workspace
//!
//! Temporary template directories live under `.tmp/` next to the crate under
//! test rather than in the system temp dir, so a failing run leaves its files
//! somewhere easy to inspect.

pub mod fixtures;

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use fixtures::{people_data, site_data, write_templates};

/// Directory, relative to the working directory, holding test scratch dirs
pub const SCRATCH_DIR: &str = ".tmp";

/// Fresh scratch directory under [`SCRATCH_DIR`], removed on drop
///
/// # Panics
///
/// Panics if the scratch directory cannot be created.
///
/// ```rust
/// use jsontemplate_testkit::{temp_dir_in_workspace, write_file};
///
/// let temp = temp_dir_in_workspace();
/// let page = write_file(temp.path(), "page.jsont", "Hello {name}");
/// assert!(page.ends_with("page.jsont"));
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace()
        .unwrap_or_else(|e| panic!("cannot create scratch dir in {SCRATCH_DIR}/: {e}"))
}

pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let base = std::env::current_dir()?.join(SCRATCH_DIR);
    std::fs::create_dir_all(&base)?;
    tempfile::Builder::new().prefix("jsont-").tempdir_in(base)
}

/// Write `contents` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("cannot create {}: {e}", parent.display()));
    }
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    path
}
