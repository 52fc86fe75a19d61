//! The build host that consumes generated sources.

use std::path::{Path, PathBuf};

/// Receives the output directory once generation has finished.
///
/// A build tool implements this to add the directory to its compile
/// source roots.
pub trait BuildHost {
    fn add_compile_source_root(&mut self, path: &Path);
}

/// Collects registered roots in order.
impl BuildHost for Vec<PathBuf> {
    fn add_compile_source_root(&mut self, path: &Path) {
        self.push(path.to_path_buf());
    }
}
