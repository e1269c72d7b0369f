//! Scoped temporary workspace for thumbnail generation.

use std::io;
use std::path::Path;

use tempfile::TempDir;

/// Scratch directory held for the duration of one pipeline invocation.
///
/// Each invocation gets its own directory under the configured workspace
/// root, so concurrent invocations never share paths. The directory is
/// removed when the workspace is closed or dropped, whichever comes first,
/// which keeps the root empty after every invocation regardless of how it
/// exited.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh scratch directory under `root`.
    pub fn create_in(root: &Path) -> io::Result<Workspace> {
        std::fs::create_dir_all(root)?;
        let dir = tempfile::Builder::new().prefix("ingest-").tempdir_in(root)?;
        tracing::debug!(path = %dir.path().display(), "workspace created");
        Ok(Workspace { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the scratch directory now, surfacing any I/O failure.
    ///
    /// Dropping the workspace also removes it; `close` is for callers that
    /// want the failure reported instead of swallowed.
    pub fn close(self) -> io::Result<()> {
        let path = self.dir.path().display().to_string();
        self.dir.close()?;
        tracing::debug!(path = %path, "workspace released");
        Ok(())
    }
}
