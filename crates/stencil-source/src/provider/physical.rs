use std::fs;
use std::io;
use std::sync::Arc;

use camino::Utf8Path;
use camino::Utf8PathBuf;

use crate::info::file_name;
use crate::info::not_found;
use crate::info::FileInfo;
use crate::info::NotFoundFileInfo;
use crate::info::ReadStream;
use crate::path::canonicalize_utf8;
use crate::path::safe_join;
use crate::provider::FileProvider;

/// Serves files out of a directory on disk.
#[derive(Clone, Debug)]
pub struct PhysicalFileProvider {
    root: Utf8PathBuf,
}

impl PhysicalFileProvider {
    /// Create a provider rooted at `root`.
    ///
    /// The root is canonicalized when it exists so that physical paths
    /// handed out later share a stable prefix with it.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        let root = root.into();
        let root = canonicalize_utf8(&root).unwrap_or(root);
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl FileProvider for PhysicalFileProvider {
    fn file_info(&self, path: &str) -> Arc<dyn FileInfo> {
        match safe_join(&self.root, path) {
            Ok(physical) => {
                tracing::trace!(logical = path, physical = %physical, "resolved physical file");
                Arc::new(PhysicalFileInfo::new(physical))
            }
            Err(err) => {
                tracing::debug!("rejected lookup outside provider root: {err}");
                Arc::new(NotFoundFileInfo::new(path))
            }
        }
    }
}

/// Handle for a file that lives on disk.
///
/// Every query goes back to the filesystem; nothing is cached.
#[derive(Clone, Debug)]
pub struct PhysicalFileInfo {
    path: Utf8PathBuf,
}

impl PhysicalFileInfo {
    #[must_use]
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl FileInfo for PhysicalFileInfo {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        self.path
            .file_name()
            .unwrap_or_else(|| file_name(self.path.as_str()))
    }

    fn physical_path(&self) -> Option<&Utf8Path> {
        Some(&self.path)
    }

    fn length(&self) -> Option<u64> {
        fs::metadata(&self.path)
            .ok()
            .filter(fs::Metadata::is_file)
            .map(|meta| meta.len())
    }

    fn is_directory(&self) -> bool {
        self.path.is_dir()
    }

    fn open_read(&self) -> io::Result<ReadStream> {
        if self.path.is_dir() {
            return Err(not_found(self.path.as_str()));
        }
        let file = fs::File::open(&self.path)?;
        Ok(Box::new(file))
    }
}
