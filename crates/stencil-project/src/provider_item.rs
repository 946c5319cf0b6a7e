use std::fmt;
use std::io;
use std::sync::Arc;
use std::sync::OnceLock;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use stencil_source::path::normalize_separators;
use stencil_source::path::strip_root;
use stencil_source::path::NATIVE_SEPARATOR;
use stencil_source::FileInfo;
use stencil_source::ReadStream;

use crate::item::ProjectItem;

/// A [`ProjectItem`] backed by a handle from a
/// [`FileProvider`](stencil_source::FileProvider).
///
/// The item keeps the handle for its whole life and asks it for existence,
/// physical path and content on every call. The only state it keeps itself
/// is the relative physical path, which is derived once the backing file
/// exists and then never again.
pub struct FileProviderProjectItem {
    file_info: Arc<dyn FileInfo>,
    base_path: String,
    file_path: String,
    /// Used only to derive the relative physical path, never to locate the file.
    root: Option<String>,
    separator: char,
    relative_physical_path: OnceLock<Utf8PathBuf>,
}

impl FileProviderProjectItem {
    #[must_use]
    pub fn new(
        file_info: Arc<dyn FileInfo>,
        base_path: impl Into<String>,
        file_path: impl Into<String>,
        root: Option<String>,
    ) -> Self {
        Self {
            file_info,
            base_path: base_path.into(),
            file_path: file_path.into(),
            root,
            separator: NATIVE_SEPARATOR,
            relative_physical_path: OnceLock::new(),
        }
    }

    /// Use `separator` instead of the host's when falling back to the logical path.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    fn derive_relative_physical_path(&self) -> Utf8PathBuf {
        let physical = self
            .physical_path()
            .map(Utf8Path::as_str)
            .filter(|physical| !physical.is_empty());

        if let (Some(root), Some(physical)) = (self.root.as_deref(), physical) {
            if let Some(relative) = strip_root(physical, root) {
                return Utf8PathBuf::from(relative);
            }
            tracing::debug!(
                physical,
                root,
                "physical path is outside the root, using the logical path"
            );
        }

        Utf8PathBuf::from(normalize_separators(&self.file_path, self.separator))
    }
}

impl ProjectItem for FileProviderProjectItem {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn exists(&self) -> bool {
        self.file_info.exists()
    }

    fn physical_path(&self) -> Option<&Utf8Path> {
        self.file_info.physical_path()
    }

    fn relative_physical_path(&self) -> Option<&Utf8Path> {
        if let Some(relative) = self.relative_physical_path.get() {
            return Some(relative.as_path());
        }

        // Leave the cell empty so a later call can fill it once the file appears.
        if !self.exists() {
            return None;
        }

        let relative = self
            .relative_physical_path
            .get_or_init(|| self.derive_relative_physical_path());
        Some(relative.as_path())
    }

    fn read(&self) -> io::Result<ReadStream> {
        self.file_info.open_read()
    }
}

impl fmt::Debug for FileProviderProjectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileProviderProjectItem")
            .field("base_path", &self.base_path)
            .field("file_path", &self.file_path)
            .field("physical_path", &self.physical_path())
            .field("root", &self.root)
            .field("relative_physical_path", &self.relative_physical_path.get())
            .finish_non_exhaustive()
    }
}
