use std::io;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::OnceLock;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use stencil_source::file_name;
use stencil_source::path::normalize_separators;
use stencil_source::path::NATIVE_SEPARATOR;
use stencil_source::ReadStream;

/// One logical template file, independent of where its bytes live.
///
/// The template system names and caches items by their logical
/// [`file_path`](ProjectItem::file_path). The physical side
/// ([`physical_path`](ProjectItem::physical_path) and
/// [`relative_physical_path`](ProjectItem::relative_physical_path)) exists for
/// diagnostics and stable cache keys and may be absent.
pub trait ProjectItem: Send + Sync {
    /// Logical prefix the item is grouped under, e.g. `/` or an area root.
    fn base_path(&self) -> &str;

    /// Logical, `/`-delimited path of the item.
    fn file_path(&self) -> &str;

    /// Whether the backing store has content for this item right now.
    fn exists(&self) -> bool;

    /// Real location reported by the backing store, if any.
    fn physical_path(&self) -> Option<&Utf8Path>;

    /// Physical path relative to a root chosen by the owner of the item.
    ///
    /// `None` while the item does not exist.
    fn relative_physical_path(&self) -> Option<&Utf8Path>;

    /// Open the item's content.
    ///
    /// Reading an item that does not exist fails with
    /// [`io::ErrorKind::NotFound`].
    fn read(&self) -> io::Result<ReadStream>;

    /// `base_path` and `file_path` joined without doubling the separator.
    fn combined_path(&self) -> String {
        combine_paths(self.base_path(), self.file_path())
    }

    /// Last segment of [`file_path`](ProjectItem::file_path).
    fn file_name(&self) -> &str {
        file_name(self.file_path())
    }

    /// Extension of the file name including the leading dot, e.g. `.cshtml`.
    fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        name.rfind('.').map(|index| &name[index..])
    }
}

fn combine_paths(base_path: &str, file_path: &str) -> String {
    if base_path.is_empty() || base_path == "/" {
        return file_path.to_string();
    }
    format!(
        "{}/{}",
        base_path.trim_end_matches('/'),
        file_path.trim_start_matches('/')
    )
}

/// An item the owning project could not resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotFoundProjectItem {
    base_path: String,
    file_path: String,
}

impl NotFoundProjectItem {
    #[must_use]
    pub fn new(base_path: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            file_path: file_path.into(),
        }
    }
}

impl ProjectItem for NotFoundProjectItem {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn exists(&self) -> bool {
        false
    }

    fn physical_path(&self) -> Option<&Utf8Path> {
        None
    }

    fn relative_physical_path(&self) -> Option<&Utf8Path> {
        None
    }

    fn read(&self) -> io::Result<ReadStream> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Project item not found: {}", self.file_path),
        ))
    }
}

/// An item whose content is held in memory, such as text piped on stdin.
///
/// It always exists and has no physical location; its relative physical
/// path is derived from the logical path.
#[derive(Debug)]
pub struct MemoryProjectItem {
    base_path: String,
    file_path: String,
    content: Arc<[u8]>,
    separator: char,
    relative_physical_path: OnceLock<Utf8PathBuf>,
}

impl MemoryProjectItem {
    #[must_use]
    pub fn new(
        base_path: impl Into<String>,
        file_path: impl Into<String>,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            file_path: file_path.into(),
            content: content.into(),
            separator: NATIVE_SEPARATOR,
            relative_physical_path: OnceLock::new(),
        }
    }

    /// Use `separator` instead of the host's when deriving the relative path.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

impl ProjectItem for MemoryProjectItem {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn exists(&self) -> bool {
        true
    }

    fn physical_path(&self) -> Option<&Utf8Path> {
        None
    }

    fn relative_physical_path(&self) -> Option<&Utf8Path> {
        let relative = self.relative_physical_path.get_or_init(|| {
            Utf8PathBuf::from(normalize_separators(&self.file_path, self.separator))
        });
        Some(relative.as_path())
    }

    fn read(&self) -> io::Result<ReadStream> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.content))))
    }
}
