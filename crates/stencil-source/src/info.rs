use std::io;
use std::io::Read;

use camino::Utf8Path;

/// A boxed reader handed out by [`FileInfo::open_read`].
pub type ReadStream = Box<dyn Read + Send>;

/// The handle a [`FileProvider`](crate::FileProvider) returns for one logical path.
///
/// Implementations report the *current* state of their backing store, so
/// calling [`exists`](FileInfo::exists) twice may give different answers if
/// the store changed in between.
pub trait FileInfo: Send + Sync {
    /// Whether the backing store has content for this path right now.
    fn exists(&self) -> bool;

    /// Last segment of the logical path.
    fn name(&self) -> &str;

    /// Real location on disk, if the store has one.
    fn physical_path(&self) -> Option<&Utf8Path>;

    /// Content length in bytes, or `None` when the entry is missing.
    fn length(&self) -> Option<u64>;

    fn is_directory(&self) -> bool {
        false
    }

    /// Open a fresh reader positioned at the start of the content.
    ///
    /// Missing entries fail with [`io::ErrorKind::NotFound`].
    fn open_read(&self) -> io::Result<ReadStream>;
}

/// Handle for a path no provider could resolve.
#[derive(Clone, Debug)]
pub struct NotFoundFileInfo {
    name: String,
}

impl NotFoundFileInfo {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            name: file_name(path).to_string(),
        }
    }
}

impl FileInfo for NotFoundFileInfo {
    fn exists(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn physical_path(&self) -> Option<&Utf8Path> {
        None
    }

    fn length(&self) -> Option<u64> {
        None
    }

    fn open_read(&self) -> io::Result<ReadStream> {
        Err(not_found(&self.name))
    }
}

/// Final `/`-delimited segment of a logical path.
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub(crate) fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("File not found: {path}"))
}
