use std::io;
use std::io::Cursor;
use std::sync::Arc;

use camino::Utf8Path;
use dashmap::DashMap;

use crate::info::file_name;
use crate::info::not_found;
use crate::info::FileInfo;
use crate::info::ReadStream;
use crate::provider::FileProvider;

type Files = Arc<DashMap<String, Arc<[u8]>>>;

/// Mutable in-memory overlay of files keyed by logical path.
///
/// Clones share the same storage, so one clone can be handed to a
/// [`CompositeFileProvider`](super::CompositeFileProvider) while another keeps
/// writing to it. Handles returned by [`file_info`](FileProvider::file_info)
/// look their entry up on every call and therefore observe later writes.
#[derive(Clone, Debug, Default)]
pub struct InMemoryFileProvider {
    files: Files,
}

impl InMemoryFileProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the content at `path`.
    pub fn add_file(&self, path: impl Into<String>, content: impl Into<Arc<[u8]>>) {
        let path = path.into();
        tracing::trace!(path = %path, "overlay file added");
        self.files.insert(path, content.into());
    }

    /// Remove the file at `path`, returning its content if it was present.
    pub fn remove_file(&self, path: &str) -> Option<Arc<[u8]>> {
        self.files.remove(path).map(|(_, content)| content)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

impl FileProvider for InMemoryFileProvider {
    fn file_info(&self, path: &str) -> Arc<dyn FileInfo> {
        Arc::new(MemoryFileInfo {
            files: Arc::clone(&self.files),
            path: path.to_string(),
        })
    }
}

/// Live view of one overlay entry.
#[derive(Clone, Debug)]
pub struct MemoryFileInfo {
    files: Files,
    path: String,
}

impl MemoryFileInfo {
    fn content(&self) -> Option<Arc<[u8]>> {
        self.files.get(&self.path).map(|entry| Arc::clone(entry.value()))
    }
}

impl FileInfo for MemoryFileInfo {
    fn exists(&self) -> bool {
        self.files.contains_key(&self.path)
    }

    fn name(&self) -> &str {
        file_name(&self.path)
    }

    fn physical_path(&self) -> Option<&Utf8Path> {
        None
    }

    fn length(&self) -> Option<u64> {
        self.content().map(|content| content.len() as u64)
    }

    fn open_read(&self) -> io::Result<ReadStream> {
        let content = self.content().ok_or_else(|| not_found(&self.path))?;
        Ok(Box::new(Cursor::new(content)))
    }
}
