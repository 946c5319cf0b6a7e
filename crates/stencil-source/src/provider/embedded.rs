use std::io;
use std::io::Cursor;
use std::sync::Arc;

use camino::Utf8Path;
use rustc_hash::FxHashMap;

use crate::info::file_name;
use crate::info::FileInfo;
use crate::info::NotFoundFileInfo;
use crate::info::ReadStream;
use crate::provider::FileProvider;

/// Serves a fixed bundle of resources compiled into the binary.
///
/// Embedded files have no physical location.
#[derive(Clone, Debug, Default)]
pub struct EmbeddedFileProvider {
    files: FxHashMap<String, &'static [u8]>,
}

impl EmbeddedFileProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` under a logical path. A later call for the same path wins.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: &'static [u8]) -> Self {
        self.files.insert(path.into(), content);
        self
    }
}

impl<P: Into<String>> FromIterator<(P, &'static [u8])> for EmbeddedFileProvider {
    fn from_iter<I: IntoIterator<Item = (P, &'static [u8])>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(path, content)| (path.into(), content))
                .collect(),
        }
    }
}

impl FileProvider for EmbeddedFileProvider {
    fn file_info(&self, path: &str) -> Arc<dyn FileInfo> {
        match self.files.get(path) {
            Some(&content) => Arc::new(EmbeddedFileInfo {
                name: file_name(path).to_string(),
                content,
            }),
            None => Arc::new(NotFoundFileInfo::new(path)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EmbeddedFileInfo {
    name: String,
    content: &'static [u8],
}

impl FileInfo for EmbeddedFileInfo {
    fn exists(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn physical_path(&self) -> Option<&Utf8Path> {
        None
    }

    fn length(&self) -> Option<u64> {
        Some(self.content.len() as u64)
    }

    fn open_read(&self) -> io::Result<ReadStream> {
        Ok(Box::new(Cursor::new(self.content)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn test_embedded_file_has_no_physical_path() {
        let provider =
            EmbeddedFileProvider::new().with_file("/Views/_Layout.cshtml", b"@RenderBody()");

        let info = provider.file_info("/Views/_Layout.cshtml");
        assert!(info.exists());
        assert!(info.physical_path().is_none());
        assert_eq!(info.name(), "_Layout.cshtml");
        assert_eq!(info.length(), Some(13));

        let mut content = String::new();
        info.open_read().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "@RenderBody()");
    }

    #[test]
    fn test_unknown_path() {
        let provider: EmbeddedFileProvider =
            [("/a.cshtml", b"a".as_slice())].into_iter().collect();

        assert!(provider.file_info("/a.cshtml").exists());
        assert!(!provider.file_info("/b.cshtml").exists());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let provider = EmbeddedFileProvider::new().with_file("/Index.cshtml", b"");
        assert!(!provider.file_info("/index.cshtml").exists());
    }
}
