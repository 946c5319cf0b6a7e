use std::sync::Arc;

use crate::info::FileInfo;
use crate::info::NotFoundFileInfo;
use crate::provider::FileProvider;

/// Union of several providers, searched in order.
///
/// The first provider with an existing entry wins. Putting an
/// [`InMemoryFileProvider`](super::InMemoryFileProvider) first gives it
/// precedence over disk content.
#[derive(Clone, Default)]
pub struct CompositeFileProvider {
    providers: Vec<Arc<dyn FileProvider>>,
}

impl CompositeFileProvider {
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn FileProvider>>) -> Self {
        Self { providers }
    }

    /// Append a provider with lower precedence than the ones already added.
    #[must_use]
    pub fn with(mut self, provider: Arc<dyn FileProvider>) -> Self {
        self.providers.push(provider);
        self
    }
}

impl FileProvider for CompositeFileProvider {
    fn file_info(&self, path: &str) -> Arc<dyn FileInfo> {
        for (index, provider) in self.providers.iter().enumerate() {
            let info = provider.file_info(path);
            if info.exists() {
                tracing::trace!(path, index, "composite lookup hit");
                return info;
            }
        }
        Arc::new(NotFoundFileInfo::new(path))
    }
}
