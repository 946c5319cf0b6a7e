use std::sync::Arc;

use stencil_source::path::is_valid_logical_path;
use stencil_source::path::NATIVE_SEPARATOR;
use stencil_source::FileProvider;

use crate::provider_item::FileProviderProjectItem;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Path '{path}' must be non-empty and start with '/'")]
    InvalidPath { path: String },
    #[error("File name must not be empty")]
    EmptyFileName,
}

/// Resolves logical paths to [`FileProviderProjectItem`]s through a provider.
///
/// The optional root is passed to every item it creates and is only used to
/// derive relative physical paths.
#[derive(Clone)]
pub struct FileProviderProject {
    provider: Arc<dyn FileProvider>,
    root: Option<String>,
    separator: char,
}

impl FileProviderProject {
    #[must_use]
    pub fn new(provider: Arc<dyn FileProvider>, root: Option<String>) -> Self {
        Self {
            provider,
            root,
            separator: NATIVE_SEPARATOR,
        }
    }

    /// Separator items use when falling back to their logical path.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Resolve one logical path. The returned item may not exist.
    pub fn get_item(&self, path: &str) -> Result<FileProviderProjectItem, ProjectError> {
        ensure_valid_path(path)?;

        let file_info = self.provider.file_info(path);
        tracing::debug!(path, exists = file_info.exists(), "resolved project item");

        Ok(
            FileProviderProjectItem::new(file_info, "/", path, self.root.clone())
                .with_separator(self.separator),
        )
    }

    /// Items named `file_name` in each directory from `path` up to `base_path`.
    ///
    /// For `/Views/Home/Index.cshtml` and `_ViewImports.cshtml` this yields
    /// `/Views/Home/_ViewImports.cshtml`, `/Views/_ViewImports.cshtml` and
    /// `/_ViewImports.cshtml`, deepest first. When `path` itself is a
    /// `file_name` the walk starts in its parent directory. Items are returned
    /// whether or not they exist.
    pub fn find_hierarchical_items(
        &self,
        base_path: &str,
        path: &str,
        file_name: &str,
    ) -> Result<Vec<FileProviderProjectItem>, ProjectError> {
        hierarchical_paths(base_path, path, file_name)?
            .iter()
            .map(|item_path| self.get_item(item_path))
            .collect()
    }
}

fn ensure_valid_path(path: &str) -> Result<(), ProjectError> {
    if is_valid_logical_path(path) {
        Ok(())
    } else {
        Err(ProjectError::InvalidPath {
            path: path.to_string(),
        })
    }
}

fn hierarchical_paths(
    base_path: &str,
    path: &str,
    file_name: &str,
) -> Result<Vec<String>, ProjectError> {
    ensure_valid_path(path)?;
    if file_name.is_empty() {
        return Err(ProjectError::EmptyFileName);
    }

    if path.len() == 1 || !starts_with_ignore_ascii_case(path, base_path) {
        return Ok(Vec::new());
    }

    let base_len = base_path.trim_end_matches('/').len();

    // `ensure_valid_path` guarantees at least one `/`.
    let name_start = path.rfind('/').map_or(0, |index| index + 1);
    let mut end = if &path[name_start..] == file_name {
        name_start - 1
    } else {
        path.len()
    };

    let mut paths = Vec::new();
    while end > base_len {
        let Some(slash) = path[..end].rfind('/') else {
            break;
        };
        if slash < base_len {
            break;
        }
        paths.push(format!("{}{file_name}", &path[..=slash]));
        end = slash;
    }

    tracing::trace!(path, file_name, count = paths.len(), "hierarchical lookup");
    Ok(paths)
}

fn starts_with_ignore_ascii_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
