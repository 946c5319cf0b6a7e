//! File lookup providers.
//!
//! A [`FileProvider`] resolves a logical, `/`-rooted path to a [`FileInfo`]
//! handle. Providers never fail a lookup: a path they cannot resolve comes
//! back as a handle whose [`FileInfo::exists`] is `false`.

mod composite;
mod embedded;
mod memory;
mod physical;

use std::sync::Arc;

pub use composite::CompositeFileProvider;
pub use embedded::EmbeddedFileProvider;
pub use memory::InMemoryFileProvider;
pub use physical::PhysicalFileProvider;

use crate::info::FileInfo;

pub trait FileProvider: Send + Sync {
    /// Look up the handle for a logical path such as `/Views/Home/Index.cshtml`.
    fn file_info(&self, path: &str) -> Arc<dyn FileInfo>;
}
