mod item;
mod project;
mod provider_item;

pub use item::MemoryProjectItem;
pub use item::NotFoundProjectItem;
pub use item::ProjectItem;
pub use project::FileProviderProject;
pub use project::ProjectError;
pub use provider_item::FileProviderProjectItem;
