mod info;
pub mod path;
mod provider;

pub use info::file_name;
pub use info::FileInfo;
pub use info::NotFoundFileInfo;
pub use info::ReadStream;
pub use provider::CompositeFileProvider;
pub use provider::EmbeddedFileProvider;
pub use provider::FileProvider;
pub use provider::InMemoryFileProvider;
pub use provider::PhysicalFileProvider;
