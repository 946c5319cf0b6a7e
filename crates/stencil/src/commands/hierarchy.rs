use anyhow::Result;
use clap::Parser;
use stencil_project::ProjectItem;

use crate::commands::Command;
use crate::commands::Context;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Hierarchy {
    /// Logical path to start from, e.g. `/Views/Home/Index.cshtml`.
    path: String,

    /// File name to look for in each directory, e.g. `_ViewImports.cshtml`.
    file_name: String,

    /// Stop at this logical prefix instead of the `base_path` setting.
    #[arg(long)]
    base_path: Option<String>,

    /// Only list files that exist.
    #[arg(long)]
    existing: bool,
}

impl Command for Hierarchy {
    fn execute(&self, context: &Context) -> Result<Exit> {
        let base_path = self
            .base_path
            .as_deref()
            .unwrap_or(&context.settings.base_path);

        let items = context
            .project
            .find_hierarchical_items(base_path, &self.path, &self.file_name)?;

        for item in items.iter().filter(|item| !self.existing || item.exists()) {
            println!("{}", item.file_path());
        }

        Ok(Exit::success())
    }
}
