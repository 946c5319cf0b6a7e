mod hierarchy;
mod inspect;
mod read;

use std::io::Read as _;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Context as _;
use anyhow::Result;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use clap::Subcommand;
use stencil_conf::Settings;
use stencil_project::FileProviderProject;
use stencil_source::path::canonicalize_utf8;
use stencil_source::path::is_valid_logical_path;
use stencil_source::CompositeFileProvider;
use stencil_source::FileProvider;
use stencil_source::InMemoryFileProvider;
use stencil_source::PhysicalFileProvider;

use crate::args::GlobalArgs;
use crate::exit::Exit;

pub trait Command {
    fn execute(&self, context: &Context) -> Result<Exit>;
}

#[derive(Debug, Subcommand)]
pub enum StencilCommand {
    /// Show existence and path information for logical paths
    Inspect(self::inspect::Inspect),
    /// Write the content of a logical path to stdout
    Read(self::read::Read),
    /// List the files of a given name that govern a logical path
    Hierarchy(self::hierarchy::Hierarchy),
}

impl StencilCommand {
    pub fn execute(&self, context: &Context) -> Result<Exit> {
        match self {
            StencilCommand::Inspect(command) => command.execute(context),
            StencilCommand::Read(command) => command.execute(context),
            StencilCommand::Hierarchy(command) => command.execute(context),
        }
    }
}

/// Everything a command needs: the resolved project and the loaded settings.
pub struct Context {
    pub project: FileProviderProject,
    pub settings: Settings,
}

impl Context {
    pub fn new(args: &GlobalArgs, settings: Settings, project_dir: &Utf8Path) -> Result<Self> {
        let physical = PhysicalFileProvider::new(project_dir.to_owned());

        let root = match args
            .root
            .as_deref()
            .map(|root| absolute(root, project_dir))
            .or_else(|| settings.resolved_root(project_dir))
        {
            Some(root) => canonicalize_utf8(&root).unwrap_or(root),
            None => physical.root().to_owned(),
        };

        let mut providers: Vec<Arc<dyn FileProvider>> = Vec::new();
        if let Some(path) = &args.stdin {
            providers.push(Arc::new(stdin_overlay(path)?));
        }
        providers.push(Arc::new(physical));

        tracing::debug!(%project_dir, %root, providers = providers.len(), "opened project");

        let project = FileProviderProject::new(
            Arc::new(CompositeFileProvider::new(providers)),
            Some(root.into_string()),
        );

        Ok(Self { project, settings })
    }
}

fn stdin_overlay(path: &str) -> Result<InMemoryFileProvider> {
    if !is_valid_logical_path(path) {
        bail!("--embed-stdin path '{path}' must start with '/'");
    }

    let mut content = Vec::new();
    std::io::stdin()
        .read_to_end(&mut content)
        .context("Failed to read stdin")?;

    let overlay = InMemoryFileProvider::new();
    overlay.add_file(path, content);
    Ok(overlay)
}

fn absolute(path: &Utf8Path, base: &Utf8Path) -> Utf8PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_owned()
    }
}
