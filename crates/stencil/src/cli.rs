use std::process::ExitCode;

use anyhow::Context as _;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use stencil_conf::Settings;

use crate::args::Args;
use crate::commands::Context;
use crate::commands::StencilCommand;
use crate::logging;

/// The main CLI structure that defines the command-line interface
#[derive(Parser)]
#[command(name = "stencil")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: StencilCommand,

    #[command(flatten)]
    pub args: Args,
}

/// Parse CLI arguments and execute the chosen command
pub fn run(args: Vec<String>) -> Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });
    let global = &cli.args.global;

    let project_dir = match &global.project {
        Some(dir) => dir.clone(),
        None => current_dir()?,
    };
    let settings = Settings::new(&project_dir).context("Failed to load settings")?;

    let directive = logging::default_directive(global.quiet, global.verbose, settings.debug);
    let _guard = logging::init_tracing(directive, settings.log_dir.as_deref());

    let context = Context::new(global, settings, &project_dir)?;
    let exit = cli.command.execute(&context)?;

    Ok(exit.report(global.quiet))
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|_| anyhow::anyhow!("Current directory is not valid UTF-8"))
}
