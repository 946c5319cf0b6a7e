use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory files are served from. Defaults to the current directory.
    #[arg(global = true, long, value_name = "DIR")]
    pub project: Option<Utf8PathBuf>,

    /// Root that relative physical paths are computed against.
    /// Overrides the `root` setting; defaults to the project directory.
    /// Relative paths are resolved against the project directory.
    #[arg(global = true, long, value_name = "DIR")]
    pub root: Option<Utf8PathBuf>,

    /// Serve stdin at this logical path, shadowing any file on disk.
    #[arg(global = true, long = "embed-stdin", value_name = "PATH")]
    pub stdin: Option<String>,

    /// Do not print any output.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use verbose output.
    #[arg(global = true, action = clap::ArgAction::Count, long, short, conflicts_with = "quiet")]
    pub verbose: u8,
}
