use std::io;
use std::io::Write as _;

use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use stencil_project::ProjectItem;

use crate::commands::Command;
use crate::commands::Context;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Read {
    /// Logical path of the file to print.
    path: String,
}

impl Command for Read {
    fn execute(&self, context: &Context) -> Result<Exit> {
        let item = context
            .project
            .get_item(&self.path)
            .with_context(|| format!("Failed to resolve '{}'", self.path))?;

        if !item.exists() {
            return Ok(Exit::error().with_message(format!("{}: not found", self.path)));
        }

        let mut stream = item
            .read()
            .with_context(|| format!("Failed to open '{}'", self.path))?;
        let mut stdout = io::stdout().lock();
        io::copy(&mut stream, &mut stdout).context("Failed to write to stdout")?;
        stdout.flush()?;

        Ok(Exit::success())
    }
}
