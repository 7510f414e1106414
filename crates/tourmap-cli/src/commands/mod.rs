//! Command implementations

mod bounds;
mod inspect;
mod render;
mod validate;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Render(args) => render::execute(args, &output),
        Commands::Validate(args) => validate::execute(args, &output),
        Commands::Inspect(args) => inspect::execute(args, &output),
        Commands::Bounds(args) => bounds::execute(args, &output),
    }
}
