//! Command implementations

mod cells;
mod files;
mod g2l;
mod polygon;
mod prepost;
mod xml;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

pub fn execute(cli: Cli) -> Result<()> {
    let writer = OutputWriter::new(cli.json);
    let config = crate::config_loader::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::G2l(args) => g2l::execute(args, config, &writer),
        Commands::Polygon(args) => polygon::execute(args, config, &writer),
        Commands::Xml(args) => xml::execute(args, config, &writer),
        Commands::Prepost(args) => prepost::execute(args, config, &writer),
        Commands::Cells(args) => cells::execute(args, &writer),
        Commands::Files(args) => files::execute(args, config, &writer),
    }
}
