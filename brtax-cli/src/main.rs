use clap::Parser;

use brtax_cli::cli::{Cli, run};
use brtax_cli::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let output = run(&cli)?;
    println!("{}", output.trim_end());

    Ok(())
}
