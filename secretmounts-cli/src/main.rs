mod cli;
mod commands;
mod formatter;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.debug);

    match cli.command {
        cli::Commands::Prepare(args) => commands::prepare::execute(args, &cli.global)?,
        cli::Commands::CheckConfig(args) => commands::check_config::execute(args, &cli.global)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
