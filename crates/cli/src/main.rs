use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod app;
mod commands;

use app::App;
use commands::Commands;
use dotnet_acquire_core::events::ConsoleVerbosity;
use dotnet_acquire_utils::XdgPaths;

#[derive(Parser)]
#[command(name = "dotnet-acquire")]
#[command(about = "Acquire the dotnet install script and release index, with a persistent cache", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors on the console
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Directory the install script is written under
    #[arg(long, global = true, value_name = "DIR")]
    install_root: Option<PathBuf>,

    /// Response cache file
    #[arg(long, global = true, value_name = "FILE")]
    cache_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn console_verbosity(&self) -> ConsoleVerbosity {
        match (self.quiet, self.verbose) {
            (true, _) => ConsoleVerbosity::Quiet,
            (false, 0) => ConsoleVerbosity::Normal,
            (false, _) => ConsoleVerbosity::Verbose,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    dotnet_acquire_utils::tracing::init(cli.verbose)
        .map_err(|e| eyre::eyre!("Failed to initialize logging: {e}"))?;

    // Flags win over environment, environment over XDG defaults
    let mut config = XdgPaths::default_acquisition_config().apply_env()?;
    if let Some(root) = &cli.install_root {
        config = config.with_install_root(root);
    }
    if let Some(file) = &cli.cache_file {
        config = config.with_cache_file(file);
    }

    let app = App::init(config, cli.console_verbosity()).await?;
    let result = cli.command.execute(&app).await;
    app.shutdown().await;

    Ok(result?)
}
