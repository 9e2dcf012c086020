use crate::app::App;
use clap::Subcommand;
use dotnet_acquire_core::Result;

pub mod cache;
pub mod install_script;
pub mod releases;

use self::cache::CacheCommands;

#[derive(Subcommand)]
pub enum Commands {
    /// Make sure the dotnet install script is on disk and print its path
    InstallScript,

    /// Show the dotnet release channels
    Releases {
        /// Only show this channel, e.g. 8.0
        #[arg(long)]
        channel: Option<String>,
    },

    /// Inspect or clear the response cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

impl Commands {
    pub async fn execute(self, app: &App) -> Result<()> {
        match self {
            Commands::InstallScript => install_script::execute(app).await,
            Commands::Releases { channel } => releases::execute(app, channel.as_deref()).await,
            Commands::Cache { command } => command.execute(app).await,
        }
    }
}
