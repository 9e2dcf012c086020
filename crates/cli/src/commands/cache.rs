use crate::app::App;
use clap::Subcommand;
use dotnet_acquire_core::{Event, EventPublisher, Result};

#[derive(Subcommand)]
pub enum CacheCommands {
    /// List cached entries
    Show,
    /// Remove every cached entry
    Clear,
}

impl CacheCommands {
    pub async fn execute(self, app: &App) -> Result<()> {
        match self {
            CacheCommands::Show => {
                let entries = app.store.entries();
                if entries.is_empty() {
                    println!("Cache is empty ({})", app.store.path().display());
                    return Ok(());
                }
                for (key, entry) in entries {
                    println!(
                        "{key:<16} {:>9} bytes  stored {}",
                        entry.value.len(),
                        entry.stored_at.to_rfc3339()
                    );
                }
                Ok(())
            }
            CacheCommands::Clear => {
                let removed = app.store.clear()?;
                app.events.post(Event::cache_cleared(removed)).await;
                tracing::info!("Cleared {removed} cache entries");
                println!("Removed {removed} cache entries");
                Ok(())
            }
        }
    }
}
