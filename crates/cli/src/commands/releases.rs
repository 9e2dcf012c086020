use crate::app::App;
use dotnet_acquire_acquisition::{ReleaseChannel, ReleaseManifestWorker};
use dotnet_acquire_core::{Error, Result};

pub async fn execute(app: &App, channel: Option<&str>) -> Result<()> {
    let worker = ReleaseManifestWorker::new(&app.config, app.store.clone(), app.events.clone())?;
    let index = worker.get_releases_index().await?;

    match channel {
        Some(version) => {
            let found = index.channel(version).ok_or_else(|| {
                Error::configuration(format!("unknown release channel '{version}'"))
            })?;
            print_channel(found);
        }
        None => index.channels().iter().for_each(print_channel),
    }

    Ok(())
}

fn print_channel(channel: &ReleaseChannel) {
    println!(
        "{:<8} sdk {:<24} runtime {:<24} {}",
        channel.channel_version,
        channel.latest_sdk,
        channel.latest_runtime,
        channel.support_phase.as_deref().unwrap_or("-"),
    );
}
