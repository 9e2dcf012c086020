use crate::app::App;
use dotnet_acquire_acquisition::InstallScriptAcquisitionWorker;
use dotnet_acquire_core::Result;

pub async fn execute(app: &App) -> Result<()> {
    let worker =
        InstallScriptAcquisitionWorker::new(&app.config, app.store.clone(), app.events.clone())?;
    let path = worker.get_install_script_path().await?;
    println!("{}", path.display());
    Ok(())
}
