//! `packaroo preset`: saved configuration management.

use crate::cli::{RuntimeConfig, args::PresetCommand};
use crate::error::Result;
use crate::presets::{default_configuration, load_from_file};

/// Runs one preset operation.
pub async fn execute(action: &PresetCommand, config: &RuntimeConfig) -> Result<i32> {
    let store = config.presets();

    match action {
        PresetCommand::List => {
            let names = store.list().await?;
            if names.is_empty() {
                config.verbose_println(&format!(
                    "No presets in {}",
                    store.directory().display()
                ))?;
            }
            for name in names {
                config.output().data(&name)?;
            }
        }
        PresetCommand::Show { name } => {
            let preset = store.load(name).await?;
            config
                .output()
                .data(&serde_json::to_string_pretty(&preset)?)?;
        }
        PresetCommand::Save { name, config: file } => {
            let preset = match file {
                Some(file) => load_from_file(file).await?,
                None => default_configuration(),
            };
            store.save(name, &preset).await?;
            config.success(&format!("Saved preset '{name}'"))?;
        }
        PresetCommand::Delete { name } => {
            store.delete(name).await?;
            config.success(&format!("Deleted preset '{name}'"))?;
        }
    }

    Ok(0)
}
