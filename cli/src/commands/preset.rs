use color_eyre::eyre::{Result, WrapErr};
use palettehub_theme::Preset;

use crate::config::UserConfig;

pub fn run(mut config: UserConfig, name: Option<Preset>) -> Result<()> {
    let Some(preset) = name else {
        for preset in Preset::ALL {
            let marker = if preset == config.preset { "*" } else { " " };
            println!("{} {}", marker, preset);
        }
        return Ok(());
    };

    config.preset = preset;
    config.save().wrap_err("Failed to save config")?;
    println!("Preset set to '{}'.", preset);
    Ok(())
}
