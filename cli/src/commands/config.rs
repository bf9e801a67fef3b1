use color_eyre::eyre::{Result, WrapErr};

use crate::config::{config_path, palettes_dir, state_path, UserConfig};

pub fn run(path: bool, reset: bool, edit: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if reset {
        UserConfig::default()
            .save()
            .wrap_err("Failed to write default config")?;
        println!("Config reset to defaults at: {}", config_file.display());
        return Ok(());
    }

    if edit {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nano".to_string());

        if !config_file.exists() {
            UserConfig::default()
                .save()
                .wrap_err("Failed to write default config")?;
        }

        std::process::Command::new(&editor)
            .arg(&config_file)
            .status()
            .wrap_err_with(|| format!("Failed to launch editor '{}'", editor))?;

        return Ok(());
    }

    let config = UserConfig::load();
    println!("Config file:    {}", config_file.display());
    println!("Palettes dir:   {}", palettes_dir().display());
    println!("Active theme:   {}", state_path().display());
    println!();
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
