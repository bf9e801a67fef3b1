use color_eyre::eyre::{Result, WrapErr};
use palettehub_theme::{
    Color, CssVariables, JsonFileStore, Mode, ThemeManager, ThemeRoleSet, ThemeState,
};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::resolve_palette;
use crate::config::{self, UserConfig};

type Manager = ThemeManager<CssVariables, JsonFileStore>;

fn manager(config: &UserConfig) -> Manager {
    let mut manager = ThemeManager::new(
        CssVariables::new(),
        JsonFileStore::new(config::state_path()),
        config.engine_config(),
    );
    manager.set_preset(config.preset);
    manager
}

/// Manager with the persisted theme restored.
pub fn restored(config: &UserConfig) -> Manager {
    let mut manager = manager(config);
    manager.rehydrate();
    manager
}

#[derive(Serialize)]
struct ThemeReport<'a> {
    id: Option<&'a str>,
    name: Option<&'a str>,
    mode: Mode,
    roles: &'a ThemeRoleSet,
    published: &'a CssVariables,
}

fn print_theme(manager: &Manager, format: OutputFormat) -> Result<()> {
    let (ThemeState::Applied { mode, palette }, Some(roles)) = (manager.state(), manager.roles())
    else {
        println!("No palette theme is applied.");
        return Ok(());
    };

    match format {
        OutputFormat::Css => print!("{}", manager.sink().to_css()),
        OutputFormat::Json => {
            let report = ThemeReport {
                id: palette.id.as_deref(),
                name: palette.name.as_deref(),
                mode: *mode,
                roles,
                published: manager.sink(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).wrap_err("Failed to serialize theme")?
            );
        }
    }
    Ok(())
}

pub fn apply(
    config: &UserConfig,
    palette_id: Option<&str>,
    colors: &[Color],
    mode: Option<Mode>,
    format: OutputFormat,
) -> Result<()> {
    let palette = resolve_palette(palette_id, colors)?;
    let mut manager = manager(config);
    manager.apply(palette, mode.unwrap_or(config.default_mode));
    print_theme(&manager, format)
}

pub fn set_mode(config: &UserConfig, mode: Option<Mode>, format: OutputFormat) -> Result<()> {
    let mut manager = restored(config);
    let Some(current) = manager.state().mode() else {
        println!("No palette theme is applied. Use `palettehub apply` first.");
        return Ok(());
    };

    manager.set_mode(mode.unwrap_or_else(|| current.toggle()));
    print_theme(&manager, format)
}

pub fn clear(config: &UserConfig) -> Result<()> {
    let mut manager = manager(config);
    manager.clear();
    println!("Palette theme cleared.");
    if let Some(preset) = config.preset.attribute() {
        println!("Falling back to preset '{}'.", preset);
    }
    Ok(())
}

pub fn show(config: &UserConfig, format: OutputFormat) -> Result<()> {
    let manager = restored(config);
    print_theme(&manager, format)
}
